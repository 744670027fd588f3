//! Stroke rasterization. Every stroke stamps a disk brush of radius
//! `(brush - 1) / 2` at each point of its integer path.

use super::{Canvas, Color};

/// Odd brush size ≥ 1: even sizes round down, anything below 1 becomes 1.
pub fn normalize_brush(brush: i64) -> i64 {
    let brush = if brush.rem_euclid(2) == 0 { brush - 1 } else { brush };
    brush.max(1)
}

fn brush_radius(brush: i64) -> i64 {
    (normalize_brush(brush) - 1) / 2
}

/// Octant `x` for row offset `y`: the nearest cell to the true circle.
/// Negative once `y` passes the radius.
fn octant_x(r: i64, y: i64) -> i64 {
    let d = i128::from(r) * i128::from(r) - i128::from(y) * i128::from(y);
    if d < 0 { return -1; }
    (d as f64).sqrt().round() as i64
}

/// Liang–Barsky clip of a segment to the square `[lo, hi]²`. Clipped
/// endpoints are rounded back onto the grid; `None` when nothing is left.
fn clip_segment(x1: i64, y1: i64, x2: i64, y2: i64, lo: i64, hi: i64) -> Option<(i64, i64, i64, i64)> {
    if lo > hi { return None; }
    let (fx, fy) = (x1 as f64, y1 as f64);
    let (dx, dy) = ((x2 - x1) as f64, (y2 - y1) as f64);
    let (lo_f, hi_f) = (lo as f64, hi as f64);
    let (mut t0, mut t1) = (0.0_f64, 1.0_f64);

    for (p, q) in [(-dx, fx - lo_f), (dx, hi_f - fx), (-dy, fy - lo_f), (dy, hi_f - fy)] {
        if p == 0.0 {
            if q < 0.0 { return None; }
            continue;
        }
        let t = q / p;
        if p < 0.0 {
            if t > t1 { return None; }
            t0 = t0.max(t);
        } else {
            if t < t0 { return None; }
            t1 = t1.min(t);
        }
    }

    let at = |t: f64| {
        let x = (fx + t * dx).round() as i64;
        let y = (fy + t * dy).round() as i64;
        (x.clamp(lo, hi), y.clamp(lo, hi))
    };
    // untouched ends stay exact
    let (ax, ay) = if t0 == 0.0 { (x1, y1) } else { at(t0) };
    let (bx, by) = if t1 == 1.0 { (x2, y2) } else { at(t1) };
    Some((ax, ay, bx, by))
}

impl Canvas {
    /// Paints one brush disk centred on `(cx, cy)`.
    pub fn stamp(&mut self, cx: i64, cy: i64, color: Color, brush: i64) {
        self.stamp_radius(cx, cy, color, brush_radius(brush));
    }

    /// Bresenham walk from `(x1, y1)` to `(x2, y2)`, both ends inclusive.
    /// The segment is first clipped to the cells a brush stamp can reach
    /// from, so far off-canvas endpoints cost nothing.
    pub fn draw_line(&mut self, x1: i64, y1: i64, x2: i64, y2: i64, color: Color, brush: i64) {
        let radius = brush_radius(brush);
        let (lo, hi) = self.reach(radius);
        let Some((x1, y1, x2, y2)) = clip_segment(x1, y1, x2, y2, lo, hi) else { return };

        let dx = (x2 - x1).abs();
        let dy = -(y2 - y1).abs();
        let sx = if x1 < x2 { 1 } else { -1 };
        let sy = if y1 < y2 { 1 } else { -1 };
        let mut err = dx + dy;
        let (mut x, mut y) = (x1, y1);

        loop {
            self.stamp_radius(x, y, color, radius);
            if x == x2 && y == y2 { break; }
            let e2 = 2 * err;
            if e2 >= dy { err += dy; x += sx; }
            if e2 <= dx { err += dx; y += sy; }
        }
    }

    /// Circle centred on `(cx, cy)`. A negative radius draws the same circle
    /// as its absolute value; radius 0 is a single stamp.
    ///
    /// Walks one octant (`y` up from 0 while `x >= y`) and mirrors each point
    /// eight ways. Every mirrored point uses `y` as its offset on one axis, so
    /// only the `y` windows that put that axis within reach are visited.
    pub fn draw_circle(&mut self, cx: i64, cy: i64, radius: i64, color: Color, brush: i64) {
        let r = radius.abs();
        let brush_r = brush_radius(brush);
        if !self.bbox_in_reach(cx - r, cy - r, cx + r, cy + r, brush_r) {
            return;
        }

        let (lo, hi) = self.reach(brush_r);
        let mut windows: Vec<(i64, i64)> = [cx, cy].into_iter()
            .flat_map(|c| [(lo - c, hi - c), (c - hi, c - lo)])
            .map(|(from, to)| (from.max(0), to))
            .filter(|(from, to)| from <= to)
            .collect();
        windows.sort_unstable();

        let mut next = 0;
        for (from, to) in windows {
            for y in from.max(next)..=to {
                let x = octant_x(r, y);
                if x < y { return; }
                for (px, py) in [(x, y), (y, x), (-y, x), (-x, y), (-x, -y), (-y, -x), (y, -x), (x, -y)] {
                    self.stamp_radius(cx + px, cy + py, color, brush_r);
                }
            }
            next = next.max(to + 1);
        }
    }

    /// Border of a `width × height` rectangle centred on `(cx, cy)`.
    /// For even sizes the extra column/row falls on the right/bottom.
    pub fn draw_rectangle(&mut self, cx: i64, cy: i64, width: i64, height: i64, color: Color, brush: i64) {
        if width <= 0 || height <= 0 { return; }
        let left = cx - width / 2;
        let top = cy - height / 2;
        let right = left + width - 1;
        let bottom = top + height - 1;

        self.draw_line(left, top, right, top, color, brush);
        self.draw_line(right, top, right, bottom, color, brush);
        self.draw_line(right, bottom, left, bottom, color, brush);
        self.draw_line(left, bottom, left, top, color, brush);
    }

    // ─── Helpers ─────────────────────────────────────────────────────────────

    fn stamp_radius(&mut self, cx: i64, cy: i64, color: Color, radius: i64) {
        // only walk the part of the disk's bounding box that is on the grid
        let last = self.size as i64 - 1;
        let (oy_min, oy_max) = ((-radius).max(-cy), radius.min(last - cy));
        let (ox_min, ox_max) = ((-radius).max(-cx), radius.min(last - cx));
        for oy in oy_min..=oy_max {
            for ox in ox_min..=ox_max {
                if ox * ox + oy * oy <= radius * radius {
                    self.set(cx + ox, cy + oy, color);
                }
            }
        }
    }

    /// Inclusive range of centre coordinates from which a brush of `radius`
    /// can touch the grid, on either axis.
    fn reach(&self, radius: i64) -> (i64, i64) {
        (-radius, self.size as i64 - 1 + radius)
    }

    fn bbox_in_reach(&self, min_x: i64, min_y: i64, max_x: i64, max_y: i64, radius: i64) -> bool {
        let limit = self.size as i64 + radius;
        max_x >= -radius && max_y >= -radius && min_x < limit && min_y < limit
    }
}
