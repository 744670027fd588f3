use super::{Canvas, Color};

impl Canvas {
    /// 4-connected flood fill from `(x, y)` over cells sharing the seed's
    /// starting color. No-op when the seed is off-canvas or already `color`.
    pub fn flood_fill(&mut self, x: i64, y: i64, color: Color) {
        let Some(target) = self.get(x, y) else { return };
        if target == color { return; }

        let mut stack = vec![(x, y)];
        while let Some((cx, cy)) = stack.pop() {
            if self.get(cx, cy) != Some(target) { continue; }
            self.set(cx, cy, color);
            stack.push((cx + 1, cy));
            stack.push((cx - 1, cy));
            stack.push((cx, cy + 1));
            stack.push((cx, cy - 1));
        }
    }

    /// Cells of `color` inside the rectangle spanned by the two corners,
    /// each axis normalized independently and clipped to the grid.
    pub fn color_count(&self, color: Color, x1: i64, y1: i64, x2: i64, y2: i64) -> usize {
        let last = self.size as i64 - 1;
        let (min_x, max_x) = (x1.min(x2).max(0), x1.max(x2).min(last));
        let (min_y, max_y) = (y1.min(y2).max(0), y1.max(y2).min(last));

        let mut count = 0;
        for y in min_y..=max_y {
            for x in min_x..=max_x {
                if self.get(x, y) == Some(color) { count += 1; }
            }
        }
        count
    }

    /// Exact match; false off-canvas.
    pub fn is_color(&self, x: i64, y: i64, color: Color) -> bool {
        self.get(x, y) == Some(color)
    }
}
