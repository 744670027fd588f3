//! Square pixel grid of palette colors.
//!
//! Coordinates are `(x, y)` with `x` the column and `y` the row, `(0, 0)` at
//! the top-left. Every operation is bounds-checked: cells outside the grid are
//! silently skipped so shapes may run partially off-canvas.

pub mod fill;
pub mod raster;

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Red,
    Blue,
    Green,
    Yellow,
    Orange,
    Purple,
    Black,
    White,
    Transparent,
}

impl Color {
    pub const PALETTE: [Color; 9] = [
        Color::Red, Color::Blue, Color::Green, Color::Yellow, Color::Orange,
        Color::Purple, Color::Black, Color::White, Color::Transparent,
    ];

    /// Case-sensitive palette lookup.
    pub fn from_name(name: &str) -> Option<Color> {
        Self::PALETTE.into_iter().find(|c| c.name() == name)
    }

    pub fn name(self) -> &'static str {
        match self {
            Color::Red         => "Red",
            Color::Blue        => "Blue",
            Color::Green       => "Green",
            Color::Yellow      => "Yellow",
            Color::Orange      => "Orange",
            Color::Purple      => "Purple",
            Color::Black       => "Black",
            Color::White       => "White",
            Color::Transparent => "Transparent",
        }
    }

    /// 8-bit RGBA for hosts that render the grid.
    pub fn rgba(self) -> (u8, u8, u8, u8) {
        match self {
            Color::Red         => (255, 0, 0, 255),
            Color::Blue        => (0, 0, 255, 255),
            Color::Green       => (0, 255, 0, 255),
            Color::Yellow      => (255, 255, 0, 255),
            Color::Orange      => (255, 165, 0, 255),
            Color::Purple      => (128, 0, 128, 255),
            Color::Black       => (0, 0, 0, 255),
            Color::White       => (255, 255, 255, 255),
            Color::Transparent => (0, 0, 0, 0),
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ─── Canvas ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct Canvas {
    size: usize,
    background: Color,
    cells: Vec<Color>,
}

impl Canvas {
    pub const DEFAULT_BACKGROUND: Color = Color::White;

    pub fn new(size: usize) -> Self {
        Self::with_background(size, Self::DEFAULT_BACKGROUND)
    }

    pub fn with_background(size: usize, background: Color) -> Self {
        Self { size, background, cells: vec![background; size * size] }
    }

    pub fn size(&self) -> usize { self.size }

    pub fn background(&self) -> Color { self.background }

    /// Reallocates the grid; previous contents are discarded.
    pub fn resize(&mut self, size: usize) {
        self.size = size;
        self.cells = vec![self.background; size * size];
    }

    pub fn clear(&mut self) {
        self.cells.fill(self.background);
    }

    pub fn contains(&self, x: i64, y: i64) -> bool {
        self.index(x, y).is_some()
    }

    pub fn get(&self, x: i64, y: i64) -> Option<Color> {
        self.index(x, y).map(|i| self.cells[i])
    }

    pub fn set(&mut self, x: i64, y: i64, color: Color) {
        if let Some(i) = self.index(x, y) {
            self.cells[i] = color;
        }
    }

    /// All cells, row-major.
    pub fn pixels(&self) -> &[Color] { &self.cells }

    pub fn rows(&self) -> impl Iterator<Item = &[Color]> {
        // chunks_exact panics on 0; an empty canvas has no rows
        self.cells.chunks_exact(self.size.max(1)).take(self.size)
    }

    fn index(&self, x: i64, y: i64) -> Option<usize> {
        let x = usize::try_from(x).ok()?;
        let y = usize::try_from(y).ok()?;
        (x < self.size && y < self.size).then(|| y * self.size + x)
    }
}
