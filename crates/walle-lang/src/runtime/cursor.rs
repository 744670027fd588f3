use crate::canvas::Color;

/// The drawing cursor. Created by `Spawn`, mutated only by instructions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    pub x: i64,
    pub y: i64,
    pub color: Color,
    /// Always odd and ≥ 1.
    pub brush_size: i64,
}

impl Cursor {
    pub const DEFAULT_COLOR: Color = Color::White;

    pub fn spawn(x: i64, y: i64) -> Self {
        Self { x, y, color: Self::DEFAULT_COLOR, brush_size: 1 }
    }

    pub fn move_to(&mut self, x: i64, y: i64) {
        self.x = x;
        self.y = y;
    }
}
