mod image;
mod rounded_rect;
mod text;

pub use image::ImageCmd;
pub use rounded_rect::RoundedRectCmd;
pub use text::TextCmd;

use crate::coords::Vec2;
use crate::paint::Color;

/// Stroke drawn along the inner edge of a shape.
#[derive(Debug, Clone, PartialEq)]
pub struct Border {
    pub width: f32,
    pub color: Color,
}

impl Border {
    #[inline]
    pub fn new(width: f32, color: Color) -> Self {
        Self { width, color }
    }
}

/// Soft drop shadow painted underneath a shape.
#[derive(Debug, Clone, PartialEq)]
pub struct Shadow {
    pub color: Color,
    pub offset: Vec2,
    /// Blur radius in logical pixels.
    pub blur: f32,
}

impl Shadow {
    #[inline]
    pub fn new(color: Color, offset: Vec2, blur: f32) -> Self {
        Self { color, offset, blur }
    }
}
