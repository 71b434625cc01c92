//! Paint model shared between the widget layer and whatever rasterizes the
//! draw list.
//!
//! Colors are linear premultiplied RGBA; paint sources are a solid color or a
//! linear gradient.

mod color;
mod gradient;
mod hex;

pub use color::Color;
pub use gradient::{ColorStop, LinearGradient};

/// Fill source for a shape.
#[derive(Debug, Clone, PartialEq)]
pub enum Paint {
    Solid(Color),
    LinearGradient(LinearGradient),
}

impl Paint {
    #[inline]
    pub fn solid(color: Color) -> Self {
        Paint::Solid(color)
    }

    /// `true` when the paint cannot produce a visible pixel.
    #[inline]
    pub fn is_invisible(&self) -> bool {
        match self {
            Paint::Solid(c) => c.a <= 0.0,
            Paint::LinearGradient(g) => g.stops.iter().all(|s| s.color.a <= 0.0),
        }
    }
}

impl From<Color> for Paint {
    #[inline]
    fn from(color: Color) -> Self {
        Paint::Solid(color)
    }
}

impl From<LinearGradient> for Paint {
    #[inline]
    fn from(gradient: LinearGradient) -> Self {
        Paint::LinearGradient(gradient)
    }
}
