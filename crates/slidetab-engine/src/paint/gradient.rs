use crate::coords::{Rect, Vec2};

use super::Color;

/// A single gradient stop; `t` is expected in `[0, 1]`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ColorStop {
    pub t: f32,
    pub color: Color,
}

impl ColorStop {
    #[inline]
    pub const fn new(t: f32, color: Color) -> Self {
        Self { t, color }
    }
}

/// Linear gradient between two points in the same space as the geometry it
/// fills. Outside `[0, 1]` the edge stops are extended.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearGradient {
    pub start: Vec2,
    pub end: Vec2,
    pub stops: Vec<ColorStop>,
}

impl LinearGradient {
    pub fn new(start: Vec2, end: Vec2, stops: Vec<ColorStop>) -> Self {
        Self { start, end, stops }
    }

    /// Two-stop gradient from the top-left to the bottom-right corner of `rect`.
    pub fn diagonal(rect: Rect, from: Color, to: Color) -> Self {
        Self::new(
            rect.origin,
            Vec2::new(rect.right(), rect.bottom()),
            vec![ColorStop::new(0.0, from), ColorStop::new(1.0, to)],
        )
    }

    /// The same gradient with its endpoints shifted by `dx`.
    #[must_use]
    pub fn translate_x(mut self, dx: f32) -> Self {
        self.start.x += dx;
        self.end.x += dx;
        self
    }

    /// At least two finite stops and distinct endpoints.
    pub fn is_valid(&self) -> bool {
        self.start.is_finite()
            && self.end.is_finite()
            && self.stops.len() >= 2
            && self.stops.iter().all(|s| s.t.is_finite() && s.color.is_finite())
            && self.start != self.end
    }
}
