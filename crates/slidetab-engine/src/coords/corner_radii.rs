/// Per-corner radii of a rounded rectangle, clockwise from top-left.
///
/// Negative radii are treated as zero by consumers.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct CornerRadii {
    pub top_left: f32,
    pub top_right: f32,
    pub bottom_right: f32,
    pub bottom_left: f32,
}

impl CornerRadii {
    /// Same radius on every corner.
    #[inline]
    pub const fn all(r: f32) -> Self {
        Self { top_left: r, top_right: r, bottom_right: r, bottom_left: r }
    }

    #[inline]
    pub const fn zero() -> Self {
        Self::all(0.0)
    }

    /// Largest of the four radii, clamped to be non-negative.
    #[inline]
    pub fn max(self) -> f32 {
        self.top_left
            .max(self.top_right)
            .max(self.bottom_right)
            .max(self.bottom_left)
            .max(0.0)
    }

    /// Shrinks every radius so none exceeds half of the shorter side.
    #[inline]
    pub fn fit(self, width: f32, height: f32) -> Self {
        let limit = (width.min(height) * 0.5).max(0.0);
        let clamp = |r: f32| r.clamp(0.0, limit);
        Self {
            top_left: clamp(self.top_left),
            top_right: clamp(self.top_right),
            bottom_right: clamp(self.bottom_right),
            bottom_left: clamp(self.bottom_left),
        }
    }
}
