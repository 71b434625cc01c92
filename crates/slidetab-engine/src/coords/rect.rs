use super::Vec2;

/// Axis-aligned rectangle in logical pixels (top-left origin).
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Rect {
    pub origin: Vec2,
    pub size: Vec2,
}

impl Rect {
    #[inline]
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { origin: Vec2::new(x, y), size: Vec2::new(w, h) }
    }

    #[inline]
    pub const fn from_origin_size(origin: Vec2, size: Vec2) -> Self {
        Self { origin, size }
    }

    #[inline]
    pub fn x(self) -> f32 {
        self.origin.x
    }

    #[inline]
    pub fn y(self) -> f32 {
        self.origin.y
    }

    #[inline]
    pub fn width(self) -> f32 {
        self.size.x
    }

    #[inline]
    pub fn height(self) -> f32 {
        self.size.y
    }

    #[inline]
    pub fn right(self) -> f32 {
        self.origin.x + self.size.x
    }

    #[inline]
    pub fn bottom(self) -> f32 {
        self.origin.y + self.size.y
    }

    #[inline]
    pub fn center(self) -> Vec2 {
        Vec2::new(self.origin.x + self.size.x * 0.5, self.origin.y + self.size.y * 0.5)
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.size.x <= 0.0 || self.size.y <= 0.0
    }

    /// Half-open containment: `[min, max)` on both axes.
    #[inline]
    pub fn contains(self, p: Vec2) -> bool {
        p.x >= self.origin.x && p.y >= self.origin.y && p.x < self.right() && p.y < self.bottom()
    }

    /// Moves the rectangle by `dx` horizontally.
    #[inline]
    #[must_use]
    pub fn translate_x(self, dx: f32) -> Self {
        Self::new(self.origin.x + dx, self.origin.y, self.size.x, self.size.y)
    }

    /// Grows the rectangle by `d` on every side (negative `d` shrinks it).
    /// Width and height never go below zero.
    #[inline]
    #[must_use]
    pub fn outset(self, d: f32) -> Self {
        Self::new(
            self.origin.x - d,
            self.origin.y - d,
            (self.size.x + 2.0 * d).max(0.0),
            (self.size.y + 2.0 * d).max(0.0),
        )
    }

    #[inline]
    pub fn intersect(self, other: Rect) -> Option<Rect> {
        let x0 = self.origin.x.max(other.origin.x);
        let y0 = self.origin.y.max(other.origin.y);
        let x1 = self.right().min(other.right());
        let y1 = self.bottom().min(other.bottom());
        if x1 <= x0 || y1 <= y0 {
            None
        } else {
            Some(Rect::new(x0, y0, x1 - x0, y1 - y0))
        }
    }
}
