use slidetab_engine::coords::{Rect, Vec2};
use slidetab_engine::text::FontSystem;

// ── Edges ─────────────────────────────────────────────────────────────────

/// Insets on four sides.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Edges {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Edges {
    #[inline]
    pub fn all(v: f32) -> Self {
        Self { top: v, right: v, bottom: v, left: v }
    }

    #[inline]
    pub fn horizontal(v: f32) -> Self {
        Self { left: v, right: v, ..Self::default() }
    }

    #[inline]
    pub fn vertical(v: f32) -> Self {
        Self { top: v, bottom: v, ..Self::default() }
    }

    #[inline]
    pub fn h(self) -> f32 {
        self.left + self.right
    }

    #[inline]
    pub fn v(self) -> f32 {
        self.top + self.bottom
    }
}

// ── Constraints ───────────────────────────────────────────────────────────

/// Size bounds a parent hands to a child during measure.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Constraints {
    pub min: Vec2,
    pub max: Vec2,
}

impl Constraints {
    #[inline]
    pub fn tight(size: Vec2) -> Self {
        Self { min: size, max: size }
    }

    #[inline]
    pub fn loose(max: Vec2) -> Self {
        Self { min: Vec2::zero(), max }
    }

    #[inline]
    pub fn unbounded() -> Self {
        Self::loose(Vec2::new(f32::INFINITY, f32::INFINITY))
    }

    /// Clamps `size` into `[min, max]`.
    #[inline]
    #[must_use]
    pub fn constrain(self, size: Vec2) -> Vec2 {
        Vec2::new(
            size.x.max(self.min.x).min(self.max.x),
            size.y.max(self.min.y).min(self.max.y),
        )
    }
}

// ── LayoutCtx ────────────────────────────────────────────────────────────

/// Shared resources available while measuring and routing events.
pub struct LayoutCtx<'a> {
    pub fonts: &'a FontSystem,
}

/// Shrinks `rect` by `edges`, never below zero size.
#[inline]
pub fn inset_rect(rect: Rect, edges: Edges) -> Rect {
    Rect::new(
        rect.origin.x + edges.left,
        rect.origin.y + edges.top,
        (rect.size.x - edges.h()).max(0.0),
        (rect.size.y - edges.v()).max(0.0),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constrain_clamps_both_ways() {
        let c = Constraints { min: Vec2::new(10.0, 10.0), max: Vec2::new(50.0, 50.0) };
        assert_eq!(c.constrain(Vec2::new(5.0, 80.0)), Vec2::new(10.0, 50.0));
    }

    #[test]
    fn unbounded_keeps_size() {
        let v = Vec2::new(1234.0, 5.0);
        assert_eq!(Constraints::unbounded().constrain(v), v);
    }

    #[test]
    fn inset_rect_horizontal_margins() {
        let inner = inset_rect(Rect::new(10.0, 0.0, 100.0, 30.0), Edges::horizontal(4.0));
        assert_eq!(inner, Rect::new(14.0, 0.0, 92.0, 30.0));
    }

    #[test]
    fn inset_rect_clamps_to_zero() {
        let inner = inset_rect(Rect::new(0.0, 0.0, 6.0, 6.0), Edges::all(5.0));
        assert_eq!(inner.size, Vec2::zero());
    }
}
