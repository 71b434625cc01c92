use slidetab_engine::coords::Rect;
use slidetab_engine::paint::Color;
use slidetab_engine::scene::Border;

use crate::constraints::{inset_rect, Edges};

/// Gap between adjacent items.
pub const DEFAULT_ITEM_GAP: f32 = 10.0;

/// Horizontal container that gives every item the same width.
///
/// Items fill the full height of the row. The left and right margins are
/// symmetric; the gap sits between neighbours only.
///
/// ```text
/// | margin | item | gap | item | gap | item | margin |
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentRow {
    margin: f32,
    item_gap: f32,
    border: Option<Border>,
    corner_radius: f32,
}

impl SegmentRow {
    pub fn new(margin: f32) -> Self {
        Self { margin: margin.max(0.0), item_gap: DEFAULT_ITEM_GAP, border: None, corner_radius: 0.0 }
    }

    /// Stroke drawn around the whole row.
    pub fn border(mut self, width: f32, color: Color, corner_radius: f32) -> Self {
        self.border = Some(Border::new(width, color));
        self.corner_radius = corner_radius;
        self
    }

    #[inline]
    pub fn margin(&self) -> f32 {
        self.margin
    }

    #[inline]
    pub fn gap(&self) -> f32 {
        self.item_gap
    }

    #[inline]
    pub fn decoration(&self) -> Option<(&Border, f32)> {
        self.border.as_ref().map(|b| (b, self.corner_radius))
    }

    /// Width every item receives when `count` items share `available` width.
    pub fn item_width(&self, available: f32, count: usize) -> f32 {
        if count == 0 {
            return 0.0;
        }
        let gaps = (count - 1) as f32 * self.item_gap;
        ((available - 2.0 * self.margin - gaps) / count as f32).max(0.0)
    }

    /// Frames of `count` items laid out inside `bounds`, left to right.
    pub fn arrange(&self, bounds: Rect, count: usize) -> Vec<Rect> {
        let inner = inset_rect(bounds, Edges::horizontal(self.margin));
        let w = self.item_width(bounds.width(), count);
        (0..count)
            .map(|i| Rect::new(inner.x() + i as f32 * (w + self.item_gap), inner.y(), w, inner.height()))
            .collect()
    }

    /// Width the row needs so that every item gets at least `widest`.
    pub fn natural_width(&self, widest: f32, count: usize) -> f32 {
        if count == 0 {
            return 2.0 * self.margin;
        }
        widest * count as f32 + (count - 1) as f32 * self.item_gap + 2.0 * self.margin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn items_share_width_equally() {
        // 320 - 2*2 margins - 2*10 gaps = 296 / 3
        let row = SegmentRow::new(2.0);
        let frames = row.arrange(Rect::new(0.0, 0.0, 320.0, 32.0), 3);
        assert_eq!(frames.len(), 3);
        for f in &frames {
            assert_eq!(f.width(), frames[0].width());
            assert_eq!(f.height(), 32.0);
        }
        assert!((frames[0].width() - 296.0 / 3.0).abs() < 1e-4);
    }

    #[test]
    fn first_item_starts_after_margin() {
        let row = SegmentRow::new(6.0);
        let frames = row.arrange(Rect::new(100.0, 10.0, 200.0, 40.0), 2);
        assert_eq!(frames[0].x(), 106.0);
        assert_eq!(frames[0].y(), 10.0);
        assert_eq!(frames[1].x(), frames[0].right() + DEFAULT_ITEM_GAP);
        assert!((frames[1].right() - 294.0).abs() < 1e-4);
    }

    #[test]
    fn zero_items_arrange_nothing() {
        let row = SegmentRow::new(2.0);
        assert!(row.arrange(Rect::new(0.0, 0.0, 100.0, 30.0), 0).is_empty());
        assert_eq!(row.item_width(100.0, 0), 0.0);
    }

    #[test]
    fn too_narrow_bounds_give_zero_width_items() {
        let row = SegmentRow::new(20.0);
        assert_eq!(row.item_width(30.0, 3), 0.0);
    }

    #[test]
    fn natural_width_fits_widest_item() {
        let row = SegmentRow::new(2.0);
        let w = row.natural_width(40.0, 3);
        assert_eq!(w, 40.0 * 3.0 + 20.0 + 4.0);
        assert_eq!(row.item_width(w, 3), 40.0);
    }
}
