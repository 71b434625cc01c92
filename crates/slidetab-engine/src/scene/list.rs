use crate::coords::Rect;

use super::DrawCmd;

/// Z-layer of a draw item. Higher values paint on top.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Default)]
pub struct ZIndex(pub i32);

/// A recorded command with its ordering key and effective clip.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawItem {
    pub z: ZIndex,
    /// Insertion sequence; breaks ties between equal z values.
    pub order: u32,
    pub cmd: DrawCmd,
    /// Scissor rect in logical pixels; `None` draws everywhere.
    pub clip_rect: Option<Rect>,
}

/// Draw commands recorded for one frame.
///
/// ```ignore
/// list.push_clip(control_bounds);
/// // ... push segments ...
/// list.pop_clip();
/// ```
#[derive(Debug, Default)]
pub struct DrawList {
    items: Vec<DrawItem>,
    next_order: u32,
    /// Top is the current effective clip, already intersected with its parents.
    clip_stack: Vec<Rect>,
}

impl DrawList {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops recorded items and clips, keeping capacity.
    pub fn clear(&mut self) {
        self.items.clear();
        self.next_order = 0;
        self.clip_stack.clear();
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Items in insertion order.
    #[inline]
    pub fn items(&self) -> &[DrawItem] {
        &self.items
    }

    /// Records `cmd` at layer `z`, inheriting the current clip.
    pub fn push(&mut self, z: ZIndex, cmd: DrawCmd) {
        let order = self.next_order;
        self.next_order = self.next_order.wrapping_add(1);
        self.items.push(DrawItem { z, order, cmd, clip_rect: self.clip_stack.last().copied() });
    }

    /// Starts a scissor region, intersected with the enclosing one.
    /// Must be balanced by [`pop_clip`](Self::pop_clip).
    pub fn push_clip(&mut self, rect: Rect) {
        let effective = match self.clip_stack.last() {
            None => rect,
            Some(&parent) => parent.intersect(rect).unwrap_or_default(),
        };
        self.clip_stack.push(effective);
    }

    pub fn pop_clip(&mut self) {
        debug_assert!(!self.clip_stack.is_empty(), "pop_clip without matching push_clip");
        self.clip_stack.pop();
    }

    /// Items sorted back-to-front.
    pub fn in_paint_order(&self) -> Vec<&DrawItem> {
        let mut sorted: Vec<&DrawItem> = self.items.iter().collect();
        sorted.sort_by_key(|item| (item.z, item.order));
        sorted
    }
}
