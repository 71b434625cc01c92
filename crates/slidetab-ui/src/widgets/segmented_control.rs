use std::fmt;

use slidetab_engine::anim::{AnimationHandle, SpringCurve, Tween};
use slidetab_engine::coords::{Rect, Vec2};
use slidetab_engine::icon::Icon;
use slidetab_engine::paint::{Color, Paint};
use slidetab_engine::text::FontId;

use crate::constraints::{Constraints, LayoutCtx};
use crate::event::{ControlEvent, ControlEvents, EventResult, ListenerId, UiEvent};
use crate::layout::SegmentRow;
use crate::painter::Painter;
use crate::theme::Theme;
use crate::widget::Widget;
use crate::widgets::segment::{Segment, SegmentDescriptor};
use crate::widgets::selector::{Selector, SelectorStyle};

/// Height `measure` reports when the segments need less.
pub const MIN_HEIGHT: f32 = 32.0;
/// Stroke around the segment row under the `fill` style.
pub const FILL_ROW_BORDER: &str = "#DCDDDE";
const FILL_ROW_BORDER_WIDTH: f32 = 1.0;

// ── Configuration ─────────────────────────────────────────────────────────

/// Everything that styles a [`SegmentedControl`].
///
/// Changing any of it through the control's setters rebuilds the control.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Configuration {
    pub selector_style: SelectorStyle,
    /// Label and icon color of unselected segments.
    pub foreground_color: Color,
    /// Label and icon color of the selected segment. Labels keep the
    /// foreground color under the `line` style.
    pub selected_foreground_color: Color,
    pub selector_color: Color,
    pub background_color: Color,
    pub corner_radius: f32,
    /// Margin around the segment row and inset of the selector.
    pub spacing: f32,
    /// Show icons with their source pixels instead of tinting them.
    pub preserve_icon_color: bool,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            selector_style: SelectorStyle::Line,
            foreground_color: Color::gray(),
            selected_foreground_color: Color::white(),
            selector_color: Color::gray(),
            background_color: Color::transparent(),
            corner_radius: 0.0,
            spacing: 2.0,
            preserve_icon_color: false,
        }
    }
}

// ── BuildState ────────────────────────────────────────────────────────────

/// Whether the control currently has a view tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildState {
    Empty,
    Built { style: SelectorStyle, segment_count: usize, selected_index: usize },
}

// ── ControlLayout ─────────────────────────────────────────────────────────

/// Result of the last layout pass.
#[derive(Debug, Clone, PartialEq)]
pub struct ControlLayout {
    pub bounds: Rect,
    /// One frame per segment, left to right.
    pub segments: Vec<Rect>,
    /// Selector frame at offset zero; the animated offset is applied on top.
    pub selector: Rect,
}

impl ControlLayout {
    /// Offset that puts the selector over segment `index`.
    fn offset_of(&self, index: usize) -> Option<f32> {
        self.segments.get(index).map(|f| f.x() - self.bounds.x())
    }
}

// ── internals ─────────────────────────────────────────────────────────────

/// Children attached by the last rebuild.
#[derive(Debug)]
struct ViewTree {
    row: SegmentRow,
    selector: Selector,
}

impl ViewTree {
    fn arrange(&self, bounds: Rect, count: usize, spacing: f32) -> ControlLayout {
        let segments = self.row.arrange(bounds, count);
        let width = segments.first().map_or(0.0, |f| f.width());
        let selector = self.selector.base_frame(bounds, width, spacing);
        ControlLayout { bounds, segments, selector }
    }
}

type Completion = Box<dyn FnOnce(bool)>;

/// The selector move in flight.
struct SelectorMotion {
    handle: AnimationHandle,
    target: usize,
    tween: Tween,
    completion: Option<Completion>,
}

// ── SegmentedControl ──────────────────────────────────────────────────────

/// A horizontal row of equally wide segments with an animated selector.
///
/// Every configuration change tears the children down and builds them again,
/// selects segment 0, lays out and sends the selector on its way. Taps select
/// a segment and notify `on_value_changed` listeners.
///
/// ```text
/// ┌────────────────────────────────────────────┐
/// │ [ Day ]      [ Week ]      [ Month ]       │
/// │ ▔▔▔▔▔▔▔ ──▶                                │  line selector
/// └────────────────────────────────────────────┘
/// ```
pub struct SegmentedControl {
    config: Configuration,
    segments: Vec<Segment>,
    selected_index: usize,
    tree: Option<ViewTree>,
    /// Bounds of the last `layout` call; reused by rebuilds.
    bounds: Option<Rect>,
    layout: Option<ControlLayout>,
    motion: Option<SelectorMotion>,
    /// Segment the selector rests on once its move has finished.
    resting_on: Option<usize>,
    /// Completions waiting for the next `tick`.
    settled: Vec<(Completion, bool)>,
    curve: SpringCurve,
    next_animation: u64,
    events: ControlEvents,
    rebuilds: u64,
}

impl Default for SegmentedControl {
    fn default() -> Self {
        Self::new()
    }
}

impl SegmentedControl {
    /// Empty control with the default configuration.
    pub fn new() -> Self {
        Self::with_configuration(Configuration::default(), Vec::new())
    }

    pub fn with_segments(
        segments: Vec<SegmentDescriptor>,
        style: SelectorStyle,
        corner_radius: f32,
        foreground_color: Color,
        selected_foreground_color: Color,
        selector_color: Color,
        background_color: Color,
    ) -> Self {
        let config = Configuration {
            selector_style: style,
            foreground_color,
            selected_foreground_color,
            selector_color,
            background_color,
            corner_radius: corner_radius.max(0.0),
            ..Configuration::default()
        };
        Self::with_configuration(config, segments)
    }

    /// Colors come from `theme`: labels use `label`; `fill` pairs a
    /// `system_gray3` selector with a `system_fill` track, every other style
    /// a `label` selector on `system_background`.
    pub fn themed(
        segments: Vec<SegmentDescriptor>,
        style: SelectorStyle,
        corner_radius: f32,
        theme: &Theme,
    ) -> Self {
        let (selector_color, background_color) = match style {
            SelectorStyle::Fill => (theme.system_gray3, theme.system_fill),
            SelectorStyle::Outline | SelectorStyle::Line => (theme.label, theme.system_background),
        };
        Self::with_segments(
            segments,
            style,
            corner_radius,
            theme.label,
            theme.label,
            selector_color,
            background_color,
        )
    }

    pub fn with_configuration(config: Configuration, segments: Vec<SegmentDescriptor>) -> Self {
        let mut control = Self {
            config,
            segments: segments.into_iter().map(Segment::new).collect(),
            selected_index: 0,
            tree: None,
            bounds: None,
            layout: None,
            motion: None,
            resting_on: None,
            settled: Vec::new(),
            curve: SpringCurve::default(),
            next_animation: 0,
            events: ControlEvents::new(),
            rebuilds: 0,
        };
        control.rebuild();
        control
    }

    // ── observation ───────────────────────────────────────────────────────

    #[inline]
    pub fn configuration(&self) -> &Configuration {
        &self.config
    }

    #[inline]
    pub fn selector_style(&self) -> SelectorStyle {
        self.config.selector_style
    }

    #[inline]
    pub fn spacing(&self) -> f32 {
        self.config.spacing
    }

    #[inline]
    pub fn corner_radius(&self) -> f32 {
        self.config.corner_radius
    }

    #[inline]
    pub fn foreground_color(&self) -> Color {
        self.config.foreground_color
    }

    #[inline]
    pub fn selected_foreground_color(&self) -> Color {
        self.config.selected_foreground_color
    }

    #[inline]
    pub fn selector_color(&self) -> Color {
        self.config.selector_color
    }

    #[inline]
    pub fn background_color(&self) -> Color {
        self.config.background_color
    }

    #[inline]
    pub fn preserve_icon_color(&self) -> bool {
        self.config.preserve_icon_color
    }

    /// `None` while the control has no segments.
    pub fn selected_segment_index(&self) -> Option<usize> {
        (!self.segments.is_empty()).then_some(self.selected_index)
    }

    #[inline]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    #[inline]
    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    pub fn state(&self) -> BuildState {
        match (&self.tree, self.segments.is_empty()) {
            (Some(tree), false) => BuildState::Built {
                style: tree.selector.style(),
                segment_count: self.segments.len(),
                selected_index: self.selected_index,
            },
            _ => BuildState::Empty,
        }
    }

    /// Attached child views: the selector and the segment row.
    pub fn attached_view_count(&self) -> usize {
        if self.tree.is_some() { 2 } else { 0 }
    }

    /// Completed rebuilds since construction.
    #[inline]
    pub fn rebuild_count(&self) -> u64 {
        self.rebuilds
    }

    pub fn selector(&self) -> Option<&Selector> {
        self.tree.as_ref().map(|t| &t.selector)
    }

    pub fn row(&self) -> Option<&SegmentRow> {
        self.tree.as_ref().map(|t| &t.row)
    }

    #[inline]
    pub fn current_layout(&self) -> Option<&ControlLayout> {
        self.layout.as_ref()
    }

    /// On-screen selector frame, animated offset included.
    pub fn selector_frame(&self) -> Option<Rect> {
        let tree = self.tree.as_ref()?;
        let layout = self.layout.as_ref()?;
        Some(layout.selector.translate_x(tree.selector.offset_x()))
    }

    pub fn is_animating(&self) -> bool {
        self.motion.is_some()
    }

    /// Handle of the selector move in flight.
    pub fn active_animation(&self) -> Option<AnimationHandle> {
        self.motion.as_ref().map(|m| m.handle)
    }

    // ── configuration setters ─────────────────────────────────────────────

    pub fn set_selector_style(&mut self, style: SelectorStyle) {
        self.config.selector_style = style;
        self.invalidate_and_rebuild();
    }

    pub fn set_spacing(&mut self, spacing: f32) {
        if let Some(v) = sanitize_length("spacing", spacing) {
            self.config.spacing = v;
            self.invalidate_and_rebuild();
        }
    }

    pub fn set_corner_radius(&mut self, radius: f32) {
        if let Some(v) = sanitize_length("corner radius", radius) {
            self.config.corner_radius = v;
            self.invalidate_and_rebuild();
        }
    }

    pub fn set_foreground_color(&mut self, color: Color) {
        self.config.foreground_color = color;
        self.invalidate_and_rebuild();
    }

    pub fn set_selected_foreground_color(&mut self, color: Color) {
        self.config.selected_foreground_color = color;
        self.invalidate_and_rebuild();
    }

    pub fn set_selector_color(&mut self, color: Color) {
        self.config.selector_color = color;
        self.invalidate_and_rebuild();
    }

    pub fn set_background_color(&mut self, color: Color) {
        self.config.background_color = color;
        self.invalidate_and_rebuild();
    }

    pub fn set_preserve_icon_color(&mut self, preserve: bool) {
        self.config.preserve_icon_color = preserve;
        self.invalidate_and_rebuild();
    }

    /// Replaces the whole configuration with a single rebuild.
    pub fn set_configuration(&mut self, config: Configuration) {
        let spacing = sanitize_length("spacing", config.spacing).unwrap_or(self.config.spacing);
        let corner_radius =
            sanitize_length("corner radius", config.corner_radius).unwrap_or(self.config.corner_radius);
        self.config = Configuration { spacing, corner_radius, ..config };
        self.invalidate_and_rebuild();
    }

    /// Spring used for selector moves triggered by selection.
    pub fn set_selector_curve(&mut self, curve: SpringCurve) {
        self.curve = curve;
    }

    // ── segment list ──────────────────────────────────────────────────────

    pub fn append_icon_segment(&mut self, icon: Option<Icon>) {
        self.push_segment(self.rounded(SegmentDescriptor::new(icon, None)));
    }

    /// Appends an icon segment and sets the control-wide
    /// `preserve_icon_color` flag to `preserve`.
    pub fn append_icon_segment_preserving(&mut self, icon: Option<Icon>, preserve: bool) {
        self.config.preserve_icon_color = preserve;
        self.push_segment(self.rounded(SegmentDescriptor::new(icon, None)));
    }

    pub fn append_segment(
        &mut self,
        icon: Option<Icon>,
        text: Option<String>,
        text_color: Color,
        font: Option<FontId>,
    ) {
        let descriptor = SegmentDescriptor::new(icon, text).text_color(text_color).font(font);
        self.push_segment(self.rounded(descriptor));
    }

    pub fn append_text_segment(&mut self, text: impl Into<String>, text_color: Color, font: Option<FontId>) {
        let descriptor = SegmentDescriptor::text(text).text_color(text_color).font(font);
        self.push_segment(self.rounded(descriptor));
    }

    /// Appends a prepared descriptor as is, corner radius included.
    pub fn push_segment(&mut self, descriptor: SegmentDescriptor) {
        self.segments.push(Segment::new(descriptor));
        self.invalidate_and_rebuild();
    }

    fn rounded(&self, descriptor: SegmentDescriptor) -> SegmentDescriptor {
        descriptor.corner_radius(self.config.corner_radius)
    }

    /// Replaces every segment. An empty list drops the view tree and leaves
    /// the configuration as it was.
    pub fn set_segments(&mut self, segments: Vec<SegmentDescriptor>) {
        self.segments = segments.into_iter().map(Segment::new).collect();
        if self.segments.is_empty() {
            self.discard_views();
            self.selected_index = 0;
            log::debug!("segmented control emptied");
            return;
        }
        self.invalidate_and_rebuild();
    }

    // ── events ────────────────────────────────────────────────────────────

    /// Subscribes to [`ControlEvent::ValueChanged`], fired after every
    /// selection pass.
    pub fn on_value_changed(&mut self, f: impl FnMut(&ControlEvent) + 'static) -> ListenerId {
        self.events.subscribe(f)
    }

    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        self.events.unsubscribe(id)
    }

    // ── rebuild ───────────────────────────────────────────────────────────

    fn invalidate_and_rebuild(&mut self) {
        self.rebuild();
    }

    /// Tears down and reconstructs the children from the current
    /// configuration, then selects segment 0. No-op without segments.
    pub fn rebuild(&mut self) {
        if self.segments.is_empty() {
            log::trace!("rebuild skipped: no segments");
            return;
        }
        let config = self.config;

        for (idx, segment) in self.segments.iter_mut().enumerate() {
            segment.clear_background();
            segment.set_tag(idx);
        }

        let mut row = SegmentRow::new(config.spacing);
        if config.selector_style == SelectorStyle::Fill {
            row = row.border(FILL_ROW_BORDER_WIDTH, Color::from_hex(FILL_ROW_BORDER), config.corner_radius);
        }
        let selector = Selector::decorated(config.selector_style, config.selector_color);

        self.discard_views();
        self.tree = Some(ViewTree { row, selector });
        self.rebuilds += 1;
        log::debug!(
            "rebuilt segmented control: {} segment(s), {:?} selector",
            self.segments.len(),
            config.selector_style
        );

        self.select_tag(0);

        if let Some(bounds) = self.bounds {
            self.apply_layout(bounds);
        }
    }

    /// Drops the attached children. A move in flight belongs to the old
    /// selector and is cancelled.
    fn discard_views(&mut self) {
        if let Some(motion) = self.motion.take() {
            self.retire(motion, false);
        }
        self.tree = None;
        self.layout = None;
        self.resting_on = None;
    }

    // ── layout & hit testing ──────────────────────────────────────────────

    /// Lays the children out inside `bounds` and remembers `bounds` for
    /// later rebuilds.
    pub fn layout(&mut self, bounds: Rect) -> Option<&ControlLayout> {
        self.bounds = Some(bounds);
        self.apply_layout(bounds);
        self.layout.as_ref()
    }

    fn apply_layout(&mut self, bounds: Rect) {
        let Some(tree) = self.tree.as_mut() else {
            self.layout = None;
            return;
        };
        let layout = tree.arrange(bounds, self.segments.len(), self.config.spacing);
        for (segment, frame) in self.segments.iter_mut().zip(&layout.segments) {
            segment.set_frame(*frame);
        }

        // Selection may run before the first layout; moves are resolved
        // against the frames as they are now.
        if let Some(motion) = self.motion.as_mut() {
            if let Some(to) = layout.offset_of(motion.target) {
                motion.tween.retarget(to);
            }
        } else if let Some(to) = self.resting_on.and_then(|i| layout.offset_of(i)) {
            tree.selector.set_offset_x(to);
        }
        self.layout = Some(layout);
    }

    /// Tag of the segment under `pos`. Margins and gaps hit nothing.
    pub fn hit_test(&self, pos: Vec2) -> Option<usize> {
        let layout = self.layout.as_ref()?;
        let index = layout.segments.iter().position(|f| f.contains(pos))?;
        self.segments.get(index).map(Segment::tag)
    }

    /// Routes a tap on the segment tagged `tag`.
    pub fn handle_tap(&mut self, tag: usize) {
        log::debug!("segment tap: tag {tag}");
        self.select_tag(tag);
    }

    // ── selection ─────────────────────────────────────────────────────────

    /// Recolors every segment, marks the one tagged `tag`, moves the
    /// selector there and notifies listeners.
    ///
    /// A tag that matches nothing leaves every segment unmarked and the
    /// index unchanged; listeners are still notified.
    fn select_tag(&mut self, tag: usize) {
        let Configuration {
            selector_style,
            foreground_color,
            selected_foreground_color,
            preserve_icon_color,
            ..
        } = self.config;
        let tint = |color: Color| (!preserve_icon_color).then_some(color);

        let mut matched = None;
        for (idx, segment) in self.segments.iter_mut().enumerate() {
            segment.set_title_color(foreground_color);
            segment.set_icon_tint(tint(foreground_color));
            segment.set_selected(false);

            if segment.tag() == tag {
                segment.set_icon_tint(tint(selected_foreground_color));
                if selector_style != SelectorStyle::Line {
                    segment.set_title_color(selected_foreground_color);
                }
                segment.set_selected(true);
                matched = Some(idx);
            }
        }

        match matched {
            Some(idx) => {
                self.selected_index = idx;
                self.start_move(idx, self.curve, None);
            }
            None => log::warn!("tap on unknown segment tag {tag}; selection unchanged"),
        }

        self.events.emit(&ControlEvent::ValueChanged { selected_index: self.selected_index });
    }

    // ── selector animation ────────────────────────────────────────────────

    /// Slides the selector to segment `index` with the control's spring.
    pub fn move_selector(&mut self, index: usize) -> Option<AnimationHandle> {
        self.start_move(index, self.curve, None)
    }

    /// Slides the selector to segment `index`. `completion` runs on a later
    /// [`tick`](Widget::tick): with `true` when the move finished, `false`
    /// when it was superseded or cancelled.
    ///
    /// Returns `None`, and still reports `false`, when there is no selector
    /// or no such segment.
    pub fn move_selector_with(
        &mut self,
        index: usize,
        curve: SpringCurve,
        completion: impl FnOnce(bool) + 'static,
    ) -> Option<AnimationHandle> {
        self.start_move(index, curve, Some(Box::new(completion)))
    }

    fn start_move(
        &mut self,
        index: usize,
        curve: SpringCurve,
        completion: Option<Completion>,
    ) -> Option<AnimationHandle> {
        let from = match self.tree.as_ref() {
            Some(tree) if index < self.segments.len() => tree.selector.offset_x(),
            _ => {
                if let Some(f) = completion {
                    self.settled.push((f, false));
                }
                return None;
            }
        };
        if let Some(previous) = self.motion.take() {
            log::trace!("selector move {} superseded", previous.handle.id());
            self.retire(previous, false);
        }

        // Without frames yet the target is the origin; layout retargets.
        let to = self.layout.as_ref().and_then(|l| l.offset_of(index)).unwrap_or(0.0);
        let handle = AnimationHandle::new(self.next_animation);
        self.next_animation += 1;
        self.resting_on = None;
        self.motion = Some(SelectorMotion { handle, target: index, tween: Tween::new(from, to, curve), completion });
        Some(handle)
    }

    /// Stops the move `handle` where it is. Returns `false` if it is not the
    /// move in flight.
    pub fn cancel_animation(&mut self, handle: AnimationHandle) -> bool {
        match self.motion.take() {
            Some(motion) if motion.handle == handle => {
                self.retire(motion, false);
                true
            }
            other => {
                self.motion = other;
                false
            }
        }
    }

    fn retire(&mut self, motion: SelectorMotion, finished: bool) {
        if let Some(f) = motion.completion {
            self.settled.push((f, finished));
        }
    }

    fn advance(&mut self, dt: f32) {
        if let Some(motion) = self.motion.as_mut() {
            let done = motion.tween.advance(dt);
            if let Some(tree) = self.tree.as_mut() {
                tree.selector.set_offset_x(motion.tween.value());
            }
            if done {
                let target = motion.target;
                if let Some(motion) = self.motion.take() {
                    self.retire(motion, true);
                }
                self.resting_on = Some(target);
            }
        }
        for (f, finished) in std::mem::take(&mut self.settled) {
            f(finished);
        }
    }
}

/// Drops non-finite lengths and clamps negative ones to zero.
fn sanitize_length(name: &str, v: f32) -> Option<f32> {
    if !v.is_finite() {
        log::warn!("ignoring non-finite {name}: {v}");
        return None;
    }
    if v < 0.0 {
        log::warn!("negative {name} {v} clamped to 0");
        return Some(0.0);
    }
    Some(v)
}

impl fmt::Debug for SegmentedControl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SegmentedControl")
            .field("config", &self.config)
            .field("state", &self.state())
            .field("bounds", &self.bounds)
            .field("animating", &self.is_animating())
            .field("listeners", &self.events.len())
            .finish()
    }
}

impl Widget for SegmentedControl {
    fn measure(&self, constraints: Constraints, ctx: &LayoutCtx) -> Vec2 {
        let (widest, tallest) = self.segments.iter().fold((0.0f32, 0.0f32), |(w, h), s| {
            let size = s.natural_size(ctx);
            (w.max(size.x), h.max(size.y))
        });
        let row = match self.tree.as_ref() {
            Some(tree) => tree.row.clone(),
            None => SegmentRow::new(self.config.spacing),
        };
        let width = row.natural_width(widest, self.segments.len());
        let height = (tallest + 2.0 * self.config.spacing).max(MIN_HEIGHT);
        constraints.constrain(Vec2::new(width, height))
    }

    fn place(&mut self, rect: Rect) {
        if self.bounds != Some(rect) {
            self.layout(rect);
        }
    }

    fn paint(&self, painter: &mut Painter, rect: Rect) {
        painter.push_clip(rect);
        painter.fill_rounded_rect(rect, self.config.corner_radius, Paint::Solid(self.config.background_color), None);

        if let Some(tree) = self.tree.as_ref() {
            let arranged;
            let layout = match self.layout.as_ref() {
                Some(l) if l.bounds == rect => l,
                _ => {
                    arranged = tree.arrange(rect, self.segments.len(), self.config.spacing);
                    &arranged
                }
            };

            tree.selector.paint(painter, layout.selector.translate_x(tree.selector.offset_x()));
            if let Some((border, radius)) = tree.row.decoration() {
                painter.fill_rounded_rect(layout.bounds, radius, Color::transparent(), Some(border.clone()));
            }
            for (segment, frame) in self.segments.iter().zip(&layout.segments) {
                segment.paint(painter, *frame);
            }
        }

        painter.pop_clip();
    }

    fn on_event(&mut self, event: &UiEvent, rect: Rect, _ctx: &LayoutCtx<'_>) -> EventResult {
        let UiEvent::Click { pos } = *event;
        if !rect.contains(pos) {
            return EventResult::Ignored;
        }
        self.place(rect);
        if let Some(tag) = self.hit_test(pos) {
            self.handle_tap(tag);
        }
        EventResult::Consumed
    }

    fn tick(&mut self, dt: f32) {
        self.advance(dt);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widgets::segment::IconTint;
    use slidetab_engine::scene::{DrawCmd, DrawList};
    use slidetab_engine::text::FontSystem;
    use std::cell::RefCell;
    use std::rc::Rc;

    const BOUNDS: Rect = Rect::new(0.0, 0.0, 320.0, 32.0);

    fn abc(style: SelectorStyle) -> SegmentedControl {
        SegmentedControl::with_segments(
            vec![SegmentDescriptor::text("A"), SegmentDescriptor::text("B"), SegmentDescriptor::text("C")],
            style,
            0.0,
            Color::gray(),
            Color::white(),
            Color::black(),
            Color::transparent(),
        )
    }

    fn record(control: &mut SegmentedControl) -> Rc<RefCell<Vec<usize>>> {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        control.on_value_changed(move |ev| {
            let ControlEvent::ValueChanged { selected_index } = *ev;
            sink.borrow_mut().push(selected_index);
        });
        seen
    }

    fn dot() -> Icon {
        Icon::from_rgba(2, 1, vec![255, 0, 0, 255, 0, 0, 255, 128]).unwrap()
    }

    fn selected_count(control: &SegmentedControl) -> usize {
        control.segments().iter().filter(|s| s.is_selected()).count()
    }

    // ── construction & empty control ──────────────────────────────────────

    #[test]
    fn new_control_is_empty() {
        let control = SegmentedControl::new();
        assert_eq!(control.state(), BuildState::Empty);
        assert_eq!(control.selected_segment_index(), None);
        assert_eq!(control.attached_view_count(), 0);
        assert_eq!(control.configuration(), &Configuration::default());
    }

    #[test]
    fn rebuild_without_segments_is_a_noop() {
        let mut control = SegmentedControl::new();
        let seen = record(&mut control);
        control.set_spacing(6.0);
        control.set_selector_style(SelectorStyle::Fill);
        control.rebuild();
        assert_eq!(control.state(), BuildState::Empty);
        assert_eq!(control.rebuild_count(), 0);
        assert!(control.layout(BOUNDS).is_none());
        assert_eq!(control.move_selector(0), None);
        assert!(seen.borrow().is_empty());
        assert_eq!(control.spacing(), 6.0);
    }

    #[test]
    fn with_segments_builds_and_selects_first() {
        let control = abc(SelectorStyle::Outline);
        assert_eq!(
            control.state(),
            BuildState::Built { style: SelectorStyle::Outline, segment_count: 3, selected_index: 0 }
        );
        assert_eq!(control.attached_view_count(), 2);
        assert!(control.segments()[0].is_selected());
        let tags: Vec<_> = control.segments().iter().map(Segment::tag).collect();
        assert_eq!(tags, vec![0, 1, 2]);
    }

    #[test]
    fn themed_fill_uses_gray3_selector_on_fill_track() {
        let theme = Theme::dark();
        let control = SegmentedControl::themed(vec![SegmentDescriptor::text("A")], SelectorStyle::Fill, 8.0, &theme);
        assert_eq!(control.selector_color(), theme.system_gray3);
        assert_eq!(control.background_color(), theme.system_fill);
        assert_eq!(control.foreground_color(), theme.label);
        assert_eq!(control.selected_foreground_color(), theme.label);
        assert_eq!(control.corner_radius(), 8.0);
    }

    #[test]
    fn themed_line_uses_label_selector_on_background() {
        let theme = Theme::light();
        let control = SegmentedControl::themed(vec![SegmentDescriptor::text("A")], SelectorStyle::Line, 0.0, &theme);
        assert_eq!(control.selector_color(), theme.label);
        assert_eq!(control.background_color(), theme.system_background);
    }

    // ── selection invariants ──────────────────────────────────────────────

    #[test]
    fn exactly_one_segment_selected_for_every_style() {
        for style in [SelectorStyle::Fill, SelectorStyle::Outline, SelectorStyle::Line] {
            let mut control = abc(style);
            assert_eq!(selected_count(&control), 1);
            control.handle_tap(1);
            assert_eq!(selected_count(&control), 1);
            assert_eq!(control.selected_segment_index(), Some(1));
        }
    }

    #[test]
    fn selected_segment_gets_selected_palette() {
        let mut control = abc(SelectorStyle::Fill);
        control.handle_tap(1);
        let segs = control.segments();
        assert_eq!(segs[1].title_color(), Color::white());
        assert_eq!(segs[0].title_color(), Color::gray());
        assert_eq!(segs[2].title_color(), Color::gray());
    }

    #[test]
    fn line_style_keeps_foreground_label_on_selected_segment() {
        let mut control = abc(SelectorStyle::Line);
        control.handle_tap(2);
        assert!(control.segments()[2].is_selected());
        assert_eq!(control.segments()[2].title_color(), Color::gray());
    }

    #[test]
    fn icons_tinted_with_selection_colors() {
        let mut control = SegmentedControl::new();
        control.set_selector_style(SelectorStyle::Outline);
        control.append_icon_segment(Some(dot()));
        control.append_icon_segment(Some(dot()));
        control.handle_tap(1);
        let segs = control.segments();
        assert_eq!(segs[0].icon_tint(), IconTint::Tinted(Color::gray()));
        assert_eq!(segs[1].icon_tint(), IconTint::Tinted(Color::white()));
        // Alpha survives tinting.
        assert_eq!(segs[1].displayed_icon().unwrap().pixels().get_pixel(1, 0).0[3], 128);
    }

    #[test]
    fn preserved_icons_keep_source_pixels() {
        let source = dot();
        let mut control = SegmentedControl::new();
        control.append_icon_segment_preserving(Some(source.clone()), true);
        control.append_icon_segment(Some(dot()));
        assert!(control.preserve_icon_color());
        for tag in [1, 0, 1] {
            control.handle_tap(tag);
        }
        let first = &control.segments()[0];
        assert_eq!(first.icon_tint(), IconTint::Original);
        assert!(first.displayed_icon().unwrap().shares_pixels_with(&source));
        assert_eq!(first.displayed_icon().unwrap(), &source);
    }

    #[test]
    fn reselecting_current_segment_still_notifies() {
        let mut control = abc(SelectorStyle::Line);
        let seen = record(&mut control);
        control.handle_tap(0);
        control.handle_tap(0);
        assert_eq!(*seen.borrow(), vec![0, 0]);
    }

    #[test]
    fn stale_tag_marks_nothing_and_still_notifies() {
        let mut control = abc(SelectorStyle::Fill);
        control.handle_tap(1);
        let seen = record(&mut control);
        control.handle_tap(7);
        assert_eq!(selected_count(&control), 0);
        assert_eq!(control.selected_segment_index(), Some(1));
        assert_eq!(*seen.borrow(), vec![1]);
        assert!(control.segments().iter().all(|s| s.title_color() == Color::gray()));
    }

    #[test]
    fn removed_listener_is_not_called() {
        let mut control = abc(SelectorStyle::Line);
        let calls = Rc::new(RefCell::new(0));
        let sink = calls.clone();
        let id = control.on_value_changed(move |_| *sink.borrow_mut() += 1);
        control.handle_tap(1);
        assert!(control.remove_listener(id));
        control.handle_tap(2);
        assert_eq!(*calls.borrow(), 1);
        assert!(!control.remove_listener(id));
    }

    // ── rebuild ───────────────────────────────────────────────────────────

    #[test]
    fn rebuild_is_idempotent() {
        let mut control = abc(SelectorStyle::Fill);
        control.push_segment(SegmentDescriptor::icon(dot()));
        control.layout(BOUNDS);
        control.rebuild();
        let state = control.state();
        let colors: Vec<_> = control.segments().iter().map(Segment::title_color).collect();
        let tints: Vec<_> = control.segments().iter().map(Segment::icon_tint).collect();
        assert_eq!(tints[3], IconTint::Tinted(Color::gray()));
        let layout = control.current_layout().cloned();
        let selector = control.selector().cloned();

        control.rebuild();
        assert_eq!(control.state(), state);
        assert_eq!(control.segments().iter().map(Segment::title_color).collect::<Vec<_>>(), colors);
        assert_eq!(control.segments().iter().map(Segment::icon_tint).collect::<Vec<_>>(), tints);
        assert_eq!(control.current_layout().cloned(), layout);
        assert_eq!(control.selector().map(Selector::style), selector.map(|s| s.style()));
        assert_eq!(control.attached_view_count(), 2);
    }

    #[test]
    fn property_change_resets_selection_to_first() {
        let mut control = abc(SelectorStyle::Line);
        control.handle_tap(2);
        let seen = record(&mut control);
        control.set_selector_color(Color::white());
        assert_eq!(control.selected_segment_index(), Some(0));
        assert_eq!(*seen.borrow(), vec![0]);
    }

    #[test]
    fn append_resets_selection_and_grows() {
        let mut control = abc(SelectorStyle::Outline);
        control.handle_tap(2);
        control.append_text_segment("D", Color::black(), None);
        assert_eq!(control.segment_count(), 4);
        assert_eq!(control.selected_segment_index(), Some(0));
        assert_eq!(control.segments()[3].tag(), 3);
    }

    #[test]
    fn appended_segment_takes_control_corner_radius() {
        let mut control = SegmentedControl::new();
        control.set_corner_radius(6.0);
        control.append_segment(None, Some("A".into()), Color::black(), None);
        assert_eq!(control.segments()[0].descriptor().corner_radius, 6.0);
        control.append_text_segment("B", Color::black(), None);
        control.append_icon_segment(Some(dot()));
        assert!(control.segments().iter().all(|s| s.descriptor().corner_radius == 6.0));
    }

    #[test]
    fn pushed_descriptor_keeps_its_corner_radius() {
        let mut control = SegmentedControl::new();
        control.set_corner_radius(6.0);
        control.push_segment(SegmentDescriptor::text("A").corner_radius(3.0));
        assert_eq!(control.segments()[0].descriptor().corner_radius, 3.0);
        assert_eq!(control.corner_radius(), 6.0);
    }

    #[test]
    fn emptying_segments_keeps_configuration() {
        let mut control = abc(SelectorStyle::Fill);
        control.set_spacing(5.0);
        control.set_segments(Vec::new());
        assert_eq!(control.state(), BuildState::Empty);
        assert_eq!(control.attached_view_count(), 0);
        assert_eq!(control.selected_segment_index(), None);
        assert_eq!(control.spacing(), 5.0);
        assert_eq!(control.selector_style(), SelectorStyle::Fill);
    }

    #[test]
    fn invalid_lengths_are_ignored_or_clamped() {
        let mut control = abc(SelectorStyle::Line);
        let rebuilds = control.rebuild_count();
        control.set_spacing(f32::NAN);
        assert_eq!(control.spacing(), 2.0);
        assert_eq!(control.rebuild_count(), rebuilds);
        control.set_corner_radius(-3.0);
        assert_eq!(control.corner_radius(), 0.0);
        assert_eq!(control.rebuild_count(), rebuilds + 1);
    }

    #[test]
    fn fill_style_borders_the_row() {
        let control = abc(SelectorStyle::Fill);
        let (border, _) = control.row().unwrap().decoration().unwrap();
        assert_eq!(border.width, 1.0);
        assert_eq!(border.color, Color::from_rgba8(0xDC, 0xDD, 0xDE, 255));
        assert!(abc(SelectorStyle::Line).row().unwrap().decoration().is_none());
    }

    // ── layout ────────────────────────────────────────────────────────────

    #[test]
    fn selector_width_matches_first_segment() {
        for n in 1..=5 {
            let descriptors = (0..n).map(|i| SegmentDescriptor::text(format!("S{i}"))).collect();
            let mut control = SegmentedControl::with_configuration(Configuration::default(), descriptors);
            let layout = control.layout(BOUNDS).unwrap().clone();
            assert_eq!(layout.segments.len(), n);
            assert_eq!(layout.selector.width(), layout.segments[0].width());
        }
    }

    #[test]
    fn line_selector_sits_above_bottom_spacing() {
        let mut control = abc(SelectorStyle::Line);
        let sel = control.layout(BOUNDS).unwrap().selector;
        assert_eq!(sel.height(), 3.0);
        assert_eq!(sel.bottom(), 30.0);
    }

    #[test]
    fn fill_selector_is_inset_by_spacing() {
        let mut control = abc(SelectorStyle::Fill);
        let sel = control.layout(BOUNDS).unwrap().selector;
        assert_eq!(sel.y(), 2.0);
        assert_eq!(sel.height(), 28.0);
    }

    #[test]
    fn hit_test_maps_positions_to_tags() {
        let mut control = abc(SelectorStyle::Line);
        let frames = control.layout(BOUNDS).unwrap().segments.clone();
        assert_eq!(control.hit_test(frames[1].center()), Some(1));
        // Gap between the first two segments.
        assert_eq!(control.hit_test(Vec2::new(frames[0].right() + 1.0, 16.0)), None);
    }

    // ── animation ─────────────────────────────────────────────────────────

    #[test]
    fn tap_moves_selector_to_segment_origin() {
        let mut control = abc(SelectorStyle::Line);
        let seen = record(&mut control);
        control.layout(BOUNDS);
        control.tick(1.0);
        control.handle_tap(2);
        assert_eq!(control.selected_segment_index(), Some(2));
        assert_eq!(*seen.borrow(), vec![2]);
        assert!(control.is_animating());

        control.tick(0.1);
        let mid = control.selector_frame().unwrap().x();
        let target = control.segments()[2].frame().x();
        assert!(mid > control.segments()[0].frame().x());
        assert!(control.is_animating());

        control.tick(1.0);
        assert!(!control.is_animating());
        assert_eq!(control.selector_frame().unwrap().x(), target);
    }

    #[test]
    fn custom_selector_curve_drives_tap_moves() {
        let mut control = abc(SelectorStyle::Line);
        control.set_selector_curve(SpringCurve::default().with_duration(0.1));
        control.layout(BOUNDS);
        control.handle_tap(1);
        assert!(control.is_animating());

        control.tick(0.1);
        assert!(!control.is_animating());
        assert_eq!(control.selector_frame().unwrap().x(), control.segments()[1].frame().x());
    }

    #[test]
    fn selection_before_layout_settles_on_laid_out_frame() {
        let mut control = abc(SelectorStyle::Outline);
        control.handle_tap(1);
        control.layout(Rect::new(10.0, 0.0, 320.0, 40.0));
        control.tick(1.0);
        let x = control.selector_frame().unwrap().x();
        assert!((x - control.segments()[1].frame().x()).abs() < 1e-3);
    }

    #[test]
    fn resting_selector_follows_relayout() {
        let mut control = abc(SelectorStyle::Line);
        control.layout(BOUNDS);
        control.handle_tap(2);
        control.tick(1.0);
        control.layout(Rect::new(0.0, 0.0, 640.0, 32.0));
        assert_eq!(control.selector_frame().unwrap().x(), control.segments()[2].frame().x());
    }

    #[test]
    fn last_move_wins_and_completions_are_deferred() {
        let mut control = abc(SelectorStyle::Line);
        control.layout(BOUNDS);
        let log = Rc::new(RefCell::new(Vec::new()));

        let (a, b) = (log.clone(), log.clone());
        let first = control.move_selector_with(1, SpringCurve::default(), move |done| a.borrow_mut().push(("first", done)));
        let second = control.move_selector_with(2, SpringCurve::default(), move |done| b.borrow_mut().push(("second", done)));
        assert!(first.is_some() && second.is_some());
        assert_ne!(first, second);
        assert!(log.borrow().is_empty());

        control.tick(0.1);
        assert_eq!(*log.borrow(), vec![("first", false)]);
        control.tick(1.0);
        assert_eq!(*log.borrow(), vec![("first", false), ("second", true)]);
        assert_eq!(control.selector_frame().unwrap().x(), control.segments()[2].frame().x());
    }

    #[test]
    fn cancel_stops_the_selector_where_it_is() {
        let mut control = abc(SelectorStyle::Line);
        control.layout(BOUNDS);
        control.tick(1.0);
        let done = Rc::new(RefCell::new(None));
        let sink = done.clone();
        let handle = control
            .move_selector_with(2, SpringCurve::default(), move |ok| *sink.borrow_mut() = Some(ok))
            .unwrap();
        control.tick(0.1);
        let x = control.selector_frame().unwrap().x();

        assert!(control.cancel_animation(handle));
        assert!(!control.cancel_animation(handle));
        control.tick(1.0);
        assert_eq!(*done.borrow(), Some(false));
        assert_eq!(control.selector_frame().unwrap().x(), x);
    }

    #[test]
    fn move_to_missing_segment_reports_failure() {
        let mut control = abc(SelectorStyle::Line);
        let done = Rc::new(RefCell::new(None));
        let sink = done.clone();
        assert!(control.move_selector_with(9, SpringCurve::default(), move |ok| *sink.borrow_mut() = Some(ok)).is_none());
        control.tick(0.0);
        assert_eq!(*done.borrow(), Some(false));
    }

    #[test]
    fn rebuild_recreates_selector_at_origin() {
        let mut control = abc(SelectorStyle::Line);
        control.layout(BOUNDS);
        control.handle_tap(2);
        control.tick(1.0);
        control.set_selector_style(SelectorStyle::Fill);
        assert_eq!(control.selector().unwrap().offset_x(), 0.0);
        assert_eq!(control.selector().unwrap().style(), SelectorStyle::Fill);
    }

    // ── widget ────────────────────────────────────────────────────────────

    #[test]
    fn click_selects_segment_under_pointer() {
        let fonts = FontSystem::new();
        let ctx = LayoutCtx { fonts: &fonts };
        let mut control = abc(SelectorStyle::Fill);
        let seen = record(&mut control);

        let result = control.on_event(&UiEvent::Click { pos: Vec2::new(300.0, 16.0) }, BOUNDS, &ctx);
        assert!(result.is_consumed());
        assert_eq!(control.selected_segment_index(), Some(2));
        assert_eq!(*seen.borrow(), vec![2]);

        let outside = control.on_event(&UiEvent::Click { pos: Vec2::new(400.0, 16.0) }, BOUNDS, &ctx);
        assert_eq!(outside, EventResult::Ignored);
    }

    #[test]
    fn measure_reports_minimum_height() {
        let fonts = FontSystem::new();
        let ctx = LayoutCtx { fonts: &fonts };
        let size = abc(SelectorStyle::Line).measure(Constraints::unbounded(), &ctx);
        assert_eq!(size.y, MIN_HEIGHT);
        assert!(size.x > 0.0);
    }

    #[test]
    fn fill_paint_puts_selector_below_segments() {
        let fonts = FontSystem::new();
        let mut list = DrawList::new();
        let mut control = abc(SelectorStyle::Fill);
        control.set_background_color(Color::white());
        control.layout(BOUNDS);
        {
            let mut painter = Painter::new(&mut list, &fonts);
            control.paint(&mut painter, BOUNDS);
        }
        let rects: Vec<_> = list
            .in_paint_order()
            .into_iter()
            .filter_map(|item| match &item.cmd {
                DrawCmd::RoundedRect(r) => Some(r.clone()),
                _ => None,
            })
            .collect();
        // background, selector, row border
        assert_eq!(rects.len(), 3);
        assert_eq!(rects[0].rect, BOUNDS);
        assert!(matches!(rects[1].paint, Paint::LinearGradient(_)));
        assert!(rects[1].shadow.is_some());
        assert!(rects[2].border.is_some());
    }
}
