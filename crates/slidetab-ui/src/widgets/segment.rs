use slidetab_engine::coords::{Rect, Vec2};
use slidetab_engine::icon::Icon;
use slidetab_engine::paint::{Color, Paint};
use slidetab_engine::text::FontId;

use crate::constraints::LayoutCtx;
use crate::painter::Painter;

/// Default label size in logical pixels.
pub const DEFAULT_FONT_SIZE: f32 = 15.0;
/// Space between icon and label when a segment shows both.
const ICON_LABEL_GAP: f32 = 4.0;
/// Horizontal breathing room reported by [`Segment::natural_size`].
const CONTENT_PADDING: f32 = 8.0;

// ── SegmentDescriptor ─────────────────────────────────────────────────────

/// What a segment shows. Immutable once handed to a control; its position in
/// the control's list defines its index.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentDescriptor {
    pub icon: Option<Icon>,
    pub text: Option<String>,
    pub text_color: Color,
    pub font: Option<FontId>,
    pub font_size: f32,
    pub corner_radius: f32,
}

impl SegmentDescriptor {
    pub fn new(icon: Option<Icon>, text: Option<String>) -> Self {
        Self {
            icon,
            text,
            text_color: Color::gray(),
            font: None,
            font_size: DEFAULT_FONT_SIZE,
            corner_radius: 0.0,
        }
    }

    /// Text-only segment.
    pub fn text(text: impl Into<String>) -> Self {
        Self::new(None, Some(text.into()))
    }

    /// Icon-only segment.
    pub fn icon(icon: Icon) -> Self {
        Self::new(Some(icon), None)
    }

    pub fn text_color(mut self, v: Color) -> Self { self.text_color = v; self }
    pub fn font(mut self, v: Option<FontId>) -> Self { self.font = v; self }
    pub fn font_size(mut self, v: f32) -> Self { self.font_size = v; self }
    pub fn corner_radius(mut self, v: f32) -> Self { self.corner_radius = v; self }
}

// ── IconTint ──────────────────────────────────────────────────────────────

/// How a segment's icon is currently rendered.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum IconTint {
    /// Source pixels, untouched.
    Original,
    /// Recolored to this color, alpha kept.
    Tinted(Color),
}

// ── Segment ───────────────────────────────────────────────────────────────

/// One pressable unit of a segmented control.
///
/// Built from a [`SegmentDescriptor`] and owned by the control. The control
/// assigns its tag, frame and colors; the segment only renders them.
#[derive(Debug, Clone)]
pub struct Segment {
    descriptor: SegmentDescriptor,
    tag: usize,
    background: Color,
    title_color: Color,
    icon_tint: IconTint,
    /// Icon as currently displayed; shares pixels with the source when
    /// untinted.
    displayed_icon: Option<Icon>,
    /// At most two recent tints (foreground and selected foreground), keyed
    /// by their RGBA8 value.
    tint_cache: Vec<([u8; 4], Icon)>,
    selected: bool,
    frame: Rect,
}

impl Segment {
    pub fn new(descriptor: SegmentDescriptor) -> Self {
        let title_color = descriptor.text_color;
        let displayed_icon = descriptor.icon.clone();
        Self {
            descriptor,
            tag: 0,
            background: Color::transparent(),
            title_color,
            icon_tint: IconTint::Original,
            displayed_icon,
            tint_cache: Vec::with_capacity(2),
            selected: false,
            frame: Rect::default(),
        }
    }

    #[inline]
    pub fn descriptor(&self) -> &SegmentDescriptor {
        &self.descriptor
    }

    /// Ordinal position, used to route taps back to the control.
    #[inline]
    pub fn tag(&self) -> usize {
        self.tag
    }

    #[inline]
    pub fn frame(&self) -> Rect {
        self.frame
    }

    #[inline]
    pub fn background(&self) -> Color {
        self.background
    }

    #[inline]
    pub fn title_color(&self) -> Color {
        self.title_color
    }

    #[inline]
    pub fn icon_tint(&self) -> IconTint {
        self.icon_tint
    }

    #[inline]
    pub fn displayed_icon(&self) -> Option<&Icon> {
        self.displayed_icon.as_ref()
    }

    /// Whether the last selection pass marked this segment.
    #[inline]
    pub fn is_selected(&self) -> bool {
        self.selected
    }

    // ── mutation (control-driven) ─────────────────────────────────────────

    pub(crate) fn set_tag(&mut self, tag: usize) {
        self.tag = tag;
    }

    pub(crate) fn set_frame(&mut self, frame: Rect) {
        self.frame = frame;
    }

    pub(crate) fn clear_background(&mut self) {
        self.background = Color::transparent();
    }

    pub(crate) fn set_title_color(&mut self, color: Color) {
        self.title_color = color;
    }

    pub(crate) fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
    }

    /// Shows the icon recolored to `color`, or the source pixels for `None`.
    pub(crate) fn set_icon_tint(&mut self, color: Option<Color>) {
        let Some(source) = self.descriptor.icon.as_ref() else {
            self.icon_tint = color.map_or(IconTint::Original, IconTint::Tinted);
            return;
        };
        match color {
            None => {
                self.icon_tint = IconTint::Original;
                self.displayed_icon = Some(source.clone());
            }
            Some(color) => {
                let key = color.to_rgba8();
                let tinted = match self.tint_cache.iter().find(|(k, _)| *k == key) {
                    Some((_, icon)) => icon.clone(),
                    None => {
                        let icon = source.tinted(color);
                        if self.tint_cache.len() == 2 {
                            self.tint_cache.remove(0);
                        }
                        self.tint_cache.push((key, icon.clone()));
                        icon
                    }
                };
                self.icon_tint = IconTint::Tinted(color);
                self.displayed_icon = Some(tinted);
            }
        }
    }

    // ── layout & paint ────────────────────────────────────────────────────

    fn label(&self) -> Option<&str> {
        self.descriptor.text.as_deref().filter(|t| !t.is_empty())
    }

    fn icon_size(&self) -> Vec2 {
        self.descriptor
            .icon
            .as_ref()
            .map_or(Vec2::zero(), |i| Vec2::new(i.width() as f32, i.height() as f32))
    }

    /// Content size (icon, gap, label) plus horizontal padding.
    pub fn natural_size(&self, ctx: &LayoutCtx) -> Vec2 {
        let icon = self.icon_size();
        let label = self
            .label()
            .map_or(Vec2::zero(), |t| ctx.fonts.measure_text(t, self.descriptor.font, self.descriptor.font_size));
        let gap = if icon.x > 0.0 && label.x > 0.0 { ICON_LABEL_GAP } else { 0.0 };
        Vec2::new(icon.x + gap + label.x + 2.0 * CONTENT_PADDING, icon.y.max(label.y))
    }

    /// Paints background, icon and label centered in `rect`.
    pub fn paint(&self, painter: &mut Painter, rect: Rect) {
        painter.fill_rounded_rect(rect, self.descriptor.corner_radius, Paint::Solid(self.background), None);

        let label = self.label();
        let label_size = label.map_or(Vec2::zero(), |t| {
            painter.measure_text(t, self.descriptor.font, self.descriptor.font_size)
        });

        // Icons never exceed the segment height; aspect ratio is kept.
        let mut icon_size = self.icon_size();
        if icon_size.y > rect.height() && icon_size.y > 0.0 {
            icon_size = icon_size * (rect.height() / icon_size.y);
        }

        let gap = if icon_size.x > 0.0 && label_size.x > 0.0 { ICON_LABEL_GAP } else { 0.0 };
        let content_w = icon_size.x + gap + label_size.x;
        let mut x = rect.center().x - content_w * 0.5;
        let cy = rect.center().y;

        if let Some(icon) = self.displayed_icon.as_ref() {
            painter.image(icon, Rect::new(x, cy - icon_size.y * 0.5, icon_size.x, icon_size.y));
            x += icon_size.x + gap;
        }
        if let Some(text) = label {
            painter.text(
                text,
                self.descriptor.font,
                self.descriptor.font_size,
                self.title_color,
                Vec2::new(x, cy - label_size.y * 0.5),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slidetab_engine::text::FontSystem;

    fn red_dot() -> Icon {
        Icon::from_rgba(1, 1, vec![255, 0, 0, 255]).unwrap()
    }

    #[test]
    fn new_segment_uses_descriptor_text_color() {
        let seg = Segment::new(SegmentDescriptor::text("A").text_color(Color::white()));
        assert_eq!(seg.title_color(), Color::white());
        assert!(!seg.is_selected());
    }

    #[test]
    fn tint_recolors_displayed_icon_only() {
        let mut seg = Segment::new(SegmentDescriptor::icon(red_dot()));
        seg.set_icon_tint(Some(Color::white()));
        assert_eq!(seg.icon_tint(), IconTint::Tinted(Color::white()));
        assert_eq!(seg.displayed_icon().unwrap().pixels().get_pixel(0, 0).0, [255, 255, 255, 255]);
        assert_eq!(seg.descriptor().icon.as_ref().unwrap().pixels().get_pixel(0, 0).0, [255, 0, 0, 255]);
    }

    #[test]
    fn untinting_restores_source_pixels() {
        let source = red_dot();
        let mut seg = Segment::new(SegmentDescriptor::icon(source.clone()));
        seg.set_icon_tint(Some(Color::black()));
        seg.set_icon_tint(None);
        assert!(seg.displayed_icon().unwrap().shares_pixels_with(&source));
    }

    #[test]
    fn repeated_tint_reuses_cached_icon() {
        let mut seg = Segment::new(SegmentDescriptor::icon(red_dot()));
        seg.set_icon_tint(Some(Color::gray()));
        let first = seg.displayed_icon().unwrap().clone();
        seg.set_icon_tint(Some(Color::white()));
        seg.set_icon_tint(Some(Color::gray()));
        assert!(seg.displayed_icon().unwrap().shares_pixels_with(&first));
    }

    #[test]
    fn natural_size_without_font_uses_estimate() {
        let fonts = FontSystem::new();
        let ctx = LayoutCtx { fonts: &fonts };
        let seg = Segment::new(SegmentDescriptor::text("ab").font_size(10.0));
        let size = seg.natural_size(&ctx);
        assert_eq!(size.x, 11.0 + 2.0 * CONTENT_PADDING);
    }
}
