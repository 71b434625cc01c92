use slidetab_engine::coords::{CornerRadii, Rect, Vec2};
use slidetab_engine::icon::Icon;
use slidetab_engine::paint::{Color, Paint};
use slidetab_engine::scene::{Border, DrawList, RoundedRectCmd, Shadow, ZIndex};
use slidetab_engine::text::{FontId, FontSystem};

/// Drawing surface handed to [`Widget::paint`](crate::widget::Widget::paint).
///
/// Every call lands one z-step above the previous one, so paint order is
/// call order.
pub struct Painter<'a> {
    draw_list: &'a mut DrawList,
    font_system: &'a FontSystem,
    z: i32,
}

impl<'a> Painter<'a> {
    pub fn new(draw_list: &'a mut DrawList, font_system: &'a FontSystem) -> Self {
        Self { draw_list, font_system, z: 0 }
    }

    #[inline]
    pub fn measure_text(&self, text: &str, font: Option<FontId>, size: f32) -> Vec2 {
        self.font_system.measure_text(text, font, size)
    }

    // ── drawing ───────────────────────────────────────────────────────────

    /// Rounded rectangle. `radius = 0` gives sharp corners.
    pub fn fill_rounded_rect(
        &mut self,
        rect: Rect,
        radius: f32,
        paint: impl Into<Paint>,
        border: Option<Border>,
    ) {
        self.fill_rounded_rect_with_shadow(rect, radius, paint, border, None);
    }

    /// Rounded rectangle with a drop shadow underneath.
    pub fn fill_rounded_rect_with_shadow(
        &mut self,
        rect: Rect,
        radius: f32,
        paint: impl Into<Paint>,
        border: Option<Border>,
        shadow: Option<Shadow>,
    ) {
        let paint = paint.into();
        if paint.is_invisible() && border.is_none() && shadow.is_none() {
            return;
        }
        let radii = CornerRadii::all(radius).fit(rect.width(), rect.height());
        let cmd = RoundedRectCmd::new(rect, radii, paint, border).with_shadow(shadow);
        let z = self.next_z();
        self.draw_list.push_rounded_rect(z, cmd);
    }

    /// Single line of text with its top-left at `origin`.
    ///
    /// Falls back to the first loaded font; draws nothing when no font is
    /// loaded at all.
    pub fn text(
        &mut self,
        text: &str,
        font: Option<FontId>,
        size: f32,
        color: Color,
        origin: Vec2,
    ) {
        let Some(font) = self.font_system.resolve(font) else {
            log::trace!("no font loaded, skipping text {text:?}");
            return;
        };
        let z = self.next_z();
        self.draw_list.push_text(z, text, font, size, color, origin);
    }

    /// Bitmap scaled into `rect`.
    pub fn image(&mut self, icon: &Icon, rect: Rect) {
        let z = self.next_z();
        self.draw_list.push_image(z, icon.clone(), rect);
    }

    // ── clipping ──────────────────────────────────────────────────────────

    pub fn push_clip(&mut self, rect: Rect) {
        self.draw_list.push_clip(rect);
    }

    pub fn pop_clip(&mut self) {
        self.draw_list.pop_clip();
    }

    #[inline]
    fn next_z(&mut self) -> ZIndex {
        let z = ZIndex(self.z);
        self.z += 1;
        z
    }
}
