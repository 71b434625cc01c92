//! CPU rasterizer for a [`DrawList`], enough to snapshot the control.

use std::path::Path;

use anyhow::{Context, anyhow};
use tiny_skia::{
    FillRule, GradientStop, Mask, Paint as SkPaint, PathBuilder, Pixmap, PixmapPaint, Point, PremultipliedColorU8,
    SpreadMode, Stroke, Transform,
};

use slidetab_engine::coords::{CornerRadii, Rect, Vec2};
use slidetab_engine::paint::{Color, Paint};
use slidetab_engine::scene::{DrawCmd, DrawList, ImageCmd, RoundedRectCmd, TextCmd};
use slidetab_engine::text::FontSystem;

/// Cubic approximation of a quarter circle.
const KAPPA: f32 = 0.552_284_8;
/// Drop shadows are faked with this many stacked, fading outsets.
const SHADOW_LAYERS: usize = 4;

pub struct Raster {
    pixmap: Pixmap,
}

impl Raster {
    pub fn new(width: u32, height: u32) -> anyhow::Result<Self> {
        let pixmap = Pixmap::new(width, height).ok_or_else(|| anyhow!("invalid canvas size {width}x{height}"))?;
        Ok(Self { pixmap })
    }

    /// Clears to `background` and draws `list` in paint order.
    pub fn render(&mut self, list: &DrawList, fonts: &FontSystem, background: Color) {
        self.pixmap.fill(sk_color(background));
        for item in list.in_paint_order() {
            let mask = item.clip_rect.and_then(|clip| self.clip_mask(clip));
            match &item.cmd {
                DrawCmd::RoundedRect(cmd) => self.rounded_rect(cmd, mask.as_ref()),
                DrawCmd::Text(cmd) => self.text(cmd, fonts, item.clip_rect),
                DrawCmd::Image(cmd) => self.image(cmd, mask.as_ref()),
            }
        }
    }

    pub fn save_png(&self, path: &Path) -> anyhow::Result<()> {
        self.pixmap
            .save_png(path)
            .with_context(|| format!("failed to write {}", path.display()))
    }

    /// Premultiplied RGBA of the pixel at (`x`, `y`).
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        let p = self.pixmap.pixel(x, y)?;
        Some([p.red(), p.green(), p.blue(), p.alpha()])
    }

    fn clip_mask(&self, clip: Rect) -> Option<Mask> {
        let mut mask = Mask::new(self.pixmap.width(), self.pixmap.height())?;
        let path = PathBuilder::from_rect(sk_rect(clip)?);
        mask.fill_path(&path, FillRule::Winding, true, Transform::identity());
        Some(mask)
    }

    fn rounded_rect(&mut self, cmd: &RoundedRectCmd, mask: Option<&Mask>) {
        if let Some(shadow) = cmd.shadow.as_ref() {
            let base = cmd.rect.translate_x(shadow.offset.x);
            let base = Rect::new(base.x(), base.y() + shadow.offset.y, base.width(), base.height());
            let step = shadow.blur / SHADOW_LAYERS as f32;
            let (_, _, _, alpha) = shadow.color.to_straight();
            for layer in (0..SHADOW_LAYERS).rev() {
                let grow = step * (layer as f32 + 1.0) * 0.5;
                let rect = base.outset(grow);
                let radii = grown(cmd.radii, grow);
                let color = shadow.color.with_alpha(alpha / (SHADOW_LAYERS as f32 + layer as f32));
                if let Some(path) = rounded_path(rect, radii) {
                    self.pixmap.fill_path(&path, &solid(color), FillRule::Winding, Transform::identity(), mask);
                }
            }
        }

        let Some(path) = rounded_path(cmd.rect, cmd.radii) else {
            return;
        };
        if !cmd.paint.is_invisible() {
            if let Some(paint) = sk_paint(&cmd.paint) {
                self.pixmap.fill_path(&path, &paint, FillRule::Winding, Transform::identity(), mask);
            }
        }
        if let Some(border) = cmd.border.as_ref().filter(|b| b.width > 0.0) {
            // Stroke inside the rect, like a layer border.
            let half = border.width * 0.5;
            let inner = cmd.rect.outset(-half);
            if let Some(path) = rounded_path(inner, grown(cmd.radii, -half)) {
                let stroke = Stroke { width: border.width, ..Stroke::default() };
                self.pixmap.stroke_path(&path, &solid(border.color), &stroke, Transform::identity(), mask);
            }
        }
    }

    fn text(&mut self, cmd: &TextCmd, fonts: &FontSystem, clip: Option<Rect>) {
        let [r, g, b, a] = cmd.color.to_rgba8();
        let (w, h) = (self.pixmap.width() as i32, self.pixmap.height() as i32);
        let pixels = self.pixmap.pixels_mut();

        for glyph in fonts.rasterize_text(&cmd.text, cmd.font, cmd.size) {
            let gx = (cmd.origin.x + glyph.x).round() as i32;
            let gy = (cmd.origin.y + glyph.y).round() as i32;
            for row in 0..glyph.height {
                for col in 0..glyph.width {
                    let (x, y) = (gx + col as i32, gy + row as i32);
                    if x < 0 || y < 0 || x >= w || y >= h {
                        continue;
                    }
                    if clip.is_some_and(|c| !c.contains(Vec2::new(x as f32, y as f32))) {
                        continue;
                    }
                    let coverage = glyph.coverage[row * glyph.width + col] as u32;
                    if coverage == 0 {
                        continue;
                    }
                    let idx = (y * w + x) as usize;
                    pixels[idx] = blend(pixels[idx], [r, g, b, a], coverage);
                }
            }
        }
    }

    fn image(&mut self, cmd: &ImageCmd, mask: Option<&Mask>) {
        let icon = &cmd.icon;
        let Some(mut src) = Pixmap::new(icon.width(), icon.height()) else {
            return;
        };
        for (dst, px) in src.pixels_mut().iter_mut().zip(icon.pixels().pixels()) {
            let [r, g, b, a] = px.0;
            let pm = |c: u8| ((c as u32 * a as u32 + 127) / 255) as u8;
            if let Some(c) = PremultipliedColorU8::from_rgba(pm(r), pm(g), pm(b), a) {
                *dst = c;
            }
        }
        let sx = cmd.rect.width() / icon.width().max(1) as f32;
        let sy = cmd.rect.height() / icon.height().max(1) as f32;
        let transform = Transform::from_row(sx, 0.0, 0.0, sy, cmd.rect.x(), cmd.rect.y());
        self.pixmap.draw_pixmap(0, 0, src.as_ref(), &PixmapPaint::default(), transform, mask);
    }
}

/// Source-over of straight `color` at `coverage` / 255 onto a premultiplied
/// pixel.
fn blend(dst: PremultipliedColorU8, color: [u8; 4], coverage: u32) -> PremultipliedColorU8 {
    let sa = color[3] as u32 * coverage / 255;
    let inv = 255 - sa;
    let ch = |s: u8, d: u8| ((s as u32 * sa + d as u32 * inv + 127) / 255) as u8;
    let out_a = (sa + (dst.alpha() as u32 * inv + 127) / 255).min(255) as u8;
    let (r, g, b) = (ch(color[0], dst.red()), ch(color[1], dst.green()), ch(color[2], dst.blue()));
    PremultipliedColorU8::from_rgba(r.min(out_a), g.min(out_a), b.min(out_a), out_a).unwrap_or(dst)
}

fn sk_color(c: Color) -> tiny_skia::Color {
    let [r, g, b, a] = c.to_rgba8();
    tiny_skia::Color::from_rgba8(r, g, b, a)
}

fn sk_rect(r: Rect) -> Option<tiny_skia::Rect> {
    tiny_skia::Rect::from_xywh(r.x(), r.y(), r.width(), r.height())
}

fn solid(c: Color) -> SkPaint<'static> {
    let mut paint = SkPaint::default();
    paint.set_color(sk_color(c));
    paint.anti_alias = true;
    paint
}

fn sk_paint(p: &Paint) -> Option<SkPaint<'static>> {
    match p {
        Paint::Solid(c) => Some(solid(*c)),
        Paint::LinearGradient(g) => {
            let stops = g.stops.iter().map(|s| GradientStop::new(s.t, sk_color(s.color))).collect();
            let shader = tiny_skia::LinearGradient::new(
                Point::from_xy(g.start.x, g.start.y),
                Point::from_xy(g.end.x, g.end.y),
                stops,
                SpreadMode::Pad,
                Transform::identity(),
            )?;
            let mut paint = SkPaint::default();
            paint.shader = shader;
            paint.anti_alias = true;
            Some(paint)
        }
    }
}

fn grown(radii: CornerRadii, d: f32) -> CornerRadii {
    let g = |r: f32| if r > 0.0 { (r + d).max(0.0) } else { 0.0 };
    CornerRadii {
        top_left: g(radii.top_left),
        top_right: g(radii.top_right),
        bottom_right: g(radii.bottom_right),
        bottom_left: g(radii.bottom_left),
    }
}

fn rounded_path(rect: Rect, radii: CornerRadii) -> Option<tiny_skia::Path> {
    if rect.is_empty() {
        return None;
    }
    let r = radii.fit(rect.width(), rect.height());
    let (x0, y0, x1, y1) = (rect.x(), rect.y(), rect.right(), rect.bottom());
    let mut pb = PathBuilder::new();
    pb.move_to(x0 + r.top_left, y0);
    pb.line_to(x1 - r.top_right, y0);
    corner(&mut pb, (x1 - r.top_right, y0), (x1, y0 + r.top_right), (x1, y0), r.top_right);
    pb.line_to(x1, y1 - r.bottom_right);
    corner(&mut pb, (x1, y1 - r.bottom_right), (x1 - r.bottom_right, y1), (x1, y1), r.bottom_right);
    pb.line_to(x0 + r.bottom_left, y1);
    corner(&mut pb, (x0 + r.bottom_left, y1), (x0, y1 - r.bottom_left), (x0, y1), r.bottom_left);
    pb.line_to(x0, y0 + r.top_left);
    corner(&mut pb, (x0, y0 + r.top_left), (x0 + r.top_left, y0), (x0, y0), r.top_left);
    pb.close();
    pb.finish()
}

/// Quarter arc from `from` to `to` bending toward the rect corner `at`.
fn corner(pb: &mut PathBuilder, from: (f32, f32), to: (f32, f32), at: (f32, f32), radius: f32) {
    if radius <= 0.0 {
        pb.line_to(to.0, to.1);
        return;
    }
    let c1 = (from.0 + (at.0 - from.0) * KAPPA, from.1 + (at.1 - from.1) * KAPPA);
    let c2 = (to.0 + (at.0 - to.0) * KAPPA, to.1 + (at.1 - to.1) * KAPPA);
    pb.cubic_to(c1.0, c1.1, c2.0, c2.1, to.0, to.1);
}

#[cfg(test)]
mod tests {
    use super::*;
    use slidetab_engine::scene::{Border, ZIndex};

    #[test]
    fn solid_rect_fills_its_pixels() {
        let mut list = DrawList::new();
        list.push_rounded_rect(
            ZIndex(0),
            RoundedRectCmd::new(Rect::new(2.0, 2.0, 6.0, 6.0), CornerRadii::zero(), Paint::Solid(Color::black()), None),
        );
        let mut raster = Raster::new(10, 10).unwrap();
        raster.render(&list, &FontSystem::new(), Color::white());
        assert_eq!(raster.pixel(5, 5), Some([0, 0, 0, 255]));
        assert_eq!(raster.pixel(0, 0), Some([255, 255, 255, 255]));
    }

    #[test]
    fn clip_limits_drawing() {
        let mut list = DrawList::new();
        list.push_clip(Rect::new(0.0, 0.0, 5.0, 10.0));
        list.push_rounded_rect(
            ZIndex(0),
            RoundedRectCmd::new(Rect::new(0.0, 0.0, 10.0, 10.0), CornerRadii::zero(), Paint::Solid(Color::black()), None),
        );
        list.pop_clip();
        let mut raster = Raster::new(10, 10).unwrap();
        raster.render(&list, &FontSystem::new(), Color::white());
        assert_eq!(raster.pixel(2, 5), Some([0, 0, 0, 255]));
        assert_eq!(raster.pixel(8, 5), Some([255, 255, 255, 255]));
    }

    #[test]
    fn border_is_drawn_inside_the_rect() {
        let mut list = DrawList::new();
        list.push_rounded_rect(
            ZIndex(0),
            RoundedRectCmd::new(
                Rect::new(0.0, 0.0, 10.0, 10.0),
                CornerRadii::zero(),
                Paint::Solid(Color::transparent()),
                Some(Border::new(2.0, Color::black())),
            ),
        );
        let mut raster = Raster::new(10, 10).unwrap();
        raster.render(&list, &FontSystem::new(), Color::white());
        assert_eq!(raster.pixel(0, 5), Some([0, 0, 0, 255]));
        assert_eq!(raster.pixel(5, 5), Some([255, 255, 255, 255]));
    }

    #[test]
    fn rounded_path_rejects_empty_rects() {
        assert!(rounded_path(Rect::new(0.0, 0.0, 0.0, 4.0), CornerRadii::all(2.0)).is_none());
        assert!(rounded_path(Rect::new(0.0, 0.0, 8.0, 4.0), CornerRadii::all(2.0)).is_some());
    }

    #[test]
    fn blend_full_coverage_replaces_pixel() {
        let dst = PremultipliedColorU8::from_rgba(255, 255, 255, 255).unwrap();
        let out = blend(dst, [0, 0, 0, 255], 255);
        assert_eq!((out.red(), out.alpha()), (0, 255));
    }
}
