use image::{Rgba, RgbaImage};

use crate::paint::Color;

/// Recolors `src` to `color` while keeping its alpha shape.
///
/// Every output pixel takes the tint's RGB; its alpha is the source alpha
/// scaled by the tint's alpha. Fully transparent pixels stay fully
/// transparent.
pub fn tint(src: &RgbaImage, color: Color) -> RgbaImage {
    let [r, g, b, a] = color.to_rgba8();
    let mut out = RgbaImage::new(src.width(), src.height());
    for (dst, px) in out.pixels_mut().zip(src.pixels()) {
        let alpha = (px.0[3] as u16 * a as u16 + 127) / 255;
        *dst = if alpha == 0 { Rgba([0, 0, 0, 0]) } else { Rgba([r, g, b, alpha as u8]) };
    }
    out
}
