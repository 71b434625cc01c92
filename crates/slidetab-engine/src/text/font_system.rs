use std::fmt;

use fontdue::layout::{CoordinateSystem, Layout, LayoutSettings, TextStyle};

use crate::coords::Vec2;

/// Line height used when a font is missing or the text is empty.
const FALLBACK_LINE_HEIGHT: f32 = 1.2;
/// Average advance, as a fraction of the font size, used when no font is loaded.
const FALLBACK_ADVANCE: f32 = 0.55;

/// Error returned by [`FontSystem::load_font`].
#[derive(Debug, Clone)]
pub struct FontLoadError(pub String);

impl fmt::Display for FontLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "font load error: {}", self.0)
    }
}

impl std::error::Error for FontLoadError {}

/// Opaque handle to a font loaded into a [`FontSystem`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct FontId(pub(crate) usize);

/// Coverage mask of one laid-out glyph, positioned relative to the text origin.
#[derive(Debug, Clone)]
pub struct GlyphBitmap {
    pub x: f32,
    pub y: f32,
    pub width: usize,
    pub height: usize,
    /// Row-major 8-bit coverage, `width * height` bytes.
    pub coverage: Vec<u8>,
}

/// Owns every loaded font. Fonts are immutable once loaded.
#[derive(Default)]
pub struct FontSystem {
    fonts: Vec<fontdue::Font>,
}

impl FontSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a TrueType/OpenType font and returns its handle.
    pub fn load_font(&mut self, bytes: &[u8]) -> Result<FontId, FontLoadError> {
        let font = fontdue::Font::from_bytes(bytes, fontdue::FontSettings::default())
            .map_err(|e| FontLoadError(e.to_string()))?;
        let id = FontId(self.fonts.len());
        self.fonts.push(font);
        log::debug!("font {} loaded ({} bytes)", id.0, bytes.len());
        Ok(id)
    }

    fn get(&self, id: FontId) -> Option<&fontdue::Font> {
        self.fonts.get(id.0)
    }

    /// `id` when it names a loaded font, otherwise the first loaded font.
    pub fn resolve(&self, id: Option<FontId>) -> Option<FontId> {
        match id {
            Some(id) if id.0 < self.fonts.len() => Some(id),
            _ => (!self.fonts.is_empty()).then_some(FontId(0)),
        }
    }

    /// Single-line extent of `text` at `size` logical pixels.
    ///
    /// Falls back to the first loaded font when `id` is `None` or unknown.
    /// With no fonts at all the extent is estimated from the character
    /// count, so layout stays usable in headless contexts.
    #[must_use]
    pub fn measure_text(&self, text: &str, id: Option<FontId>, size: f32) -> Vec2 {
        let Some(font) = self.resolve(id).and_then(|id| self.get(id)) else {
            return estimate(text, size);
        };
        let layout = layout_line(font, text, size);
        let glyphs = layout.glyphs();
        if glyphs.is_empty() {
            return Vec2::new(0.0, size * FALLBACK_LINE_HEIGHT);
        }
        // Pen position after each glyph, not the bitmap edge, so trailing
        // side bearings count toward the width.
        let w = glyphs
            .iter()
            .map(|g| {
                let m = font.metrics_indexed(g.key.glyph_index, size);
                (g.x - m.xmin as f32 + m.advance_width).max(0.0)
            })
            .fold(0.0f32, f32::max);
        let h = layout.height().max(size * FALLBACK_LINE_HEIGHT);
        Vec2::new(w, h)
    }

    /// Rasterizes a single line of text into positioned coverage masks.
    ///
    /// Returns an empty list when `id` does not name a loaded font.
    pub fn rasterize_text(&self, text: &str, id: FontId, size: f32) -> Vec<GlyphBitmap> {
        let Some(font) = self.get(id) else {
            return Vec::new();
        };
        let layout = layout_line(font, text, size);
        layout
            .glyphs()
            .iter()
            .filter(|g| g.width > 0 && g.height > 0)
            .map(|g| {
                let (metrics, coverage) = font.rasterize_config(g.key);
                GlyphBitmap {
                    x: g.x,
                    y: g.y,
                    width: metrics.width,
                    height: metrics.height,
                    coverage,
                }
            })
            .collect()
    }
}

fn layout_line(font: &fontdue::Font, text: &str, size: f32) -> Layout<()> {
    let mut layout: Layout<()> = Layout::new(CoordinateSystem::PositiveYDown);
    layout.reset(&LayoutSettings::default());
    layout.append(&[font], &TextStyle::new(text, size, 0));
    layout
}

fn estimate(text: &str, size: f32) -> Vec2 {
    let chars = text.chars().count() as f32;
    Vec2::new(chars * size * FALLBACK_ADVANCE, size * FALLBACK_LINE_HEIGHT)
}
