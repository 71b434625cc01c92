use crate::coords::Vec2;
use crate::paint::Color;
use crate::scene::{DrawCmd, DrawList, ZIndex};
use crate::text::FontId;

/// Single-line text payload.
#[derive(Debug, Clone, PartialEq)]
pub struct TextCmd {
    pub text: String,
    pub font: FontId,
    /// Font size in logical pixels.
    pub size: f32,
    pub color: Color,
    /// Top-left of the text box.
    pub origin: Vec2,
}

impl DrawList {
    pub fn push_text(
        &mut self,
        z: ZIndex,
        text: impl Into<String>,
        font: FontId,
        size: f32,
        color: Color,
        origin: Vec2,
    ) {
        self.push(z, DrawCmd::Text(TextCmd { text: text.into(), font, size, color, origin }));
    }
}
