use slidetab_engine::coords::{Rect, Vec2};
use slidetab_engine::paint::{Color, LinearGradient, Paint};
use slidetab_engine::scene::{Border, Shadow};

use crate::painter::Painter;

/// Corner radius every freshly built selector gets.
pub const SELECTOR_CORNER_RADIUS: f32 = 4.0;
/// Border width of the `outline` selector.
pub const OUTLINE_WIDTH: f32 = 1.5;
/// Height of the `line` selector bar.
pub const LINE_HEIGHT: f32 = 3.0;

/// Visual treatment of the selection indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectorStyle {
    /// Raised panel behind the selected segment.
    Fill,
    /// Bordered frame around the selected segment.
    Outline,
    /// Thin bar under the selected segment.
    #[default]
    Line,
}

/// What fills the selector's body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SelectorFill {
    None,
    Solid(Color),
    /// Diagonal gradient, top-left to bottom-right.
    Gradient(Color, Color),
}

/// The animated indicator of the active segment.
///
/// Only its horizontal offset moves; size and vertical placement come from
/// layout.
#[derive(Debug, Clone, PartialEq)]
pub struct Selector {
    style: SelectorStyle,
    corner_radius: f32,
    fill: SelectorFill,
    border: Option<Border>,
    shadow: Option<Shadow>,
    /// Horizontal translation relative to the control's left edge.
    offset_x: f32,
}

impl Selector {
    /// Undecorated selector at offset zero.
    pub fn new(style: SelectorStyle) -> Self {
        Self {
            style,
            corner_radius: 0.0,
            fill: SelectorFill::None,
            border: None,
            shadow: None,
            offset_x: 0.0,
        }
    }

    /// Applies the style-specific decoration.
    ///
    /// - `line`: solid `color` bar.
    /// - `fill`: green gradient ghost panel with a soft drop shadow.
    /// - `outline`: clear body with a `color` border.
    pub fn decorated(style: SelectorStyle, color: Color) -> Self {
        let mut selector = Self::new(style).corner_radius(SELECTOR_CORNER_RADIUS);
        match style {
            SelectorStyle::Line => {
                selector.fill = SelectorFill::Solid(color);
            }
            SelectorStyle::Fill => {
                selector.fill = SelectorFill::Gradient(Color::from_hex("#009677"), Color::from_hex("60B848"));
                // 0 1px 5px rgba(0, 0, 0, 0.5)
                selector.shadow = Some(Shadow::new(Color::black().with_alpha(0.5), Vec2::new(0.0, 1.0), 5.0));
            }
            SelectorStyle::Outline => {
                selector.border = Some(Border::new(OUTLINE_WIDTH, color));
            }
        }
        selector
    }

    pub fn corner_radius(mut self, v: f32) -> Self {
        self.corner_radius = v.max(0.0);
        self
    }

    #[inline]
    pub fn style(&self) -> SelectorStyle {
        self.style
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.corner_radius
    }

    #[inline]
    pub fn fill(&self) -> SelectorFill {
        self.fill
    }

    #[inline]
    pub fn border(&self) -> Option<&Border> {
        self.border.as_ref()
    }

    #[inline]
    pub fn shadow(&self) -> Option<&Shadow> {
        self.shadow.as_ref()
    }

    #[inline]
    pub fn offset_x(&self) -> f32 {
        self.offset_x
    }

    pub(crate) fn set_offset_x(&mut self, x: f32) {
        self.offset_x = x;
    }

    /// Vertical placement inside `bounds`, at offset zero.
    ///
    /// `line` is a fixed-height bar whose bottom is inset by `spacing`;
    /// `fill` and `outline` span the height minus `spacing` top and bottom.
    pub fn base_frame(&self, bounds: Rect, width: f32, spacing: f32) -> Rect {
        match self.style {
            SelectorStyle::Line => {
                Rect::new(bounds.x(), bounds.bottom() - spacing - LINE_HEIGHT, width, LINE_HEIGHT)
            }
            SelectorStyle::Fill | SelectorStyle::Outline => Rect::new(
                bounds.x(),
                bounds.y() + spacing,
                width,
                (bounds.height() - 2.0 * spacing).max(0.0),
            ),
        }
    }

    pub fn paint(&self, painter: &mut Painter, rect: Rect) {
        let paint = match self.fill {
            SelectorFill::None => Paint::Solid(Color::transparent()),
            SelectorFill::Solid(c) => Paint::Solid(c),
            SelectorFill::Gradient(from, to) => {
                let g = LinearGradient::diagonal(rect, from, to);
                if g.is_valid() { Paint::LinearGradient(g) } else { Paint::Solid(from) }
            }
        };
        painter.fill_rounded_rect_with_shadow(
            rect,
            self.corner_radius,
            paint,
            self.border.clone(),
            self.shadow.clone(),
        );
    }
}
