use crate::coords::{CornerRadii, Rect};
use crate::paint::Paint;
use crate::scene::{DrawCmd, DrawList, ZIndex};

use super::{Border, Shadow};

/// Rounded rectangle payload. Zero radii give a plain rectangle.
#[derive(Debug, Clone, PartialEq)]
pub struct RoundedRectCmd {
    pub rect: Rect,
    pub radii: CornerRadii,
    pub paint: Paint,
    pub border: Option<Border>,
    pub shadow: Option<Shadow>,
}

impl RoundedRectCmd {
    #[inline]
    pub fn new(rect: Rect, radii: CornerRadii, paint: Paint, border: Option<Border>) -> Self {
        Self { rect, radii, paint, border, shadow: None }
    }

    #[inline]
    #[must_use]
    pub fn with_shadow(mut self, shadow: Option<Shadow>) -> Self {
        self.shadow = shadow;
        self
    }
}

impl DrawList {
    /// Records a rounded rectangle.
    #[inline]
    pub fn push_rounded_rect(&mut self, z: ZIndex, cmd: RoundedRectCmd) {
        self.push(z, DrawCmd::RoundedRect(cmd));
    }
}
