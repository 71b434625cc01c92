use crate::coords::Rect;
use crate::icon::Icon;
use crate::scene::{DrawCmd, DrawList, ZIndex};

/// Bitmap payload, scaled into `rect`.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageCmd {
    pub icon: Icon,
    pub rect: Rect,
}

impl DrawList {
    #[inline]
    pub fn push_image(&mut self, z: ZIndex, icon: Icon, rect: Rect) {
        self.push(z, DrawCmd::Image(ImageCmd { icon, rect }));
    }
}
