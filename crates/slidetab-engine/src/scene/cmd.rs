use crate::scene::shapes::{ImageCmd, RoundedRectCmd, TextCmd};

/// One recorded drawing operation.
///
/// Adding a shape: new module under `scene::shapes`, new variant here, and a
/// `push_*` helper on [`DrawList`](super::DrawList) inside that module.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    RoundedRect(RoundedRectCmd),
    Text(TextCmd),
    Image(ImageCmd),
}
