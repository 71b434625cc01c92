//! Renderer-agnostic draw stream.
//!
//! Widgets record commands into a [`DrawList`]; a rasterizer (GPU or CPU)
//! replays them back-to-front. Ordering is deterministic: z-index first,
//! insertion order second.

mod cmd;
mod list;

pub mod shapes;

pub use cmd::DrawCmd;
pub use list::{DrawItem, DrawList, ZIndex};
pub use shapes::{Border, ImageCmd, RoundedRectCmd, Shadow, TextCmd};
