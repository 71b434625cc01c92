//! Frame timing.
//!
//! One [`FrameClock`] per render loop; call `step()` once per frame
//! and feed `dt` to animated widgets.

mod frame_clock;

pub use frame_clock::{FrameClock, FrameTime};
