//! Layout containers.

mod segment_row;

pub use segment_row::{SegmentRow, DEFAULT_ITEM_GAP};
