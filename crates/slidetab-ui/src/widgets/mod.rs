pub mod segment;
pub mod segmented_control;
pub mod selector;
