//! Time-driven animation primitives.
//!
//! A [`SpringCurve`] maps elapsed time to progress; a [`Tween`] pairs a curve
//! with a start and end value and is advanced by the host frame loop. Nothing
//! here schedules itself: callers feed `dt` from their
//! [`FrameClock`](crate::time::FrameClock).

mod spring;
mod tween;

pub use spring::{Easing, SpringCurve};
pub use tween::{AnimationHandle, Tween};
