//! slidetab engine crate.
//!
//! Owns the host-toolkit primitives the widget layer is written against:
//! geometry, paint, a renderer-agnostic draw list, text metrics, icon
//! tinting, spring animation and frame timing. Nothing here knows about
//! segmented controls.

pub mod anim;
pub mod coords;
pub mod icon;
pub mod logging;
pub mod paint;
pub mod scene;
pub mod text;
pub mod time;
