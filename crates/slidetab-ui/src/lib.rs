//! slidetab UI: a small retained widget layer on top of `slidetab-engine`,
//! and the [`SegmentedControl`](widgets::segmented_control::SegmentedControl)
//! built with it.
//!
//! # Quick start
//!
//! ```rust,ignore
//! use slidetab_ui::prelude::*;
//!
//! let mut control = SegmentedControl::new();
//! control.set_selector_style(SelectorStyle::Fill);
//! control.append_text_segment("Day", Color::gray(), None);
//! control.append_text_segment("Week", Color::gray(), None);
//! control.on_value_changed(|ev| log::info!("{ev:?}"));
//!
//! let mut scene = UiScene::new();
//! // Per frame:
//! let draw_list = scene.frame(&mut control, Vec2::new(320.0, 32.0), &input, dt);
//! ```
//!
//! # Custom widgets
//!
//! Implement [`Widget`](widget::Widget): `measure` and `paint` are required,
//! `on_event` and `tick` default to no-ops.

pub mod constraints;
pub mod event;
pub mod layout;
pub mod painter;
pub mod scene;
pub mod theme;
pub mod widget;
pub mod widgets;

/// Everything needed to build and embed the control.
pub mod prelude {
    pub use crate::constraints::{Constraints, Edges, LayoutCtx};
    pub use crate::event::{ControlEvent, ControlEvents, EventResult, ListenerId, UiEvent};
    pub use crate::layout::SegmentRow;
    pub use crate::painter::Painter;
    pub use crate::scene::{UiInput, UiScene};
    pub use crate::theme::{Theme, ThemeMode};
    pub use crate::widget::Widget;
    pub use crate::widgets::segment::{IconTint, Segment, SegmentDescriptor};
    pub use crate::widgets::segmented_control::{
        BuildState, Configuration, ControlLayout, SegmentedControl,
    };
    pub use crate::widgets::selector::{Selector, SelectorStyle};

    pub use slidetab_engine::anim::{AnimationHandle, SpringCurve};
    pub use slidetab_engine::coords::{CornerRadii, Rect, Vec2};
    pub use slidetab_engine::icon::Icon;
    pub use slidetab_engine::paint::{Color, LinearGradient, Paint};
    pub use slidetab_engine::scene::{Border, Shadow};
    pub use slidetab_engine::text::FontId;
}
