use slidetab_engine::coords::{Rect, Vec2};

use crate::constraints::{Constraints, LayoutCtx};
use crate::event::{EventResult, UiEvent};
use crate::painter::Painter;

/// The capability set every component offers its host: measure, paint,
/// hit-test/route input, advance time.
pub trait Widget: 'static {
    /// Size this widget wants within `constraints`.
    ///
    /// Must be deterministic; parents may call it several times per frame.
    fn measure(&self, constraints: Constraints, ctx: &LayoutCtx) -> Vec2;

    /// Commits the final rect before painting. Widgets that cache frames
    /// lay themselves out here.
    fn place(&mut self, _rect: Rect) {}

    /// Draws into `painter` inside `rect`, the space the parent allotted.
    fn paint(&self, painter: &mut Painter, rect: Rect);

    /// Routes an input event. Return [`EventResult::Consumed`] to stop
    /// propagation.
    fn on_event(&mut self, _event: &UiEvent, _rect: Rect, _ctx: &LayoutCtx<'_>) -> EventResult {
        EventResult::Ignored
    }

    /// Advances time-driven state (animations) by `dt` seconds.
    fn tick(&mut self, _dt: f32) {}
}
