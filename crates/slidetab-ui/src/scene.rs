use slidetab_engine::coords::{Rect, Vec2};
use slidetab_engine::scene::DrawList;
use slidetab_engine::text::{FontId, FontLoadError, FontSystem};

use crate::constraints::{Constraints, LayoutCtx};
use crate::event::UiEvent;
use crate::painter::Painter;
use crate::widget::Widget;

/// Input snapshot for one frame.
#[derive(Debug, Clone, Default)]
pub struct UiInput {
    pub mouse_pos: Vec2,
    /// `true` for exactly one frame when the primary button is released.
    pub mouse_clicked: bool,
}

/// Per-window coordinator: owns fonts and the frame's draw list.
///
/// A frame runs `tick → measure → place → paint → events`; state changed by
/// events shows up in the next frame's paint.
#[derive(Default)]
pub struct UiScene {
    pub font_system: FontSystem,
    pub draw_list: DrawList,
}

impl UiScene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load_font(&mut self, data: &[u8]) -> Result<FontId, FontLoadError> {
        self.font_system.load_font(data)
    }

    /// Runs one frame for `root`, which persists across frames in the caller.
    pub fn frame<W: Widget + ?Sized>(
        &mut self,
        root: &mut W,
        viewport: Vec2,
        input: &UiInput,
        dt: f32,
    ) -> &DrawList {
        self.draw_list.clear();
        root.tick(dt);

        let ctx = LayoutCtx { fonts: &self.font_system };
        let _ = root.measure(Constraints::loose(viewport), &ctx);
        let rect = Rect::new(0.0, 0.0, viewport.x, viewport.y);
        root.place(rect);

        {
            let mut painter = Painter::new(&mut self.draw_list, &self.font_system);
            root.paint(&mut painter, rect);
        }

        if input.mouse_clicked {
            root.on_event(&UiEvent::Click { pos: input.mouse_pos }, rect, &ctx);
        }

        &self.draw_list
    }
}
