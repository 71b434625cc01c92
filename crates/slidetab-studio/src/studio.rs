use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;
use std::time::Duration;

use anyhow::{Context, bail};

use slidetab_engine::time::FrameClock;
use slidetab_ui::prelude::*;

use crate::raster::Raster;
use crate::session::{Session, Step};

/// Drives one control through a scripted session, frame by frame.
pub struct Studio {
    scene: UiScene,
    control: SegmentedControl,
    raster: Raster,
    clock: FrameClock,
    viewport: Vec2,
    frame_dt: Duration,
    clear_color: Color,
    frames: u64,
    changes: Rc<RefCell<Vec<usize>>>,
}

impl Studio {
    pub fn new(session: &Session, theme: &Theme, font: Option<&[u8]>) -> anyhow::Result<Self> {
        let mut scene = UiScene::new();
        match font {
            Some(bytes) => {
                scene.load_font(bytes).context("failed to load font")?;
            }
            None => log::warn!("no system font found; labels will not be drawn"),
        }

        let mut control = build_control(session, theme)?;
        let changes = Rc::new(RefCell::new(Vec::new()));
        let sink = changes.clone();
        control.on_value_changed(move |ev| {
            let ControlEvent::ValueChanged { selected_index } = *ev;
            log::info!("value changed: segment {selected_index}");
            sink.borrow_mut().push(selected_index);
        });

        let canvas = session.canvas;
        let fps = canvas.fps.max(1);
        Ok(Self {
            scene,
            control,
            raster: Raster::new(canvas.width, canvas.height)?,
            clock: FrameClock::new(),
            viewport: Vec2::new(canvas.width as f32, canvas.height as f32),
            frame_dt: Duration::from_secs_f64(1.0 / fps as f64),
            clear_color: theme.system_background,
            frames: 0,
            changes,
        })
    }

    /// Runs every step, writing snapshots into `out_dir`.
    pub fn run(&mut self, script: &[Step], out_dir: &Path) -> anyhow::Result<()> {
        self.frame(UiInput::default());
        for step in script {
            log::debug!("step {step:?}");
            match step {
                Step::Tap(index) => self.tap(*index)?,
                Step::Wait(seconds) => self.wait(*seconds),
                Step::Snapshot(name) => self.snapshot(&out_dir.join(format!("{name}.png")))?,
                Step::Style(style) => self.control.set_selector_style((*style).into()),
            }
        }
        Ok(())
    }

    /// Indices reported by value-changed notifications, in order.
    pub fn changes(&self) -> Vec<usize> {
        self.changes.borrow().clone()
    }

    #[inline]
    pub fn frames(&self) -> u64 {
        self.frames
    }

    #[inline]
    pub fn control(&self) -> &SegmentedControl {
        &self.control
    }

    fn frame(&mut self, input: UiInput) {
        let dt = self.clock.step(self.frame_dt).dt;
        self.scene.frame(&mut self.control, self.viewport, &input, dt);
        self.frames += 1;
    }

    fn tap(&mut self, index: usize) -> anyhow::Result<()> {
        let Some(segment) = self.control.segments().get(index) else {
            bail!("tap on segment {index}, but the control has {}", self.control.segment_count());
        };
        let pos = segment.frame().center();
        self.frame(UiInput { mouse_pos: pos, mouse_clicked: true });
        Ok(())
    }

    fn wait(&mut self, seconds: f32) {
        let frames = (seconds.max(0.0) / self.frame_dt.as_secs_f32()).ceil() as u64;
        for _ in 0..frames {
            self.frame(UiInput::default());
        }
    }

    fn snapshot(&mut self, path: &Path) -> anyhow::Result<()> {
        self.raster.render(&self.scene.draw_list, &self.scene.font_system, self.clear_color);
        self.raster.save_png(path)?;
        log::info!("wrote {}", path.display());
        Ok(())
    }
}

fn build_control(session: &Session, theme: &Theme) -> anyhow::Result<SegmentedControl> {
    let spec = &session.control;
    let config = spec.configuration();

    let mut descriptors = Vec::with_capacity(session.segments.len());
    for seg in &session.segments {
        let icon = match seg.icon.as_deref() {
            Some(path) => Some(Icon::load(path).with_context(|| format!("icon {}", path.display()))?),
            None => None,
        };
        let mut descriptor = SegmentDescriptor::new(icon, seg.text.clone()).corner_radius(config.corner_radius);
        if let Some(hex) = seg.text_color.as_deref() {
            descriptor = descriptor.text_color(Color::from_hex(hex));
        }
        descriptors.push(descriptor);
    }

    if !spec.themed {
        return Ok(SegmentedControl::with_configuration(config, descriptors));
    }
    let mut control =
        SegmentedControl::themed(descriptors, config.selector_style, config.corner_radius, theme);
    if let Some(spacing) = spec.spacing {
        control.set_spacing(spacing);
    }
    if spec.preserve_icon_color {
        control.set_preserve_icon_color(true);
    }
    Ok(control)
}
