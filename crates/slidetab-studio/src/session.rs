//! TOML session files: which control to build and what to do with it.
//!
//! ```toml
//! [canvas]
//! width = 360
//! height = 44
//!
//! [control]
//! style = "fill"
//! corner_radius = 8.0
//! foreground = "#8E8E93"
//!
//! [[segments]]
//! text = "Day"
//!
//! [[script]]
//! tap = 1
//! [[script]]
//! wait = 0.6
//! [[script]]
//! snapshot = "week"
//! ```

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Deserialize;

use slidetab_engine::paint::Color;
use slidetab_ui::prelude::{Configuration, SelectorStyle};

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Session {
    #[serde(default)]
    pub canvas: Canvas,
    #[serde(default)]
    pub control: ControlSpec,
    #[serde(default)]
    pub segments: Vec<SegmentSpec>,
    #[serde(default)]
    pub script: Vec<Step>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
    /// Frames per simulated second.
    pub fps: u32,
}

impl Default for Canvas {
    fn default() -> Self {
        Self { width: 360, height: 44, fps: 60 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StyleName {
    Fill,
    Outline,
    #[default]
    Line,
}

impl From<StyleName> for SelectorStyle {
    fn from(s: StyleName) -> Self {
        match s {
            StyleName::Fill => SelectorStyle::Fill,
            StyleName::Outline => SelectorStyle::Outline,
            StyleName::Line => SelectorStyle::Line,
        }
    }
}

/// Control styling. Colors are hex strings; malformed ones render gray.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ControlSpec {
    pub style: StyleName,
    pub corner_radius: Option<f32>,
    pub spacing: Option<f32>,
    pub foreground: Option<String>,
    pub selected_foreground: Option<String>,
    pub selector: Option<String>,
    pub background: Option<String>,
    pub preserve_icon_color: bool,
    /// Take colors from the system theme instead of the fields above.
    pub themed: bool,
}

impl ControlSpec {
    /// Layers the session's values over the control defaults.
    pub fn configuration(&self) -> Configuration {
        let base = Configuration::default();
        let color = |hex: &Option<String>, fallback: Color| hex.as_deref().map_or(fallback, Color::from_hex);
        Configuration {
            selector_style: self.style.into(),
            foreground_color: color(&self.foreground, base.foreground_color),
            selected_foreground_color: color(&self.selected_foreground, base.selected_foreground_color),
            selector_color: color(&self.selector, base.selector_color),
            background_color: color(&self.background, base.background_color),
            corner_radius: self.corner_radius.unwrap_or(base.corner_radius),
            spacing: self.spacing.unwrap_or(base.spacing),
            preserve_icon_color: self.preserve_icon_color,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SegmentSpec {
    pub text: Option<String>,
    /// Image file, relative to the session file.
    pub icon: Option<PathBuf>,
    pub text_color: Option<String>,
}

/// One scripted action.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    /// Tap the center of segment `n`.
    Tap(usize),
    /// Let `n` seconds of frames run.
    Wait(f32),
    /// Write the current frame to `<out>/<name>.png`.
    Snapshot(String),
    /// Switch the selector style (rebuilds the control).
    Style(StyleName),
}

impl Session {
    pub fn parse(text: &str) -> anyhow::Result<Self> {
        let session: Session = toml::from_str(text).context("invalid session file")?;
        Ok(session)
    }

    /// Reads `path` and resolves icon paths against its directory.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read session {}", path.display()))?;
        let mut session = Self::parse(&text).with_context(|| format!("in {}", path.display()))?;
        if let Some(dir) = path.parent() {
            for seg in &mut session.segments {
                if let Some(icon) = seg.icon.as_mut().filter(|p| p.is_relative()) {
                    *icon = dir.join(&*icon);
                }
            }
        }
        Ok(session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_demo_parses() {
        let session = Session::parse(include_str!("../sessions/demo.toml")).unwrap();
        assert!(!session.segments.is_empty());
        assert!(session.script.iter().any(|s| matches!(s, Step::Snapshot(_))));
    }

    #[test]
    fn empty_session_uses_defaults() {
        let session = Session::parse("").unwrap();
        assert_eq!(session.canvas.width, 360);
        assert_eq!(session.control.configuration(), Configuration::default());
        assert!(session.script.is_empty());
    }

    #[test]
    fn script_steps_are_externally_tagged() {
        let session = Session::parse(
            r#"
            [[script]]
            tap = 2
            [[script]]
            wait = 0.5
            [[script]]
            style = "outline"
            "#,
        )
        .unwrap();
        assert_eq!(session.script, vec![Step::Tap(2), Step::Wait(0.5), Step::Style(StyleName::Outline)]);
    }

    #[test]
    fn malformed_hex_falls_back_to_gray() {
        let session = Session::parse("[control]\nselector = \"#12\"\nforeground = \"00ff00\"\n").unwrap();
        let config = session.control.configuration();
        assert_eq!(config.selector_color, Color::gray());
        assert_eq!(config.foreground_color, Color::from_rgba8(0, 255, 0, 255));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(Session::parse("[control]\nbogus = 1\n").is_err());
    }
}
