//! Semantic color tokens, resolved once and injected into controls.

use slidetab_engine::paint::Color;

/// Light or dark appearance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

/// The semantic tokens the themed control constructor draws from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Theme {
    pub mode: ThemeMode,
    /// Primary text.
    pub label: Color,
    /// Mid-strength neutral used for filled selectors.
    pub system_gray3: Color,
    /// Translucent fill for control tracks.
    pub system_fill: Color,
    /// Screen background.
    pub system_background: Color,
}

impl Theme {
    pub fn light() -> Self {
        Self {
            mode: ThemeMode::Light,
            label: Color::black(),
            system_gray3: Color::from_hex("#C7C7CC"),
            system_fill: Color::from_rgba8(120, 120, 128, 51),
            system_background: Color::white(),
        }
    }

    pub fn dark() -> Self {
        Self {
            mode: ThemeMode::Dark,
            label: Color::white(),
            system_gray3: Color::from_hex("#48484A"),
            system_fill: Color::from_rgba8(120, 120, 128, 92),
            system_background: Color::black(),
        }
    }

    pub fn for_mode(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Light => Self::light(),
            ThemeMode::Dark => Self::dark(),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::light()
    }
}
