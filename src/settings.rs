//! Display preferences
//!
//! Only the theme is configurable. It changes colours, never gameplay.

use serde::{Deserialize, Serialize};

use crate::platform::KeyValueStore;

/// Colour scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// Stored representation (`"enabled"` means dark mode)
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "disabled",
            Theme::Dark => "enabled",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "enabled" => Some(Theme::Dark),
            "disabled" => Some(Theme::Light),
            _ => None,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn palette(&self) -> Palette {
        match self {
            Theme::Light => Palette::LIGHT,
            Theme::Dark => Palette::DARK,
        }
    }
}

/// Colours for one theme, as linear RGBA
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub background: [f32; 4],
    pub player: [f32; 4],
    pub obstacle: [f32; 4],
    pub text: [f32; 4],
}

impl Palette {
    pub const LIGHT: Palette = Palette {
        background: [1.0, 1.0, 1.0, 1.0],
        player: [0.0, 0.0, 1.0, 1.0],
        obstacle: [1.0, 0.0, 0.0, 1.0],
        text: [0.0, 0.0, 0.0, 1.0],
    };

    pub const DARK: Palette = Palette {
        background: [0.0, 0.0, 0.0, 1.0],
        player: [1.0, 1.0, 1.0, 1.0],
        obstacle: [1.0, 1.0, 1.0, 1.0],
        text: [1.0, 1.0, 1.0, 1.0],
    };
}

/// Format an RGBA colour for CSS
pub fn css_color(c: [f32; 4]) -> String {
    let to_byte = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
    format!(
        "rgba({}, {}, {}, {})",
        to_byte(c[0]),
        to_byte(c[1]),
        to_byte(c[2]),
        c[3].clamp(0.0, 1.0)
    )
}

/// Game settings/preferences
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub theme: Theme,
}

impl Settings {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "darkMode";

    pub fn dark_mode(&self) -> bool {
        self.theme == Theme::Dark
    }

    /// Flip the theme and return the new value
    pub fn toggle_theme(&mut self) -> Theme {
        self.theme = self.theme.toggled();
        self.theme
    }

    /// Load from the store; anything but `"enabled"` means light
    pub fn load(store: &impl KeyValueStore) -> Self {
        let theme = match store.get(Self::STORAGE_KEY) {
            Ok(Some(raw)) => Theme::from_str(&raw).unwrap_or_else(|| {
                log::warn!("Unknown theme value {:?}, using light", raw);
                Theme::Light
            }),
            Ok(None) => Theme::Light,
            Err(e) => {
                log::warn!("Could not read theme: {e}");
                Theme::Light
            }
        };
        log::info!("Theme: {:?}", theme);
        Self { theme }
    }

    pub fn save(&self, store: &mut impl KeyValueStore) {
        if let Err(e) = store.set(Self::STORAGE_KEY, self.theme.as_str()) {
            log::warn!("Could not save theme: {e}");
        }
    }
}
