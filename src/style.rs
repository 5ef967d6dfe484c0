// src/style.rs - Injectable style policy for overlays and info panels

use serde::{Deserialize, Serialize};

use crate::color::Rgb;

/// Panel color theme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

/// Font size and weight for one panel text role
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FontSpec {
    pub point_size: f64,
    pub bold: bool,
}

impl FontSpec {
    pub const fn new(point_size: f64, bold: bool) -> Self {
        Self { point_size, bold }
    }
}

/// Colors for an info panel
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PanelPalette {
    pub background: Rgb,
    pub text: Rgb,
    pub separator: Rgb,
    pub input_background: Rgb,
    pub focus_border: Rgb,
}

/// Colors and fonts used by tools and panels.
///
/// Passed to each tool at construction so overlays can be restyled
/// without touching tool logic.
#[derive(Debug, Clone, PartialEq)]
pub struct StylePolicy {
    theme: Theme,
}

impl StylePolicy {
    /// Create a new policy for the given theme
    pub fn new(theme: Theme) -> Self {
        Self { theme }
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    // --- Overlay colors ---

    pub fn distance_line(&self) -> Rgb {
        Rgb::RED
    }

    pub fn distance_label(&self) -> Rgb {
        Rgb::RED
    }

    pub fn first_ray(&self) -> Rgb {
        Rgb::BLUE
    }

    pub fn second_ray(&self) -> Rgb {
        Rgb::GREEN
    }

    pub fn angle_arc(&self) -> Rgb {
        Rgb::RED
    }

    pub fn angle_label(&self) -> Rgb {
        Rgb::RED
    }

    // --- Panels ---

    pub fn panel_palette(&self) -> PanelPalette {
        match self.theme {
            Theme::Dark => PanelPalette {
                background: Rgb::new(0x2d, 0x2d, 0x2d),
                text: Rgb::WHITE,
                separator: Rgb::new(0x55, 0x55, 0x55),
                input_background: Rgb::new(0x3d, 0x3d, 0x3d),
                focus_border: Rgb::new(0x00, 0x78, 0xd4),
            },
            Theme::Light => PanelPalette {
                background: Rgb::new(0xf5, 0xf5, 0xf5),
                text: Rgb::BLACK,
                separator: Rgb::new(0xcc, 0xcc, 0xcc),
                input_background: Rgb::WHITE,
                focus_border: Rgb::new(0x00, 0x78, 0xd4),
            },
        }
    }

    pub fn title_font(&self) -> FontSpec {
        FontSpec::new(12.0, true)
    }

    pub fn section_font(&self) -> FontSpec {
        FontSpec::new(10.0, true)
    }

    pub fn content_font(&self) -> FontSpec {
        FontSpec::new(10.0, false)
    }

    /// Used for the headline value (distance, angle, hex)
    pub fn emphasis_font(&self) -> FontSpec {
        FontSpec::new(14.0, true)
    }
}

impl Default for StylePolicy {
    fn default() -> Self {
        Self::new(Theme::default())
    }
}
