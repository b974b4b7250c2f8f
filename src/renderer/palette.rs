//! Colors
//!
//! Hex color strings as they appear in the config file, and the resolved
//! RGB values the rasterizer and scene composer work with.

use serde::{Deserialize, Serialize};

/// An opaque RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0, 0, 0);
    pub const WHITE: Rgb = Rgb(255, 255, 255);

    /// Parse `#RRGGBB` (the `#` is optional)
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim_start_matches('#');
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }

        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;

        Some(Rgb(r, g, b))
    }

    /// Linear blend toward `other` by `alpha` (0 keeps self, 255 gives other)
    pub fn blend(self, other: Rgb, alpha: u8) -> Rgb {
        let a = alpha as u16;
        let inv = 255 - a;
        let mix = |from: u8, to: u8| ((from as u16 * inv + to as u16 * a + 127) / 255) as u8;
        Rgb(mix(self.0, other.0), mix(self.1, other.1), mix(self.2, other.2))
    }
}

/// Monitor frame colors handed to the scene composer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BezelStyle {
    /// Frame body
    pub frame: Rgb,
    /// Frame edge highlight
    pub edge: Rgb,
    /// Outline around the screen plane
    pub screen_edge: Rgb,
}

/// Bezel colors as configured
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BezelColors {
    pub frame: String,
    pub edge: String,
    pub screen_edge: String,
}

impl BezelColors {
    fn standard() -> Self {
        Self {
            frame: "#444444".to_string(),
            edge: "#888888".to_string(),
            screen_edge: "#00aa00".to_string(),
        }
    }

    fn retro() -> Self {
        Self {
            frame: "#c8b88a".to_string(),
            edge: "#e0d4a8".to_string(),
            screen_edge: "#ffb000".to_string(),
        }
    }

    fn resolve(&self, fallback: &BezelColors) -> BezelStyle {
        let pick = |value: &str, default: &str| {
            Rgb::from_hex(value)
                .or_else(|| Rgb::from_hex(default))
                .unwrap_or(Rgb::BLACK)
        };
        BezelStyle {
            frame: pick(&self.frame, &fallback.frame),
            edge: pick(&self.edge, &fallback.edge),
            screen_edge: pick(&self.screen_edge, &fallback.screen_edge),
        }
    }

    /// All configured strings with their field names, for validation
    pub fn fields(&self) -> [(&'static str, &str); 3] {
        [
            ("frame", &self.frame),
            ("edge", &self.edge),
            ("screen_edge", &self.screen_edge),
        ]
    }
}

/// Screen and frame colors
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    /// Terminal text
    pub foreground: String,
    /// Screen fill
    pub background: String,
    /// Crack lines on a destroyed screen
    pub crack: String,
    /// Frame colors in normal mode
    pub bezel: BezelColors,
    /// Frame colors in retro mode
    pub retro_bezel: BezelColors,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            foreground: "#00ff00".to_string(),
            background: "#000000".to_string(),
            crack: "#ffffff".to_string(),
            bezel: BezelColors::standard(),
            retro_bezel: BezelColors::retro(),
        }
    }
}

impl Palette {
    /// Resolve hex strings, falling back to defaults for anything unparsable
    pub fn resolve(&self) -> ResolvedPalette {
        ResolvedPalette {
            foreground: Rgb::from_hex(&self.foreground).unwrap_or(Rgb(0, 255, 0)),
            background: Rgb::from_hex(&self.background).unwrap_or(Rgb::BLACK),
            crack: Rgb::from_hex(&self.crack).unwrap_or(Rgb::WHITE),
            bezel: self.bezel.resolve(&BezelColors::standard()),
            retro_bezel: self.retro_bezel.resolve(&BezelColors::retro()),
        }
    }
}

/// Palette with every color parsed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedPalette {
    pub foreground: Rgb,
    pub background: Rgb,
    pub crack: Rgb,
    pub bezel: BezelStyle,
    pub retro_bezel: BezelStyle,
}

impl ResolvedPalette {
    /// Frame colors for the current retro flag
    pub fn bezel_for(&self, retro: bool) -> BezelStyle {
        if retro {
            self.retro_bezel
        } else {
            self.bezel
        }
    }
}

impl Default for ResolvedPalette {
    fn default() -> Self {
        Palette::default().resolve()
    }
}
