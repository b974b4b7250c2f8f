//! Configuration for the portfolio terminal

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::commands::DEFAULT_PROFILE_URL;
use crate::core::DEFAULT_HEADER;
use crate::renderer::{Palette, Rgb, TextMetrics, DEFAULT_CRACK_COUNT, DEFAULT_HEIGHT, DEFAULT_WIDTH};
use crate::viewport::DEFAULT_COMPACT_THRESHOLD;

/// Environment variable naming a config file
pub const CONFIG_ENV: &str = "PORTFOLIO_TERM_CONFIG";

/// Terminal configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Pixel surface size
    pub surface: SurfaceConfig,
    /// Font and spacing metrics
    pub text: TextMetrics,
    /// Screen and frame colors
    pub palette: Palette,
    /// Boot and flash timers
    pub timing: TimingConfig,
    /// Compact layout threshold
    pub viewport: ViewportConfig,
    /// Header and link settings
    pub terminal: TerminalConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            surface: SurfaceConfig::default(),
            text: TextMetrics::default(),
            palette: Palette::default(),
            timing: TimingConfig::default(),
            viewport: ViewportConfig::default(),
            terminal: TerminalConfig::default(),
        }
    }
}

/// Pixel surface configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurfaceConfig {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Crack segments on a destroyed screen
    pub crack_count: usize,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            crack_count: DEFAULT_CRACK_COUNT,
        }
    }
}

/// What a repeated `bob` does to a pending flash revert
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FlashPolicy {
    /// Cancel the pending revert and start a fresh window
    #[default]
    RestartWindow,
    /// Keep every revert; the earliest one clears the flag
    Independent,
}

impl FlashPolicy {
    /// Parse a policy name
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "restart-window" | "restart" => Some(FlashPolicy::RestartWindow),
            "independent" => Some(FlashPolicy::Independent),
            _ => None,
        }
    }
}

/// Timer configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// Boot screen duration in milliseconds
    pub boot_delay_ms: u64,
    /// Eye flash duration in milliseconds
    pub flash_delay_ms: u64,
    /// Repeated flash handling
    pub flash_policy: FlashPolicy,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            boot_delay_ms: 2000,
            flash_delay_ms: 2000,
            flash_policy: FlashPolicy::RestartWindow,
        }
    }
}

impl TimingConfig {
    pub fn boot_delay(&self) -> Duration {
        Duration::from_millis(self.boot_delay_ms)
    }

    pub fn flash_delay(&self) -> Duration {
        Duration::from_millis(self.flash_delay_ms)
    }
}

/// Viewport configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportConfig {
    /// Widths below this use the compact text list
    pub compact_threshold: u32,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            compact_threshold: DEFAULT_COMPACT_THRESHOLD,
        }
    }
}

/// Terminal text configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerminalConfig {
    /// First line shown at start and after `clear`
    pub header: String,
    /// Profile opened by `linkedin`
    pub profile_url: String,
}

impl Default for TerminalConfig {
    fn default() -> Self {
        Self {
            header: DEFAULT_HEADER.to_string(),
            profile_url: DEFAULT_PROFILE_URL.to_string(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Load from `$PORTFOLIO_TERM_CONFIG`, then the default location, else defaults
    pub fn load_or_default() -> Self {
        let candidates = std::env::var_os(CONFIG_ENV)
            .map(PathBuf::from)
            .into_iter()
            .chain(default_config_path());

        for path in candidates {
            if !path.exists() {
                continue;
            }
            match Self::load(&path) {
                Ok(config) => {
                    tracing::debug!("Loaded config from {}", path.display());
                    return config;
                }
                Err(e) => tracing::warn!("Ignoring config {}: {}", path.display(), e),
            }
        }
        Self::default()
    }

    /// Check ranges and colors
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.surface.width == 0 || self.surface.height == 0 {
            return Err(ConfigError::invalid("surface", "width and height must be non-zero"));
        }
        if !(4.0..=200.0).contains(&self.text.font_size) {
            return Err(ConfigError::invalid("text.font_size", "must be between 4 and 200"));
        }
        if self.text.advance_ratio <= 0.0 {
            return Err(ConfigError::invalid("text.advance_ratio", "must be positive"));
        }
        if self.text.line_height <= 0.0 {
            return Err(ConfigError::invalid("text.line_height", "must be positive"));
        }
        if self.text.margin < 0.0 || self.text.top_offset < 0.0 {
            return Err(ConfigError::invalid("text", "margin and top_offset must not be negative"));
        }

        let palette = &self.palette;
        validate_color(&palette.foreground, "palette.foreground")?;
        validate_color(&palette.background, "palette.background")?;
        validate_color(&palette.crack, "palette.crack")?;
        for (name, value) in palette.bezel.fields() {
            validate_color(value, &format!("palette.bezel.{name}"))?;
        }
        for (name, value) in palette.retro_bezel.fields() {
            validate_color(value, &format!("palette.retro_bezel.{name}"))?;
        }

        Ok(())
    }
}

fn validate_color(color: &str, field: &str) -> Result<(), ConfigError> {
    if Rgb::from_hex(color).is_none() {
        return Err(ConfigError::invalid(
            field,
            format!("invalid hex color '{color}', expected #RRGGBB"),
        ));
    }
    Ok(())
}

/// Get the configuration file path
pub fn default_config_path() -> Option<PathBuf> {
    std::env::var("HOME").ok().map(|home| {
        PathBuf::from(home)
            .join(".config")
            .join("portfolio-term")
            .join("config.json")
    })
}

/// Configuration error
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid {field}: {message}")]
    Invalid { field: String, message: String },
}

impl ConfigError {
    fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        ConfigError::Invalid {
            field: field.into(),
            message: message.into(),
        }
    }
}
