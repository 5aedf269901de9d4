use super::theme::{Color, Theme};
use serde::Deserialize;
use std::path::Path;

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Config {
    pub colors: ColorsConfig,
    pub selection: SelectionConfig,
    pub display: DisplayConfig,
}

/// Colors/theme configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorsConfig {
    pub theme: String,
}

/// Selection highlight configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionConfig {
    /// Hex override for the theme's selection color.
    pub color: Option<String>,
    pub opacity: f32,
}

/// Display surface configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayConfig {
    pub scale_factor: f32,
    pub max_surface_dimension: u32,
}

/// Errors that can occur during config loading and validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("parse error: {0}")]
    Parse(String),
    #[error("validation error: {0}")]
    Validation(String),
}

// ── Serde intermediate structs (unknown keys are ignored) ───────────────

#[derive(Deserialize, Default)]
#[serde(default)]
struct RawConfig {
    colors: RawColorsConfig,
    selection: RawSelectionConfig,
    display: RawDisplayConfig,
}

#[derive(Deserialize)]
#[serde(default)]
struct RawColorsConfig {
    theme: String,
}

impl Default for RawColorsConfig {
    fn default() -> Self {
        Self {
            theme: "dark".to_string(),
        }
    }
}

#[derive(Deserialize)]
#[serde(default)]
struct RawSelectionConfig {
    color: Option<String>,
    opacity: f32,
}

impl Default for RawSelectionConfig {
    fn default() -> Self {
        Self {
            color: None,
            opacity: 0.5,
        }
    }
}

#[derive(Deserialize)]
#[serde(default)]
struct RawDisplayConfig {
    scale_factor: f32,
    max_surface_dimension: u32,
}

impl Default for RawDisplayConfig {
    fn default() -> Self {
        Self {
            scale_factor: 1.0,
            max_surface_dimension: 8192,
        }
    }
}

// ── Default impls ───────────────────────────────────────────────────────

impl Default for ColorsConfig {
    fn default() -> Self {
        Self {
            theme: "dark".to_string(),
        }
    }
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            color: None,
            opacity: 0.5,
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            scale_factor: 1.0,
            max_surface_dimension: 8192,
        }
    }
}

const DEFAULT_CONFIG_TOML: &str = r##"[colors]
# Base palette for the selection highlight: "dark" or "light"
theme = "dark"

[selection]
# Optional "#RRGGBB" override for the theme's highlight color
# color = "#FFFFFF"
opacity = 0.5

[display]
# Physical pixels per logical pixel
scale_factor = 1.0
# Largest surface edge, in physical pixels
max_surface_dimension = 8192
"##;

// ── Config implementation ───────────────────────────────────────────────

impl Config {
    /// Load config from a TOML file path. Returns defaults if file does not exist.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(contents) => Self::from_toml(&contents),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No config file at {}, using defaults", path.display());
                Ok(Self::default())
            }
            Err(e) => Err(ConfigError::Io(e)),
        }
    }

    /// Parse a TOML string into a Config.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let raw: RawConfig =
            toml::from_str(toml_str).map_err(|e| ConfigError::Parse(e.to_string()))?;

        let config = Self {
            colors: ColorsConfig {
                theme: raw.colors.theme,
            },
            selection: SelectionConfig {
                color: raw.selection.color,
                opacity: raw.selection.opacity,
            },
            display: DisplayConfig {
                scale_factor: raw.display.scale_factor,
                max_surface_dimension: raw.display.max_surface_dimension,
            },
        };

        config.validate()?;
        Ok(config)
    }

    /// The documented default config file.
    pub fn print_default() -> &'static str {
        DEFAULT_CONFIG_TOML
    }

    /// Validate the config, returning an error if any values are out of range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if Theme::from_name(&self.colors.theme).is_none() {
            return Err(ConfigError::Validation(format!(
                "unknown theme '{}', valid themes: {}",
                self.colors.theme,
                Theme::NAMES.join(", ")
            )));
        }

        if let Some(hex) = &self.selection.color {
            if Color::from_hex(hex).is_none() {
                return Err(ConfigError::Validation(format!(
                    "selection color '{hex}' is not a #RRGGBB hex color"
                )));
            }
        }

        if !(0.0..=1.0).contains(&self.selection.opacity) {
            return Err(ConfigError::Validation(
                "selection opacity must be within 0.0..=1.0".to_string(),
            ));
        }

        if !(self.display.scale_factor.is_finite() && self.display.scale_factor > 0.0) {
            return Err(ConfigError::Validation(
                "scale_factor must be a finite value > 0".to_string(),
            ));
        }

        if self.display.max_surface_dimension == 0 {
            return Err(ConfigError::Validation(
                "max_surface_dimension must be > 0".to_string(),
            ));
        }

        Ok(())
    }

    /// Resolve the highlight color: the override or the theme color, at the configured opacity.
    pub fn highlight_color(&self) -> Color {
        let base = self
            .selection
            .color
            .as_deref()
            .and_then(Color::from_hex)
            .or_else(|| Theme::from_name(&self.colors.theme).map(Theme::selection))
            .unwrap_or(Theme::Dark.selection());
        base.with_alpha(self.selection.opacity)
    }
}
