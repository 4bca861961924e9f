//! Configuration file support for poprev.
//!
//! Grid size, view sizes, palette and log verbosity are stored as versioned
//! JSON so a drawing session can be reproduced on another machine.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants;
use crate::model::{GridSize, Label, Palette, Rgb};

/// Log level setting for the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Show only errors
    Error,
    /// Show errors and warnings
    Warn,
    /// Show errors, warnings, and info messages
    #[default]
    Info,
    /// Show debug-level logging
    Debug,
    /// Show all log messages including trace
    Trace,
}

impl LogLevel {
    /// Convert to log crate's LevelFilter.
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Current configuration file format version.
/// Increment this when making breaking changes to the config format.
pub const CONFIG_VERSION: u32 = 1;

/// Application configuration that can be exported and imported.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Version of the configuration file format
    pub version: u32,

    /// Grid dimensions in cells
    #[serde(default)]
    pub grid: GridConfig,

    /// Reference and preview view settings
    #[serde(default)]
    pub view: ViewConfig,

    /// Label colours
    #[serde(default)]
    pub palette: PaletteConfig,

    /// Log verbosity level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Grid section of the config.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridConfig {
    pub width: usize,
    pub height: usize,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            width: constants::DRAW_WIDTH,
            height: constants::DRAW_HEIGHT,
        }
    }
}

/// View section of the config.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewConfig {
    /// Width of the reference context image in pixels
    #[serde(default = "default_reference_width")]
    pub reference_width: usize,

    /// Height of the reference context image in pixels
    #[serde(default = "default_reference_height")]
    pub reference_height: usize,

    /// Neighbourhood radius around the focus cell
    #[serde(default = "default_context_level")]
    pub context_level: usize,

    /// Pixels per cell when showing the whole drawing
    #[serde(default = "default_preview_scale")]
    pub preview_scale: usize,
}

fn default_reference_width() -> usize {
    constants::REF_CANVAS_WIDTH
}

fn default_reference_height() -> usize {
    constants::REF_CANVAS_HEIGHT
}

fn default_context_level() -> usize {
    constants::CONTEXT_LEVEL
}

fn default_preview_scale() -> usize {
    constants::PREVIEW_SCALE
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            reference_width: default_reference_width(),
            reference_height: default_reference_height(),
            context_level: default_context_level(),
            preview_scale: default_preview_scale(),
        }
    }
}

/// Palette section of the config.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaletteConfig {
    /// RGB colours for labels 0..=3
    pub colours: [Rgb; Label::KNOWN_COUNT],
    /// RGB colour of the focus highlight
    #[serde(default = "default_highlight")]
    pub highlight: Rgb,
}

fn default_highlight() -> Rgb {
    constants::HIGHLIGHT_COLOUR
}

impl Default for PaletteConfig {
    fn default() -> Self {
        Self {
            colours: constants::LABEL_COLOURS,
            highlight: default_highlight(),
        }
    }
}

impl AppConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self {
            version: CONFIG_VERSION,
            grid: GridConfig::default(),
            view: ViewConfig::default(),
            palette: PaletteConfig::default(),
            log_level: LogLevel::default(),
        }
    }

    /// Serialize the configuration to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;

        // Validate version compatibility
        if config.version > CONFIG_VERSION {
            return Err(ConfigError::VersionTooNew {
                file_version: config.version,
                supported_version: CONFIG_VERSION,
            });
        }

        config.validate()?;
        Ok(config)
    }

    /// Reject settings no drawing can be built from.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid.width == 0 || self.grid.height == 0 {
            return Err(ConfigError::Invalid(format!(
                "grid must be at least 1x1, got {}x{}",
                self.grid.width, self.grid.height
            )));
        }
        if self.view.reference_width == 0 || self.view.reference_height == 0 {
            return Err(ConfigError::Invalid(
                "reference view must have a non-zero size".to_string(),
            ));
        }
        Ok(())
    }

    /// Grid size for new stores.
    pub fn grid_size(&self) -> GridSize {
        GridSize::new(self.grid.width, self.grid.height)
    }

    /// Palette for new stores.
    pub fn palette(&self) -> Palette {
        Palette::new(
            self.palette.colours,
            constants::FALLBACK_COLOUR_INDEX,
            self.palette.highlight,
        )
    }

    /// Get the default filename for config export.
    pub fn default_filename() -> &'static str {
        "poprev-config.json"
    }

    /// Get the default config file path for auto-load/save.
    pub fn default_path() -> Option<std::path::PathBuf> {
        // Try to use XDG config directory, fall back to home directory
        if let Some(config_dir) = dirs::config_dir() {
            Some(config_dir.join("poprev").join(Self::default_filename()))
        } else {
            dirs::home_dir().map(|home_dir| {
                home_dir
                    .join(".config")
                    .join("poprev")
                    .join(Self::default_filename())
            })
        }
    }

    /// Load configuration from an explicit path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded configuration from {:?}", path);
        Ok(config)
    }

    /// Save configuration to an explicit path, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let json = self.to_json()?;
        std::fs::write(path, json)?;
        log::info!("Saved configuration to {:?}", path);
        Ok(())
    }

    /// Try to load configuration from the default path.
    /// Returns None if the file doesn't exist or can't be read.
    pub fn load_from_default_path() -> Option<Self> {
        let path = Self::default_path()?;
        if !path.exists() {
            log::debug!("No config file found at {:?}", path);
            return None;
        }

        match Self::load_from(&path) {
            Ok(config) => Some(config),
            Err(e) => {
                log::warn!("Failed to load config file {:?}: {}", path, e);
                None
            }
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// JSON parsing error
    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),

    /// Configuration version is newer than supported
    #[error(
        "Configuration file version {file_version} is newer than supported version {supported_version}"
    )]
    VersionTooNew {
        file_version: u32,
        supported_version: u32,
    },

    /// Settings that cannot be used
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    /// I/O error when reading/writing config
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}
