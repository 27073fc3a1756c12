//! Configuration file handling for ascii-reel.
//!
//! Loads configuration from `<config_dir>/ascii-reel/config.toml` or a custom path.

use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use crate::ascii::{CharSet, ColorMode, Rgb, DEFAULT_CHAR_ASPECT};
use crate::convert::{ConvertOptions, DEFAULT_EXTENSION};
use crate::player::ViewerOptions;

/// Configuration file structure for ascii-reel.
/// Every field has a default, so an empty file is valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub paths: PathsConfig,
    pub convert: ConvertConfig,
    pub player: PlayerConfig,
    pub log: LogConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Directory scanned for source images
    pub images: PathBuf,
    /// Directory converted files are written to and played from
    pub output: PathBuf,
    /// Extension of converted files, without the dot
    pub extension: String,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            images: PathBuf::from("images"),
            output: PathBuf::from("ascii"),
            extension: DEFAULT_EXTENSION.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConvertConfig {
    pub width: u32,
    pub color_mode: ColorMode,
    pub charset: CharSet,
    pub compress: bool,
    pub threshold: usize,
    pub diff: bool,
    /// `#RRGGBB`
    pub background: String,
    pub char_aspect: f64,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            width: 80,
            color_mode: ColorMode::default(),
            charset: CharSet::default(),
            compress: true,
            threshold: 3,
            diff: true,
            background: "#000000".to_string(),
            char_aspect: DEFAULT_CHAR_ASPECT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub default_delay_ms: u64,
    pub monochrome: bool,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            default_delay_ms: 120,
            monochrome: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// off, error, warn, info, debug or trace
    pub level: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}

impl Config {
    /// Load configuration from a file path.
    ///
    /// Without a path the default location is used, and a missing file there
    /// means defaults. An explicit path must exist. The result is validated.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let (path, explicit) = match path {
            Some(p) => (p.to_path_buf(), true),
            None => (default_path(), false),
        };

        if !path.exists() {
            if explicit {
                return Err(ConfigError::NotFound(path));
            }
            return Ok(Config::default());
        }

        let content = std::fs::read_to_string(&path).map_err(|e| ConfigError::Read {
            path: path.clone(),
            source: e,
        })?;
        let config = Self::parse(&content).map_err(|e| match e {
            ConfigError::Syntax(source) => ConfigError::Parse {
                path: path.clone(),
                source,
            },
            other => other,
        })?;
        log::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Parse and validate TOML text.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content).map_err(ConfigError::Syntax)?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges that the types alone do not enforce.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.convert.width < 2 {
            return Err(ConfigError::Invalid(format!(
                "convert.width must be at least 2, got {}",
                self.convert.width
            )));
        }
        if self.convert.threshold < 1 {
            return Err(ConfigError::Invalid(
                "convert.threshold must be at least 1".to_string(),
            ));
        }
        if !(self.convert.char_aspect.is_finite() && self.convert.char_aspect > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "convert.char_aspect must be positive, got {}",
                self.convert.char_aspect
            )));
        }
        if self.paths.extension.is_empty() || self.paths.extension.contains(['.', '/', '\\']) {
            return Err(ConfigError::Invalid(format!(
                "paths.extension must be a bare extension, got '{}'",
                self.paths.extension
            )));
        }
        self.background()?;
        self.log_level()?;
        Ok(())
    }

    /// Parsed `convert.background`.
    pub fn background(&self) -> Result<Rgb, ConfigError> {
        parse_color(&self.convert.background)
    }

    /// Parsed `log.level`.
    pub fn log_level(&self) -> Result<LevelFilter, ConfigError> {
        LevelFilter::from_str(&self.log.level)
            .map_err(|_| ConfigError::Invalid(format!("unknown log.level '{}'", self.log.level)))
    }

    /// Conversion settings from the `[convert]` section.
    pub fn convert_options(&self) -> Result<ConvertOptions, ConfigError> {
        Ok(ConvertOptions {
            width: self.convert.width,
            color_mode: self.convert.color_mode,
            charset: self.convert.charset,
            compress: self.convert.compress,
            threshold: self.convert.threshold,
            diff: self.convert.diff,
            background: self.background()?,
            char_aspect: self.convert.char_aspect,
        })
    }

    /// Viewer settings from the `[player]` section.
    pub fn viewer_options(&self) -> ViewerOptions {
        ViewerOptions {
            default_delay: Duration::from_millis(self.player.default_delay_ms),
            monochrome: self.player.monochrome,
        }
    }

    /// Render as TOML, for `config show`.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(ConfigError::Serialize)
    }
}

/// Parse a `#RRGGBB` color, reporting the offending text on failure.
pub fn parse_color(text: &str) -> Result<Rgb, ConfigError> {
    if !text.starts_with('#') {
        return Err(ConfigError::Invalid(format!(
            "color must look like #RRGGBB, got '{}'",
            text
        )));
    }
    Rgb::from_hex(text)
        .ok_or_else(|| ConfigError::Invalid(format!("color must look like #RRGGBB, got '{}'", text)))
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config file not found: '{}'", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to read config file '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid config: {0}")]
    Syntax(#[source] toml::de::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),

    #[error("Failed to render config: {0}")]
    Serialize(#[source] toml::ser::Error),
}

/// Get the default config file path.
pub fn default_path() -> PathBuf {
    dirs::config_dir()
        .map(|d| d.join("ascii-reel").join("config.toml"))
        .unwrap_or_else(|| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".config/ascii-reel/config.toml")
        })
}

/// Template written by `config init`.
pub const DEFAULT_CONFIG: &str = r##"# ascii-reel configuration

[paths]
# Source images to convert
images = "images"
# Converted files (written by convert, read by view)
output = "ascii"
# Extension of converted files
extension = "ascii"

[convert]
# Output width in characters
width = 80
# Glyph mode: grayscale, inverted, color
color_mode = "color"
# Character set: standard, blocks, minimal
charset = "standard"
# Run-length encode rows
compress = true
# Shortest run written as a count
threshold = 3
# Store animation frames as row deltas
diff = true
# Color transparent pixels are drawn over
background = "#000000"
# Row height correction for terminal cells
char_aspect = 0.55

[player]
# Frame duration when a file stores none
default_delay_ms = 120
# Strip colors during playback
monochrome = false

[log]
# off, error, warn, info, debug, trace
level = "info"
# Log file (the viewer only logs to a file)
# file = "ascii-reel.log"
"##;
