//! Configuration management for roomchat.
//!
//! The config file lives at a platform-appropriate location:
//! - Linux: `~/.config/roomchat/config.toml`
//! - macOS: `~/Library/Application Support/roomchat/config.toml`
//!
//! Every field is optional. A missing file means "all defaults".
//!
//! # Config File Format (TOML)
//!
//! ```toml
//! nick = "florent"
//! min_height = 4
//! min_width = 7
//!
//! [theme]
//! moderator = "red"
//! participant = "blue"
//! visitor = "green"
//! fallback = "white"
//! divider = "blue"
//! bar_fg = "white"
//! bar_bg = "blue"
//! nick_colors = ["cyan", "magenta", "yellow", "green"]
//! ```
//!
//! Color names are kept as strings here; the terminal crate parses them.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur when loading or saving configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file at {path}: {source}")]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file at {path}: {source}")]
    ParseFile {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("failed to write config file at {path}: {source}")]
    WriteFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("could not determine config directory for this platform")]
    NoConfigDir,
}

/// Smallest terminal that leaves every screen region at least one cell:
/// topic, one log row, status, and input stacked; a 1-column participant
/// list needs 7 columns.
pub const DEFAULT_MIN_HEIGHT: u16 = 4;
pub const DEFAULT_MIN_WIDTH: u16 = 7;

/// The persisted configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Nick used for messages typed into the input line.
    pub nick: String,

    /// Refuse to lay out the screen below this many rows.
    pub min_height: u16,

    /// Refuse to lay out the screen below this many columns.
    pub min_width: u16,

    /// Colors for roles, bars, and speaker names.
    pub theme: ThemeConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            nick: "me".to_string(),
            min_height: DEFAULT_MIN_HEIGHT,
            min_width: DEFAULT_MIN_WIDTH,
            theme: ThemeConfig::default(),
        }
    }
}

/// Color names for each semantic slot of the palette.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    pub moderator: String,
    pub participant: String,
    pub visitor: String,
    /// Used for unknown roles and for speakers not in the participant list.
    pub fallback: String,
    /// The vertical line between the log and the participant list.
    pub divider: String,
    pub bar_fg: String,
    pub bar_bg: String,
    /// Speaker colors, indexed by `Participant::color`.
    pub nick_colors: Vec<String>,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            moderator: "red".to_string(),
            participant: "blue".to_string(),
            visitor: "green".to_string(),
            fallback: "white".to_string(),
            divider: "blue".to_string(),
            bar_fg: "white".to_string(),
            bar_bg: "blue".to_string(),
            nick_colors: ["cyan", "magenta", "yellow", "green", "red", "blue"]
                .iter()
                .map(|c| c.to_string())
                .collect(),
        }
    }
}

impl AppConfig {
    /// Returns the platform-appropriate config directory path.
    pub fn config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("roomchat"))
    }

    /// Returns the full path to the config file.
    pub fn config_file_path() -> Result<PathBuf, ConfigError> {
        Ok(Self::config_dir()
            .ok_or(ConfigError::NoConfigDir)?
            .join("config.toml"))
    }

    /// Returns the platform-appropriate data directory, where the log file
    /// is written.
    ///
    /// - Linux: `~/.local/share/roomchat/`
    /// - macOS: `~/Library/Application Support/roomchat/`
    pub fn data_dir() -> Option<PathBuf> {
        dirs::data_dir().map(|d| d.join("roomchat"))
    }

    /// Loads the config from a specific file path.
    ///
    /// Returns `Ok(None)` if the file doesn't exist.
    pub fn load_from(path: &Path) -> Result<Option<Self>, ConfigError> {
        if !path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
            path: path.to_owned(),
            source: e,
        })?;
        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseFile {
            path: path.to_owned(),
            source: e,
        })?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(Some(config))
    }

    /// Saves this config to a specific file path.
    ///
    /// Creates the parent directory if it doesn't exist.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::WriteFile {
                path: path.to_owned(),
                source: e,
            })?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(|e| ConfigError::WriteFile {
            path: path.to_owned(),
            source: e,
        })?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
