//! Configuration management for postprint.
//!
//! Configuration is read from `~/.config/postprint/config.toml` at startup.
//! If the file doesn't exist, a default configuration with comments is created.

pub mod colors;
pub mod keybindings;

pub use colors::ColorConfig;
pub use keybindings::KeybindingConfig;

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::fetcher::http_fetcher::DEFAULT_TIMEOUT;
use crate::render::RendererConfig;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub watch: WatchConfig,
    pub renderer: RendererConfig,
    pub output: OutputConfig,
    pub colors: ColorConfig,
    pub keybindings: KeybindingConfig,
}

/// Space polling.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct WatchConfig {
    pub poll_interval_ms: u64,
    pub request_timeout_secs: u64,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: 1000,
            request_timeout_secs: DEFAULT_TIMEOUT.as_secs(),
        }
    }
}

impl WatchConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Where PDFs are written. Defaults to `~/Downloads`.
    pub downloads_dir: Option<PathBuf>,
}

impl OutputConfig {
    pub fn resolve_downloads_dir(&self) -> Result<PathBuf, ConfigError> {
        match &self.downloads_dir {
            Some(dir) => Ok(dir.clone()),
            None => dirs::home_dir()
                .map(|home| home.join("Downloads"))
                .ok_or(ConfigError::NoHomeDir),
        }
    }
}

impl Config {
    /// Load configuration from the default path, creating a commented
    /// default file on first run. Missing fields fall back to defaults.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::default_config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
            return Ok(Self::default());
        }

        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// `~/.config/postprint/config.toml`
    pub fn default_config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join("postprint").join("config.toml"))
    }

    fn create_default_config(path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        fs::write(path, Self::default_config_content()).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })
    }

    fn default_config_content() -> &'static str {
        r##"# postprint configuration
#
# Colors can be named (Black, Red, Green, Yellow, Blue, Magenta, Cyan, Gray,
# DarkGray, LightRed, LightGreen, LightYellow, LightBlue, LightMagenta,
# LightCyan, White, Reset) or hex ("#RRGGBB", "#RGB").
#
# Keybindings are single characters ("q"), special keys (Enter, Esc, Up,
# Down, Backspace, Tab, F1-F12, ...) or combinations ("Ctrl+c").

[watch]
# Delay between polls of a watched space (milliseconds)
poll_interval_ms = 1000

# HTTP timeout for the posts endpoint (seconds)
request_timeout_secs = 15

[renderer]
headless = true

# Use an installed Chrome/Chromium instead of downloading one.
# chrome_executable = "/usr/bin/chromium"

# First-run browser download and browser startup limits (seconds)
install_timeout_secs = 180
launch_timeout_secs = 60

# Element that is measured and printed
selector = ".PostCard"
selector_timeout_ms = 10000

[output]
# Defaults to ~/Downloads
# downloads_dir = "/home/me/Downloads"

[colors]
title = "Cyan"
selection_fg = "Black"
selection_bg = "Cyan"
description = "DarkGray"
status = "Yellow"
error = "Red"
log = "White"
hint = "DarkGray"

[keybindings]
quit = ["q", "Ctrl+c"]
# Used instead of quit while typing a space or post ID
cancel_input = ["Esc", "Ctrl+c"]
move_up = ["k", "Up"]
move_down = ["j", "Down"]
select = ["Enter"]
"##
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Could not determine home directory")]
    NoHomeDir,

    #[error("Failed to read/write config file at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}
