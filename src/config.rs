use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use directories::ProjectDirs;
use ratatui::style::Color;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::round::DEFAULT_TOLERANCE_MS;

pub const DEFAULT_TICK_RATE_MS: u64 = 100;
pub const DEFAULT_HIGHLIGHT_COLOR: &str = "#63F31D";
pub const DEFAULT_NEUTRAL_COLOR: &str = "#707070";
pub const MAX_TOLERANCE_MS: u64 = 60_000;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid config file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("tolerance of {0}ms is above the 60000ms limit")]
    InvalidTolerance(u64),

    #[error("tick rate must be at least 1ms")]
    InvalidTickRate,

    #[error("invalid color {0:?}, expected #RRGGBB or a color name")]
    InvalidColor(String),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub tolerance_ms: u64,
    pub tick_rate_ms: u64,
    pub highlight_color: String,
    pub neutral_color: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tolerance_ms: DEFAULT_TOLERANCE_MS,
            tick_rate_ms: DEFAULT_TICK_RATE_MS,
            highlight_color: DEFAULT_HIGHLIGHT_COLOR.to_string(),
            neutral_color: DEFAULT_NEUTRAL_COLOR.to_string(),
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tolerance_ms > MAX_TOLERANCE_MS {
            return Err(ConfigError::InvalidTolerance(self.tolerance_ms));
        }
        if self.tick_rate_ms == 0 {
            return Err(ConfigError::InvalidTickRate);
        }
        parse_color(&self.highlight_color)?;
        parse_color(&self.neutral_color)?;
        Ok(())
    }

    pub fn palette(&self) -> Result<Palette, ConfigError> {
        Ok(Palette {
            highlight: parse_color(&self.highlight_color)?,
            neutral: parse_color(&self.neutral_color)?,
        })
    }
}

/// Border colors for the player cards
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub highlight: Color,
    pub neutral: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            highlight: Color::Rgb(0x63, 0xF3, 0x1D),
            neutral: Color::Rgb(0x70, 0x70, 0x70),
        }
    }
}

fn parse_color(raw: &str) -> Result<Color, ConfigError> {
    Color::from_str(raw).map_err(|_| ConfigError::InvalidColor(raw.to_string()))
}

pub trait ConfigStore {
    /// Stored settings, or the defaults when nothing usable is on disk
    fn load(&self) -> Config;
    fn try_load(&self) -> Result<Config, ConfigError>;
    fn save(&self, cfg: &Config) -> Result<(), ConfigError>;
}

#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        let path = if let Some(pd) = ProjectDirs::from("", "", "rps-duel") {
            pd.config_dir().join("config.json")
        } else {
            PathBuf::from("rps_duel_config.json")
        };
        Self { path }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for FileConfigStore {
    fn load(&self) -> Config {
        match self.try_load() {
            Ok(cfg) => cfg,
            Err(err) => {
                log::warn!("using default config, {}: {err}", self.path.display());
                Config::default()
            }
        }
    }

    fn try_load(&self) -> Result<Config, ConfigError> {
        if !self.path.exists() {
            return Ok(Config::default());
        }
        let bytes = fs::read(&self.path)?;
        Ok(serde_json::from_slice::<Config>(&bytes)?)
    }

    fn save(&self, cfg: &Config) -> Result<(), ConfigError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(cfg)?;
        fs::write(&self.path, data)?;
        Ok(())
    }
}
