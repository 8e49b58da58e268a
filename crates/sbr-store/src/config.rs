use crate::error::{Result, StoreError};
use crate::{expand_home, write_atomic};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Env var overriding the config file location.
pub const CONFIG_ENV: &str = "SBR_CONFIG";

pub const DEFAULT_DAILY_FORMAT: &str = "Daily/%Y/%m/%d";
pub const DEFAULT_BRAIN_LOCATION: &str = "~/.sbr";
pub const DEFAULT_TASK_DAYS: u32 = 360;

/// User configuration, read once at startup from `~/.config/sbr/config.yaml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// strftime template for daily notes, relative to the store root,
    /// without extension.
    pub daily_format: String,
    /// Store root. A leading `~` is expanded.
    pub brain_location: String,
    /// How many days back task aggregation looks.
    pub task_days: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            daily_format: DEFAULT_DAILY_FORMAT.to_string(),
            brain_location: DEFAULT_BRAIN_LOCATION.to_string(),
            task_days: DEFAULT_TASK_DAYS,
        }
    }
}

impl Config {
    /// `$SBR_CONFIG`, else `~/.config/sbr/config.yaml`.
    pub fn default_path() -> Result<PathBuf> {
        if let Ok(p) = std::env::var(CONFIG_ENV) {
            if !p.is_empty() {
                return Ok(expand_home(&p));
            }
        }
        let home = dirs::home_dir().ok_or(StoreError::NoHomeDir)?;
        Ok(home.join(".config").join("sbr").join("config.yaml"))
    }

    /// Parse a config from YAML text. Empty text is the default config.
    pub fn from_yaml(text: &str, path: &Path) -> Result<Self> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(text).map_err(|source| StoreError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load the config at `path`, writing the defaults there first if the
    /// file does not exist.
    pub fn load_or_init(path: &Path) -> Result<Self> {
        if path.is_file() {
            let text = fs::read_to_string(path).map_err(|e| StoreError::io(path, e))?;
            return Self::from_yaml(&text, path);
        }
        let config = Self::default();
        config.save(path)?;
        tracing::info!("Created config file in {}", path.display());
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let yaml = serde_yaml::to_string(self).map_err(StoreError::ConfigSerialize)?;
        write_atomic(path, yaml.as_bytes())
    }

    /// Store root with `~` expanded.
    pub fn location(&self) -> PathBuf {
        expand_home(&self.brain_location)
    }
}
