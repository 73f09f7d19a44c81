//! Config file parsing for `~/.config/progress-provider/config.toml`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Unknown config key: {0}")]
    UnknownKey(String),

    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub simulate: SimulateConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Print every report as a JSON line.
    #[serde(default)]
    pub json: bool,
    /// Draw a progress bar for `simulate` when stderr is a terminal.
    #[serde(default = "default_progress_bar")]
    pub progress_bar: bool,
    #[serde(default = "default_bar_template")]
    pub bar_template: String,
}

fn default_progress_bar() -> bool {
    true
}
fn default_bar_template() -> String {
    "{spinner} [{bar:40}] {pos}/{len} {msg}".to_string()
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            json: false,
            progress_bar: default_progress_bar(),
            bar_template: default_bar_template(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulateConfig {
    #[serde(default = "default_steps")]
    pub steps: u64,
    #[serde(default)]
    pub delay_ms: u64,
}

fn default_steps() -> u64 {
    10
}

impl Default for SimulateConfig {
    fn default() -> Self {
        Self {
            steps: default_steps(),
            delay_ms: 0,
        }
    }
}

/// Return the default config file path (for init and show).
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|mut p| {
        p.push("progress-provider");
        p.push("config.toml");
        p
    })
}

/// Load config from an explicit path. Missing or malformed files are errors.
pub fn load_config_from(path: &Path) -> Result<AppConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Load config from the default path, falling back to defaults.
pub fn load_config() -> AppConfig {
    let Some(path) = config_path() else {
        return AppConfig::default();
    };
    if !path.exists() {
        return AppConfig::default();
    }
    match load_config_from(&path) {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::warn!("{}; using defaults", e);
            AppConfig::default()
        }
    }
}

/// Set a dot-separated key such as `display.json`.
pub fn set_config_key(cfg: &mut AppConfig, key: &str, value: &str) -> Result<(), ConfigError> {
    let invalid = || ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
    };
    match key.split_once('.') {
        Some(("display", "json")) => cfg.display.json = value.parse().map_err(|_| invalid())?,
        Some(("display", "progress_bar")) => {
            cfg.display.progress_bar = value.parse().map_err(|_| invalid())?
        }
        Some(("display", "bar_template")) => cfg.display.bar_template = value.to_string(),
        Some(("simulate", "steps")) => cfg.simulate.steps = value.parse().map_err(|_| invalid())?,
        Some(("simulate", "delay_ms")) => {
            cfg.simulate.delay_ms = value.parse().map_err(|_| invalid())?
        }
        _ => return Err(ConfigError::UnknownKey(key.to_string())),
    }
    Ok(())
}
