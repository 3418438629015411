use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use directories::ProjectDirs;
use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::{NotesError, Result};

const CONFIG_FILE_NAME: &str = "config.json";

/// Application configuration settings.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// SQLite database file holding notes, projects and categories
    pub database_path: PathBuf,

    /// File that receives log output while the terminal UI is active
    pub log_file: PathBuf,

    /// Artificial delay before each background store call (in milliseconds)
    pub simulated_latency_ms: u64,

    /// How often the input thread wakes up to animate the loading indicator
    pub tick_rate_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        match project_dirs() {
            Some(dirs) => Self {
                database_path: dirs.data_dir().join("notes.db"),
                log_file: dirs.data_dir().join("tnotes.log"),
                simulated_latency_ms: 300,
                tick_rate_ms: 100,
            },
            None => Self {
                database_path: PathBuf::from("./notes.db"),
                log_file: PathBuf::from("./tnotes.log"),
                simulated_latency_ms: 300,
                tick_rate_ms: 100,
            },
        }
    }
}

impl Config {
    /// Loads the configuration.
    ///
    /// An explicit path must exist. Without one, the platform config file is
    /// read when present and the defaults are used otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                if !path.exists() {
                    return Err(NotesError::ConfigError {
                        message: format!("config file {} does not exist", path.display()),
                    });
                }
                Self::from_file(path)
            }
            None => match default_config_path() {
                Some(path) if path.exists() => Self::from_file(&path),
                _ => {
                    debug!("No config file found, using defaults");
                    Ok(Self::default())
                }
            },
        }
    }

    fn from_file(path: &Path) -> Result<Self> {
        info!("Loading configuration from {}", path.display());
        let content = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        Ok(config)
    }

    pub fn simulated_latency(&self) -> Duration {
        Duration::from_millis(self.simulated_latency_ms)
    }

    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms.max(1))
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("dev", "tnotes", "tnotes")
}

/// Location of the config file read when no `--config` flag is given
pub fn default_config_path() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
}
