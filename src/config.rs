//! Configuration types.
//!
//! Configuration comes from an optional YAML file plus CLI overrides. Every
//! field has a serde default, so an empty or missing file yields a fully
//! usable configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Default port for the web server.
pub const DEFAULT_PORT: u16 = 8000;

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Server paths and listen settings.
    #[serde(default)]
    pub server: ServerConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Path of the JSON file holding the task collection.
    #[serde(default = "default_data_path")]
    pub data_path: PathBuf,

    /// Directory served under `/static`.
    #[serde(default = "default_static_dir")]
    pub static_dir: PathBuf,

    /// Port to listen on (default: 8000).
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            data_path: default_data_path(),
            static_dir: default_static_dir(),
            port: default_port(),
        }
    }
}

fn default_data_path() -> PathBuf {
    PathBuf::from("data/tasks.json")
}

fn default_static_dir() -> PathBuf {
    PathBuf::from("static")
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

impl Config {
    /// Load configuration.
    ///
    /// With an explicit path the file must exist and parse. Without one,
    /// `tasklist.yaml` in the working directory is used if present, and
    /// defaults otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => {
                let default = PathBuf::from("tasklist.yaml");
                if !default.exists() {
                    return Ok(Self::default());
                }
                default
            }
        };
        let contents = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Config = serde_yaml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        Ok(config)
    }

    /// Ensure the directory holding the data file exists.
    pub fn ensure_data_dir(&self) -> Result<()> {
        if let Some(parent) = self.server.data_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create data directory {}", parent.display())
                })?;
            }
        }
        Ok(())
    }
}
