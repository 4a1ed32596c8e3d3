//! JSON configuration file adapter.
//!
//! Implements [`ConfigPort`] by reading a JSON document from disk.  Any
//! subset of [`SystemConfig`] fields may be present; the rest take their
//! defaults.  The loaded config is validated before it is returned.
//!
//! Path resolution: `$DOORGUARD_CONFIG` if set, else `doorguard.json` in
//! the working directory.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use log::info;

use crate::app::ports::{ConfigError, ConfigPort};
use crate::config::SystemConfig;

pub const CONFIG_ENV: &str = "DOORGUARD_CONFIG";
pub const DEFAULT_CONFIG_PATH: &str = "doorguard.json";

pub struct JsonConfigFile {
    path: PathBuf,
}

impl JsonConfigFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path from the environment, or the default.
    pub fn from_env() -> Self {
        match std::env::var_os(CONFIG_ENV) {
            Some(path) => Self::new(path),
            None => Self::new(DEFAULT_CONFIG_PATH),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Parse and validate a JSON config document.
pub fn parse(text: &str) -> Result<SystemConfig, ConfigError> {
    let cfg: SystemConfig = serde_json::from_str(text).map_err(|_| ConfigError::Corrupted)?;
    cfg.validate()?;
    Ok(cfg)
}

impl ConfigPort for JsonConfigFile {
    fn load(&self) -> Result<SystemConfig, ConfigError> {
        let text = std::fs::read_to_string(&self.path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => ConfigError::NotFound,
            _ => ConfigError::IoError,
        })?;
        let cfg = parse(&text)?;
        info!("JsonConfigFile: loaded {}", self.path.display());
        Ok(cfg)
    }
}
