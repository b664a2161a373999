//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading a run
//! configuration from a YAML file.

use std::fs;
use std::path::Path;

use tracing::info;

use crate::error::{EngineError, EngineResult};

use super::types::EngineConfig;

/// Loads and provides access to the engine configuration.
///
/// The configuration file is a single YAML document; every key is optional
/// and falls back to [`EngineConfig::default`]:
///
/// ```text
/// rounding_increment: 0.25
/// week_count: 3
/// text_layout:
///   job_position: auto
///   hour_order: straight_first
/// duplicate_policy: last_write_wins
/// drop_zero_rows: false
/// display_order: overtime_first
/// ```
///
/// # Example
///
/// ```no_run
/// use hours_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/engine.yaml").unwrap();
/// println!("Rounding to {} hours", loader.config().rounding_increment);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: EngineConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified YAML file.
    ///
    /// Returns an error if the file is missing, is not valid YAML, names an
    /// unsupported rounding increment, or sets a week count of zero.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        let loader = Self::from_yaml_str(&content).map_err(|err| match err {
            EngineError::ConfigParseError { message, .. } => EngineError::ConfigParseError {
                path: path_str.clone(),
                message,
            },
            other => other,
        })?;

        info!(
            path = %path_str,
            rounding_increment = %loader.config.rounding_increment,
            week_count = loader.config.week_count,
            "Loaded engine configuration"
        );

        Ok(loader)
    }

    /// Parses configuration from YAML text.
    pub fn from_yaml_str(content: &str) -> EngineResult<Self> {
        let config: EngineConfig =
            serde_yaml::from_str(content).map_err(|e| EngineError::ConfigParseError {
                path: "<inline>".to_string(),
                message: e.to_string(),
            })?;
        config.validate()?;
        Ok(Self { config })
    }

    /// Returns the loaded configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Consumes the loader, returning the configuration.
    pub fn into_config(self) -> EngineConfig {
        self.config
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self {
            config: EngineConfig::default(),
        }
    }
}
