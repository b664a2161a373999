//! Configuration for a processing run.
//!
//! This module provides the [`EngineConfig`] passed into every engine entry
//! point, and a [`ConfigLoader`] that reads it from YAML.
//!
//! # Example
//!
//! ```no_run
//! use hours_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/engine.yaml").unwrap();
//! println!("Weeks per job: {}", config.config().week_count);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    DEFAULT_WEEK_COUNT, DuplicatePolicy, EngineConfig, HourOrder, JobPosition, RoundingIncrement,
    TextLayout,
};
