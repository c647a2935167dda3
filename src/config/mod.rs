//! Configuration loading and management for the Meal Stipend Engine.
//!
//! This module loads the daily rate, the attendance sheet layout, the
//! name normalization policy and the storage locations from YAML files.
//!
//! # Example
//!
//! ```no_run
//! use stipend_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/stipend").unwrap();
//! println!("Reading sheet: {}", config.settings().sheet_name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    DEFAULT_DAILY_RATE, NamePolicy, NamingConfig, StipendConfig, StipendSettings, StorageConfig,
};
