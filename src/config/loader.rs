//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading stipend
//! configuration from YAML files.

use std::fs;
use std::path::Path;

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};

use super::types::{StipendConfig, StipendSettings, StorageConfig};

/// Loads and provides access to stipend configuration.
///
/// # Directory Structure
///
/// ```text
/// config/stipend/
/// ├── stipend.yaml   # Daily rate, sheet layout, name normalization
/// └── storage.yaml   # Input/output directories and link base URL
/// ```
///
/// # Example
///
/// ```no_run
/// use stipend_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/stipend").unwrap();
/// println!("Daily rate: {}", loader.daily_rate());
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: StipendConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// Returns an error if either file is missing or contains invalid YAML.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let settings = Self::load_yaml::<StipendSettings>(&path.join("stipend.yaml"))?;
        let storage = Self::load_yaml::<StorageConfig>(&path.join("storage.yaml"))?;

        Ok(Self {
            config: StipendConfig::new(settings, storage),
        })
    }

    /// Wraps an already-built configuration.
    pub fn from_config(config: StipendConfig) -> Self {
        Self { config }
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the underlying configuration.
    pub fn config(&self) -> &StipendConfig {
        &self.config
    }

    /// Returns the calculation settings.
    pub fn settings(&self) -> &StipendSettings {
        self.config.settings()
    }

    /// Returns the storage settings.
    pub fn storage(&self) -> &StorageConfig {
        self.config.storage()
    }

    /// Returns the stipend per entitled day.
    pub fn daily_rate(&self) -> Decimal {
        self.config.settings().daily_rate
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::NamePolicy;

    fn config_path() -> &'static str {
        "./config/stipend"
    }

    #[test]
    fn test_load_valid_configuration() {
        let result = ConfigLoader::load(config_path());
        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());

        let loader = result.unwrap();
        assert_eq!(loader.daily_rate(), Decimal::from(10_000));
        assert_eq!(loader.settings().sheet_name, "식대");
        assert_eq!(loader.settings().cell_range, "B3:L204");
    }

    #[test]
    fn test_naming_settings_loaded() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        let naming = &loader.settings().naming;

        assert_eq!(naming.policy, NamePolicy::LastSegment);
        assert_eq!(naming.template_base, "ACG_식대 정리_Template");
        assert_eq!(naming.legacy_prefix, "ACG_식대 정리_Template_2025년 상반기_");
    }

    #[test]
    fn test_storage_settings_loaded() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        let storage = loader.storage();

        assert_eq!(storage.spreadsheet_id, "meal-stipend");
        assert!(storage.link_base_url.starts_with("http"));
    }

    #[test]
    fn test_load_missing_directory_returns_error() {
        let result = ConfigLoader::load("/nonexistent/path");

        match result {
            Err(EngineError::ConfigNotFound { path }) => {
                assert!(path.contains("stipend.yaml"));
            }
            other => panic!("Expected ConfigNotFound error, got {:?}", other),
        }
    }

    #[test]
    fn test_daily_rate_defaults_when_omitted() {
        let yaml = r#"
sheet_name: 식대
cell_range: B3:L204
naming:
  template_base: ACG_식대 정리_Template
  legacy_prefix: ACG_
"#;
        let settings: StipendSettings = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(settings.daily_rate, Decimal::from(10_000));
        assert_eq!(settings.naming.policy, NamePolicy::LastSegment);
    }

    #[test]
    fn test_template_policy_parses() {
        let yaml = r#"
daily_rate: 12000
sheet_name: 식대
cell_range: B3:L204
naming:
  policy: template_prefix
  template_base: ACG_식대 정리_Template
  legacy_prefix: ACG_
"#;
        let settings: StipendSettings = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(settings.daily_rate, Decimal::from(12_000));
        assert_eq!(settings.naming.policy, NamePolicy::TemplatePrefix);
    }
}
