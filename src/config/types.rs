//! Configuration types for stipend calculation.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use std::path::PathBuf;

use rust_decimal::Decimal;
use serde::Deserialize;

/// The default stipend per entitled day, in won.
pub const DEFAULT_DAILY_RATE: i64 = 10_000;

fn default_daily_rate() -> Decimal {
    Decimal::from(DEFAULT_DAILY_RATE)
}

/// How an employee display name is derived from a file name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NamePolicy {
    /// Strip the period-specific template prefix (or the legacy prefix).
    TemplatePrefix,
    /// Keep only the text after the last underscore.
    #[default]
    LastSegment,
}

/// Name normalization settings.
#[derive(Debug, Clone, Deserialize)]
pub struct NamingConfig {
    /// Which normalization policy to apply.
    #[serde(default)]
    pub policy: NamePolicy,
    /// The template base the period prefix is built from
    /// (e.g. "ACG_식대 정리_Template").
    pub template_base: String,
    /// The prefix stripped when no period is supplied.
    pub legacy_prefix: String,
}

/// Calculation and extraction settings from stipend.yaml.
#[derive(Debug, Clone, Deserialize)]
pub struct StipendSettings {
    /// Stipend per entitled day.
    #[serde(default = "default_daily_rate")]
    pub daily_rate: Decimal,
    /// The worksheet holding the attendance table.
    pub sheet_name: String,
    /// The attendance table range in A1 notation (e.g. "B3:L204").
    pub cell_range: String,
    /// Name normalization settings.
    pub naming: NamingConfig,
}

/// Storage and output settings from storage.yaml.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Directory holding the uploaded attendance workbooks.
    pub input_dir: PathBuf,
    /// Directory the results workbook is written to.
    pub output_dir: PathBuf,
    /// Identifier of the results spreadsheet.
    pub spreadsheet_id: String,
    /// Base URL download links are built from.
    pub link_base_url: String,
}

/// The complete configuration loaded from YAML files.
#[derive(Debug, Clone)]
pub struct StipendConfig {
    settings: StipendSettings,
    storage: StorageConfig,
}

impl StipendConfig {
    /// Creates a new StipendConfig from its component parts.
    pub fn new(settings: StipendSettings, storage: StorageConfig) -> Self {
        Self { settings, storage }
    }

    /// Returns the calculation settings.
    pub fn settings(&self) -> &StipendSettings {
        &self.settings
    }

    /// Returns the storage settings.
    pub fn storage(&self) -> &StorageConfig {
        &self.storage
    }
}
