//! Application state for the Meal Stipend Engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::config::ConfigLoader;
use crate::error::EngineResult;
use crate::pipeline::Collaborators;

/// Shared application state.
///
/// Holds the loaded configuration and the document source, link resolver
/// and results sink every batch runs against. Built once at startup.
#[derive(Clone)]
pub struct AppState {
    /// The loaded stipend configuration.
    config: Arc<ConfigLoader>,
    /// Storage collaborators.
    collaborators: Collaborators,
}

impl AppState {
    /// Creates a new application state from a configuration and explicit
    /// collaborators.
    pub fn new(config: ConfigLoader, collaborators: Collaborators) -> Self {
        Self {
            config: Arc::new(config),
            collaborators,
        }
    }

    /// Creates a new application state backed by the local directories named
    /// in the storage configuration.
    pub fn from_config(config: ConfigLoader) -> EngineResult<Self> {
        let collaborators = Collaborators::local(config.storage())?;
        Ok(Self::new(config, collaborators))
    }

    /// Returns a reference to the configuration loader.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    /// Returns the storage collaborators.
    pub fn collaborators(&self) -> &Collaborators {
        &self.collaborators
    }
}
