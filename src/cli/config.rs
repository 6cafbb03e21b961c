//! Configuration file handling
//!
//! A single JSON object. Every field is optional:
//!
//! ```json
//! { "removal_policy": "prune", "log_level": "info" }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::catalog::{InMemoryInventory, RemovalPolicy};
use crate::observability::{log_event_with_fields, Event, Logger, Severity};

use super::errors::{CliError, CliResult};

/// Configuration file structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// What removal does to author/genre indexes (default "lazy")
    #[serde(default)]
    pub removal_policy: RemovalPolicy,

    /// Minimum log severity written to stderr (default "warn")
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            removal_policy: RemovalPolicy::default(),
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| CliError::config_error(format!("Failed to read config: {}", e)))?;

        Self::from_json(&content)
    }

    /// Load from `path` if given, otherwise use defaults
    pub fn load_or_default(path: Option<&Path>) -> CliResult<Self> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::default()),
        }
    }

    pub fn from_json(content: &str) -> CliResult<Self> {
        let config: Config = serde_json::from_str(content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    fn validate(&self) -> CliResult<()> {
        self.severity().map(|_| ())
    }

    /// Parsed log level
    pub fn severity(&self) -> CliResult<Severity> {
        self.log_level
            .parse::<Severity>()
            .map_err(|e| CliError::config_error(format!("Invalid log_level: {}", e)))
    }

    /// Apply process-wide settings and build the record store
    pub fn open_store(&self) -> CliResult<InMemoryInventory> {
        Logger::set_min_severity(self.severity()?);
        log_event_with_fields(
            Event::ConfigLoaded,
            &[
                ("log_level", self.log_level.as_str()),
                ("removal_policy", self.removal_policy.as_str()),
            ],
        );
        Ok(InMemoryInventory::with_policy(self.removal_policy))
    }
}
