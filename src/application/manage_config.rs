//! Config management use case

use crate::error::{FinbookError, Result};
use crate::infrastructure::{Config, FileSystemRepository, LedgerRepository};

/// Service for managing ledger configuration
pub struct ConfigService {
    repository: FileSystemRepository,
}

impl ConfigService {
    /// Create a new config service
    pub fn new(repository: FileSystemRepository) -> Self {
        ConfigService { repository }
    }

    /// Get a single config value
    pub fn get(&self, key: &str) -> Result<String> {
        let config = self.repository.load_config()?;

        match key {
            "currency" => Ok(config.currency),
            "export_name" => Ok(config.export_name),
            "created" => Ok(config.created.to_rfc3339()),
            _ => Err(FinbookError::Config(format!(
                "Unknown config key: '{}'. Valid keys are: currency, export_name, created",
                key
            ))),
        }
    }

    /// Set a config value
    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut config = self.repository.load_config()?;

        match key {
            "currency" => config.currency = Config::parse_currency(value)?,
            "export_name" => config.export_name = Config::parse_export_name(value)?,
            "created" => {
                return Err(FinbookError::Config(
                    "Cannot modify 'created' field (read-only)".to_string(),
                ));
            }
            _ => {
                return Err(FinbookError::Config(format!(
                    "Unknown config key: '{}'. Valid keys are: currency, export_name",
                    key
                )));
            }
        }

        self.repository.save_config(&config)
    }

    /// List all config values
    pub fn list(&self) -> Result<Config> {
        self.repository.load_config()
    }
}
