//! Configuration management

use crate::error::{FinbookError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const DEFAULT_CURRENCY: &str = "BRL";
pub const DEFAULT_EXPORT_NAME: &str = "finbook-backup";

fn default_currency() -> String {
    DEFAULT_CURRENCY.to_string()
}

fn default_export_name() -> String {
    DEFAULT_EXPORT_NAME.to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default = "default_export_name")]
    pub export_name: String,
    pub created: DateTime<Utc>,
}

impl Config {
    /// Create a new config with default values
    pub fn new(currency: &str) -> Self {
        Config {
            currency: currency.to_uppercase(),
            export_name: default_export_name(),
            created: Utc::now(),
        }
    }

    /// Load config from .finbook/config.toml in the given directory
    pub fn load_from_dir(path: &Path) -> Result<Self> {
        let config_path = path.join(".finbook").join("config.toml");

        let contents = fs::read_to_string(&config_path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                FinbookError::NotFinbookDirectory(path.to_path_buf())
            } else {
                FinbookError::Io(e)
            }
        })?;

        toml::from_str(&contents)
            .map_err(|e| FinbookError::Config(format!("Failed to parse config.toml: {}", e)))
    }

    /// Save config to .finbook/config.toml in the given directory
    pub fn save_to_dir(&self, path: &Path) -> Result<()> {
        let finbook_dir = path.join(".finbook");
        let config_path = finbook_dir.join("config.toml");

        if !finbook_dir.exists() {
            fs::create_dir(&finbook_dir)?;
        }

        let contents = toml::to_string_pretty(self)?;
        fs::write(&config_path, contents)?;

        Ok(())
    }

    /// Validate a currency code (three ASCII letters)
    pub fn parse_currency(value: &str) -> Result<String> {
        let code = value.trim();
        if code.len() == 3 && code.chars().all(|c| c.is_ascii_alphabetic()) {
            Ok(code.to_uppercase())
        } else {
            Err(FinbookError::Config(format!(
                "Invalid currency: '{}'. Expected a 3-letter code such as BRL or USD",
                value
            )))
        }
    }

    /// Validate an export file stem
    pub fn parse_export_name(value: &str) -> Result<String> {
        let name = value.trim();
        let valid = !name.is_empty()
            && !name.starts_with('.')
            && name
                .chars()
                .all(|c| c.is_alphanumeric() || c == '-' || c == '_' || c == '.');
        if valid {
            Ok(name.to_string())
        } else {
            Err(FinbookError::Config(format!(
                "Invalid export name: '{}'. Use letters, digits, '-', '_' or '.'",
                value
            )))
        }
    }
}
