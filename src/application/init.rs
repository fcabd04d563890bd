//! Initialize ledger use case

use crate::error::Result;
use crate::infrastructure::{Config, FileSystemRepository, LedgerRepository};
use std::fs;
use std::path::Path;
use tracing::info;

/// Initialize a new ledger at the specified path.
pub fn init(path: &Path, currency: &str) -> Result<Config> {
    let currency = Config::parse_currency(currency)?;

    if !path.exists() {
        fs::create_dir_all(path)?;
    }

    let repo = FileSystemRepository::new(path.to_path_buf());
    repo.initialize()?;

    let config = Config::new(&currency);
    repo.save_config(&config)?;
    info!(path = %path.display(), "ledger initialized");

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_init_creates_config() {
        let temp = TempDir::new().unwrap();
        let config = init(temp.path(), "usd").unwrap();
        assert_eq!(config.currency, "USD");
        assert!(temp.path().join(".finbook/config.toml").exists());
    }

    #[test]
    fn test_init_creates_missing_directory() {
        let temp = TempDir::new().unwrap();
        let target = temp.path().join("money");
        init(&target, "BRL").unwrap();
        assert!(target.join(".finbook").is_dir());
    }

    #[test]
    fn test_init_rejects_bad_currency_before_touching_disk() {
        let temp = TempDir::new().unwrap();
        assert!(init(temp.path(), "dollars").is_err());
        assert!(!temp.path().join(".finbook").exists());
    }

    #[test]
    fn test_init_twice_fails() {
        let temp = TempDir::new().unwrap();
        init(temp.path(), "BRL").unwrap();
        assert!(init(temp.path(), "BRL").is_err());
    }
}
