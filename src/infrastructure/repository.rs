//! Ledger directory discovery and layout

use crate::error::{FinbookError, Result};
use crate::infrastructure::{Config, FileStore};
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the data directory placed at the ledger root
pub const DATA_DIR: &str = ".finbook";

/// Abstract repository for ledger directory operations
pub trait LedgerRepository {
    /// Load configuration from .finbook/config.toml
    fn load_config(&self) -> Result<Config>;

    /// Save configuration to .finbook/config.toml
    fn save_config(&self, config: &Config) -> Result<()>;

    /// Check if .finbook directory exists
    fn is_initialized(&self) -> bool;

    /// Create .finbook directory structure
    fn initialize(&self) -> Result<()>;
}

/// File system implementation of LedgerRepository
#[derive(Debug, Clone)]
pub struct FileSystemRepository {
    pub root: PathBuf,
}

impl FileSystemRepository {
    /// Create a new repository with the given root directory
    pub fn new(root: PathBuf) -> Self {
        FileSystemRepository { root }
    }

    /// Discover the ledger root.
    /// First checks FINBOOK_ROOT environment variable, then walks up from the current directory.
    pub fn discover() -> Result<Self> {
        if let Ok(root_path) = std::env::var("FINBOOK_ROOT") {
            let path = PathBuf::from(root_path);
            if Self::has_data_dir(&path) {
                return Ok(FileSystemRepository::new(path));
            } else {
                return Err(FinbookError::Config(format!(
                    "FINBOOK_ROOT is set to '{}' but no .finbook directory found. \
                    Run 'finbook init' in that directory or unset FINBOOK_ROOT.",
                    path.display()
                )));
            }
        }

        let current_dir = std::env::current_dir()?;
        Self::discover_from(&current_dir)
    }

    /// Discover ledger root by walking up from a specific starting directory
    pub fn discover_from(start: &Path) -> Result<Self> {
        let mut current = start.to_path_buf();

        loop {
            if Self::has_data_dir(&current) {
                return Ok(FileSystemRepository::new(current));
            }

            match current.parent() {
                Some(parent) => current = parent.to_path_buf(),
                None => return Err(FinbookError::NotFinbookDirectory(start.to_path_buf())),
            }
        }
    }

    fn has_data_dir(path: &Path) -> bool {
        path.join(DATA_DIR).is_dir()
    }

    /// Key-value store kept inside the data directory
    pub fn store(&self) -> FileStore {
        FileStore::new(self.root.join(DATA_DIR))
    }
}

impl LedgerRepository for FileSystemRepository {
    fn load_config(&self) -> Result<Config> {
        Config::load_from_dir(&self.root)
    }

    fn save_config(&self, config: &Config) -> Result<()> {
        config.save_to_dir(&self.root)
    }

    fn is_initialized(&self) -> bool {
        Self::has_data_dir(&self.root)
    }

    fn initialize(&self) -> Result<()> {
        let data_dir = self.root.join(DATA_DIR);

        if data_dir.exists() {
            return Err(FinbookError::Config(format!(
                "Directory already initialized: {}",
                self.root.display()
            )));
        }

        fs::create_dir(&data_dir)?;
        Ok(())
    }
}
