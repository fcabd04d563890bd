//! Key-value persistence backends

use crate::error::{FinbookError, Result};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

/// String slots addressed by key
pub trait KeyValueStore {
    /// Read the value under `key`, `None` if nothing was stored
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write `value` under `key`, replacing any previous value
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// One JSON file per key inside a directory
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: PathBuf) -> Self {
        FileStore { dir }
    }

    /// File backing `key`
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }

    fn check_key(key: &str) -> Result<()> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if valid {
            Ok(())
        } else {
            Err(FinbookError::Config(format!("Invalid storage key: '{}'", key)))
        }
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Self::check_key(key)?;
        match fs::read_to_string(self.path_for(key)) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(FinbookError::Io(e)),
        }
    }

    /// Best-effort atomic replace: write a temp file next to the target,
    /// then rename it into place.
    ///
    /// On Windows, `rename` does not overwrite existing files, so the
    /// destination is removed first.
    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        Self::check_key(key)?;
        if !self.dir.exists() {
            fs::create_dir_all(&self.dir)?;
        }

        let path = self.path_for(key);
        let tmp_path = self
            .dir
            .join(format!("{}.json.finbook-tmp-{}", key, std::process::id()));

        // Write to temp file first
        fs::write(&tmp_path, value)?;

        if cfg!(windows) && path.exists() {
            fs::remove_file(&path)?;
        }

        fs::rename(&tmp_path, &path)?;
        Ok(())
    }
}

/// In-process store, used by tests and embedders without a file system
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    slots: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore::default()
    }

    /// Store pre-seeded with one value
    pub fn with_value(key: &str, value: &str) -> Self {
        let mut store = MemoryStore::new();
        store.slots.insert(key.to_string(), value.to_string());
        store
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.slots.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.slots.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
