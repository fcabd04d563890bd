//! Infrastructure layer - External I/O and persistence

pub mod config;
pub mod repository;
pub mod store;

pub use config::{Config, DEFAULT_CURRENCY, DEFAULT_EXPORT_NAME};
pub use repository::{FileSystemRepository, LedgerRepository, DATA_DIR};
pub use store::{FileStore, KeyValueStore, MemoryStore};
