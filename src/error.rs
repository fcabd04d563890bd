//! Error types for finbook

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for finbook
#[derive(Debug, Error)]
pub enum FinbookError {
    #[error("Not a finbook directory: {0}")]
    NotFinbookDirectory(PathBuf),

    #[error("{0}")]
    Validation(String),

    #[error("Transaction not found: {0}")]
    TransactionNotFound(String),

    #[error("Invalid import format: {0}")]
    InvalidImportFormat(String),

    #[error("File was read, but no valid transaction was found")]
    NothingToImport,

    #[error("Confirmation required: {0}")]
    ConfirmationRequired(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML deserialization error: {0}")]
    TomlDeserialize(#[from] toml::de::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

impl FinbookError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            FinbookError::NotFinbookDirectory(_) => 2,
            FinbookError::Validation(_) => 3,
            FinbookError::TransactionNotFound(_) => 4,
            FinbookError::InvalidImportFormat(_) | FinbookError::NothingToImport => 5,
            _ => 1,
        }
    }

    /// Get a user-friendly error message with suggestions
    pub fn display_with_suggestions(&self) -> String {
        match self {
            FinbookError::NotFinbookDirectory(path) => {
                format!(
                    "Not a finbook directory: {}\n\n\
                    Suggestions:\n\
                    • Run 'finbook init' in this directory to create a new ledger\n\
                    • Navigate to an existing finbook directory\n\
                    • Set FINBOOK_ROOT environment variable to your ledger path",
                    path.display()
                )
            }
            FinbookError::TransactionNotFound(id) => {
                format!(
                    "Transaction not found: '{}'\n\n\
                    Suggestions:\n\
                    • It may have been removed already\n\
                    • Use 'finbook list' to see current transaction ids",
                    id
                )
            }
            FinbookError::InvalidImportFormat(msg) => {
                format!(
                    "Could not import: {}\n\n\
                    Expected a JSON array of transactions, or an object with a\n\
                    \"transactions\" array (as written by 'finbook export')",
                    msg
                )
            }
            FinbookError::ConfirmationRequired(what) => {
                format!(
                    "Confirmation required: {}\n\n\
                    Re-run with --yes to confirm",
                    what
                )
            }
            _ => self.to_string(),
        }
    }
}

/// Result type using FinbookError
pub type Result<T> = std::result::Result<T, FinbookError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_finbook_directory_suggestion() {
        let err = FinbookError::NotFinbookDirectory(PathBuf::from("/tmp/test"));
        let msg = err.display_with_suggestions();
        assert!(msg.contains("finbook init"));
        assert!(msg.contains("FINBOOK_ROOT"));
        assert!(msg.contains("Suggestions"));
    }

    #[test]
    fn test_not_found_suggestion() {
        let err = FinbookError::TransactionNotFound("abc".to_string());
        let msg = err.display_with_suggestions();
        assert!(msg.contains("'abc'"));
        assert!(msg.contains("finbook list"));
    }

    #[test]
    fn test_invalid_import_explains_shapes() {
        let err = FinbookError::InvalidImportFormat("top-level number".to_string());
        let msg = err.display_with_suggestions();
        assert!(msg.contains("top-level number"));
        assert!(msg.contains("\"transactions\""));
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(FinbookError::NotFinbookDirectory(PathBuf::new()).exit_code(), 2);
        assert_eq!(FinbookError::Validation("x".into()).exit_code(), 3);
        assert_eq!(FinbookError::TransactionNotFound("x".into()).exit_code(), 4);
        assert_eq!(FinbookError::NothingToImport.exit_code(), 5);
        assert_eq!(FinbookError::Config("x".into()).exit_code(), 1);
    }

    #[test]
    fn test_nothing_to_import_differs_from_invalid_format() {
        let empty = FinbookError::NothingToImport.to_string();
        let invalid = FinbookError::InvalidImportFormat("x".into()).to_string();
        assert_ne!(empty, invalid);
        assert!(empty.contains("no valid transaction"));
    }

    #[test]
    fn test_other_errors_fallback() {
        let err = FinbookError::Validation("Description is required".to_string());
        assert_eq!(err.display_with_suggestions(), "Description is required");
    }
}
