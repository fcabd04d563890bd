//! Application layer - Use cases and orchestration

pub mod confirm;
pub mod import_export;
pub mod init;
pub mod ledger_service;
pub mod manage_config;

pub use confirm::{AssumeYes, Confirm, NonInteractive, Prompt, ScriptedConfirm, StdinConfirm};
pub use import_export::{prepare_import, write_export, ImportOutcome};
pub use ledger_service::{LedgerService, SubmitOutcome, STORAGE_KEY};
pub use manage_config::ConfigService;
