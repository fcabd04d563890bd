//! finbook - Personal finance ledger
//!
//! Records income and expense transactions in a local `.finbook/` directory,
//! reports filtered totals, and backs the ledger up to portable JSON
//! documents that can be merged or restored later.

pub mod application;
pub mod cli;
pub mod domain;
pub mod error;
pub mod infrastructure;

pub use error::FinbookError;
