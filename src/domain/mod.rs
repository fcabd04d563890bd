//! Domain layer - Business logic and domain models

pub mod document;
pub mod edit;
pub mod ledger;
pub mod normalize;
pub mod query;
pub mod transaction;

pub use document::{ExportDocument, ImportMode, RawImportDocument};
pub use edit::EditSession;
pub use ledger::Ledger;
pub use normalize::normalize;
pub use query::{CategoryChoice, FilterState, KindFilter, LedgerView, Totals};
pub use transaction::{Kind, NewTransaction, Transaction, TransactionDraft, TransactionPatch};
