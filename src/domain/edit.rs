//! Edit session state

use crate::domain::transaction::{Transaction, TransactionDraft};
use chrono::NaiveDate;

/// The form and, while editing, the id of the record loaded into it
#[derive(Debug, Clone, PartialEq)]
pub struct EditSession {
    editing: Option<String>,
    pub form: TransactionDraft,
}

impl EditSession {
    pub fn new(today: NaiveDate) -> Self {
        EditSession {
            editing: None,
            form: TransactionDraft::blank(today),
        }
    }

    pub fn editing_id(&self) -> Option<&str> {
        self.editing.as_deref()
    }

    pub fn is_editing(&self, id: &str) -> bool {
        self.editing.as_deref() == Some(id)
    }

    /// Load `tx` into the form and remember its id
    pub fn begin(&mut self, tx: &Transaction) {
        self.editing = Some(tx.id.clone());
        self.form = TransactionDraft::from_transaction(tx);
    }

    /// Leave edit mode, optionally clearing the form
    pub fn cancel(&mut self, clear_form: bool, today: NaiveDate) {
        self.editing = None;
        if clear_form {
            self.reset_form(today);
        }
    }

    /// Blank form dated today; edit mode is untouched
    pub fn reset_form(&mut self, today: NaiveDate) {
        self.form = TransactionDraft::blank(today);
    }
}
