//! Ledger store use cases
//!
//! [`LedgerService`] owns the in-memory ledger, the edit session and the
//! backing key-value store. Every mutation runs in a fixed order: change the
//! in-memory ledger, write the whole ledger to the store, then rebuild the
//! derived category choices.

use crate::domain::normalize::normalize;
use crate::domain::query::distinct_categories;
use crate::domain::{
    CategoryChoice, EditSession, FilterState, Ledger, LedgerView, NewTransaction, Transaction,
    TransactionDraft, TransactionPatch,
};
use crate::error::{FinbookError, Result};
use crate::infrastructure::KeyValueStore;
use chrono::{Local, NaiveDate};
use serde_json::Value;
use tracing::{debug, warn};

/// Storage key holding the serialized ledger
pub const STORAGE_KEY: &str = "finance_v1_transactions";

/// What a form submission did
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    Added(Transaction),
    Updated(Transaction),
}

/// Ledger plus its persistence and edit session
pub struct LedgerService<S: KeyValueStore> {
    store: S,
    ledger: Ledger,
    session: EditSession,
    categories: Vec<CategoryChoice>,
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

impl<S: KeyValueStore> LedgerService<S> {
    /// Read the persisted ledger from `store`.
    ///
    /// Never fails: a missing, unreadable or malformed document yields an
    /// empty ledger.
    pub fn load(store: S) -> Self {
        let ledger = match store.get(STORAGE_KEY) {
            Ok(Some(text)) => decode_ledger(&text),
            Ok(None) => Ledger::new(),
            Err(e) => {
                warn!(error = %e, "could not read stored ledger, starting empty");
                Ledger::new()
            }
        };
        debug!(count = ledger.len(), "ledger loaded");

        let mut service = LedgerService {
            store,
            ledger,
            session: EditSession::new(today()),
            categories: Vec::new(),
        };
        service.recompute();
        service
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn transactions(&self) -> &[Transaction] {
        self.ledger.transactions()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Category filter choices, "any" first
    pub fn categories(&self) -> &[CategoryChoice] {
        &self.categories
    }

    /// Filtered and ordered rows with totals
    pub fn view(&self, filter: &FilterState) -> LedgerView<'_> {
        LedgerView::build(self.ledger.transactions(), filter)
    }

    /// Append a transaction built from validated fields
    pub fn add(&mut self, fields: NewTransaction) -> Result<Transaction> {
        let tx = self.ledger.add(fields).clone();
        debug!(id = %tx.id, "transaction added");
        self.commit()?;
        Ok(tx)
    }

    /// Shallow-merge `patch` over the record with `id`
    pub fn update(&mut self, id: &str, patch: TransactionPatch) -> Result<Transaction> {
        let patch = patch.validate()?;
        let tx = self.ledger.update(id, &patch)?.clone();
        debug!(id = %tx.id, "transaction updated");
        self.commit()?;
        Ok(tx)
    }

    /// Delete by id. Removing the record being edited also ends the edit
    /// session and clears the form, whether or not the id was found.
    pub fn remove(&mut self, id: &str) -> Result<bool> {
        // The form must not keep pointing at a deleted record
        if self.session.is_editing(id) {
            self.session.cancel(true, today());
        }
        if !self.ledger.remove(id) {
            debug!(id, "remove: no such transaction");
            return Ok(false);
        }
        debug!(id, "transaction removed");
        self.commit()?;
        Ok(true)
    }

    /// Install `list` as the whole ledger
    pub fn replace_all(&mut self, list: Vec<Transaction>) -> Result<()> {
        self.ledger.replace_all(list);
        self.commit()
    }

    /// Overwrite-or-insert each record by id
    pub fn merge_by_id(&mut self, incoming: Vec<Transaction>) -> Result<()> {
        self.ledger.merge_by_id(incoming);
        self.commit()
    }

    /// Empty the ledger, ending any edit session
    pub fn clear(&mut self) -> Result<()> {
        self.session.cancel(true, today());
        self.ledger.clear();
        debug!("ledger cleared");
        self.commit()
    }

    pub fn editing_id(&self) -> Option<&str> {
        self.session.editing_id()
    }

    pub fn form(&self) -> &TransactionDraft {
        &self.session.form
    }

    pub fn form_mut(&mut self) -> &mut TransactionDraft {
        &mut self.session.form
    }

    /// Load the record with `id` into the form for editing
    pub fn begin_edit(&mut self, id: &str) -> Result<()> {
        let tx = self
            .ledger
            .get(id)
            .ok_or_else(|| FinbookError::TransactionNotFound(id.to_string()))?;
        self.session.begin(tx);
        Ok(())
    }

    pub fn cancel_edit(&mut self, clear_form: bool) {
        self.session.cancel(clear_form, today());
    }

    pub fn reset_form(&mut self) {
        self.session.reset_form(today());
    }

    /// Validate the form, then update the record being edited or add a new one.
    ///
    /// After an update the edit session ends and the form is cleared. After an
    /// add the form is cleared but keeps the chosen kind.
    pub fn submit(&mut self) -> Result<SubmitOutcome> {
        let fields = self.session.form.validate()?;

        // Editing an existing record or creating a new one
        match self.session.editing_id().map(str::to_string) {
            Some(id) => {
                let tx = self.update(&id, TransactionPatch::from_fields(fields))?;
                // Leave edit mode with a clean form
                self.session.cancel(true, today());
                Ok(SubmitOutcome::Updated(tx))
            }
            None => {
                let kind = fields.kind;
                let tx = self.add(fields)?;
                // Ready for the next entry of the same kind
                self.session.reset_form(today());
                self.session.form.kind = kind;
                Ok(SubmitOutcome::Added(tx))
            }
        }
    }

    /// Write the ledger and rebuild derived views; both run even if the write fails.
    fn commit(&mut self) -> Result<()> {
        let saved = self.persist();
        // Derived views follow the in-memory ledger, saved or not
        self.recompute();
        saved
    }

    fn persist(&mut self) -> Result<()> {
        let text = serde_json::to_string(self.ledger.transactions())?;
        self.store.set(STORAGE_KEY, &text)
    }

    fn recompute(&mut self) {
        self.categories = distinct_categories(self.ledger.transactions());
    }
}

fn decode_ledger(text: &str) -> Ledger {
    let records = match serde_json::from_str::<Value>(text) {
        Ok(Value::Array(records)) => records,
        Ok(_) => {
            warn!("stored ledger is not a list, starting empty");
            return Ledger::new();
        }
        Err(e) => {
            warn!(error = %e, "stored ledger is corrupt, starting empty");
            return Ledger::new();
        }
    };

    // Same rules as imports; hand-edited files may hold anything
    let transactions: Vec<Transaction> = records.iter().filter_map(normalize).collect();
    let dropped = records.len() - transactions.len();
    if dropped > 0 {
        warn!(dropped, "ignored invalid stored records");
    }
    Ledger::from_transactions(transactions)
}
