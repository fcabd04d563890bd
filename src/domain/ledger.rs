//! In-memory ledger collection

use crate::domain::transaction::{NewTransaction, Transaction, TransactionPatch};
use crate::error::{FinbookError, Result};
use std::collections::HashMap;

/// Ordered collection of transactions with unique ids.
///
/// Order is insertion order; display order is derived by the query layer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ledger {
    transactions: Vec<Transaction>,
}

impl Ledger {
    pub fn new() -> Self {
        Ledger::default()
    }

    /// Build a ledger from records, keeping the last record for a repeated id
    pub fn from_transactions(transactions: Vec<Transaction>) -> Self {
        let mut ledger = Ledger::new();
        ledger.merge_by_id(transactions);
        ledger
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn into_transactions(self) -> Vec<Transaction> {
        self.transactions
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Transaction> {
        self.transactions.iter().find(|t| t.id == id)
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.transactions.iter().position(|t| t.id == id)
    }

    /// Append a new transaction built from validated fields
    pub fn add(&mut self, fields: NewTransaction) -> &Transaction {
        let idx = self.transactions.len();
        self.transactions.push(Transaction::create(fields));
        &self.transactions[idx]
    }

    /// Replace a record with `patch` laid over it
    pub fn update(&mut self, id: &str, patch: &TransactionPatch) -> Result<&Transaction> {
        let idx = self
            .position(id)
            .ok_or_else(|| FinbookError::TransactionNotFound(id.to_string()))?;
        let updated = self.transactions[idx].patched(patch);
        self.transactions[idx] = updated;
        Ok(&self.transactions[idx])
    }

    /// Remove by id; returns `false` when nothing matched
    pub fn remove(&mut self, id: &str) -> bool {
        match self.position(id) {
            Some(idx) => {
                self.transactions.remove(idx);
                true
            }
            None => false,
        }
    }

    /// Discard everything and install `list` as-is
    pub fn replace_all(&mut self, list: Vec<Transaction>) {
        self.transactions = list;
    }

    /// Overwrite-or-append each incoming record by id; incoming wins.
    pub fn merge_by_id(&mut self, incoming: Vec<Transaction>) {
        let mut index: HashMap<String, usize> = self
            .transactions
            .iter()
            .enumerate()
            .map(|(i, t)| (t.id.clone(), i))
            .collect();

        for tx in incoming {
            match index.get(&tx.id) {
                Some(&i) => self.transactions[i] = tx,
                None => {
                    index.insert(tx.id.clone(), self.transactions.len());
                    self.transactions.push(tx);
                }
            }
        }
    }

    pub fn clear(&mut self) {
        self.transactions.clear();
    }
}
