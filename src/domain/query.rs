//! Filtering, totals and display ordering over the ledger
//!
//! Everything here is pure: functions take the ledger (or a slice of it)
//! and return derived values without touching the store.

use crate::domain::transaction::{is_iso_month, Kind, Transaction};
use crate::error::{FinbookError, Result};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Label used for the "any" choice in kind and category filters
pub const ANY_LABEL: &str = "all";

/// Kind filter: everything, or one kind only
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KindFilter {
    #[default]
    Any,
    Only(Kind),
}

impl KindFilter {
    pub fn matches(&self, kind: Kind) -> bool {
        match self {
            KindFilter::Any => true,
            KindFilter::Only(k) => *k == kind,
        }
    }
}

impl FromStr for KindFilter {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "all" | "any" => Ok(KindFilter::Any),
            other => Kind::from_str(other).map(KindFilter::Only),
        }
    }
}

/// One entry of the category filter choices
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryChoice {
    #[default]
    Any,
    Named(String),
}

impl CategoryChoice {
    pub fn matches(&self, category: &str) -> bool {
        match self {
            CategoryChoice::Any => true,
            CategoryChoice::Named(name) => name == category,
        }
    }
}

impl fmt::Display for CategoryChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryChoice::Any => f.write_str(ANY_LABEL),
            CategoryChoice::Named(name) => f.write_str(name),
        }
    }
}

impl From<&str> for CategoryChoice {
    fn from(s: &str) -> Self {
        let trimmed = s.trim();
        if trimmed.is_empty() || trimmed == ANY_LABEL {
            CategoryChoice::Any
        } else {
            CategoryChoice::Named(trimmed.to_string())
        }
    }
}

/// Transient view-narrowing criteria
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterState {
    month: Option<String>,
    pub kind: KindFilter,
    pub category: CategoryChoice,
}

impl FilterState {
    /// Set the month filter; an empty string clears it.
    pub fn set_month(&mut self, month: &str) -> Result<()> {
        let month = month.trim();
        if month.is_empty() {
            self.month = None;
            return Ok(());
        }
        if !is_iso_month(month) {
            return Err(FinbookError::Validation(format!(
                "Invalid month: '{}'. Expected YYYY-MM",
                month
            )));
        }
        self.month = Some(month.to_string());
        Ok(())
    }

    pub fn month(&self) -> Option<&str> {
        self.month.as_deref()
    }

    pub fn matches(&self, tx: &Transaction) -> bool {
        if let Some(month) = &self.month {
            if tx.month() != month {
                return false;
            }
        }
        self.kind.matches(tx.kind) && self.category.matches(&tx.category)
    }

    /// Reset every filter to "any"
    pub fn clear(&mut self) {
        *self = FilterState::default();
    }

    /// Drop a category filter that is no longer among `choices`
    pub fn reconcile(&mut self, choices: &[CategoryChoice]) {
        if !choices.contains(&self.category) {
            self.category = CategoryChoice::Any;
        }
    }
}

/// Aggregate sums over a set of transactions
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Totals {
    pub income: f64,
    pub expense: f64,
    pub balance: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BalanceSign {
    Positive,
    Negative,
    Zero,
    /// The sums overflowed into infinities that cancel out
    Undefined,
}

impl Totals {
    pub fn balance_sign(&self) -> BalanceSign {
        if self.balance.is_nan() {
            BalanceSign::Undefined
        } else if self.balance > 0.0 {
            BalanceSign::Positive
        } else if self.balance < 0.0 {
            BalanceSign::Negative
        } else {
            BalanceSign::Zero
        }
    }
}

/// Transactions passing every filter, in ledger order
pub fn apply_filters<'a>(ledger: &'a [Transaction], filter: &FilterState) -> Vec<&'a Transaction> {
    ledger.iter().filter(|tx| filter.matches(tx)).collect()
}

/// Income, expense and balance of `list`.
///
/// Amounts are summed in sorted order so the result does not depend on the
/// order of `list`.
pub fn compute_totals<'a, I>(list: I) -> Totals
where
    I: IntoIterator<Item = &'a Transaction>,
{
    // Split by kind first
    let mut income = Vec::new();
    let mut expense = Vec::new();
    for tx in list {
        match tx.kind {
            Kind::Income => income.push(tx.amount),
            Kind::Expense => expense.push(tx.amount),
        }
    }
    let income = sorted_sum(income);
    let expense = sorted_sum(expense);

    Totals {
        income,
        expense,
        balance: income - expense,
    }
}

fn sorted_sum(mut amounts: Vec<f64>) -> f64 {
    amounts.sort_by(|a, b| a.total_cmp(b));
    amounts.into_iter().sum()
}

/// Newest date first, then most recently created first
pub fn sort_for_display(list: &mut [&Transaction]) {
    list.sort_by(|a, b| {
        b.date
            .cmp(&a.date)
            .then_with(|| b.created_at.cmp(&a.created_at))
    });
}

/// Category filter choices: the "any" sentinel, then each distinct label alphabetically
pub fn distinct_categories(ledger: &[Transaction]) -> Vec<CategoryChoice> {
    let mut names: Vec<&str> = ledger.iter().map(|t| t.category.as_str()).collect();
    names.sort_by(|a, b| collate(a, b));
    names.dedup();

    std::iter::once(CategoryChoice::Any)
        .chain(names.into_iter().map(|n| CategoryChoice::Named(n.to_string())))
        .collect()
}

/// Alphabetical comparison ignoring case and common Latin accents, with the
/// raw text as the final tie-break.
pub fn collate(a: &str, b: &str) -> Ordering {
    let fold = |s: &str| -> String { s.chars().flat_map(char::to_lowercase).map(fold_accent).collect() };
    fold(a)
        .cmp(&fold(b))
        .then_with(|| a.to_lowercase().cmp(&b.to_lowercase()))
        .then_with(|| a.cmp(b))
}

fn fold_accent(c: char) -> char {
    match c {
        'á' | 'à' | 'â' | 'ã' | 'ä' | 'å' => 'a',
        'ç' => 'c',
        'é' | 'è' | 'ê' | 'ë' => 'e',
        'í' | 'ì' | 'î' | 'ï' => 'i',
        'ñ' => 'n',
        'ó' | 'ò' | 'ô' | 'õ' | 'ö' => 'o',
        'ú' | 'ù' | 'û' | 'ü' => 'u',
        'ý' | 'ÿ' => 'y',
        other => other,
    }
}

/// Filtered, display-ordered rows with their totals
#[derive(Debug, Clone, PartialEq)]
pub struct LedgerView<'a> {
    pub rows: Vec<&'a Transaction>,
    pub totals: Totals,
}

impl<'a> LedgerView<'a> {
    pub fn build(ledger: &'a [Transaction], filter: &FilterState) -> Self {
        let mut rows = apply_filters(ledger, filter);
        let totals = compute_totals(rows.iter().copied());
        sort_for_display(&mut rows);
        LedgerView { rows, totals }
    }

    pub fn count(&self) -> usize {
        self.rows.len()
    }
}
