//! Transaction model, form drafts and patches

use crate::error::{FinbookError, Result};
use chrono::{NaiveDate, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;
use uuid::Uuid;

/// Category assigned when none is given
pub const DEFAULT_CATEGORY: &str = "Uncategorized";

fn iso_date_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").unwrap())
}

fn iso_month_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"^[0-9]{4}-[0-9]{2}$").unwrap())
}

/// True if `s` has the exact `YYYY-MM-DD` shape.
///
/// Only the shape is checked: `2024-02-31` passes.
pub fn is_iso_date(s: &str) -> bool {
    iso_date_regex().is_match(s)
}

/// True if `s` has the exact `YYYY-MM` shape
pub fn is_iso_month(s: &str) -> bool {
    iso_month_regex().is_match(s)
}

/// Generate a fresh transaction id
pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// Current time in milliseconds since the Unix epoch
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Parse a positive, finite amount from text
pub fn parse_amount(text: &str) -> Option<f64> {
    let value: f64 = text.trim().parse().ok()?;
    is_valid_amount(value).then_some(value)
}

pub(crate) fn is_valid_amount(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

/// Income or expense
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    Income,
    #[default]
    Expense,
}

impl Kind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Kind::Income => "income",
            Kind::Expense => "expense",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Kind {
    type Err = String;

    /// Exact, case-sensitive match; imported records rely on this strictness.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "income" => Ok(Kind::Income),
            "expense" => Ok(Kind::Expense),
            _ => Err(format!(
                "Invalid type: '{}'. Valid types are: income, expense",
                s
            )),
        }
    }
}

/// One recorded income or expense event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    #[serde(rename = "desc")]
    pub description: String,
    pub amount: f64,
    #[serde(rename = "type")]
    pub kind: Kind,
    pub category: String,
    pub date: String,
    pub created_at: i64,
}

impl Transaction {
    /// Build a brand-new transaction from already validated fields
    pub fn create(fields: NewTransaction) -> Self {
        Transaction {
            id: new_id(),
            description: fields.description,
            amount: fields.amount,
            kind: fields.kind,
            category: fields.category,
            date: fields.date,
            created_at: now_millis(),
        }
    }

    /// `YYYY-MM` prefix of the date
    pub fn month(&self) -> &str {
        self.date.get(..7).unwrap_or(&self.date)
    }

    /// Copy of this record with `patch` laid over it; id and creation time are kept.
    pub fn patched(&self, patch: &TransactionPatch) -> Self {
        Transaction {
            id: self.id.clone(),
            description: patch
                .description
                .clone()
                .unwrap_or_else(|| self.description.clone()),
            amount: patch.amount.unwrap_or(self.amount),
            kind: patch.kind.unwrap_or(self.kind),
            category: patch
                .category
                .clone()
                .unwrap_or_else(|| self.category.clone()),
            date: patch.date.clone().unwrap_or_else(|| self.date.clone()),
            created_at: self.created_at,
        }
    }
}

/// Validated fields for a new transaction
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    pub description: String,
    pub amount: f64,
    pub kind: Kind,
    pub category: String,
    pub date: String,
}

/// Form contents as typed by the user
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TransactionDraft {
    pub description: String,
    pub amount: String,
    pub kind: Kind,
    pub category: String,
    pub date: String,
}

impl TransactionDraft {
    /// Empty form dated `today`
    pub fn blank(today: NaiveDate) -> Self {
        TransactionDraft {
            date: today.format("%Y-%m-%d").to_string(),
            ..Default::default()
        }
    }

    /// Form pre-filled from an existing record
    pub fn from_transaction(tx: &Transaction) -> Self {
        TransactionDraft {
            description: tx.description.clone(),
            amount: tx.amount.to_string(),
            kind: tx.kind,
            category: tx.category.clone(),
            date: tx.date.clone(),
        }
    }

    /// Check the form and produce trusted fields
    pub fn validate(&self) -> Result<NewTransaction> {
        let description = validate_description(&self.description)?;
        let amount = parse_amount(&self.amount)
            .ok_or_else(|| FinbookError::Validation("Invalid amount".to_string()))?;
        let date = validate_date(&self.date)?;

        Ok(NewTransaction {
            description,
            amount,
            kind: self.kind,
            category: category_or_default(&self.category),
            date,
        })
    }
}

/// Field changes for an existing transaction; `None` leaves a field alone.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TransactionPatch {
    pub description: Option<String>,
    pub amount: Option<f64>,
    pub kind: Option<Kind>,
    pub category: Option<String>,
    pub date: Option<String>,
}

impl TransactionPatch {
    /// Patch that rewrites every field
    pub fn from_fields(fields: NewTransaction) -> Self {
        TransactionPatch {
            description: Some(fields.description),
            amount: Some(fields.amount),
            kind: Some(fields.kind),
            category: Some(fields.category),
            date: Some(fields.date),
        }
    }

    pub fn is_empty(&self) -> bool {
        self == &TransactionPatch::default()
    }

    /// Apply form-level rules to every field present, normalizing text.
    pub fn validate(self) -> Result<Self> {
        let description = self
            .description
            .as_deref()
            .map(validate_description)
            .transpose()?;
        if let Some(amount) = self.amount {
            if !is_valid_amount(amount) {
                return Err(FinbookError::Validation("Invalid amount".to_string()));
            }
        }
        let date = self.date.as_deref().map(validate_date).transpose()?;

        Ok(TransactionPatch {
            description,
            amount: self.amount,
            kind: self.kind,
            category: self.category.as_deref().map(category_or_default),
            date,
        })
    }
}

fn validate_description(text: &str) -> Result<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(FinbookError::Validation(
            "Description is required".to_string(),
        ));
    }
    Ok(trimmed.to_string())
}

fn validate_date(text: &str) -> Result<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(FinbookError::Validation("Date is required".to_string()));
    }
    if !is_iso_date(trimmed) {
        return Err(FinbookError::Validation(format!(
            "Invalid date: '{}'. Expected YYYY-MM-DD",
            trimmed
        )));
    }
    Ok(trimmed.to_string())
}

/// Trimmed category, or the default label when blank
pub fn category_or_default(text: &str) -> String {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        DEFAULT_CATEGORY.to_string()
    } else {
        trimmed.to_string()
    }
}
