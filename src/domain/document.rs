//! Export and import document shapes

use crate::domain::normalize::normalize;
use crate::domain::transaction::Transaction;
use crate::error::{FinbookError, Result};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Application identifier written into export metadata
pub const APP_ID: &str = "finbook";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportMeta {
    pub app: String,
    pub exported_at: String,
}

/// Self-describing backup of the full ledger
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportDocument {
    pub meta: ExportMeta,
    pub transactions: Vec<Transaction>,
}

impl ExportDocument {
    pub fn new(transactions: Vec<Transaction>, exported_at: DateTime<Utc>) -> Self {
        ExportDocument {
            meta: ExportMeta {
                app: APP_ID.to_string(),
                exported_at: exported_at.to_rfc3339_opts(SecondsFormat::Millis, true),
            },
            transactions,
        }
    }

    /// Indented JSON text
    pub fn render(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Top-level shapes accepted on import
#[derive(Debug, Clone, PartialEq)]
pub enum RawImportDocument {
    /// `[ {...}, ... ]`
    Bare(Vec<Value>),
    /// `{ "transactions": [ {...}, ... ], ... }`
    Wrapped(Vec<Value>),
}

impl RawImportDocument {
    /// Resolve the document shape from raw text
    pub fn parse(text: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(text)
            .map_err(|e| FinbookError::InvalidImportFormat(format!("not valid JSON ({})", e)))?;
        Self::from_value(value)
    }

    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Array(records) => Ok(RawImportDocument::Bare(records)),
            Value::Object(mut map) => match map.remove("transactions") {
                Some(Value::Array(records)) => Ok(RawImportDocument::Wrapped(records)),
                _ => Err(FinbookError::InvalidImportFormat(
                    "object has no \"transactions\" array".to_string(),
                )),
            },
            other => Err(FinbookError::InvalidImportFormat(format!(
                "unexpected top-level {}",
                json_type_name(&other)
            ))),
        }
    }

    pub fn records(&self) -> &[Value] {
        match self {
            RawImportDocument::Bare(records) | RawImportDocument::Wrapped(records) => records,
        }
    }

    /// Normalized records, dropping any that fail validation
    pub fn normalized(&self) -> Vec<Transaction> {
        self.records().iter().filter_map(normalize).collect()
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// How imported records combine with the existing ledger
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportMode {
    Merge,
    Replace,
}

impl fmt::Display for ImportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImportMode::Merge => f.write_str("merge"),
            ImportMode::Replace => f.write_str("replace"),
        }
    }
}

impl FromStr for ImportMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "merge" => Ok(ImportMode::Merge),
            "replace" => Ok(ImportMode::Replace),
            _ => Err(format!(
                "Invalid import mode: '{}'. Valid modes are: merge, replace",
                s
            )),
        }
    }
}
