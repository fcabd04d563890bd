//! Lenient normalization of untrusted transaction records
//!
//! Imported files and the persisted store may contain records written by
//! older versions or edited by hand. [`normalize`] turns any JSON value into
//! a well-formed [`Transaction`] or rejects it, and never fails loudly.

use crate::domain::transaction::{
    category_or_default, is_iso_date, is_valid_amount, new_id, now_millis, Kind, Transaction,
};
use serde_json::{Map, Value};
use std::str::FromStr;

/// Normalize a loosely-typed record into a transaction.
///
/// Returns `None` when the description is blank, the amount is not a
/// positive finite number, the type is not `income`/`expense`, or the date
/// is not `YYYY-MM-DD`. Missing ids, categories and creation times get
/// defaults.
pub fn normalize(input: &Value) -> Option<Transaction> {
    let record = input.as_object()?;

    let description = text_field(record, "desc")
        .or_else(|| text_field(record, "description"))
        .unwrap_or_default();
    let kind_text = text_field(record, "type")
        .or_else(|| text_field(record, "kind"))
        .unwrap_or_default();
    let date = text_field(record, "date").unwrap_or_default();
    let amount = record.get("amount").and_then(coerce_number);

    // Any one failed check rejects the whole record
    if description.is_empty() {
        return None;
    }
    let kind = Kind::from_str(&kind_text).ok()?;
    let amount = amount.filter(|a| is_valid_amount(*a))?;
    if !is_iso_date(&date) {
        return None;
    }

    // Defaults for the optional fields
    let id = match record.get("id") {
        Some(Value::String(s)) if !s.is_empty() => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => new_id(),
    };
    let category = text_field(record, "category")
        .map(|c| category_or_default(&c))
        .unwrap_or_else(|| category_or_default(""));
    let created_at = record
        .get("createdAt")
        .and_then(coerce_number)
        .filter(|n| n.is_finite())
        .map(|n| n as i64)
        .unwrap_or_else(now_millis);

    Some(Transaction {
        id,
        description,
        amount,
        kind,
        category,
        date,
        created_at,
    })
}

/// Trimmed text for `key`; numbers are rendered, null and other types are absent.
fn text_field(record: &Map<String, Value>, key: &str) -> Option<String> {
    match record.get(key)? {
        Value::String(s) => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn coerce_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}
