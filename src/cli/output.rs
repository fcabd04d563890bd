//! Output formatting utilities

use crate::domain::query::BalanceSign;
use crate::domain::{CategoryChoice, Kind, LedgerView, Totals, Transaction};

/// Shown instead of rows when the filtered view is empty
pub const EMPTY_LIST_MESSAGE: &str =
    "No transactions yet. Start by adding your first income or expense.";

/// Render an ISO `YYYY-MM-DD` date as `DD/MM/YYYY`; anything else passes through
pub fn format_date(iso: &str) -> String {
    let parts: Vec<&str> = iso.split('-').collect();
    match parts.as_slice() {
        [y, m, d] if !y.is_empty() && !m.is_empty() && !d.is_empty() => {
            format!("{}/{}/{}", d, m, y)
        }
        _ => iso.to_string(),
    }
}

/// Currency code, thousands separators, two decimals: `BRL 1,234.50`
pub fn format_money(amount: f64, currency: &str) -> String {
    if amount.is_nan() {
        return format!("{} undefined", currency);
    }
    if amount.is_infinite() {
        let sign = if amount < 0.0 { "-" } else { "" };
        return format!("{}{} overflow", sign, currency);
    }
    // Beyond u64 cents there are no meaningful digits left to group
    if amount.abs() >= 1e17 {
        return format!("{} {:.2e}", currency, amount);
    }

    let cents = (amount.abs() * 100.0).round() as u64;
    let units = (cents / 100).to_string();

    let mut grouped = String::with_capacity(units.len() + units.len() / 3);
    for (i, ch) in units.chars().enumerate() {
        if i > 0 && (units.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    format!("{}{} {}.{:02}", sign, currency, grouped, cents % 100)
}

fn format_row(tx: &Transaction, currency: &str) -> String {
    let sign = match tx.kind {
        Kind::Income => '+',
        Kind::Expense => '-',
    };
    format!(
        "{}  {} {:>14}  {:<16}  {}  [{}]",
        format_date(&tx.date),
        sign,
        format_money(tx.amount, currency),
        tx.category,
        tx.description,
        tx.id
    )
}

/// Format the rows of a view, newest first, followed by a count line.
///
/// `limit` caps the rows printed; the count always reflects the whole view.
pub fn format_transaction_list(view: &LedgerView<'_>, currency: &str, limit: Option<usize>) -> String {
    if view.rows.is_empty() {
        return EMPTY_LIST_MESSAGE.to_string();
    }

    let shown = limit.unwrap_or(view.count()).min(view.count());
    let mut output = String::new();
    for tx in view.rows.iter().take(shown) {
        output.push_str(&format_row(tx, currency));
        output.push('\n');
    }
    if shown < view.count() {
        output.push_str(&format!("... {} more\n", view.count() - shown));
    }
    output.push_str(&format_count(view.count()));
    output
}

/// "1 transaction" / "N transactions"
pub fn format_count(count: usize) -> String {
    if count == 1 {
        "1 transaction".to_string()
    } else {
        format!("{} transactions", count)
    }
}

/// Income, expense and a signed balance, one per line
pub fn format_totals(totals: &Totals, currency: &str) -> String {
    let marker = match totals.balance_sign() {
        BalanceSign::Positive => " (positive)",
        BalanceSign::Negative => " (negative)",
        BalanceSign::Zero => "",
        BalanceSign::Undefined => " (undefined)",
    };
    format!(
        "Income:  {}\nExpense: {}\nBalance: {}{}",
        format_money(totals.income, currency),
        format_money(totals.expense, currency),
        format_money(totals.balance, currency),
        marker
    )
}

/// Format category filter choices, one per line
pub fn format_categories(choices: &[CategoryChoice]) -> String {
    let mut output = String::new();
    for choice in choices {
        output.push_str(&format!("{}\n", choice));
    }
    output
}
