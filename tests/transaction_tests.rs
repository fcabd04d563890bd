//! Integration tests for add, edit, remove and clear

#![allow(deprecated)]

use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

mod common;
use common::{add_tx, finbook_in, init_ledger};

fn ledger_with_salary_and_rent() -> (TempDir, String, String) {
    let temp = TempDir::new().unwrap();
    init_ledger(temp.path());
    let salary = add_tx(
        temp.path(),
        &["Salary", "1000", "--type", "income", "--category", "Work", "--date", "2024-03-01"],
    );
    let rent = add_tx(
        temp.path(),
        &["Rent", "400", "--category", "Home", "--date", "2024-03-05"],
    );
    (temp, salary, rent)
}

#[test]
fn test_add_and_totals() {
    let (temp, _, _) = ledger_with_salary_and_rent();

    finbook_in(temp.path())
        .arg("totals")
        .assert()
        .success()
        .stdout(predicate::str::contains("Income:  BRL 1,000.00"))
        .stdout(predicate::str::contains("Expense: BRL 400.00"))
        .stdout(predicate::str::contains("Balance: BRL 600.00 (positive)"))
        .stdout(predicate::str::contains("2 transactions"));
}

#[test]
fn test_add_persists_ledger_document() {
    let (temp, salary, _) = ledger_with_salary_and_rent();

    let path = temp.path().join(".finbook/finance_v1_transactions.json");
    let value: serde_json::Value = serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap();
    let records = value.as_array().unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["id"], salary.as_str());
    assert_eq!(records[0]["desc"], "Salary");
    assert_eq!(records[0]["type"], "income");
    assert!(records[0]["createdAt"].is_i64());
}

#[test]
fn test_add_defaults_category_and_kind() {
    let temp = TempDir::new().unwrap();
    init_ledger(temp.path());
    add_tx(temp.path(), &["Coffee", "4.5", "--date", "2024-03-02"]);

    finbook_in(temp.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("02/03/2024  -"))
        .stdout(predicate::str::contains("Uncategorized"))
        .stdout(predicate::str::contains("1 transaction"));
}

#[test]
fn test_add_rejects_invalid_amount() {
    let temp = TempDir::new().unwrap();
    init_ledger(temp.path());

    for amount in ["-5", "0", "abc"] {
        finbook_in(temp.path())
            .args(["add", "Bad", amount])
            .assert()
            .code(3)
            .stderr(predicate::str::contains("Invalid amount"));
    }

    finbook_in(temp.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No transactions yet"));
}

#[test]
fn test_add_rejects_missing_description_and_bad_date() {
    let temp = TempDir::new().unwrap();
    init_ledger(temp.path());

    finbook_in(temp.path())
        .args(["add", "  ", "10"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Description is required"));

    finbook_in(temp.path())
        .args(["add", "Lunch", "10", "--date", "01/03/2024"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Invalid date"));

    finbook_in(temp.path())
        .args(["add", "Lunch", "10", "--type", "transfer"])
        .assert()
        .code(3);
}

#[test]
fn test_edit_changes_fields() {
    let (temp, _, rent) = ledger_with_salary_and_rent();

    finbook_in(temp.path())
        .args(["edit", &rent, "--amount", "450", "--desc", "Rent March"])
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("Saved transaction {}", rent)));

    finbook_in(temp.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Rent March"))
        .stdout(predicate::str::contains("BRL 450.00"))
        .stdout(predicate::str::contains("Home"));
}

#[test]
fn test_edit_missing_id_leaves_ledger() {
    let (temp, _, _) = ledger_with_salary_and_rent();
    let path = temp.path().join(".finbook/finance_v1_transactions.json");
    let before = fs::read_to_string(&path).unwrap();

    finbook_in(temp.path())
        .args(["edit", "missing", "--amount", "5"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("Transaction not found: 'missing'"));

    assert_eq!(fs::read_to_string(&path).unwrap(), before);
}

#[test]
fn test_edit_without_changes_fails() {
    let (temp, salary, _) = ledger_with_salary_and_rent();

    finbook_in(temp.path())
        .args(["edit", &salary])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Nothing to change"));
}

#[test]
fn test_remove() {
    let (temp, salary, _) = ledger_with_salary_and_rent();

    finbook_in(temp.path())
        .args(["remove", &salary])
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed transaction"));

    finbook_in(temp.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Salary").not())
        .stdout(predicate::str::contains("1 transaction"));
}

#[test]
fn test_remove_absent_is_noop() {
    let (temp, _, _) = ledger_with_salary_and_rent();

    finbook_in(temp.path())
        .args(["remove", "zzz"])
        .assert()
        .success()
        .stdout(predicate::str::contains("nothing removed"));

    finbook_in(temp.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("2 transactions"));
}

#[test]
fn test_clear_requires_confirmation() {
    let (temp, _, _) = ledger_with_salary_and_rent();

    finbook_in(temp.path())
        .arg("clear")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("--yes"));

    finbook_in(temp.path())
        .arg("list")
        .assert()
        .stdout(predicate::str::contains("2 transactions"));

    finbook_in(temp.path())
        .args(["clear", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Cleared all transactions"));

    finbook_in(temp.path())
        .arg("list")
        .assert()
        .stdout(predicate::str::contains("No transactions yet"));
}

#[test]
fn test_corrupt_store_starts_empty() {
    let temp = TempDir::new().unwrap();
    init_ledger(temp.path());
    fs::write(
        temp.path().join(".finbook/finance_v1_transactions.json"),
        "{not json",
    )
    .unwrap();

    finbook_in(temp.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No transactions yet"))
        .stderr(predicate::str::is_empty());
}
