//! Import and export use cases

use crate::application::confirm::{resolve_import_mode, Confirm};
use crate::application::ledger_service::LedgerService;
use crate::domain::{ExportDocument, ImportMode, Ledger, RawImportDocument, Transaction};
use crate::error::{FinbookError, Result};
use crate::infrastructure::KeyValueStore;
use chrono::Utc;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// File extensions the export is written under; the content is identical
pub const EXPORT_EXTENSIONS: [&str; 2] = ["json", "txt"];

/// Result of an import request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportOutcome {
    Imported { count: usize, mode: ImportMode },
    Declined,
}

/// Parse and normalize an import file's text.
///
/// Fails with `InvalidImportFormat` for an unrecognized shape and with
/// `NothingToImport` when no record survives normalization.
pub fn prepare_import(text: &str) -> Result<Vec<Transaction>> {
    let document = RawImportDocument::parse(text)?;
    let records = document.normalized();
    let dropped = document.records().len() - records.len();
    if dropped > 0 {
        debug!(dropped, "skipped invalid import records");
    }
    if records.is_empty() {
        return Err(FinbookError::NothingToImport);
    }
    Ok(records)
}

/// Write `document` once per export extension into `dir`
pub fn write_export(document: &ExportDocument, dir: &Path, name: &str) -> Result<Vec<PathBuf>> {
    let text = document.render()?;
    if !dir.exists() {
        fs::create_dir_all(dir)?;
    }

    let mut written = Vec::with_capacity(EXPORT_EXTENSIONS.len());
    for ext in EXPORT_EXTENSIONS {
        let path = dir.join(format!("{}.{}", name, ext));
        fs::write(&path, &text)?;
        written.push(path);
    }
    info!(count = document.transactions.len(), "ledger exported");
    Ok(written)
}

impl<S: KeyValueStore> LedgerService<S> {
    /// Snapshot of the full, unfiltered ledger
    pub fn export_document(&self) -> ExportDocument {
        ExportDocument::new(self.transactions().to_vec(), Utc::now())
    }

    /// Apply already-normalized records; returns how many were read.
    ///
    /// Ends any edit session first. Replace collapses repeated ids to the
    /// last occurrence so ids stay unique.
    pub fn import(&mut self, records: Vec<Transaction>, mode: ImportMode) -> Result<usize> {
        let count = records.len();
        // The form may hold a record the import is about to replace
        self.cancel_edit(true);
        match mode {
            ImportMode::Replace => {
                self.replace_all(Ledger::from_transactions(records).into_transactions())?
            }
            ImportMode::Merge => self.merge_by_id(records)?,
        }
        info!(count, %mode, "transactions imported");
        Ok(count)
    }

    /// Full import flow: parse, normalize, settle the mode, apply.
    ///
    /// Nothing is changed when parsing fails, nothing is valid, or the mode
    /// is declined.
    pub fn import_text(
        &mut self,
        text: &str,
        requested: Option<ImportMode>,
        confirm: &mut dyn Confirm,
    ) -> Result<ImportOutcome> {
        let records = prepare_import(text)?;
        let Some(mode) = resolve_import_mode(requested, confirm) else {
            return Ok(ImportOutcome::Declined);
        };
        let count = self.import(records, mode)?;
        Ok(ImportOutcome::Imported { count, mode })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::confirm::{AssumeYes, ScriptedConfirm};
    use crate::domain::{Kind, NewTransaction};
    use crate::infrastructure::MemoryStore;
    use serde_json::Value;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn fields(desc: &str, amount: f64, kind: Kind) -> NewTransaction {
        NewTransaction {
            description: desc.to_string(),
            amount,
            kind,
            category: "General".to_string(),
            date: "2024-03-01".to_string(),
        }
    }

    fn seeded() -> LedgerService<MemoryStore> {
        let mut service = LedgerService::load(MemoryStore::new());
        service.add(fields("Salary", 1000.0, Kind::Income)).unwrap();
        service.add(fields("Rent", 400.0, Kind::Expense)).unwrap();
        service
    }

    fn by_id(list: &[Transaction]) -> HashMap<String, Transaction> {
        list.iter().map(|t| (t.id.clone(), t.clone())).collect()
    }

    #[test]
    fn test_export_contains_full_ledger() {
        let service = seeded();
        let doc = service.export_document();
        assert_eq!(doc.meta.app, "finbook");
        assert_eq!(doc.transactions, service.transactions());
    }

    #[test]
    fn test_round_trip_replace() {
        let service = seeded();
        let text = service.export_document().render().unwrap();

        let mut fresh = LedgerService::load(MemoryStore::new());
        fresh.add(fields("Other", 1.0, Kind::Expense)).unwrap();
        let outcome = fresh
            .import_text(&text, Some(ImportMode::Replace), &mut AssumeYes)
            .unwrap();

        assert_eq!(
            outcome,
            ImportOutcome::Imported {
                count: 2,
                mode: ImportMode::Replace
            }
        );
        assert_eq!(by_id(fresh.transactions()), by_id(service.transactions()));
    }

    #[test]
    fn test_round_trip_keeps_full_precision_amounts() {
        let mut service = LedgerService::load(MemoryStore::new());
        for amount in [175.47217903306625, 0.1 + 0.2, 999.9999999999999] {
            service.add(fields("Item", amount, Kind::Expense)).unwrap();
        }
        let text = service.export_document().render().unwrap();

        let mut fresh = LedgerService::load(MemoryStore::new());
        fresh
            .import_text(&text, Some(ImportMode::Replace), &mut AssumeYes)
            .unwrap();

        let amounts: Vec<u64> = fresh.transactions().iter().map(|t| t.amount.to_bits()).collect();
        let expected: Vec<u64> = service.transactions().iter().map(|t| t.amount.to_bits()).collect();
        assert_eq!(amounts, expected);
        assert_eq!(by_id(fresh.transactions()), by_id(service.transactions()));
    }

    #[test]
    fn test_negative_amount_import_is_nothing_to_import() {
        let mut service = seeded();
        let before = service.transactions().to_vec();
        let text = r#"{"transactions":[{"desc":"X","amount":-5,"type":"income","date":"2024-01-01"}]}"#;

        let err = service
            .import_text(text, Some(ImportMode::Merge), &mut AssumeYes)
            .unwrap_err();
        assert!(matches!(err, FinbookError::NothingToImport));
        assert_eq!(service.transactions(), &before[..]);
    }

    #[test]
    fn test_invalid_format_leaves_ledger() {
        let mut service = seeded();
        let before = service.transactions().to_vec();
        for text in ["{\"rows\":[]}", "not json", "7"] {
            let err = service
                .import_text(text, None, &mut AssumeYes)
                .unwrap_err();
            assert!(matches!(err, FinbookError::InvalidImportFormat(_)));
        }
        assert_eq!(service.transactions(), &before[..]);
    }

    #[test]
    fn test_merge_overwrites_by_id_and_appends() {
        let mut service = seeded();
        let salary_id = service.transactions()[0].id.clone();
        let text = format!(
            r#"[
                {{"id":"{}","desc":"Salary v2","amount":1200,"type":"income","date":"2024-03-01"}},
                {{"id":"new","desc":"Gift","amount":50,"type":"income","date":"2024-03-05"}},
                {{"desc":"","amount":50,"type":"income","date":"2024-03-05"}}
            ]"#,
            salary_id
        );
        let outcome = service
            .import_text(&text, Some(ImportMode::Merge), &mut ScriptedConfirm::new(&[]))
            .unwrap();

        assert_eq!(
            outcome,
            ImportOutcome::Imported {
                count: 2,
                mode: ImportMode::Merge
            }
        );
        assert_eq!(service.transactions().len(), 3);
        assert_eq!(service.transactions()[0].description, "Salary v2");
        assert_eq!(service.transactions()[2].id, "new");
    }

    #[test]
    fn test_declined_import_changes_nothing() {
        let mut service = seeded();
        let before = service.transactions().to_vec();
        let text = r#"[{"desc":"Gift","amount":50,"type":"income","date":"2024-03-05"}]"#;

        let outcome = service
            .import_text(text, None, &mut ScriptedConfirm::new(&[false, false]))
            .unwrap();
        assert_eq!(outcome, ImportOutcome::Declined);
        assert_eq!(service.transactions(), &before[..]);
    }

    #[test]
    fn test_import_cancels_edit() {
        let mut service = seeded();
        let id = service.transactions()[0].id.clone();
        service.begin_edit(&id).unwrap();

        let text = r#"[{"desc":"Gift","amount":50,"type":"income","date":"2024-03-05"}]"#;
        service
            .import_text(text, Some(ImportMode::Merge), &mut AssumeYes)
            .unwrap();
        assert_eq!(service.editing_id(), None);
        assert_eq!(service.form().description, "");
    }

    #[test]
    fn test_replace_collapses_duplicate_ids() {
        let mut service = seeded();
        let records = prepare_import(
            r#"[
                {"id":"dup","desc":"First","amount":1,"type":"expense","date":"2024-01-01"},
                {"id":"dup","desc":"Second","amount":2,"type":"expense","date":"2024-01-01"}
            ]"#,
        )
        .unwrap();
        assert_eq!(service.import(records, ImportMode::Replace).unwrap(), 2);
        assert_eq!(service.transactions().len(), 1);
        assert_eq!(service.transactions()[0].description, "Second");
    }

    #[test]
    fn test_write_export_two_identical_files() {
        let temp = TempDir::new().unwrap();
        let service = seeded();
        let paths = write_export(&service.export_document(), temp.path(), "backup").unwrap();

        assert_eq!(paths.len(), 2);
        assert!(paths[0].ends_with("backup.json"));
        assert!(paths[1].ends_with("backup.txt"));
        let json = fs::read_to_string(&paths[0]).unwrap();
        let txt = fs::read_to_string(&paths[1]).unwrap();
        assert_eq!(json, txt);

        let value: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["transactions"].as_array().unwrap().len(), 2);
        assert!(value["meta"]["exportedAt"].as_str().unwrap().ends_with('Z'));
    }
}
