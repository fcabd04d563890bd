//! Confirmation decisions requested from the caller

use crate::domain::ImportMode;
use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

/// Questions the core may ask before a destructive or ambiguous action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prompt {
    ClearAll,
    ImportMerge,
    ImportReplace,
}

impl Prompt {
    pub fn message(&self) -> &'static str {
        match self {
            Prompt::ClearAll => "This deletes every transaction. Are you sure?",
            Prompt::ImportMerge => "Merge imported transactions with the existing ones? (no = replace everything)",
            Prompt::ImportReplace => "Really replace EVERYTHING? Your current data will be deleted.",
        }
    }
}

/// Answers yes/no questions on behalf of the user
pub trait Confirm {
    fn confirm(&mut self, prompt: Prompt) -> bool;

    /// False when no one can be asked; a declined prompt then means
    /// "confirmation missing" rather than "user said no".
    fn can_prompt(&self) -> bool {
        true
    }
}

/// Says yes to everything (`--yes`)
#[derive(Debug, Clone, Copy, Default)]
pub struct AssumeYes;

impl Confirm for AssumeYes {
    fn confirm(&mut self, _prompt: Prompt) -> bool {
        true
    }
}

/// Says no to everything; used when there is no terminal to ask on
#[derive(Debug, Clone, Copy, Default)]
pub struct NonInteractive;

impl Confirm for NonInteractive {
    fn confirm(&mut self, _prompt: Prompt) -> bool {
        false
    }

    fn can_prompt(&self) -> bool {
        false
    }
}

/// Asks on stderr and reads `y`/`yes` from stdin; anything else is no
#[derive(Debug, Clone, Copy, Default)]
pub struct StdinConfirm;

impl Confirm for StdinConfirm {
    fn confirm(&mut self, prompt: Prompt) -> bool {
        let mut stderr = io::stderr();
        if write!(stderr, "{} [y/N] ", prompt.message()).is_err() || stderr.flush().is_err() {
            return false;
        }

        let mut answer = String::new();
        match io::stdin().lock().read_line(&mut answer) {
            Ok(_) => is_yes(&answer),
            Err(_) => false,
        }
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

/// Pre-recorded answers, consumed in order; runs out to "no"
#[derive(Debug, Clone, Default)]
pub struct ScriptedConfirm {
    answers: VecDeque<bool>,
    pub asked: Vec<Prompt>,
}

impl ScriptedConfirm {
    pub fn new(answers: &[bool]) -> Self {
        ScriptedConfirm {
            answers: answers.iter().copied().collect(),
            asked: Vec::new(),
        }
    }
}

impl Confirm for ScriptedConfirm {
    fn confirm(&mut self, prompt: Prompt) -> bool {
        self.asked.push(prompt);
        self.answers.pop_front().unwrap_or(false)
    }
}

/// Settle the import mode.
///
/// An explicit merge needs no confirmation; an explicit replace needs one.
/// Without a requested mode the caller is asked "merge?" and, on no,
/// "really replace?". `None` means the import was declined.
pub fn resolve_import_mode(
    requested: Option<ImportMode>,
    confirm: &mut dyn Confirm,
) -> Option<ImportMode> {
    match requested {
        Some(mode) if !needs_confirmation(mode) => Some(mode),
        Some(mode) => confirm.confirm(Prompt::ImportReplace).then_some(mode),
        None => {
            if confirm.confirm(Prompt::ImportMerge) {
                Some(ImportMode::Merge)
            } else if confirm.confirm(Prompt::ImportReplace) {
                Some(ImportMode::Replace)
            } else {
                None
            }
        }
    }
}

/// Whether importing in `mode` needs a confirmation step
pub fn needs_confirmation(mode: ImportMode) -> bool {
    mode == ImportMode::Replace
}

/// Ask before wiping the ledger
pub fn confirm_clear(confirm: &mut dyn Confirm) -> bool {
    confirm.confirm(Prompt::ClearAll)
}
