#![allow(dead_code)]

use assert_cmd::Command;
use std::path::Path;

pub fn finbook_cmd() -> Command {
    let mut cmd = Command::cargo_bin("finbook").unwrap();
    cmd.env_remove("FINBOOK_ROOT");
    cmd.env_remove("FINBOOK_LOG");
    cmd
}

/// Command running inside `dir`
pub fn finbook_in(dir: &Path) -> Command {
    let mut cmd = finbook_cmd();
    cmd.current_dir(dir);
    cmd
}

pub fn init_ledger(dir: &Path) {
    finbook_cmd().arg("init").arg(dir).assert().success();
}

/// Run `add` with `args` and return the new transaction id
pub fn add_tx(dir: &Path, args: &[&str]) -> String {
    let output = finbook_in(dir).arg("add").args(args).output().unwrap();
    assert!(
        output.status.success(),
        "add failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8(output.stdout).unwrap();
    stdout
        .trim()
        .strip_prefix("Added transaction ")
        .unwrap()
        .to_string()
}
