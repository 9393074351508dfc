use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

fn morfeo(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_morfeo"))
        .arg("-C")
        .arg(dir)
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn init_create_and_ledger() {
    let dir = TempDir::new().unwrap();

    assert!(morfeo(dir.path(), &["init"]).status.success());
    assert!(dir.path().join("morfeo.toml").exists());
    assert!(dir.path().join("morfeo-document.json").exists());

    let created = morfeo(dir.path(), &["dispatch", "create-morfeo-theme"]);
    assert!(created.status.success());
    assert!(stdout(&created).contains("Theme page created!"));

    let ledger = morfeo(dir.path(), &["ledger"]);
    assert!(ledger.status.success());
    let listing = stdout(&ledger);
    assert!(listing.contains("Radii:\n  S: "));
    assert!(listing.contains("Border widths:"));
    assert!(listing.contains("  none: "));
}

#[test]
fn sync_without_theme_page_fails() {
    let dir = TempDir::new().unwrap();
    morfeo(dir.path(), &["init"]);

    let synced = morfeo(dir.path(), &["dispatch", "sync-theme"]);

    assert!(!synced.status.success());
    assert!(String::from_utf8_lossy(&synced.stderr).contains("Cannot find a 'Morfeo theme' page"));
}

#[test]
fn commands_need_a_config() {
    let dir = TempDir::new().unwrap();

    let output = morfeo(dir.path(), &["ledger"]);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("morfeo init"));
}
