//! Integration tests for the PassVault CLI.
//!
//! These tests exercise the binary end-to-end using `assert_cmd`.
//! The master password is supplied through `PASSVAULT_PASSWORD` so no
//! command needs an interactive prompt, and every vault directory carries
//! a `passvault.toml` with cheap Argon2 settings.

use assert_cmd::Command;
use assert_fs::prelude::*;
use assert_fs::TempDir;
use predicates::prelude::*;

const MASTER: &str = "correct-horse-battery";

/// Helper: get a Command pointing at the passvault binary.
fn passvault() -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("passvault").expect("binary should exist");
    cmd.env_remove("PASSVAULT_DIR").env_remove("PASSVAULT_PASSWORD");
    cmd
}

/// Helper: a temp vault dir with fast KDF settings.
fn vault_dir() -> TempDir {
    let tmp = TempDir::new().unwrap();
    tmp.child("passvault.toml")
        .write_str("argon2_memory_kib = 8192\nargon2_iterations = 1\nargon2_parallelism = 1\n")
        .unwrap();
    tmp
}

/// Helper: run a command against `dir` with the given master password.
fn run(dir: &TempDir, password: &str, args: &[&str]) -> assert_cmd::assert::Assert {
    passvault()
        .arg("--vault-dir")
        .arg(dir.path())
        .args(args)
        .env("PASSVAULT_PASSWORD", password)
        .assert()
}

fn init(dir: &TempDir) {
    run(dir, MASTER, &["init"])
        .success()
        .stdout(predicate::str::contains("Vault created"));
}

#[test]
fn help_flag_shows_usage() {
    passvault()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Local encrypted password vault"))
        .stdout(predicate::str::contains("init"))
        .stdout(predicate::str::contains("add"))
        .stdout(predicate::str::contains("edit"))
        .stdout(predicate::str::contains("list"))
        .stdout(predicate::str::contains("show"))
        .stdout(predicate::str::contains("delete"))
        .stdout(predicate::str::contains("generate"))
        .stdout(predicate::str::contains("audit"));
}

#[test]
fn version_flag_shows_version() {
    passvault()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("passvault"));
}

#[test]
fn no_args_shows_help() {
    passvault()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn list_on_missing_vault_fails() {
    let dir = vault_dir();
    run(&dir, MASTER, &["list"])
        .failure()
        .stderr(predicate::str::contains("passvault init"));
}

#[test]
fn init_creates_database_once() {
    let dir = vault_dir();
    init(&dir);
    dir.child("passwords.db").assert(predicate::path::exists());

    run(&dir, MASTER, &["init"])
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn init_rejects_short_master_password() {
    let dir = vault_dir();
    run(&dir, "short", &["init"])
        .failure()
        .stderr(predicate::str::contains("at least 8"));
    dir.child("passwords.db").assert(predicate::path::missing());
}

#[test]
fn failed_init_leaves_no_database_behind() {
    let dir = vault_dir();
    dir.child("passvault.toml")
        .write_str("argon2_memory_kib = 1024\nargon2_iterations = 1\nargon2_parallelism = 1\n")
        .unwrap();

    run(&dir, MASTER, &["init"]).failure();
    dir.child("passwords.db").assert(predicate::path::missing());

    dir.child("passvault.toml")
        .write_str("argon2_memory_kib = 8192\nargon2_iterations = 1\nargon2_parallelism = 1\n")
        .unwrap();
    init(&dir);
    run(&dir, MASTER, &["list"]).success();
}

#[test]
fn audit_rejects_out_of_range_window() {
    let dir = vault_dir();
    init(&dir);
    run(&dir, MASTER, &["audit", "--since", "999999999999d"])
        .failure()
        .code(1)
        .stderr(predicate::str::contains("too large"));
}

#[test]
fn add_then_show_roundtrip() {
    let dir = vault_dir();
    init(&dir);

    run(&dir, MASTER, &["add", "example.com", "-u", "alice", "-p", "p@ss"])
        .success()
        .stdout(predicate::str::contains("#1"));

    run(&dir, MASTER, &["show", "1"])
        .success()
        .stdout(predicate::str::diff("p@ss\n"));

    run(&dir, MASTER, &["show", "1", "--field", "username"])
        .success()
        .stdout(predicate::str::diff("alice\n"));
}

#[test]
fn list_masks_passwords_and_filters() {
    let dir = vault_dir();
    init(&dir);
    run(&dir, MASTER, &["add", "github.com", "-p", "gh-secret"]).success();
    run(&dir, MASTER, &["add", "bank.com", "-p", "bank-secret"]).success();

    run(&dir, MASTER, &["list"])
        .success()
        .stdout(predicate::str::contains("github.com"))
        .stdout(predicate::str::contains("bank.com"))
        .stdout(predicate::str::contains("gh-secret").not());

    run(&dir, MASTER, &["list", "--search", "GIT"])
        .success()
        .stdout(predicate::str::contains("github.com"))
        .stdout(predicate::str::contains("bank.com").not());
}

#[test]
fn wrong_master_password_cannot_read_passwords() {
    let dir = vault_dir();
    init(&dir);
    run(&dir, MASTER, &["add", "example.com", "-p", "p@ss"]).success();

    run(&dir, "wrong-password", &["list"])
        .success()
        .stdout(predicate::str::contains("example.com"))
        .stderr(predicate::str::contains("could not be decrypted"));

    run(&dir, "wrong-password", &["show", "1"])
        .failure()
        .stdout(predicate::str::contains("p@ss").not());
}

#[test]
fn edit_changes_only_given_fields() {
    let dir = vault_dir();
    init(&dir);
    run(&dir, MASTER, &["add", "example.com", "-u", "alice", "-p", "old"]).success();

    run(&dir, MASTER, &["edit", "1", "--password", "new"]).success();

    run(&dir, MASTER, &["show", "1"])
        .success()
        .stdout(predicate::str::diff("new\n"));
    run(&dir, MASTER, &["show", "1", "-f", "username"])
        .success()
        .stdout(predicate::str::diff("alice\n"));
}

#[test]
fn edit_with_wrong_master_password_keeps_stored_secrets() {
    let dir = vault_dir();
    init(&dir);
    run(
        &dir,
        MASTER,
        &["add", "example.com", "--password", "p@ss", "--notes", "recovery-codes"],
    )
    .success();

    run(&dir, "wrong-password", &["edit", "1", "--password", "newpass"])
        .failure()
        .stderr(predicate::str::contains("nothing was written"))
        .stdout(predicate::str::contains("Updated").not());

    run(&dir, MASTER, &["show", "1"])
        .success()
        .stdout(predicate::str::diff("p@ss\n"));
    run(&dir, MASTER, &["show", "1", "--field", "notes"])
        .success()
        .stdout(predicate::str::diff("recovery-codes\n"));
}

#[test]
fn add_with_wrong_master_password_is_refused() {
    let dir = vault_dir();
    init(&dir);
    run(&dir, MASTER, &["add", "first.com", "-p", "one"]).success();

    run(&dir, "wrong-password", &["add", "second.com", "-p", "two"])
        .failure()
        .stderr(predicate::str::contains("nothing was written"));

    run(&dir, MASTER, &["list"])
        .success()
        .stdout(predicate::str::contains("first.com"))
        .stdout(predicate::str::contains("second.com").not());
}

#[test]
fn edit_force_clears_unreadable_notes() {
    let dir = vault_dir();
    init(&dir);
    run(&dir, MASTER, &["add", "example.com", "-p", "p@ss", "-n", "old notes"]).success();

    run(&dir, "wrong-password", &["edit", "1", "--password", "fresh"])
        .failure();
    run(&dir, "wrong-password", &["edit", "1", "--password", "fresh", "--force"])
        .success()
        .stderr(predicate::str::contains("will be cleared"));

    run(&dir, "wrong-password", &["show", "1"])
        .success()
        .stdout(predicate::str::diff("fresh\n"));
    run(&dir, "wrong-password", &["show", "1", "-f", "notes"])
        .success()
        .stdout(predicate::str::diff("\n"));
}

#[test]
fn edit_without_changes_fails() {
    let dir = vault_dir();
    init(&dir);
    run(&dir, MASTER, &["edit", "1"])
        .failure()
        .stderr(predicate::str::contains("nothing to change"));
}

#[test]
fn delete_with_force_removes_record() {
    let dir = vault_dir();
    init(&dir);
    run(&dir, MASTER, &["add", "gone.com", "-p", "x"]).success();

    run(&dir, MASTER, &["delete", "1", "--force"])
        .success()
        .stdout(predicate::str::contains("Deleted #1"));

    run(&dir, MASTER, &["show", "1"])
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn generate_prints_password_of_requested_length() {
    let dir = vault_dir();
    let output = passvault()
        .arg("--vault-dir")
        .arg(dir.path())
        .args(["generate", "--length", "24"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let text = String::from_utf8(output.stdout).unwrap();
    assert_eq!(text.trim_end().chars().count(), 24);
}

#[test]
fn add_with_generate_stores_generated_password() {
    let dir = vault_dir();
    init(&dir);
    run(&dir, MASTER, &["add", "site.io", "--generate"]).success();

    let output = passvault()
        .arg("--vault-dir")
        .arg(dir.path())
        .args(["show", "1"])
        .env("PASSVAULT_PASSWORD", MASTER)
        .output()
        .unwrap();
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8(output.stdout).unwrap().trim_end().len(),
        16
    );
}

#[test]
fn audit_records_operations() {
    let dir = vault_dir();
    init(&dir);
    run(&dir, MASTER, &["add", "example.com", "-p", "x"]).success();

    run(&dir, MASTER, &["audit", "--last", "10"])
        .success()
        .stdout(predicate::str::contains("init"))
        .stdout(predicate::str::contains("add"))
        .stdout(predicate::str::contains("example.com"));
}
