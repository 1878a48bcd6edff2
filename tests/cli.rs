use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// `envguard` command rooted in an isolated temp directory
fn envguard(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("envguard").unwrap();
    cmd.arg("--dir").arg(dir.path());
    cmd.env_remove("ENVGUARD_DIR");
    cmd.env_remove("ENVGUARD_FILE");
    cmd.env_remove("ENVGUARD_KEY_FILE");
    cmd.env_remove("ENVGUARD_LOG");
    cmd
}

fn write_env(dir: &TempDir, contents: &str) {
    fs::write(dir.path().join(".env"), contents).unwrap();
}

fn read_env(dir: &TempDir) -> String {
    fs::read_to_string(dir.path().join(".env")).unwrap()
}

// ============================================================================
// Variables
// ============================================================================

#[test]
fn help_lists_commands() {
    Command::cargo_bin("envguard")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("encrypt"))
        .stdout(predicate::str::contains("validate"))
        .stdout(predicate::str::contains("rotate"));
}

#[test]
fn set_then_get() {
    let tmp = TempDir::new().unwrap();

    envguard(&tmp)
        .args(["set", "APP_TITLE", "My App"])
        .assert()
        .success()
        .stdout(predicate::str::contains("APP_TITLE set successfully."));

    assert_eq!(read_env(&tmp), "APP_TITLE=\"My App\"");

    envguard(&tmp)
        .args(["get", "APP_TITLE"])
        .assert()
        .success()
        .stdout("My App\n");
}

#[test]
fn set_preserves_comments_and_adds_comment_line() {
    let tmp = TempDir::new().unwrap();
    write_env(&tmp, "# database\nDB_HOST=localhost\n");

    envguard(&tmp)
        .args(["set", "DB_PORT", "5432", "--comment", "port"])
        .assert()
        .success();

    assert_eq!(
        read_env(&tmp),
        "# database\nDB_HOST=localhost\n\n# port\nDB_PORT=5432"
    );
}

#[test]
fn get_missing_key_prints_default() {
    let tmp = TempDir::new().unwrap();
    write_env(&tmp, "A=1");

    envguard(&tmp)
        .args(["get", "MISSING", "--default", "fallback"])
        .assert()
        .success()
        .stdout("fallback\n");
}

#[test]
fn list_masks_sensitive_values() {
    let tmp = TempDir::new().unwrap();
    write_env(&tmp, "APP_NAME=demo\nAPI_TOKEN=abc123\n");

    envguard(&tmp)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("APP_NAME"))
        .stdout(predicate::str::contains("demo"))
        .stdout(predicate::str::contains("********"))
        .stdout(predicate::str::contains("abc123").not())
        .stdout(predicate::str::contains("2 variable(s)"));

    envguard(&tmp)
        .args(["list", "--reveal"])
        .assert()
        .success()
        .stdout(predicate::str::contains("abc123"));
}

#[test]
fn assign_sets_several_variables() {
    let tmp = TempDir::new().unwrap();
    write_env(&tmp, "A=1");

    envguard(&tmp)
        .args(["assign", "A=2", "B=two words"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2 variable(s) set: A, B"));

    assert_eq!(read_env(&tmp), "A=2\nB=\"two words\"");
}

#[test]
fn assign_rejects_malformed_pair() {
    let tmp = TempDir::new().unwrap();

    envguard(&tmp)
        .args(["assign", "NOEQUALS"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("expected KEY=VALUE"));
}

#[test]
fn unset_removes_variable() {
    let tmp = TempDir::new().unwrap();
    write_env(&tmp, "# keep\nA=1\nB=2");

    envguard(&tmp)
        .args(["unset", "A"])
        .assert()
        .success()
        .stdout(predicate::str::contains("A removed."));

    assert_eq!(read_env(&tmp), "# keep\nB=2");
}

#[test]
fn custom_env_file_option() {
    let tmp = TempDir::new().unwrap();

    envguard(&tmp)
        .args(["--file", ".env.local", "set", "LOCAL", "yes"])
        .assert()
        .success();

    assert_eq!(
        fs::read_to_string(tmp.path().join(".env.local")).unwrap(),
        "LOCAL=yes"
    );
    assert!(!tmp.path().join(".env").exists());
}

// ============================================================================
// Templates and validation
// ============================================================================

#[test]
fn example_writes_value_free_template() {
    let tmp = TempDir::new().unwrap();
    write_env(&tmp, "# app\nAPP_NAME=demo\nSECRET_KEY=s3cr3t");

    envguard(&tmp)
        .arg("example")
        .assert()
        .success()
        .stdout(predicate::str::contains(".env.example created successfully."));

    assert_eq!(
        fs::read_to_string(tmp.path().join(".env.example")).unwrap(),
        "# app\nAPP_NAME=\nSECRET_KEY="
    );
}

#[test]
fn validate_reports_missing_keys() {
    let tmp = TempDir::new().unwrap();
    write_env(&tmp, "A=1");
    fs::write(tmp.path().join(".env.example"), "A=\nB=\nC=").unwrap();

    envguard(&tmp)
        .arg("validate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Missing required env keys: B, C"));
}

#[test]
fn validate_passes_when_complete() {
    let tmp = TempDir::new().unwrap();
    write_env(&tmp, "A=1\nB=2\nEXTRA=3");
    fs::write(tmp.path().join(".env.example"), "# required\nA=\nB=").unwrap();

    envguard(&tmp)
        .arg("validate")
        .assert()
        .success()
        .stdout(predicate::str::contains("Validation passed"));
}

#[test]
fn validate_without_template_is_not_found() {
    let tmp = TempDir::new().unwrap();
    write_env(&tmp, "A=1");

    envguard(&tmp)
        .arg("validate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("File not found"));
}

// ============================================================================
// Encryption
// ============================================================================

#[test]
fn encrypt_then_decrypt_round_trip() {
    let tmp = TempDir::new().unwrap();
    let original = "# secrets\nDB_PASSWORD=hunter2\nAPP_TITLE=\"My App\"\n";
    write_env(&tmp, original);

    envguard(&tmp)
        .arg("encrypt")
        .assert()
        .success()
        .stdout(predicate::str::contains("Encrypted to"));

    let blob = fs::read_to_string(tmp.path().join(".env.enc")).unwrap();
    assert!(!blob.contains("hunter2"));
    assert!(tmp.path().join(".env.key").exists());

    envguard(&tmp)
        .args(["decrypt", "--output", "restored.env"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2 variable(s)"));

    assert_eq!(
        fs::read_to_string(tmp.path().join("restored.env")).unwrap(),
        original
    );
}

#[test]
fn encrypt_missing_source_creates_no_key() {
    let tmp = TempDir::new().unwrap();

    envguard(&tmp)
        .arg("encrypt")
        .assert()
        .failure()
        .stderr(predicate::str::contains("File not found"));

    assert!(!tmp.path().join(".env.key").exists());
}

#[test]
fn decrypt_with_wrong_key_fails() {
    let tmp = TempDir::new().unwrap();
    write_env(&tmp, "A=1");
    envguard(&tmp).arg("encrypt").assert().success();

    envguard(&tmp)
        .args(["--key-file", "other.key", "encrypt", "--output", "other.enc"])
        .assert()
        .success();

    envguard(&tmp)
        .args(["decrypt", "other.enc", "--output", "out.env"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Decryption failed"));

    assert!(!tmp.path().join("out.env").exists());
}

#[test]
fn rotate_replaces_key_and_keeps_plaintext() {
    let tmp = TempDir::new().unwrap();
    let original = "API_KEY=abc\nPORT=8080";
    write_env(&tmp, original);
    envguard(&tmp).arg("encrypt").assert().success();

    let old_key = fs::read_to_string(tmp.path().join(".env.key")).unwrap();

    envguard(&tmp)
        .arg("rotate")
        .assert()
        .success()
        .stdout(predicate::str::contains("Key rotated"));

    let new_key = fs::read_to_string(tmp.path().join(".env.key")).unwrap();
    assert_ne!(old_key.trim(), new_key.trim());
    assert!(!tmp.path().join(".env.key.old").exists());

    envguard(&tmp)
        .args(["decrypt", "--output", "rotated.env"])
        .assert()
        .success();
    assert_eq!(
        fs::read_to_string(tmp.path().join("rotated.env")).unwrap(),
        original
    );
}

// ============================================================================
// Export, backup and audit
// ============================================================================

#[test]
fn export_json_masks_by_default() {
    let tmp = TempDir::new().unwrap();
    write_env(&tmp, "APP=demo\nSECRET=x");

    envguard(&tmp)
        .arg("export")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"APP\": \"demo\""))
        .stdout(predicate::str::contains("\"SECRET\": \"********\""));

    envguard(&tmp)
        .args(["export", "--reveal", "--format", "yaml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("SECRET: x"));
}

#[test]
fn restore_undoes_last_save() {
    let tmp = TempDir::new().unwrap();
    write_env(&tmp, "A=1");

    envguard(&tmp).args(["set", "A", "2"]).assert().success();
    assert_eq!(read_env(&tmp), "A=2");

    envguard(&tmp)
        .arg("restore")
        .assert()
        .success()
        .stdout(predicate::str::contains("Restored"));
    assert_eq!(read_env(&tmp), "A=1");
}

#[test]
fn audit_records_key_names_only() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join(".envguard.json"),
        r#"{"audit": {"enabled": true}}"#,
    )
    .unwrap();

    envguard(&tmp)
        .args(["set", "DB_PASSWORD", "hunter2"])
        .assert()
        .success();

    let log = fs::read_to_string(tmp.path().join(".envguard-audit.log")).unwrap();
    assert!(log.contains("DB_PASSWORD"));
    assert!(!log.contains("hunter2"));

    envguard(&tmp)
        .arg("audit")
        .assert()
        .success()
        .stdout(predicate::str::contains("SET .env (DB_PASSWORD)"));
}

#[test]
fn init_writes_default_settings() {
    let tmp = TempDir::new().unwrap();

    envguard(&tmp).arg("init").assert().success();

    let settings = fs::read_to_string(tmp.path().join(".envguard.json")).unwrap();
    assert!(settings.contains("\"env_file\": \".env\""));
}
