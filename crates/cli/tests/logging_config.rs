use assert_cmd::prelude::*;
use std::fs;
use std::process::Command;
use tempfile::tempdir;

#[test]
fn test_logging_to_file() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    let log_file = root.join("vaultmerge.log");
    let vault = root.join("vault");
    fs::create_dir_all(&vault).unwrap();
    fs::write(vault.join("Note.md"), "[[Nowhere]]").unwrap();

    let config_path = root.join("config.toml");
    let config_content = format!(
        r#"
version = 1

[logging]
level = "error"
file_level = "debug"
file = "{}"
"#,
        log_file.display()
    );
    fs::write(&config_path, &config_content).unwrap();

    let out = root.join("out.md");
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("vaultmerge"));
    cmd.env_remove("RUST_LOG")
        .arg("--config")
        .arg(&config_path)
        .args(["merge", "--vault", vault.to_str().unwrap(), "-o", out.to_str().unwrap()])
        .assert()
        .success();

    let log = fs::read_to_string(&log_file).unwrap();
    assert!(log.contains("unresolved reference [[Nowhere]]"), "log was: {log}");
    assert!(log.contains("merged vault"));
}

#[test]
fn test_logging_level_parsing() {
    let dir = tempdir().unwrap();
    let config_path = dir.path().join("config.toml");
    fs::write(&config_path, "version = 1\n[logging]\nlevel = \"trace\"\n").unwrap();

    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("vaultmerge"));
    cmd.arg("--config").arg(&config_path).arg("doctor").assert().success();

    // If it didn't crash, the level parsing worked.
}

#[test]
fn test_verbose_flag_shows_debug_output() {
    let dir = tempdir().unwrap();
    let vault = dir.path().join("vault");
    fs::create_dir_all(&vault).unwrap();
    fs::write(vault.join("Note.md"), "hello").unwrap();
    let out = dir.path().join("out.md");

    let assert = Command::new(assert_cmd::cargo::cargo_bin!("vaultmerge"))
        .env("XDG_CONFIG_HOME", dir.path())
        .env_remove("RUST_LOG")
        .args(["-v", "merge", "--vault", vault.to_str().unwrap(), "-o", out.to_str().unwrap()])
        .assert()
        .success();

    let stderr = String::from_utf8(assert.get_output().stderr.clone()).unwrap();
    assert!(stderr.contains("ordered notes"), "stderr was: {stderr}");
}
