use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::{TempDir, tempdir};

fn write_file(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

/// A vault named `MyVault` inside a fresh temp dir, plus an empty config home.
fn sample_vault() -> (TempDir, std::path::PathBuf) {
    let tmp = tempdir().unwrap();
    let vault = tmp.path().join("MyVault");
    write_file(&vault.join("Index.md"), "Start at [[Projects/Alpha]].\n");
    write_file(&vault.join("Projects/Alpha.md"), "Alpha ![[diagram.png]]\n");
    write_file(&vault.join("Projects/Beta.md"), "Beta\n");
    write_file(&vault.join("Projects/diagram.png"), "not really a png");
    fs::create_dir_all(tmp.path().join("xdg")).unwrap();
    (tmp, vault)
}

fn vaultmerge(tmp: &TempDir) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("vaultmerge"));
    cmd.env("XDG_CONFIG_HOME", tmp.path().join("xdg"));
    cmd.env_remove("RUST_LOG");
    cmd
}

#[test]
fn merge_writes_the_output_file() {
    let (tmp, vault) = sample_vault();
    let out = tmp.path().join("merged.md");

    vaultmerge(&tmp)
        .args(["merge", "--vault", vault.to_str().unwrap(), "--output", out.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Merged 3 notes into"));

    let text = fs::read_to_string(&out).unwrap();
    assert!(text.starts_with("# AI NAVIGATION & BEHAVIOR RULES"));
    assert!(text.contains("Start at [Projects/Alpha](#note-projects-alpha)."));
    assert!(text.contains("Alpha [Attachment: Projects/diagram.png]"));
    let index = text.find("BEGIN SOURCE: Index.md").unwrap();
    let alpha = text.find("BEGIN SOURCE: Projects/Alpha.md").unwrap();
    let beta = text.find("BEGIN SOURCE: Projects/Beta.md").unwrap();
    assert!(index < alpha && alpha < beta);
}

#[test]
fn merge_defaults_to_vault_name_in_working_dir() {
    let (tmp, vault) = sample_vault();
    let cwd = tmp.path().join("out");
    fs::create_dir_all(&cwd).unwrap();

    vaultmerge(&tmp)
        .current_dir(&cwd)
        .args(["merge", "--vault", vault.to_str().unwrap()])
        .assert()
        .success();

    assert!(cwd.join("MyVault.md").exists());
}

#[test]
fn rerun_inside_vault_does_not_merge_its_own_output() {
    let (tmp, vault) = sample_vault();

    let run = || {
        vaultmerge(&tmp)
            .current_dir(&vault)
            .args(["merge", "--vault", "."])
            .assert()
            .success()
            .stdout(predicate::str::contains("Merged 3 notes into"));
        fs::read_to_string(vault.join("MyVault.md")).unwrap()
    };

    let first = run();
    let second = run();

    assert_eq!(first, second);
    assert!(!second.contains("BEGIN SOURCE: MyVault.md"));
}

#[test]
fn output_pointing_into_vault_is_skipped() {
    let (tmp, vault) = sample_vault();
    let out = vault.join("Projects/merged.md");
    fs::write(&out, "[[Index]] from an earlier run").unwrap();

    vaultmerge(&tmp)
        .args(["merge", "--vault", vault.to_str().unwrap(), "-o", out.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Merged 3 notes into"));

    assert!(!fs::read_to_string(&out).unwrap().contains("earlier run"));
}

#[test]
fn merge_overwrites_existing_output() {
    let (tmp, vault) = sample_vault();
    let out = tmp.path().join("merged.md");
    fs::write(&out, "stale contents").unwrap();

    vaultmerge(&tmp)
        .args(["merge", "--vault", vault.to_str().unwrap(), "-o", out.to_str().unwrap()])
        .assert()
        .success()
        .stderr(predicate::str::contains("overwriting existing file"));

    let text = fs::read_to_string(&out).unwrap();
    assert!(!text.contains("stale contents"));
    assert!(text.contains("END SOURCE: Projects/Beta.md"));
}

#[test]
fn merge_finds_named_vault_in_vaults_dir() {
    let (tmp, _vault) = sample_vault();
    let cfg = tmp.path().join("config.toml");
    write_file(
        &cfg,
        &format!(
            "version = 1\n[profiles.default]\nvaults_dir = \"{}\"\n",
            tmp.path().display()
        ),
    );
    let out = tmp.path().join("named.md");

    vaultmerge(&tmp)
        .args(["--config", cfg.to_str().unwrap()])
        .args(["merge", "--vault", "MyVault", "-o", out.to_str().unwrap()])
        .assert()
        .success();

    assert!(fs::read_to_string(&out).unwrap().contains("BEGIN SOURCE: Index.md"));
}

#[test]
fn missing_vault_fails_and_names_it() {
    let tmp = tempdir().unwrap();
    let out = tmp.path().join("merged.md");

    vaultmerge(&tmp)
        .args(["merge", "--vault", "/no/such/vault/anywhere", "-o", out.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("/no/such/vault/anywhere"));

    assert!(!out.exists());
}

#[test]
fn empty_vault_fails_without_writing() {
    let tmp = tempdir().unwrap();
    let vault = tmp.path().join("Empty");
    write_file(&vault.join("photo.jpg"), "jpg");
    let out = tmp.path().join("merged.md");

    vaultmerge(&tmp)
        .args(["merge", "--vault", vault.to_str().unwrap(), "-o", out.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("contains no markdown notes"));

    assert!(!out.exists());
}

#[test]
fn instructions_toc_and_order_flags() {
    let (tmp, vault) = sample_vault();
    let extra = tmp.path().join("extra.md");
    fs::write(&extra, "Answer in French.\n").unwrap();
    let out = tmp.path().join("merged.md");

    vaultmerge(&tmp)
        .args(["merge", "--vault", vault.to_str().unwrap(), "-o", out.to_str().unwrap()])
        .args(["--instructions", &format!("@{}", extra.display())])
        .args(["--no-toc", "--order", "folders-first"])
        .assert()
        .success();

    let text = fs::read_to_string(&out).unwrap();
    assert!(text.contains("## Additional instructions\n\nAnswer in French.\n"));
    assert!(!text.contains("BEGIN TABLE OF CONTENTS"));
    let index = text.find("BEGIN SOURCE: Index.md").unwrap();
    let alpha = text.find("BEGIN SOURCE: Projects/Alpha.md").unwrap();
    assert!(alpha < index);
}

#[test]
fn unknown_order_is_a_usage_error() {
    let (tmp, vault) = sample_vault();
    let out = tmp.path().join("merged.md");

    vaultmerge(&tmp)
        .args(["merge", "--vault", vault.to_str().unwrap(), "-o", out.to_str().unwrap()])
        .args(["--order", "shuffle"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown order 'shuffle'"));

    assert!(!out.exists());
}

#[test]
fn strict_fails_on_warnings_after_writing() {
    let (tmp, vault) = sample_vault();
    write_file(&vault.join("Dangling.md"), "[[Nowhere]]");
    let out = tmp.path().join("merged.md");

    vaultmerge(&tmp)
        .args(["merge", "--vault", vault.to_str().unwrap(), "-o", out.to_str().unwrap()])
        .arg("--strict")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--strict: 1 warnings"));

    assert!(fs::read_to_string(&out).unwrap().contains("[[Nowhere]]"));
}

#[test]
fn warnings_do_not_change_exit_code() {
    let (tmp, vault) = sample_vault();
    write_file(&vault.join("Dangling.md"), "[[Nowhere]]");
    let out = tmp.path().join("merged.md");

    vaultmerge(&tmp)
        .args(["merge", "--vault", vault.to_str().unwrap(), "-o", out.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 warnings"));
}
