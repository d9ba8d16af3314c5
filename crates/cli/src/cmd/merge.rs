//! Merge command implementation.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, warn};
use vaultmerge_core::config::ResolvedConfig;
use vaultmerge_core::vault::vault_name;

use super::{exit_with, load_config, locate, merge_options, run_pipeline};
use crate::MergeArgs;

pub fn run(config: Option<&Path>, profile: Option<&str>, verbose: bool, args: MergeArgs) {
    let rc = load_config(config, profile, verbose);
    let root = locate(&rc, &args.vault);

    let mut options = merge_options(&rc, &args.vault);
    options.assembly.additional_instructions = read_instructions(&rc, args.instructions.as_deref())
        .unwrap_or_else(|e| exit_with(&format!("Error reading instructions: {e}")));
    if args.no_toc {
        options.assembly.table_of_contents = false;
    }
    if args.include_metadata {
        options.assembly.include_metadata = true;
    }

    let output = args.output.unwrap_or_else(|| default_output(&root));
    options.output = Some(output.clone());

    let report = run_pipeline(&root, &options);

    if output.exists() {
        warn!(path = %output.display(), "overwriting existing file");
    }
    if let Err(e) = fs::write(&output, report.text()) {
        exit_with(&format!("Error writing {}: {e}", output.display()));
    }
    info!(path = %output.display(), "wrote merged document");

    let stats = &report.stats;
    println!("Merged {} notes into {}", stats.notes, output.display());
    println!(
        "  {} references: {} resolved, {} ambiguous, {} unresolved",
        stats.references, stats.resolved, stats.ambiguous, stats.unresolved
    );
    println!(
        "  {} attachments ({} not referenced)",
        stats.attachments, stats.unreferenced_attachments
    );
    if !report.warnings.is_empty() {
        println!("  {} warnings (run `vaultmerge check` for details)", report.warnings.len());
    }

    if args.strict && !report.warnings.is_empty() {
        exit_with(&format!("--strict: {} warnings", report.warnings.len()));
    }
}

/// `<vault name>.md` in the working directory.
fn default_output(root: &Path) -> PathBuf {
    PathBuf::from(format!("{}.md", vault_name(root)))
}

/// `--instructions` text, `@FILE` contents, or the profile's instructions file.
fn read_instructions(
    rc: &ResolvedConfig,
    arg: Option<&str>,
) -> Result<Option<String>, std::io::Error> {
    match arg {
        Some(value) => match value.strip_prefix('@') {
            Some(file) => fs::read_to_string(file).map(Some),
            None => Ok(Some(value.to_string())),
        },
        None => rc.instructions_file.as_deref().map(fs::read_to_string).transpose(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vaultmerge_core::config::{LoggingConfig, MergeConfig};

    fn config_with_instructions(file: Option<PathBuf>) -> ResolvedConfig {
        ResolvedConfig {
            active_profile: "default".into(),
            source: None,
            vaults_dir: PathBuf::from("/vaults"),
            excluded_folders: Vec::new(),
            instructions_file: file,
            merge: MergeConfig::default(),
            logging: LoggingConfig::default(),
        }
    }

    #[test]
    fn inline_instructions_win() {
        let rc = config_with_instructions(Some(PathBuf::from("/nonexistent")));
        let text = read_instructions(&rc, Some("Be brief.")).unwrap();
        assert_eq!(text.as_deref(), Some("Be brief."));
    }

    #[test]
    fn at_prefix_reads_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("extra.md");
        fs::write(&file, "From file\n").unwrap();

        let rc = config_with_instructions(None);
        let arg = format!("@{}", file.display());
        let text = read_instructions(&rc, Some(&arg)).unwrap();
        assert_eq!(text.as_deref(), Some("From file\n"));
    }

    #[test]
    fn profile_file_is_the_fallback() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("profile.md");
        fs::write(&file, "Profile text").unwrap();

        assert_eq!(
            read_instructions(&config_with_instructions(Some(file)), None)
                .unwrap()
                .as_deref(),
            Some("Profile text")
        );
        assert_eq!(read_instructions(&config_with_instructions(None), None).unwrap(), None);
    }

    #[test]
    fn missing_instructions_file_is_an_error() {
        let rc = config_with_instructions(None);
        assert!(read_instructions(&rc, Some("@/definitely/not/here.md")).is_err());
    }
}
