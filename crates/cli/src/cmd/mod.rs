pub mod check;
pub mod doctor;
pub mod merge;
pub mod output;

use std::path::{Path, PathBuf};

use vaultmerge_core::assemble::AssemblyOptions;
use vaultmerge_core::config::{ConfigLoader, ResolvedConfig};
use vaultmerge_core::vault::locate_vault;
use vaultmerge_core::{MergeOptions, MergeReport, merge_vault};

use crate::VaultArgs;

/// Load configuration and start logging. Exits on failure.
pub fn load_config(
    config: Option<&Path>,
    profile: Option<&str>,
    verbose: bool,
) -> ResolvedConfig {
    let rc = match ConfigLoader::load(config, profile) {
        Ok(rc) => rc,
        Err(e) => {
            eprintln!("Error loading config: {e}");
            std::process::exit(1);
        }
    };
    crate::logging::init(&rc, verbose);
    rc
}

/// Find the vault root for `--vault`. Exits if it doesn't exist.
pub fn locate(rc: &ResolvedConfig, args: &VaultArgs) -> PathBuf {
    match locate_vault(&args.vault, Some(&rc.vaults_dir)) {
        Ok(root) => root,
        Err(e) => exit_with(&format!("Error: {e}")),
    }
}

/// Combine config values with command-line overrides.
pub fn merge_options(rc: &ResolvedConfig, args: &VaultArgs) -> MergeOptions {
    let mut excluded_folders = rc.excluded_folders.clone();
    excluded_folders.extend(args.exclude.iter().cloned());

    MergeOptions {
        excluded_folders,
        output: None,
        order: args.order.unwrap_or(rc.merge.order),
        assembly: AssemblyOptions {
            additional_instructions: None,
            table_of_contents: rc.merge.table_of_contents,
            include_metadata: rc.merge.include_metadata,
        },
    }
}

/// Run the pipeline. Exits with a message naming the vault on failure.
pub fn run_pipeline(root: &Path, options: &MergeOptions) -> MergeReport {
    match merge_vault(root, options) {
        Ok(report) => report,
        Err(e) => exit_with(&format!("Error merging vault {}: {e}", root.display())),
    }
}

pub fn exit_with(message: &str) -> ! {
    eprintln!("{message}");
    crate::logging::flush();
    std::process::exit(1);
}
