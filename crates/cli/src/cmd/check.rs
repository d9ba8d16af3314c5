//! Check command implementation.

use std::path::Path;

use super::output::{CheckOutput, print_check_json, print_warnings_table};
use super::{load_config, locate, merge_options, run_pipeline};
use crate::{CheckArgs, OutputFormat};

pub fn run(config: Option<&Path>, profile: Option<&str>, verbose: bool, args: CheckArgs) {
    let rc = load_config(config, profile, verbose);
    let root = locate(&rc, &args.vault);
    let options = merge_options(&rc, &args.vault);

    let report = run_pipeline(&root, &options);

    match resolve_format(args.output, args.json) {
        OutputFormat::Table => print_warnings_table(&report.warnings, &report.stats),
        OutputFormat::Json => print_check_json(&CheckOutput {
            vault: root.display().to_string(),
            stats: &report.stats,
            warnings: &report.warnings,
        }),
    }
}

fn resolve_format(output: OutputFormat, json: bool) -> OutputFormat {
    if json { OutputFormat::Json } else { output }
}
