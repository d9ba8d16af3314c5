//! Shared output formatting for reporting commands.

use serde::Serialize;
use tabled::{Table, Tabled, settings::Style};
use vaultmerge_core::{MergeStats, MergeWarning};

/// One warning as a table row.
#[derive(Debug, Tabled)]
pub struct WarningRow {
    #[tabled(rename = "Kind")]
    pub kind: &'static str,
    #[tabled(rename = "Location")]
    pub location: String,
    #[tabled(rename = "Detail")]
    pub detail: String,
}

impl From<&MergeWarning> for WarningRow {
    fn from(w: &MergeWarning) -> Self {
        match w {
            MergeWarning::UnresolvedReference { source, line, reference } => Self {
                kind: "unresolved",
                location: format!("{source}:{line}"),
                detail: reference.clone(),
            },
            MergeWarning::AmbiguousReference { source, line, reference, chosen, candidates } => {
                Self {
                    kind: "ambiguous",
                    location: format!("{source}:{line}"),
                    detail: format!("{reference} -> {chosen} (of {})", candidates.join(", ")),
                }
            }
            MergeWarning::SkippedNote { path, reason } => {
                Self { kind: "skipped note", location: path.clone(), detail: reason.clone() }
            }
            MergeWarning::SkippedEntry { path, reason } => {
                Self { kind: "unreadable", location: path.clone(), detail: reason.clone() }
            }
            MergeWarning::InvalidFrontmatter { note, reason } => Self {
                kind: "frontmatter",
                location: note.to_string(),
                detail: reason.clone(),
            },
        }
    }
}

/// JSON shape of `check --json`.
#[derive(Debug, Serialize)]
pub struct CheckOutput<'a> {
    pub vault: String,
    pub stats: &'a MergeStats,
    pub warnings: &'a [MergeWarning],
}

/// Print warnings as a table followed by a one-line summary.
pub fn print_warnings_table(warnings: &[MergeWarning], stats: &MergeStats) {
    if warnings.is_empty() {
        println!("(no problems found)");
    } else {
        let rows: Vec<WarningRow> = warnings.iter().map(WarningRow::from).collect();
        println!("{}", Table::new(&rows).with(Style::rounded()));
    }

    println!(
        "\n{} notes, {} attachments, {} references ({} unresolved, {} ambiguous)",
        stats.notes, stats.attachments, stats.references, stats.unresolved, stats.ambiguous
    );
}

/// Print the full check result as pretty JSON.
pub fn print_check_json(output: &CheckOutput<'_>) {
    match serde_json::to_string_pretty(output) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            eprintln!("Error serializing to JSON: {e}");
            std::process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vaultmerge_core::graph::NoteId;

    #[test]
    fn ambiguous_row_lists_candidates() {
        let w = MergeWarning::AmbiguousReference {
            source: NoteId::new("Index"),
            line: 4,
            reference: "[[X]]".into(),
            chosen: "A/X.md".into(),
            candidates: vec!["A/X.md".into(), "B/X.md".into()],
        };
        let row = WarningRow::from(&w);

        assert_eq!(row.kind, "ambiguous");
        assert_eq!(row.location, "Index:4");
        assert_eq!(row.detail, "[[X]] -> A/X.md (of A/X.md, B/X.md)");
    }

    #[test]
    fn check_output_is_tagged_by_kind() {
        let warnings = vec![MergeWarning::UnresolvedReference {
            source: NoteId::new("Index"),
            line: 1,
            reference: "[[Gone]]".into(),
        }];
        let stats = MergeStats { notes: 1, references: 1, unresolved: 1, ..Default::default() };
        let out = CheckOutput { vault: "/v".into(), stats: &stats, warnings: &warnings };

        let json: serde_json::Value = serde_json::to_value(&out).unwrap();
        assert_eq!(json["warnings"][0]["kind"], "unresolved_reference");
        assert_eq!(json["warnings"][0]["source"], "Index");
        assert_eq!(json["stats"]["unresolved"], 1);
    }
}
