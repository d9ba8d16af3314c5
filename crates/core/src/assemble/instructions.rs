//! Guidance text placed at the top of the merged document.

use super::AssemblyOptions;

const HEADING: &str = "# AI NAVIGATION & BEHAVIOR RULES";

/// Render the instructions section for the given layout options.
///
/// Rules about the table of contents and metadata only appear when the
/// document actually contains them.
pub fn render_instructions(options: &AssemblyOptions) -> String {
    let mut rules: Vec<&str> = vec![
        "This file is a single source containing an entire notes vault.",
        "Every note starts with 'BEGIN SOURCE: [path]' and ends with 'END SOURCE: [path]'.",
        "Always cite the 'BEGIN SOURCE' path of the note an answer is based on.",
        "Links between notes point at the heading of the linked note's section in this file.",
        "Attachments such as images and PDFs are not included; they appear as '[Attachment: path]' placeholders.",
    ];
    if options.include_metadata {
        rules.push(
            "A 'Metadata:' list after 'BEGIN SOURCE' holds the note's frontmatter; prioritise it for dating and tagging.",
        );
    }
    if options.table_of_contents {
        rules.push(
            "At the end of the file is a table of contents, between 'BEGIN TABLE OF CONTENTS' and 'END TABLE OF CONTENTS'.",
        );
        rules.push("Use the table of contents to find specific notes and to cite sources.");
        rules.push("If asked for a summary of the vault, start from the table of contents.");
    }
    rules.push("Notes named in the format YYYY-MM-DD are daily notes; read the name as a date.");

    let mut text = String::new();
    text.push_str(HEADING);
    text.push_str("\n\n");
    for (i, rule) in rules.iter().enumerate() {
        text.push_str(&format!("{}. {rule}\n", i + 1));
    }

    if let Some(extra) = options.additional_instructions.as_deref()
        && !extra.trim().is_empty()
    {
        text.push_str("\n## Additional instructions\n\n");
        text.push_str(extra.trim_end_matches(['\n', '\r']));
        text.push('\n');
    }

    text
}
