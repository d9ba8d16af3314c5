//! Locate code in a markdown body so references inside it are left alone.

use std::ops::Range;

use comrak::nodes::NodeValue;
use comrak::{Arena, Options, parse_document};

/// Byte ranges of fenced/indented code blocks and inline code spans, in text order.
pub fn code_regions(body: &str) -> Vec<Range<usize>> {
    let arena = Arena::new();
    let options = Options::default();
    let root = parse_document(&arena, body, &options);

    let mut regions = Vec::new();
    for node in root.descendants() {
        let data = node.data.borrow();
        let pos = data.sourcepos;
        match data.value {
            // Whole lines, fences included
            NodeValue::CodeBlock(_) => {
                let start = line_start_offset(body, pos.start.line);
                let end = line_start_offset(body, pos.end.line + 1);
                regions.push(start..end);
            }
            // Backticks included; columns are 1-based and the end is inclusive
            NodeValue::Code(_) => {
                let start =
                    line_start_offset(body, pos.start.line) + pos.start.column.saturating_sub(1);
                let end = line_start_offset(body, pos.end.line) + pos.end.column;
                if start < end {
                    regions.push(start..end.min(body.len()));
                }
            }
            _ => {}
        }
    }
    regions.sort_by_key(|r| r.start);
    regions
}

/// Whether `span` overlaps any of `regions`.
pub fn overlaps(regions: &[Range<usize>], span: &Range<usize>) -> bool {
    regions.iter().any(|r| r.start < span.end && span.start < r.end)
}

/// Byte offset at the start of a 1-based line, or the body length past the last line.
fn line_start_offset(input: &str, line_num: usize) -> usize {
    if line_num <= 1 {
        return 0;
    }

    let mut current_line = 1;
    for (i, ch) in input.char_indices() {
        if ch == '\n' {
            current_line += 1;
            if current_line == line_num {
                return i + 1;
            }
        }
    }
    input.len()
}
