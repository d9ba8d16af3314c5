//! Note content extraction: title and raw references.

use std::path::Path;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use super::code::{code_regions, overlaps};
use super::types::{RawReference, ReferenceKind, ReferenceSyntax};
use crate::frontmatter::Frontmatter;

static WIKILINK_RE: LazyLock<Regex> = LazyLock::new(|| {
    // [[target]], [[target|alias]], [[target#section]], [[target#section|alias]]
    // and the embedded forms with a leading `!`.
    Regex::new(r"(!?)\[\[([^\[\]\n]+)\]\]").unwrap()
});

static MARKDOWN_LINK_RE: LazyLock<Regex> = LazyLock::new(|| {
    // [text](url), ![alt](url), [text](<url with spaces>), [text](url "title")
    Regex::new(r#"(!?)\[([^\[\]\n]*)\]\((?:<([^>\n]+)>|([^)\s]+))(?:\s+"[^"\n]*")?\)"#)
        .unwrap()
});

/// Title of a note: frontmatter `title:`, else the file stem.
pub fn extract_title(frontmatter: Option<&Frontmatter>, file_path: &Path) -> String {
    if let Some(title) = frontmatter.and_then(|fm| fm.get_str("title"))
        && !title.trim().is_empty()
    {
        return title.trim().to_string();
    }

    file_path.file_stem().and_then(|s| s.to_str()).unwrap_or("Untitled").to_string()
}

/// Extract every wiki and markdown reference of a body, in text order.
///
/// References inside code blocks and inline code spans are ignored, as are
/// markdown links to external URLs.
pub fn extract_references(body: &str) -> Vec<RawReference> {
    let code = code_regions(body);
    let mut references = Vec::new();

    for cap in WIKILINK_RE.captures_iter(body) {
        let whole = cap.get(0).unwrap();
        let span = whole.range();
        if overlaps(&code, &span) {
            continue;
        }
        references.push(wiki_reference(body, &cap, span));
    }

    let wiki_spans: Vec<_> = references.iter().map(|r| r.span.clone()).collect();

    for cap in MARKDOWN_LINK_RE.captures_iter(body) {
        let whole = cap.get(0).unwrap();
        let span = whole.range();
        if overlaps(&code, &span) || overlaps(&wiki_spans, &span) {
            continue;
        }
        if let Some(reference) = markdown_reference(body, &cap, span) {
            references.push(reference);
        }
    }

    references.sort_by_key(|r| r.span.start);
    references
}

fn wiki_reference(body: &str, cap: &Captures<'_>, span: std::ops::Range<usize>) -> RawReference {
    let kind = embed_kind(cap);
    let inner = cap.get(2).map(|m| m.as_str()).unwrap_or("");

    let (left, alias) = match inner.split_once('|') {
        // `\|` escapes the pipe inside tables
        Some((left, alias)) => (left.strip_suffix('\\').unwrap_or(left), Some(alias)),
        None => (inner, None),
    };
    let (target, heading) = split_fragment(left);

    RawReference {
        original: cap[0].to_string(),
        kind,
        syntax: ReferenceSyntax::Wiki,
        target: target.trim().to_string(),
        heading,
        label: non_empty(alias),
        line_number: line_number(body, span.start),
        span,
    }
}

fn markdown_reference(
    body: &str,
    cap: &Captures<'_>,
    span: std::ops::Range<usize>,
) -> Option<RawReference> {
    let kind = embed_kind(cap);
    let text = cap.get(2).map(|m| m.as_str());
    let url = cap.get(3).or_else(|| cap.get(4)).map(|m| m.as_str())?.trim();

    if url.is_empty() || url.starts_with('#') || is_external(url) {
        return None;
    }

    let decoded = urlencoding::decode(url).map(|s| s.into_owned()).unwrap_or_else(|_| url.to_string());
    let (target, heading) = split_fragment(&decoded);

    Some(RawReference {
        original: cap[0].to_string(),
        kind,
        syntax: ReferenceSyntax::Markdown,
        target: target.trim().to_string(),
        heading,
        label: non_empty(text),
        line_number: line_number(body, span.start),
        span,
    })
}

fn embed_kind(cap: &Captures<'_>) -> ReferenceKind {
    if cap.get(1).is_some_and(|m| !m.as_str().is_empty()) {
        ReferenceKind::Embed
    } else {
        ReferenceKind::Link
    }
}

fn split_fragment(target: &str) -> (&str, Option<String>) {
    match target.split_once('#') {
        Some((path, fragment)) => (path, non_empty(Some(fragment))),
        None => (target, None),
    }
}

fn non_empty(s: Option<&str>) -> Option<String> {
    s.map(str::trim).filter(|s| !s.is_empty()).map(str::to_string)
}

/// Anything with a URL scheme (`https:`, `mailto:`, `obsidian:`, ...) is external.
fn is_external(url: &str) -> bool {
    match url.split_once(':') {
        Some((scheme, _)) => {
            scheme.len() > 1
                && scheme.chars().all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
        }
        None => false,
    }
}

fn line_number(body: &str, offset: usize) -> u32 {
    (body[..offset].matches('\n').count() + 1) as u32
}
