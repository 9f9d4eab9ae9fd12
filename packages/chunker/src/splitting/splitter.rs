//! Line-scan section splitter.
//!
//! Converted QAP text carries only heuristic structural signals: markdown
//! headers survive conversion, but many plans use bare "Section N" lines,
//! numbered headings, or all-caps banners instead. The splitter treats any
//! of those as a section boundary and seals the accumulated content under
//! the preceding header.

use regex::Regex;
use std::sync::LazyLock;

use crate::config::{BREADCRUMB_MAX_CHARS, MAX_HEADER_LINE_CHARS};
use crate::types::Section;

/// Markdown header: `#`-run followed by title text.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static MARKDOWN_HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(#+)\s+(.+)$").expect("valid regex"));

/// Regulatory section header: "Section 10325" / "Section 5.2 Scoring".
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static SECTION_HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^§?\s*Section\s+\d+[A-Za-z]?(?:\.\d+)*\b.*$").expect("valid regex"));

/// Numbered heading: "3. Eligibility Requirements".
///
/// Disallows a further period so numbered definition lines
/// ("3. Term - Definition.") stay in the body.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static NUMBERED_HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+(?:\.\d+)*\.\s+[A-Z][^.]*$").expect("valid regex"));

/// All-caps banner: at least 10 characters of uppercase letters and spaces.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static UPPERCASE_HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z][A-Z\s]{9,}$").expect("valid regex"));

/// Lettered subsection title: "(a) ..." or "a. ...".
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static LETTERED_TITLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\(?[a-z][.)]\s").expect("valid regex"));

/// Leading "Section N[.N...]" label for breadcrumbs.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static BREADCRUMB_LABEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(section\s+\d+[A-Za-z]?(?:\.\d+)*)").expect("valid regex"));

/// A detected header line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    /// Title text with any markdown marker stripped.
    pub title: String,

    /// Nesting depth derived from the title syntax.
    pub hierarchy_level: u8,
}

/// Detect whether a line is a section header.
fn detect_header(line: &str) -> Option<Header> {
    let trimmed = line.trim();

    if let Some(caps) = MARKDOWN_HEADER.captures(trimmed) {
        let level = caps[1].len().min(u8::MAX as usize) as u8;
        return Some(Header {
            title: caps[2].trim().to_string(),
            hierarchy_level: level,
        });
    }

    if trimmed.chars().count() > MAX_HEADER_LINE_CHARS {
        return None;
    }

    if SECTION_HEADER.is_match(trimmed)
        || NUMBERED_HEADER.is_match(trimmed)
        || UPPERCASE_HEADER.is_match(trimmed)
    {
        return Some(Header {
            title: trimmed.to_string(),
            hierarchy_level: derive_hierarchy_level(trimmed),
        });
    }

    None
}

/// Derive a nesting depth from non-markdown title syntax.
///
/// Numbered sections sit at level 1, lettered subsections at level 2,
/// everything else defaults to level 1.
fn derive_hierarchy_level(title: &str) -> u8 {
    if LETTERED_TITLE.is_match(title) {
        2
    } else {
        1
    }
}

/// Extract a short addressable label from a section title.
///
/// Prefers a leading "Section N[.N...]" label; falls back to the title
/// truncated to 50 characters.
fn derive_breadcrumb(title: &str) -> String {
    if let Some(caps) = BREADCRUMB_LABEL.captures(title) {
        return caps[1].to_string();
    }
    title.chars().take(BREADCRUMB_MAX_CHARS).collect()
}

/// Split raw document text into an ordered list of titled sections.
///
/// Content preceding the first header is titled "Introduction". Sections
/// whose content is empty after trimming are dropped. A document with no
/// header-like lines at all yields a single "Complete Document" section,
/// so the output is never empty for non-empty input.
#[must_use]
pub fn split_sections(raw_text: &str) -> Vec<Section> {
    if raw_text.trim().is_empty() {
        return Vec::new();
    }

    let mut sections: Vec<Section> = Vec::new();
    let mut current = Header {
        title: "Introduction".to_string(),
        hierarchy_level: 1,
    };
    let mut accumulator: Vec<&str> = Vec::new();
    let mut headers_seen = 0usize;

    for line in raw_text.lines() {
        if let Some(header) = detect_header(line) {
            headers_seen += 1;
            seal_section(&mut sections, &current, &accumulator);
            accumulator.clear();
            current = header;
        } else {
            accumulator.push(line);
        }
    }
    seal_section(&mut sections, &current, &accumulator);

    if headers_seen == 0 {
        tracing::warn!("no header-like lines found, emitting whole document as one section");
        return vec![Section {
            title: "Complete Document".to_string(),
            content: raw_text.trim().to_string(),
            position_index: 0,
            hierarchy_level: 1,
            breadcrumb: derive_breadcrumb("Complete Document"),
        }];
    }

    sections
}

/// Seal accumulated lines into a section, dropping empty content.
fn seal_section(sections: &mut Vec<Section>, header: &Header, lines: &[&str]) {
    let content = lines.join("\n").trim().to_string();
    if content.is_empty() {
        return;
    }

    let position_index = sections.len();
    sections.push(Section {
        title: header.title.clone(),
        content,
        position_index,
        hierarchy_level: header.hierarchy_level,
        breadcrumb: derive_breadcrumb(&header.title),
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_markdown_headers() {
        let text = "# Overview\nIntro text.\n## Scoring\nScoring text.";
        let sections = split_sections(text);

        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].title, "Overview");
        assert_eq!(sections[0].hierarchy_level, 1);
        assert_eq!(sections[1].title, "Scoring");
        assert_eq!(sections[1].hierarchy_level, 2);
        assert_eq!(sections[1].content, "Scoring text.");
    }

    #[test]
    fn test_section_number_headers() {
        let text = "Section 10325 Application Selection\nBody text here.";
        let sections = split_sections(text);

        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].title, "Section 10325 Application Selection");
        assert_eq!(sections[0].breadcrumb, "Section 10325");
    }

    #[test]
    fn test_numbered_headers() {
        let text = "1. Eligibility\nFirst body.\n2. Thresholds\nSecond body.";
        let sections = split_sections(text);

        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].title, "1. Eligibility");
        assert_eq!(sections[0].hierarchy_level, 1);
    }

    #[test]
    fn test_uppercase_banner_headers() {
        let text = "ELIGIBILITY REQUIREMENTS\nBody under banner.";
        let sections = split_sections(text);

        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].title, "ELIGIBILITY REQUIREMENTS");
    }

    #[test]
    fn test_short_uppercase_line_is_not_header() {
        let text = "# Top\nSCORING\nmore text";
        let sections = split_sections(text);

        // "SCORING" is only 7 characters, stays in the body
        assert_eq!(sections.len(), 1);
        assert!(sections[0].content.contains("SCORING"));
    }

    #[test]
    fn test_content_before_first_header_is_introduction() {
        let text = "Preamble line.\n# First\nBody.";
        let sections = split_sections(text);

        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].title, "Introduction");
        assert_eq!(sections[0].content, "Preamble line.");
    }

    #[test]
    fn test_empty_sections_dropped() {
        let text = "# Empty One\n\n# Full\nContent.";
        let sections = split_sections(text);

        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].title, "Full");
    }

    #[test]
    fn test_no_headers_fallback() {
        let text = "just prose\nwith no structure\nat all";
        let sections = split_sections(text);

        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].title, "Complete Document");
        assert_eq!(sections[0].content, text);
    }

    #[test]
    fn test_empty_input_yields_nothing() {
        assert!(split_sections("").is_empty());
        assert!(split_sections("   \n  \n").is_empty());
    }

    #[test]
    fn test_position_indices_are_ordinal() {
        let text = "# A\na\n# B\nb\n# C\nc";
        let sections = split_sections(text);

        let indices: Vec<usize> = sections.iter().map(|s| s.position_index).collect();
        assert_eq!(indices, vec![0, 1, 2]);
    }

    #[test]
    fn test_non_header_lines_preserved_in_order() {
        let text = "alpha\n# One\nbravo\ncharlie\n# Two\ndelta";
        let sections = split_sections(text);

        let joined: Vec<&str> = sections
            .iter()
            .flat_map(|s| s.content.lines())
            .collect();
        assert_eq!(joined, vec!["alpha", "bravo", "charlie", "delta"]);
    }

    #[test]
    fn test_breadcrumb_falls_back_to_truncated_title() {
        let long_title = "A very long narrative heading that keeps going well past fifty characters";
        let text = format!("# {long_title}\nBody.");
        let sections = split_sections(&text);

        assert_eq!(sections[0].breadcrumb.chars().count(), 50);
        assert!(long_title.starts_with(&sections[0].breadcrumb));
    }

    #[test]
    fn test_lettered_title_level() {
        assert_eq!(derive_hierarchy_level("(a) Basic threshold"), 2);
        assert_eq!(derive_hierarchy_level("b. Another item"), 2);
        assert_eq!(derive_hierarchy_level("Section 4"), 1);
    }
}
