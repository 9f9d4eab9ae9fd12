//! Configuration constants and validation functions for the pipeline.

use regex::Regex;
use std::sync::LazyLock;

use crate::error::{PipelineError, Result};

/// Assumed average characters per PDF page for the estimation fallback.
///
/// Used only when the conversion collaborator supplies no native per-page
/// text. The resulting page numbers are advisory, never authoritative.
pub const AVG_CHARS_PER_PAGE: usize = 2_500;

/// Maximum length of a normalized page-mapping key, in characters.
pub const PAGE_KEY_MAX_CHARS: usize = 200;

/// How many leading characters of a native page feed its mapping key.
pub const NATIVE_PAGE_SAMPLE_CHARS: usize = 300;

/// Minimum Jaccard word-overlap similarity for a fuzzy page match.
pub const PAGE_MATCH_THRESHOLD: f64 = 0.3;

/// Maximum sections accumulated into one narrative chunk.
pub const NARRATIVE_MAX_SECTIONS: usize = 3;

/// Narrative accumulator seals once combined content exceeds this length.
pub const NARRATIVE_MAX_CHARS: usize = 3_000;

/// Outline strategy skips sections with less trimmed content than this.
pub const OUTLINE_MIN_SECTION_CHARS: usize = 50;

/// Default strategy skips sections with less trimmed content than this.
pub const MEDIUM_MIN_SECTION_CHARS: usize = 100;

/// Fraction of table-like lines above which content counts as tabular.
pub const TABLE_LINE_RATIO: f64 = 0.2;

/// Minimum uppercase-run length for the all-caps header heuristic.
pub const UPPERCASE_HEADER_MIN_CHARS: usize = 10;

/// Breadcrumb fallback truncates section titles to this many characters.
pub const BREADCRUMB_MAX_CHARS: usize = 50;

/// Non-markdown header lines longer than this are treated as body text.
/// Keeps sentence-initial "Section N ..." prose from splitting a section.
pub const MAX_HEADER_LINE_CHARS: usize = 100;

/// Cleaned definitions at or below this length are rejected.
pub const MIN_DEFINITION_CHARS: usize = 10;

/// Definition-shape matches required before a section counts as a
/// heuristic definitions region.
pub const MIN_SHAPE_MATCHES: usize = 3;

/// Context window around a definition match for page resolution:
/// characters taken before and after the match start.
pub const PAGE_CONTEXT_BEFORE: usize = 100;
pub const PAGE_CONTEXT_AFTER: usize = 200;

/// Earliest plausible QAP year (the federal credit statute dates to 1986).
pub const MIN_DOCUMENT_YEAR: i32 = 1986;

/// Jurisdiction code pattern: two uppercase ASCII letters.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static JURISDICTION_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z]{2}$").expect("valid regex"));

/// Validate a jurisdiction code.
///
/// # Examples
/// ```
/// use qap_chunker::config::validate_jurisdiction_code;
///
/// assert!(validate_jurisdiction_code("CA").is_ok());
/// assert!(validate_jurisdiction_code("Cal").is_err());
/// ```
pub fn validate_jurisdiction_code(code: &str) -> Result<()> {
    if JURISDICTION_PATTERN.is_match(code) {
        Ok(())
    } else {
        Err(PipelineError::InvalidJurisdiction(code.to_string()))
    }
}

/// Validate a document year.
///
/// Rejects years before the federal credit existed and years more than one
/// past the current year (allocation plans are published at most one year
/// ahead).
pub fn validate_document_year(year: i32) -> Result<()> {
    use chrono::Datelike;

    let max = chrono::Local::now().year() + 1;
    if year < MIN_DOCUMENT_YEAR || year > max {
        return Err(PipelineError::InvalidYear {
            year,
            min: MIN_DOCUMENT_YEAR,
            max,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_jurisdiction_code_valid() {
        assert!(validate_jurisdiction_code("CA").is_ok());
        assert!(validate_jurisdiction_code("MA").is_ok());
        assert!(validate_jurisdiction_code("TX").is_ok());
    }

    #[test]
    fn test_validate_jurisdiction_code_invalid() {
        assert!(validate_jurisdiction_code("").is_err());
        assert!(validate_jurisdiction_code("C").is_err());
        assert!(validate_jurisdiction_code("CAL").is_err());
        assert!(validate_jurisdiction_code("ca").is_err()); // Lowercase
        assert!(validate_jurisdiction_code("C1").is_err());
    }

    #[test]
    fn test_validate_document_year_valid() {
        assert!(validate_document_year(1986).is_ok());
        assert!(validate_document_year(2024).is_ok());
    }

    #[test]
    fn test_validate_document_year_invalid() {
        assert!(validate_document_year(1985).is_err());
        assert!(validate_document_year(0).is_err());
        assert!(validate_document_year(3000).is_err());
    }
}
