//! Jurisdiction-to-strategy classification.
//!
//! The partition is a static table: jurisdictions whose QAPs are known to
//! be outline-heavy, narrative, or table-dense get a matching strategy;
//! everything else falls back to the safe default.

use crate::types::Strategy;

/// Jurisdictions with deeply nested regulatory outlines.
const COMPLEX_OUTLINE_JURISDICTIONS: &[&str] = &["CA", "TX", "NC", "OH", "FL"];

/// Jurisdictions with prose-style plans and sparse structure.
const SIMPLE_NARRATIVE_JURISDICTIONS: &[&str] = &["MA", "VT", "NH", "CT", "RI"];

/// Jurisdictions whose plans center on scoring tables and matrices.
const TABLE_MATRIX_JURISDICTIONS: &[&str] = &["AZ", "GA", "WA", "CO"];

/// Classify a jurisdiction code into a chunking strategy.
///
/// Total function: unknown codes always resolve to
/// [`Strategy::MediumComplexity`].
///
/// # Examples
/// ```
/// use qap_chunker::strategy::classify;
/// use qap_chunker::types::Strategy;
///
/// assert_eq!(classify("CA"), Strategy::ComplexOutline);
/// assert_eq!(classify("MA"), Strategy::SimpleNarrative);
/// assert_eq!(classify("WY"), Strategy::MediumComplexity);
/// ```
#[must_use]
pub fn classify(jurisdiction_code: &str) -> Strategy {
    if COMPLEX_OUTLINE_JURISDICTIONS.contains(&jurisdiction_code) {
        Strategy::ComplexOutline
    } else if SIMPLE_NARRATIVE_JURISDICTIONS.contains(&jurisdiction_code) {
        Strategy::SimpleNarrative
    } else if TABLE_MATRIX_JURISDICTIONS.contains(&jurisdiction_code) {
        Strategy::TableMatrix
    } else {
        Strategy::MediumComplexity
    }
}
