//! Static citation patterns and the LIHTC domain-term lexicon.
//!
//! Patterns are data: each family is a table consumed by a generic
//! matcher in the tagger, so adding a jurisdiction's citation style is a
//! one-line change.

use regex::Regex;
use std::sync::LazyLock;

use crate::types::EntityCategory;

/// Federal statute and regulation citation patterns.
#[allow(clippy::expect_used)] // Static regexes that are guaranteed to be valid
pub(super) static FEDERAL_CITATIONS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        // IRC §42, IRC § 42(h)(1)
        r"IRC\s*§+\s*\d+[A-Za-z]?(?:\([a-zA-Z0-9]+\))*",
        // Section 42, Section 142(d), Section 42 of the Code
        r"Section\s+\d+[A-Za-z]?(?:\([a-zA-Z0-9]+\))*(?:\s+of\s+the\s+(?:Internal\s+Revenue\s+)?Code)?",
        // 26 USC 42, 26 U.S.C. §42
        r"26\s+U\.?S\.?C\.?\s*§?\s*\d+",
        // 26 CFR 1.42-5
        r"26\s+C\.?F\.?R\.?\s*§?\s*\d+(?:\.\d+)*(?:-\d+)?",
        // Revenue Procedure 2014-49
        r"Revenue\s+Procedure\s+\d{2,4}-\d+",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("valid regex"))
    .collect()
});

/// Internal cross-reference patterns; group 1 captures the target.
#[allow(clippy::expect_used)] // Static regexes that are guaranteed to be valid
pub(super) static QAP_CROSSREFS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"Section\s+(\d+(?:\.\d+)*)",
        r"subsection\s+\(([a-zA-Z0-9]+)\)",
        r"paragraph\s+\((\d+)\)",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("valid regex"))
    .collect()
});

/// State statute and code citation patterns.
#[allow(clippy::expect_used)] // Static regexes that are guaranteed to be valid
pub(super) static STATE_CITATIONS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?:Health\s+and\s+Safety|Government|Revenue\s+and\s+Taxation|Public\s+Resources|Insurance)\s+Code\s+[Ss]ection\s+\d+(?:\.\d+)*",
        r"[A-Z][a-z]+\s+Administrative\s+Code(?:\s+(?:Title\s+)?\d+(?:\.\d+)*)?",
        r"(?:Revised|General)\s+Statutes\s+§?\s*\d+[\dA-Za-z.-]*",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("valid regex"))
    .collect()
});

/// Domain-term lexicon: lowercase term, category.
///
/// Matched case-insensitively as substrings; one hit per term per chunk.
pub static LIHTC_LEXICON: &[(&str, EntityCategory)] = &[
    ("qualified basis", EntityCategory::Calculation),
    ("eligible basis", EntityCategory::Calculation),
    ("applicable percentage", EntityCategory::Calculation),
    ("basis boost", EntityCategory::Calculation),
    ("utility allowance", EntityCategory::Calculation),
    ("developer fee", EntityCategory::Calculation),
    ("credit ceiling", EntityCategory::Calculation),
    ("9% credit", EntityCategory::CreditType),
    ("4% credit", EntityCategory::CreditType),
    ("tax-exempt bond", EntityCategory::CreditType),
    ("volume cap", EntityCategory::CreditType),
    ("set-aside", EntityCategory::AllocationType),
    ("carryover allocation", EntityCategory::AllocationType),
    ("competitive round", EntityCategory::AllocationType),
    ("reservation", EntityCategory::AllocationType),
    ("tiebreaker", EntityCategory::AllocationType),
    ("scoring criteria", EntityCategory::AllocationType),
    ("qualified census tract", EntityCategory::LocationCriteria),
    ("qct", EntityCategory::LocationCriteria),
    ("difficult development area", EntityCategory::LocationCriteria),
    ("dda", EntityCategory::LocationCriteria),
    ("opportunity area", EntityCategory::LocationCriteria),
    ("area median income", EntityCategory::IncomeRequirements),
    ("ami", EntityCategory::IncomeRequirements),
    ("income limit", EntityCategory::IncomeRequirements),
    ("rent restriction", EntityCategory::IncomeRequirements),
    ("gross rent", EntityCategory::IncomeRequirements),
    ("compliance period", EntityCategory::General),
    ("extended use agreement", EntityCategory::General),
    ("placed in service", EntityCategory::General),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lexicon_terms_are_lowercase() {
        for (term, _) in LIHTC_LEXICON {
            assert_eq!(*term, term.to_lowercase(), "lexicon terms must be lowercase");
        }
    }

    #[test]
    fn test_lexicon_has_no_duplicates() {
        let mut terms: Vec<&str> = LIHTC_LEXICON.iter().map(|(t, _)| *t).collect();
        terms.sort_unstable();
        let before = terms.len();
        terms.dedup();
        assert_eq!(terms.len(), before);
    }

    #[test]
    fn test_pattern_tables_compile() {
        assert_eq!(FEDERAL_CITATIONS.len(), 5);
        assert_eq!(QAP_CROSSREFS.len(), 3);
        assert_eq!(STATE_CITATIONS.len(), 3);
    }
}
