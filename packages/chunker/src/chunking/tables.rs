//! Table detection heuristic for table-matrix documents.

use regex::Regex;
use std::sync::LazyLock;

use crate::config::TABLE_LINE_RATIO;

/// A number flanked by whitespace or line boundaries, the shape of a
/// point-value column in converted tables.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static NUMBER_COLUMN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:^|\s)\d+(?:[.,]\d+)?(?:\s|$)").expect("valid regex"));

/// Keywords that distinguish scoring tables from incidental numbers.
const TABLE_KEYWORDS: &[&str] = &["points", "maximum", "score", "criteria", "category"];

/// Heuristic: does this content look like a converted table?
///
/// Intentionally conservative - a false negative only loses the
/// `contains_table` flag, never the chunk itself.
#[must_use]
pub fn looks_like_table(content: &str) -> bool {
    let lines: Vec<&str> = content.lines().collect();
    if lines.is_empty() {
        return false;
    }

    let table_like = lines
        .iter()
        .filter(|line| line.contains('|') || NUMBER_COLUMN.is_match(line))
        .count();

    let ratio = table_like as f64 / lines.len() as f64;
    if ratio <= TABLE_LINE_RATIO {
        return false;
    }

    let lower = content.to_lowercase();
    TABLE_KEYWORDS.iter().any(|kw| lower.contains(kw))
}

/// A table-like chunk whose content mentions points is likely a scoring
/// matrix.
#[must_use]
pub fn looks_like_scoring_matrix(content: &str) -> bool {
    looks_like_table(content) && content.to_lowercase().contains("point")
}
