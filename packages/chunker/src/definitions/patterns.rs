//! Declarative extraction pattern table.
//!
//! Each QAP style gets one table entry: a name, a base confidence, and a
//! matcher kind. All patterns run against every candidate region; the
//! overlap they produce is resolved by deduplication, not prevented here.

use regex::Regex;
use std::sync::LazyLock;

/// How a pattern locates term/definition pairs.
#[derive(Debug)]
pub enum PatternKind {
    /// Items delimited by a start marker; the body regex parses the slice
    /// between one marker and the next (the regex crate has no lookahead,
    /// so "up to the next item" is a boundary scan).
    ItemBounded { item_start: Regex, body: Regex },

    /// Single regex with the term in group 1 and the definition in group 2.
    Inline { regex: Regex },
}

/// One extraction pattern: name, base confidence, matcher.
#[derive(Debug)]
pub struct DefinitionPattern {
    pub name: &'static str,
    pub confidence: f64,
    pub kind: PatternKind,
}

/// The extraction pattern table, tried in order on every region.
#[allow(clippy::expect_used)] // Static regexes that are guaranteed to be valid
pub static DEFINITION_PATTERNS: LazyLock<Vec<DefinitionPattern>> = LazyLock::new(|| {
    vec![
        // CTCAC-style lettered outline: "- (a) Term. Definition text..."
        DefinitionPattern {
            name: "ctcac_style",
            confidence: 0.9,
            kind: PatternKind::ItemBounded {
                item_start: Regex::new(r"(?m)^\s*-\s*\([a-z]\)\s*").expect("valid regex"),
                body: Regex::new(r"(?s)^([A-Z][^.\n]{1,79})\.\s*(.+)$").expect("valid regex"),
            },
        },
        // Statutory phrasing: "Term" means definition text.
        DefinitionPattern {
            name: "means_style",
            confidence: 0.85,
            kind: PatternKind::Inline {
                regex: Regex::new(r#""([^"\n]{2,80})"\s+means\s+([^\n]+)"#).expect("valid regex"),
            },
        },
        // Glossary colon: "Term: Definition sentence."
        DefinitionPattern {
            name: "colon_style",
            confidence: 0.75,
            kind: PatternKind::Inline {
                regex: Regex::new(r"(?m)^([A-Z][A-Za-z0-9 /-]{2,60}):\s+(\S[^\n]*)")
                    .expect("valid regex"),
            },
        },
        // Numbered list: "12. Term - Definition sentence."
        DefinitionPattern {
            name: "numbered_style",
            confidence: 0.8,
            kind: PatternKind::Inline {
                regex: Regex::new(r"(?m)^\s*\d+\.\s+([A-Z][^\n]{1,60}?)\s+[-–—]\s+([^\n]+)")
                    .expect("valid regex"),
            },
        },
    ]
});

/// A raw pattern hit: term, definition, byte offset of the match in the
/// region text.
#[derive(Debug, Clone)]
pub struct RawMatch {
    pub term: String,
    pub definition: String,
    pub offset: usize,
}

impl DefinitionPattern {
    /// Apply this pattern to a region's text.
    #[must_use]
    pub fn apply(&self, text: &str) -> Vec<RawMatch> {
        match &self.kind {
            PatternKind::Inline { regex } => regex
                .captures_iter(text)
                .filter_map(|caps| {
                    let whole = caps.get(0)?;
                    Some(RawMatch {
                        term: caps.get(1)?.as_str().to_string(),
                        definition: caps.get(2)?.as_str().to_string(),
                        offset: whole.start(),
                    })
                })
                .collect(),
            PatternKind::ItemBounded { item_start, body } => {
                let markers: Vec<_> = item_start.find_iter(text).collect();
                let mut matches = Vec::new();

                for (i, marker) in markers.iter().enumerate() {
                    let slice_end = markers
                        .get(i + 1)
                        .map_or(text.len(), |next| next.start());
                    let item = &text[marker.end()..slice_end];

                    if let Some(caps) = body.captures(item.trim()) {
                        if let (Some(term), Some(definition)) = (caps.get(1), caps.get(2)) {
                            matches.push(RawMatch {
                                term: term.as_str().to_string(),
                                definition: definition.as_str().to_string(),
                                offset: marker.start(),
                            });
                        }
                    }
                }

                matches
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn pattern(name: &str) -> &'static DefinitionPattern {
        DEFINITION_PATTERNS
            .iter()
            .find(|p| p.name == name)
            .unwrap_or_else(|| panic!("pattern {name} missing"))
    }

    #[test]
    fn test_ctcac_style_lettered_items() {
        let text = "- (a) Qualified Basis. Means the basis described in IRC §42.\n\
                    - (b) Credit Period. Means the 10-year period beginning with the first taxable year.";
        let matches = pattern("ctcac_style").apply(text);

        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].term, "Qualified Basis");
        assert!(matches[0].definition.starts_with("Means the basis"));
        assert_eq!(matches[1].term, "Credit Period");
    }

    #[test]
    fn test_ctcac_definition_spans_lines_within_item() {
        let text = "- (a) Eligible Basis. The adjusted basis of the building,\n\
                    determined without regard to depreciation.\n\
                    - (b) Other Term. Something else entirely here.";
        let matches = pattern("ctcac_style").apply(text);

        assert_eq!(matches.len(), 2);
        assert!(matches[0].definition.contains("determined without regard"));
        // The next item never bleeds into the previous definition
        assert!(!matches[0].definition.contains("Other Term"));
    }

    #[test]
    fn test_means_style() {
        let text = r#"For purposes of this plan, "Area Median Income" means the median income published annually by HUD."#;
        let matches = pattern("means_style").apply(text);

        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].term, "Area Median Income");
        assert!(matches[0].definition.starts_with("the median income"));
    }

    #[test]
    fn test_colon_style() {
        let text = "Compliance Period: The fifteen-year period during which the project must remain affordable.";
        let matches = pattern("colon_style").apply(text);

        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].term, "Compliance Period");
    }

    #[test]
    fn test_numbered_style() {
        let text = "3. Difficult Development Area - An area designated by HUD with high construction costs.";
        let matches = pattern("numbered_style").apply(text);

        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].term, "Difficult Development Area");
        assert!(matches[0].definition.starts_with("An area designated"));
    }

    #[test]
    fn test_patterns_do_not_match_plain_prose() {
        let text = "Applications must be submitted by the posted deadline each year.";
        for p in DEFINITION_PATTERNS.iter() {
            assert!(p.apply(text).is_empty(), "{} matched prose", p.name);
        }
    }

    #[test]
    fn test_table_order_and_confidences() {
        let names: Vec<&str> = DEFINITION_PATTERNS.iter().map(|p| p.name).collect();
        assert_eq!(
            names,
            vec!["ctcac_style", "means_style", "colon_style", "numbered_style"]
        );
        let ctcac = pattern("ctcac_style");
        assert!((ctcac.confidence - 0.9).abs() < f64::EPSILON);
    }
}
