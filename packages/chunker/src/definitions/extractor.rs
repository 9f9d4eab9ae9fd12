//! Definitions extraction: locate regions, apply patterns, clean,
//! resolve pages, categorize, deduplicate, link.

use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;

use crate::config::{
    MIN_DEFINITION_CHARS, MIN_SHAPE_MATCHES, PAGE_CONTEXT_AFTER, PAGE_CONTEXT_BEFORE,
};
use crate::pages::PageMap;
use crate::types::{Chunk, Definition, DefinitionCategory, Document, Section};

use super::patterns::DEFINITION_PATTERNS;

/// Confidence assigned to regions located by an explicit label.
const EXPLICIT_REGION_CONFIDENCE: f64 = 0.9;

/// Confidence assigned to regions located by shape heuristics.
const HEURISTIC_REGION_CONFIDENCE: f64 = 0.6;

/// Section title containing a definitions label.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static TITLE_DEFINITIONS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bdefinitions?\b").expect("valid regex"));

/// Labeled marker line at the start of a section body, e.g.
/// "Section 3. Definitions", "§ 5. Definitions", "Part II - Definitions".
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static MARKER_DEFINITIONS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^(?:§\s*\d+\.|section\s+\d+[a-z]?(?:\.\d+)*[.:]?|(?:article|part)\s+[\divxlc]+\s*[.:\-–—]?)\s*definitions\b",
    )
    .expect("valid regex")
});

/// Definition-shaped line patterns for the heuristic region fallback.
#[allow(clippy::expect_used)] // Static regexes that are guaranteed to be valid
static DEFINITION_SHAPES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r#""[^"\n]{2,80}"\s+means\s"#,
        r"(?m)^\s*-\s*\([a-z]\)\s",
        r"(?m)^[A-Z][A-Za-z0-9 /-]{2,60}:\s",
        r"(?m)^\s*\d+\.\s+[A-Z][^\n]{1,60}\s+[-–—]\s",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("valid regex"))
    .collect()
});

/// A definition-bearing section with its location confidence.
struct Region<'a> {
    section: &'a Section,
    confidence: f64,
}

/// Candidate definition before deduplication and ID assignment.
struct Candidate {
    term: String,
    definition: String,
    section_reference: String,
    pdf_page: Option<u32>,
    source_chunk_id: Option<String>,
    category: DefinitionCategory,
    confidence: f64,
    pattern_used: &'static str,
}

/// Extracts the definition glossary for one document.
pub struct DefinitionsExtractor<'a> {
    page_map: &'a PageMap,
}

impl<'a> DefinitionsExtractor<'a> {
    /// Create an extractor resolving pages against the given mapping.
    #[must_use]
    pub fn new(page_map: &'a PageMap) -> Self {
        Self { page_map }
    }

    /// Extract, deduplicate, and link definitions.
    ///
    /// Returns the final definition set (sorted by term) and any
    /// non-fatal warnings. A document without definitions regions yields
    /// an empty set; that is a valid outcome, not an error.
    pub fn extract(
        &self,
        document: &Document,
        sections: &[Section],
        chunks: &[Chunk],
    ) -> (Vec<Definition>, Vec<String>) {
        let mut warnings = Vec::new();

        let regions = locate_regions(sections, &mut warnings);
        if regions.is_empty() {
            tracing::debug!("no definitions regions located");
            return (Vec::new(), warnings);
        }

        let mut candidates = Vec::new();
        for region in &regions {
            candidates.extend(self.extract_from_region(region, chunks));
        }

        let deduped = deduplicate(candidates);

        let mut definitions: Vec<Definition> = deduped
            .into_iter()
            .enumerate()
            .map(|(i, c)| Definition {
                definition_id: format!("{}_def_{:04}", document.jurisdiction_code, i),
                term: c.term,
                definition: c.definition,
                section_reference: c.section_reference,
                pdf_page: c.pdf_page,
                document_year: document.document_year,
                source_chunk_id: c.source_chunk_id,
                category: c.category,
                extraction_confidence: c.confidence,
                pattern_used: c.pattern_used.to_string(),
                cross_references: Vec::new(),
                usage_locations: Vec::new(),
            })
            .collect();

        link_definitions(&mut definitions, chunks);

        (definitions, warnings)
    }

    /// Run every extraction pattern over one region.
    fn extract_from_region(&self, region: &Region<'_>, chunks: &[Chunk]) -> Vec<Candidate> {
        let text = &region.section.content;
        let source_chunk_id = chunks
            .iter()
            .find(|c| c.section_titles.contains(&region.section.title))
            .map(|c| c.chunk_id.clone());

        let mut candidates = Vec::new();

        for pattern in DEFINITION_PATTERNS.iter() {
            for raw in pattern.apply(text) {
                let term = clean_term(&raw.term);
                let definition = clean_definition(&raw.definition);
                // Quality filter: patterns over-generate and are pruned here
                if term.is_empty() || definition.chars().count() <= MIN_DEFINITION_CHARS {
                    continue;
                }

                let category = categorize(&term, &definition);
                let pdf_page = self.page_map.resolve(page_context(text, raw.offset));

                candidates.push(Candidate {
                    term,
                    definition,
                    section_reference: region.section.title.clone(),
                    pdf_page,
                    source_chunk_id: source_chunk_id.clone(),
                    category,
                    confidence: pattern.confidence.min(region.confidence),
                    pattern_used: pattern.name,
                });
            }
        }

        candidates
    }
}

/// Locate definition-bearing sections.
///
/// Explicitly labeled sections win; only when none exist does the shape
/// heuristic scan every section body.
fn locate_regions<'a>(sections: &'a [Section], warnings: &mut Vec<String>) -> Vec<Region<'a>> {
    let explicit: Vec<Region<'a>> = sections
        .iter()
        .filter(|s| is_explicit_region(s))
        .map(|section| Region {
            section,
            confidence: EXPLICIT_REGION_CONFIDENCE,
        })
        .collect();

    if !explicit.is_empty() {
        return explicit;
    }

    let heuristic: Vec<Region<'a>> = sections
        .iter()
        .filter(|s| shape_match_count(&s.content) >= MIN_SHAPE_MATCHES)
        .map(|section| Region {
            section,
            confidence: HEURISTIC_REGION_CONFIDENCE,
        })
        .collect();

    if !heuristic.is_empty() {
        tracing::warn!(
            regions = heuristic.len(),
            "definitions located heuristically, no labeled section found"
        );
        warnings.push(format!(
            "No labeled definitions section; {} region(s) accepted heuristically",
            heuristic.len()
        ));
    }

    heuristic
}

/// Check for an explicit definitions label in the title or a marker line
/// at the start of the body.
fn is_explicit_region(section: &Section) -> bool {
    if TITLE_DEFINITIONS.is_match(&section.title) {
        return true;
    }
    section
        .content
        .lines()
        .take(3)
        .any(|line| MARKER_DEFINITIONS.is_match(line.trim()))
}

/// Total definition-shape matches in a section body.
fn shape_match_count(content: &str) -> usize {
    DEFINITION_SHAPES
        .iter()
        .map(|p| p.find_iter(content).count())
        .sum()
}

/// Normalize a term: collapse whitespace, strip surrounding non-word
/// characters.
fn clean_term(raw: &str) -> String {
    let collapsed = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    collapsed
        .trim_matches(|c: char| !(c.is_alphanumeric() || c == '_'))
        .to_string()
}

/// Normalize a definition: collapse whitespace and drop any trailing
/// incomplete sentence so definitions never end mid-sentence.
fn clean_definition(raw: &str) -> String {
    let collapsed = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.ends_with('.') {
        return collapsed;
    }
    match collapsed.rfind('.') {
        Some(idx) => collapsed[..=idx].to_string(),
        None => String::new(),
    }
}

/// Keyword categorization over term + definition text.
fn categorize(term: &str, definition: &str) -> DefinitionCategory {
    const HOUSING: &[&str] = &[
        "housing",
        "dwelling",
        "residential",
        "unit",
        "single room occupancy",
        "senior",
        "special needs",
    ];
    const INCOME: &[&str] = &["income", "rent", "median", "ami"];
    const CALCULATION: &[&str] = &["basis", "percentage", "formula", "calculation", "credit amount"];
    const COMPLIANCE: &[&str] = &["compliance", "monitoring", "recapture", "audit", "reporting"];

    let text = format!("{} {}", term, definition).to_lowercase();

    if HOUSING.iter().any(|kw| text.contains(kw)) {
        DefinitionCategory::HousingTypes
    } else if INCOME.iter().any(|kw| text.contains(kw)) {
        DefinitionCategory::IncomeRequirements
    } else if CALCULATION.iter().any(|kw| text.contains(kw)) {
        DefinitionCategory::Calculation
    } else if COMPLIANCE.iter().any(|kw| text.contains(kw)) {
        DefinitionCategory::Compliance
    } else {
        DefinitionCategory::General
    }
}

/// Context window around a match for page resolution.
fn page_context(text: &str, offset: usize) -> &str {
    let start = floor_char_boundary(text, offset.saturating_sub(PAGE_CONTEXT_BEFORE));
    let end = ceil_char_boundary(text, (offset + PAGE_CONTEXT_AFTER).min(text.len()));
    &text[start..end]
}

fn floor_char_boundary(s: &str, mut index: usize) -> usize {
    while index > 0 && !s.is_char_boundary(index) {
        index -= 1;
    }
    index
}

fn ceil_char_boundary(s: &str, mut index: usize) -> usize {
    while index < s.len() && !s.is_char_boundary(index) {
        index += 1;
    }
    index
}

/// Deduplicate candidates by case-insensitive term.
///
/// The strictly higher-confidence duplicate wins; ties keep the first
/// encountered. The survivors are sorted by term for deterministic output.
fn deduplicate(candidates: Vec<Candidate>) -> Vec<Candidate> {
    let mut kept: Vec<Candidate> = Vec::new();
    let mut index_by_key: HashMap<String, usize> = HashMap::new();

    for candidate in candidates {
        let key = candidate.term.trim().to_lowercase();
        match index_by_key.get(&key) {
            Some(&i) => {
                if candidate.confidence > kept[i].confidence {
                    kept[i] = candidate;
                }
            }
            None => {
                index_by_key.insert(key, kept.len());
                kept.push(candidate);
            }
        }
    }

    kept.sort_by_key(|c| c.term.to_lowercase());
    kept
}

/// Populate `usage_locations` and `cross_references` on the final set.
///
/// Runs after deduplication, so discarded duplicates contribute nothing.
fn link_definitions(definitions: &mut [Definition], chunks: &[Chunk]) {
    let chunk_texts: Vec<(&str, String)> = chunks
        .iter()
        .map(|c| (c.chunk_id.as_str(), c.content.to_lowercase()))
        .collect();
    let terms_lower: Vec<String> = definitions.iter().map(|d| d.term.to_lowercase()).collect();
    let definitions_lower: Vec<String> = definitions
        .iter()
        .map(|d| d.definition.to_lowercase())
        .collect();

    for (i, definition) in definitions.iter_mut().enumerate() {
        definition.usage_locations = chunk_texts
            .iter()
            .filter(|(_, content)| content.contains(&terms_lower[i]))
            .map(|(id, _)| (*id).to_string())
            .collect();

        definition.cross_references = terms_lower
            .iter()
            .enumerate()
            .filter(|(j, other)| *j != i && definitions_lower[i].contains(other.as_str()))
            .map(|(j, _)| terms_lower[j].clone())
            .collect();
    }
}
