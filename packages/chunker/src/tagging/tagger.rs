//! Generic matchers over the static pattern tables.

use crate::types::{
    AuthorityLevel, Chunk, EntityTag, FederalReference, QapCrossReference, StateReference,
};

use super::patterns::{FEDERAL_CITATIONS, LIHTC_LEXICON, QAP_CROSSREFS, STATE_CITATIONS};

/// Tag a chunk's reference and entity lists.
///
/// Idempotent: the four lists are recomputed and replaced, never appended,
/// so retagging an already-tagged chunk yields identical results.
pub fn tag(chunk: &mut Chunk) {
    chunk.federal_refs = federal_references(&chunk.content);
    chunk.state_refs = state_references(&chunk.content);
    chunk.qap_crossrefs = qap_cross_references(&chunk.content);
    chunk.lihtc_entities = lihtc_entities(&chunk.content);
}

/// Extract federal citations; one record per occurrence.
#[must_use]
pub fn federal_references(content: &str) -> Vec<FederalReference> {
    let mut refs = Vec::new();
    for pattern in FEDERAL_CITATIONS.iter() {
        for m in pattern.find_iter(content) {
            let citation = m.as_str().trim().to_string();
            let authority_level = if citation.contains("IRC") || citation.contains("Section") {
                AuthorityLevel::FederalStatutory
            } else {
                AuthorityLevel::FederalRegulatory
            };
            refs.push(FederalReference {
                citation,
                authority_level,
            });
        }
    }
    refs
}

/// Extract state statute citations; one record per occurrence.
#[must_use]
pub fn state_references(content: &str) -> Vec<StateReference> {
    let mut refs = Vec::new();
    for pattern in STATE_CITATIONS.iter() {
        for m in pattern.find_iter(content) {
            refs.push(StateReference {
                citation: m.as_str().trim().to_string(),
            });
        }
    }
    refs
}

/// Extract internal cross-references; one record per occurrence.
#[must_use]
pub fn qap_cross_references(content: &str) -> Vec<QapCrossReference> {
    let mut refs = Vec::new();
    for pattern in QAP_CROSSREFS.iter() {
        for caps in pattern.captures_iter(content) {
            let whole = match caps.get(0) {
                Some(m) => m.as_str().trim().to_string(),
                None => continue,
            };
            let target = match caps.get(1) {
                Some(m) => m.as_str().to_string(),
                None => continue,
            };
            refs.push(QapCrossReference {
                reference: whole,
                target,
            });
        }
    }
    refs
}

/// Match the domain-term lexicon; one hit per term per chunk.
///
/// Occurrence counts are deliberately not tracked.
#[must_use]
pub fn lihtc_entities(content: &str) -> Vec<EntityTag> {
    let lower = content.to_lowercase();
    LIHTC_LEXICON
        .iter()
        .filter(|(term, _)| lower.contains(term))
        .map(|(term, category)| EntityTag {
            term: (*term).to_string(),
            category: *category,
        })
        .collect()
}
