//! Best-effort page mapping for converted documents.
//!
//! When the converter preserves page boundaries, keys come straight from
//! each page's leading text. Otherwise pages are estimated from a running
//! character offset at an assumed average page length. Either way the
//! mapping is advisory: lookups that miss resolve to `None`, never to a
//! fabricated page number.

use std::collections::HashSet;

use unicode_normalization::UnicodeNormalization;

use crate::config::{
    AVG_CHARS_PER_PAGE, NATIVE_PAGE_SAMPLE_CHARS, PAGE_KEY_MAX_CHARS, PAGE_MATCH_THRESHOLD,
};
use crate::types::Section;

/// Normalize text into a page-mapping key.
///
/// NFKC-normalized, lowercased, punctuation stripped, whitespace collapsed,
/// truncated to the key length limit.
#[must_use]
pub fn normalize_content_key(text: &str) -> String {
    let cleaned: String = text
        .nfkc()
        .map(|c| {
            if c.is_alphanumeric() || c.is_whitespace() {
                c
            } else {
                ' '
            }
        })
        .collect::<String>()
        .to_lowercase();

    let collapsed = cleaned.split_whitespace().collect::<Vec<_>>().join(" ");
    collapsed.chars().take(PAGE_KEY_MAX_CHARS).collect()
}

/// Mapping from normalized content keys to page numbers.
///
/// Built once per document and read-only afterward. Entries keep insertion
/// order so fuzzy lookups resolve deterministically.
#[derive(Debug, Clone, Default)]
pub struct PageMap {
    entries: Vec<(String, u32)>,
    native: bool,
}

impl PageMap {
    /// Build from native per-page text supplied by the converter.
    #[must_use]
    pub fn from_page_texts(page_texts: &[String]) -> Self {
        let mut entries = Vec::new();
        for (i, page) in page_texts.iter().enumerate() {
            let sample: String = page.chars().take(NATIVE_PAGE_SAMPLE_CHARS).collect();
            let key = normalize_content_key(&sample);
            if key.is_empty() {
                continue;
            }
            entries.push((key, i as u32 + 1));
        }
        Self {
            entries,
            native: true,
        }
    }

    /// Build by estimation: walk sections in order, accumulating a
    /// character offset at an assumed average page length.
    #[must_use]
    pub fn from_sections(sections: &[Section]) -> Self {
        let mut entries = Vec::new();
        let mut offset = 0usize;

        for section in sections {
            let page = (offset / AVG_CHARS_PER_PAGE) as u32 + 1;
            let key = normalize_content_key(&section.content);
            if !key.is_empty() {
                entries.push((key, page.max(1)));
            }
            offset += section.content.chars().count();
        }

        Self {
            entries,
            native: false,
        }
    }

    /// Whether the mapping came from native page boundaries.
    #[must_use]
    pub fn is_native(&self) -> bool {
        self.native
    }

    /// Number of mapped keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when no keys are mapped.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Highest mapped page number, or 0 for an empty mapping.
    #[must_use]
    pub fn page_count(&self) -> u32 {
        self.entries.iter().map(|(_, p)| *p).max().unwrap_or(0)
    }

    /// Resolve a text fragment to an estimated page number.
    ///
    /// Exact key match takes precedence; otherwise the best Jaccard
    /// word-overlap candidate wins if it clears the similarity threshold.
    #[must_use]
    pub fn resolve(&self, fragment: &str) -> Option<u32> {
        let key = normalize_content_key(fragment);
        if key.is_empty() {
            return None;
        }

        if let Some((_, page)) = self.entries.iter().find(|(k, _)| *k == key) {
            return Some(*page);
        }

        let fragment_words: HashSet<&str> = key.split_whitespace().collect();
        let mut best: Option<(f64, u32)> = None;

        for (mapped_key, page) in &self.entries {
            let mapped_words: HashSet<&str> = mapped_key.split_whitespace().collect();
            let similarity = jaccard(&fragment_words, &mapped_words);
            // Strict comparison keeps the earliest entry on ties
            if best.is_none_or(|(s, _)| similarity > s) {
                best = Some((similarity, *page));
            }
        }

        match best {
            Some((similarity, page)) if similarity > PAGE_MATCH_THRESHOLD => {
                tracing::debug!(similarity, page, "fuzzy page match");
                Some(page)
            }
            _ => {
                tracing::debug!("page resolution miss");
                None
            }
        }
    }
}

/// Jaccard similarity between two word sets.
fn jaccard(a: &HashSet<&str>, b: &HashSet<&str>) -> f64 {
    if a.is_empty() && b.is_empty() {
        return 0.0;
    }
    let intersection = a.intersection(b).count();
    let union = a.union(b).count();
    intersection as f64 / union as f64
}
