//! Chunk assembly: four algorithms selected by strategy.

use crate::config::{
    MEDIUM_MIN_SECTION_CHARS, NARRATIVE_MAX_CHARS, NARRATIVE_MAX_SECTIONS,
    OUTLINE_MIN_SECTION_CHARS,
};
use crate::types::{Chunk, Section, Strategy};

use super::tables::{looks_like_scoring_matrix, looks_like_table};

/// Assembles ordered chunks from sections under one strategy.
///
/// Chunk IDs are assigned from a sequential per-assembler counter, so
/// uniqueness within a run holds by construction. Each document must own
/// its own assembler; counters are never shared across documents.
pub struct ChunkAssembler {
    jurisdiction_code: String,
    strategy: Strategy,
    next_index: usize,
    skipped_sections: Vec<String>,
}

impl ChunkAssembler {
    /// Create a new assembler for one document run.
    #[must_use]
    pub fn new(jurisdiction_code: impl Into<String>, strategy: Strategy) -> Self {
        Self {
            jurisdiction_code: jurisdiction_code.into(),
            strategy,
            next_index: 0,
            skipped_sections: Vec::new(),
        }
    }

    /// Titles of sections skipped by a minimum-length rule.
    #[must_use]
    pub fn skipped_sections(&self) -> &[String] {
        &self.skipped_sections
    }

    /// Assemble chunks from the ordered section list.
    pub fn assemble(&mut self, sections: &[Section]) -> Vec<Chunk> {
        match self.strategy {
            Strategy::ComplexOutline => {
                self.assemble_per_section(sections, Some(OUTLINE_MIN_SECTION_CHARS), true, false)
            }
            Strategy::SimpleNarrative => self.assemble_narrative(sections),
            Strategy::TableMatrix => self.assemble_per_section(sections, None, false, true),
            Strategy::MediumComplexity => {
                self.assemble_per_section(sections, Some(MEDIUM_MIN_SECTION_CHARS), false, false)
            }
        }
    }

    /// One chunk per section, with optional minimum-length filtering,
    /// outline preservation, and table flagging.
    fn assemble_per_section(
        &mut self,
        sections: &[Section],
        min_chars: Option<usize>,
        keep_outline: bool,
        flag_tables: bool,
    ) -> Vec<Chunk> {
        let mut chunks = Vec::new();

        for section in sections {
            if let Some(min) = min_chars {
                if section.content.trim().chars().count() < min {
                    tracing::debug!(title = %section.title, "section below minimum length, skipped");
                    self.skipped_sections.push(section.title.clone());
                    continue;
                }
            }

            let mut chunk = Chunk::new(
                self.next_chunk_id(),
                self.jurisdiction_code.clone(),
                self.strategy,
                section.content.clone(),
                vec![section.title.clone()],
            );

            if keep_outline {
                chunk = chunk.with_outline(section.hierarchy_level, section.breadcrumb.clone());
            }
            if flag_tables {
                let contains_table = looks_like_table(&section.content);
                let is_matrix = looks_like_scoring_matrix(&section.content);
                chunk = chunk.with_table_flags(contains_table, is_matrix);
            }

            chunks.push(chunk);
        }

        chunks
    }

    /// Accumulate sections in order, sealing a chunk once the accumulator
    /// holds the maximum section count or exceeds the length cap; the
    /// remainder flushes as a final chunk.
    fn assemble_narrative(&mut self, sections: &[Section]) -> Vec<Chunk> {
        let mut chunks = Vec::new();
        let mut titles: Vec<String> = Vec::new();
        let mut parts: Vec<&str> = Vec::new();
        let mut combined_chars = 0usize;

        for section in sections {
            titles.push(section.title.clone());
            parts.push(&section.content);
            combined_chars += section.content.chars().count();

            if titles.len() >= NARRATIVE_MAX_SECTIONS || combined_chars > NARRATIVE_MAX_CHARS {
                chunks.push(self.seal_narrative(&mut titles, &mut parts));
                combined_chars = 0;
            }
        }

        if !parts.is_empty() {
            chunks.push(self.seal_narrative(&mut titles, &mut parts));
        }

        chunks
    }

    fn seal_narrative(&mut self, titles: &mut Vec<String>, parts: &mut Vec<&str>) -> Chunk {
        let content = parts.join("\n\n");
        parts.clear();
        Chunk::new(
            self.next_chunk_id(),
            self.jurisdiction_code.clone(),
            self.strategy,
            content,
            std::mem::take(titles),
        )
    }

    fn next_chunk_id(&mut self) -> String {
        let id = format!(
            "{}_{}_{:04}",
            self.jurisdiction_code,
            self.strategy.short_name(),
            self.next_index
        );
        self.next_index += 1;
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn section(title: &str, content: String, index: usize) -> Section {
        Section {
            title: title.to_string(),
            content,
            position_index: index,
            hierarchy_level: 1,
            breadcrumb: title.chars().take(50).collect(),
        }
    }

    fn sections_of_len(count: usize, chars: usize) -> Vec<Section> {
        (0..count)
            .map(|i| section(&format!("Part {i}"), "x".repeat(chars), i))
            .collect()
    }

    #[test]
    fn test_outline_one_chunk_per_section() {
        let sections = sections_of_len(3, 200);
        let mut assembler = ChunkAssembler::new("CA", Strategy::ComplexOutline);
        let chunks = assembler.assemble(&sections);

        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[0].chunk_id, "CA_outline_0000");
        assert_eq!(chunks[2].chunk_id, "CA_outline_0002");
        assert_eq!(chunks[0].hierarchy_level, Some(1));
        assert!(chunks[0].breadcrumb.is_some());
    }

    #[test]
    fn test_outline_skips_short_sections() {
        let mut sections = sections_of_len(2, 200);
        sections.push(section("Tiny", "x".repeat(20), 2));

        let mut assembler = ChunkAssembler::new("CA", Strategy::ComplexOutline);
        let chunks = assembler.assemble(&sections);

        assert_eq!(chunks.len(), 2);
        assert_eq!(assembler.skipped_sections(), &["Tiny".to_string()]);
    }

    #[test]
    fn test_medium_skips_below_100_chars() {
        let mut sections = sections_of_len(1, 150);
        sections.push(section("Borderline", "x".repeat(99), 1));

        let mut assembler = ChunkAssembler::new("WY", Strategy::MediumComplexity);
        let chunks = assembler.assemble(&sections);

        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].chunk_id, "WY_medium_0000");
    }

    #[test]
    fn test_narrative_seals_at_three_sections() {
        let sections = sections_of_len(5, 100);
        let mut assembler = ChunkAssembler::new("MA", Strategy::SimpleNarrative);
        let chunks = assembler.assemble(&sections);

        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].section_titles.len(), 3);
        assert_eq!(chunks[1].section_titles.len(), 2);
        assert_eq!(chunks[0].chunk_id, "MA_narrative_0000");
        assert_eq!(chunks[1].chunk_id, "MA_narrative_0001");
    }

    #[test]
    fn test_narrative_seals_on_length() {
        // Two sections of 1,600 chars exceed the 3,000-char cap together
        let sections = sections_of_len(3, 1_600);
        let mut assembler = ChunkAssembler::new("MA", Strategy::SimpleNarrative);
        let chunks = assembler.assemble(&sections);

        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].section_titles.len(), 2);
        assert_eq!(chunks[1].section_titles.len(), 1);
    }

    #[test]
    fn test_narrative_seal_law() {
        let sections = sections_of_len(7, 400);
        let mut assembler = ChunkAssembler::new("MA", Strategy::SimpleNarrative);
        let chunks = assembler.assemble(&sections);

        // Every chunk except possibly the last satisfies the seal condition
        for chunk in &chunks[..chunks.len() - 1] {
            let sealed_by_count = chunk.section_titles.len() == 3;
            let sealed_by_length = chunk.content.chars().count() > 3_000;
            assert!(sealed_by_count || sealed_by_length);
        }
    }

    #[test]
    fn test_table_strategy_keeps_all_sections() {
        let mut sections = sections_of_len(1, 10);
        sections.push(section(
            "Scoring",
            "| Criterion | Points |\n| Site | 10 |\n| Service | 5 |".to_string(),
            1,
        ));

        let mut assembler = ChunkAssembler::new("AZ", Strategy::TableMatrix);
        let chunks = assembler.assemble(&sections);

        // No minimum-length filter applies
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].contains_table, Some(false));
        assert_eq!(chunks[1].contains_table, Some(true));
        assert_eq!(chunks[1].is_scoring_matrix, Some(true));
    }

    #[test]
    fn test_chunk_ids_are_distinct() {
        let sections = sections_of_len(6, 150);
        let mut assembler = ChunkAssembler::new("CA", Strategy::ComplexOutline);
        let chunks = assembler.assemble(&sections);

        let mut ids: Vec<&str> = chunks.iter().map(|c| c.chunk_id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), chunks.len());
    }

    #[test]
    fn test_no_chunk_has_empty_content() {
        let sections = sections_of_len(4, 120);
        for strategy in [
            Strategy::ComplexOutline,
            Strategy::SimpleNarrative,
            Strategy::TableMatrix,
            Strategy::MediumComplexity,
        ] {
            let mut assembler = ChunkAssembler::new("CA", strategy);
            for chunk in assembler.assemble(&sections) {
                assert!(!chunk.content.is_empty());
            }
        }
    }
}
