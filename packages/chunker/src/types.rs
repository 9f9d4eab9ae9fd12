//! Core data types for the chunking pipeline.
//!
//! These types represent a QAP document and everything the pipeline derives
//! from it: sections, retrieval chunks, tagged references, and extracted
//! definitions. All sink-facing types carry serde derives; the actual
//! serialization format is the caller's concern.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Chunking strategy selected per jurisdiction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Outline-heavy documents: one chunk per section.
    ComplexOutline,

    /// Narrative documents: sections accumulated into larger chunks.
    SimpleNarrative,

    /// Table-dense documents: one chunk per section, tables flagged.
    TableMatrix,

    /// Safe default for jurisdictions not otherwise classified.
    MediumComplexity,
}

impl Strategy {
    /// Get the string value for serialized output.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ComplexOutline => "complex_outline",
            Self::SimpleNarrative => "simple_narrative",
            Self::TableMatrix => "table_matrix",
            Self::MediumComplexity => "medium_complexity",
        }
    }

    /// Get the short name used inside chunk IDs.
    #[must_use]
    pub fn short_name(&self) -> &'static str {
        match self {
            Self::ComplexOutline => "outline",
            Self::SimpleNarrative => "narrative",
            Self::TableMatrix => "table",
            Self::MediumComplexity => "medium",
        }
    }
}

/// Immutable input document supplied by the conversion collaborator.
#[derive(Debug, Clone)]
pub struct Document {
    /// Jurisdiction code (e.g., "CA").
    pub jurisdiction_code: String,

    /// Full document text in plain/markdown form.
    pub raw_text: String,

    /// Allocation plan year.
    pub document_year: i32,

    /// Native per-page text, when the converter preserved page boundaries.
    ///
    /// Absence only degrades page estimation, never correctness.
    pub page_texts: Option<Vec<String>>,
}

impl Document {
    /// Create a new document without native page structure.
    #[must_use]
    pub fn new(
        jurisdiction_code: impl Into<String>,
        raw_text: impl Into<String>,
        document_year: i32,
    ) -> Self {
        Self {
            jurisdiction_code: jurisdiction_code.into(),
            raw_text: raw_text.into(),
            document_year,
            page_texts: None,
        }
    }

    /// Attach native per-page text from the converter.
    #[must_use]
    pub fn with_page_texts(mut self, page_texts: Vec<String>) -> Self {
        self.page_texts = Some(page_texts);
        self
    }
}

/// A titled section produced by the splitter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    /// Section title (header text, or a splitter-assigned default).
    pub title: String,

    /// Section body, without the header line.
    pub content: String,

    /// Ordinal within the document.
    pub position_index: usize,

    /// Nesting depth derived from title syntax (>= 1).
    pub hierarchy_level: u8,

    /// Short addressable label, e.g. "Section 10325" or a truncated title.
    pub breadcrumb: String,
}

/// Authority level of a federal citation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthorityLevel {
    FederalStatutory,
    FederalRegulatory,
}

/// A federal statute or regulation citation found in a chunk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FederalReference {
    /// The matched citation text, e.g. "IRC §42".
    pub citation: String,

    /// Statutory vs. regulatory authority.
    pub authority_level: AuthorityLevel,
}

/// A state statute or code citation found in a chunk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateReference {
    /// The matched citation text.
    pub citation: String,
}

/// An internal cross-reference to another part of the same QAP.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QapCrossReference {
    /// The matched reference text, e.g. "Section 10325.4".
    pub reference: String,

    /// The captured target identifier, e.g. "10325.4".
    pub target: String,
}

/// Category assigned to a matched domain term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityCategory {
    Calculation,
    CreditType,
    AllocationType,
    LocationCriteria,
    IncomeRequirements,
    General,
}

/// A domain-term lexicon hit; one per term per chunk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityTag {
    /// The lexicon term, as listed in the lexicon (lowercase).
    pub term: String,

    /// Category from the static term map.
    pub category: EntityCategory,
}

/// Per-chunk bookkeeping attached at construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkMetadata {
    /// Estimated source page; advisory only, never fabricated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pdf_page: Option<u32>,

    /// Content length in characters.
    pub content_length: usize,

    /// When the chunk was assembled.
    pub created_at: DateTime<Utc>,
}

impl ChunkMetadata {
    /// Create metadata for the given content; page is resolved later.
    #[must_use]
    pub fn for_content(content: &str) -> Self {
        Self {
            pdf_page: None,
            content_length: content.chars().count(),
            created_at: Utc::now(),
        }
    }
}

/// A contiguous, independently retrievable unit of document text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chunk {
    /// Stable identifier: `{jurisdiction}_{strategy_short}_{index:04}`.
    pub chunk_id: String,

    /// Jurisdiction code of the source document.
    pub jurisdiction_code: String,

    /// Strategy that assembled this chunk.
    pub strategy: Strategy,

    /// Chunk text content.
    pub content: String,

    /// Titles of the sections combined into this chunk (one, except for
    /// the narrative strategy).
    pub section_titles: Vec<String>,

    /// Nesting depth, preserved by outline strategies.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hierarchy_level: Option<u8>,

    /// Addressable outline label, preserved by outline strategies.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub breadcrumb: Option<String>,

    /// Whether the content looks tabular (table strategy only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contains_table: Option<bool>,

    /// Whether a tabular chunk looks like a scoring matrix.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_scoring_matrix: Option<bool>,

    /// Federal citations, written by the tagger.
    pub federal_refs: Vec<FederalReference>,

    /// State citations, written by the tagger.
    pub state_refs: Vec<StateReference>,

    /// Internal cross-references, written by the tagger.
    pub qap_crossrefs: Vec<QapCrossReference>,

    /// Domain-term hits, written by the tagger.
    pub lihtc_entities: Vec<EntityTag>,

    /// Page estimate and bookkeeping.
    pub metadata: ChunkMetadata,
}

impl Chunk {
    /// Create a new untagged chunk.
    #[must_use]
    pub fn new(
        chunk_id: impl Into<String>,
        jurisdiction_code: impl Into<String>,
        strategy: Strategy,
        content: impl Into<String>,
        section_titles: Vec<String>,
    ) -> Self {
        let content = content.into();
        let metadata = ChunkMetadata::for_content(&content);
        Self {
            chunk_id: chunk_id.into(),
            jurisdiction_code: jurisdiction_code.into(),
            strategy,
            content,
            section_titles,
            hierarchy_level: None,
            breadcrumb: None,
            contains_table: None,
            is_scoring_matrix: None,
            federal_refs: Vec::new(),
            state_refs: Vec::new(),
            qap_crossrefs: Vec::new(),
            lihtc_entities: Vec::new(),
            metadata,
        }
    }

    /// Preserve outline position (outline strategies).
    #[must_use]
    pub fn with_outline(mut self, hierarchy_level: u8, breadcrumb: impl Into<String>) -> Self {
        self.hierarchy_level = Some(hierarchy_level);
        self.breadcrumb = Some(breadcrumb.into());
        self
    }

    /// Set table flags (table strategy).
    #[must_use]
    pub fn with_table_flags(mut self, contains_table: bool, is_scoring_matrix: bool) -> Self {
        self.contains_table = Some(contains_table);
        self.is_scoring_matrix = Some(is_scoring_matrix);
        self
    }
}

/// Category assigned to an extracted definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DefinitionCategory {
    HousingTypes,
    IncomeRequirements,
    Calculation,
    Compliance,
    General,
}

/// An extracted (term, meaning) pair with provenance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Definition {
    /// Stable identifier: `{jurisdiction}_def_{index:04}`.
    pub definition_id: String,

    /// Normalized term.
    pub term: String,

    /// Normalized, sentence-terminated definition text.
    pub definition: String,

    /// Title of the section the definition was extracted from.
    pub section_reference: String,

    /// Estimated source page; advisory only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pdf_page: Option<u32>,

    /// Allocation plan year of the source document.
    pub document_year: i32,

    /// Chunk containing the defining section, when one exists.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_chunk_id: Option<String>,

    /// Keyword-derived category.
    pub category: DefinitionCategory,

    /// Confidence of the extraction, 0.0-1.0.
    pub extraction_confidence: f64,

    /// Name of the extraction pattern that produced this definition.
    pub pattern_used: String,

    /// Other defined terms mentioned in this definition's text.
    pub cross_references: Vec<String>,

    /// IDs of chunks whose content uses this term.
    pub usage_locations: Vec<String>,
}

/// Per-run processing metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunMetrics {
    pub processing_time_seconds: f64,
    pub total_chunks: usize,
    pub total_definitions: usize,
    pub pages_processed: u32,
    pub average_chunk_size: f64,
}

/// Sink-facing output bundle, one per document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentBundle {
    pub jurisdiction_code: String,
    pub strategy: Strategy,
    pub processing_timestamp: DateTime<Utc>,
    pub chunks: Vec<Chunk>,
    pub definitions: Vec<Definition>,
    pub metrics: RunMetrics,

    /// Non-fatal anomalies observed during processing.
    pub warnings: Vec<String>,
}
