//! Pipeline orchestration: one document in, one sink-facing bundle out.

use std::time::Instant;

use chrono::Utc;

use crate::chunking::ChunkAssembler;
use crate::config::{validate_document_year, validate_jurisdiction_code};
use crate::definitions::DefinitionsExtractor;
use crate::error::{PipelineError, Result};
use crate::pages::PageMap;
use crate::splitting::split_sections;
use crate::strategy::classify;
use crate::tagging;
use crate::types::{Chunk, Document, DocumentBundle, RunMetrics};

/// Process one document through the full pipeline.
///
/// Classifies the strategy, splits sections, assembles and tags chunks,
/// builds the page mapping, extracts the definition glossary, and wraps
/// everything with run metrics. Deterministic and synchronous; retry
/// policy belongs to the caller.
///
/// # Errors
/// Fails only on genuinely invalid input: empty text, a malformed
/// jurisdiction code, or an implausible document year.
pub fn process_document(document: &Document) -> Result<DocumentBundle> {
    let started = Instant::now();

    validate_jurisdiction_code(&document.jurisdiction_code)?;
    validate_document_year(document.document_year)?;
    if document.raw_text.trim().is_empty() {
        return Err(PipelineError::EmptyDocument(
            document.jurisdiction_code.clone(),
        ));
    }

    let strategy = classify(&document.jurisdiction_code);
    tracing::debug!(
        jurisdiction = %document.jurisdiction_code,
        strategy = strategy.as_str(),
        "processing document"
    );

    let mut warnings = Vec::new();

    let sections = split_sections(&document.raw_text);
    if sections.len() == 1 && sections[0].title == "Complete Document" {
        warnings.push(
            "No structural headers found; document processed as a single section".to_string(),
        );
    }

    let mut assembler = ChunkAssembler::new(document.jurisdiction_code.as_str(), strategy);
    let mut chunks = assembler.assemble(&sections);
    if !assembler.skipped_sections().is_empty() {
        warnings.push(format!(
            "{} section(s) below the minimum length were skipped",
            assembler.skipped_sections().len()
        ));
    }

    for chunk in &mut chunks {
        tagging::tag(chunk);
    }

    let page_map = match document.page_texts.as_deref() {
        Some(pages) if !pages.is_empty() => PageMap::from_page_texts(pages),
        _ => PageMap::from_sections(&sections),
    };

    for chunk in &mut chunks {
        chunk.metadata.pdf_page = page_map.resolve(&chunk.content);
    }

    let (definitions, definition_warnings) =
        DefinitionsExtractor::new(&page_map).extract(document, &sections, &chunks);
    warnings.extend(definition_warnings);

    let metrics = RunMetrics {
        processing_time_seconds: started.elapsed().as_secs_f64(),
        total_chunks: chunks.len(),
        total_definitions: definitions.len(),
        pages_processed: page_map.page_count(),
        average_chunk_size: average_chunk_size(&chunks),
    };

    Ok(DocumentBundle {
        jurisdiction_code: document.jurisdiction_code.clone(),
        strategy,
        processing_timestamp: Utc::now(),
        chunks,
        definitions,
        metrics,
        warnings,
    })
}

/// Mean chunk content length in characters; 0.0 for an empty run.
fn average_chunk_size(chunks: &[Chunk]) -> f64 {
    if chunks.is_empty() {
        return 0.0;
    }
    let total: usize = chunks.iter().map(|c| c.metadata.content_length).sum();
    total as f64 / chunks.len() as f64
}
