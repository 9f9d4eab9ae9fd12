//! Error types for the chunking pipeline.
//!
//! Only genuinely invalid input is surfaced as an error. Structural and
//! heuristic misses (no headers found, no definitions region, unresolved
//! page numbers) are recovered locally and represented as optional or
//! empty fields on the output types.

use thiserror::Error;

/// Main error type for the chunking pipeline.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Document text is empty or whitespace-only.
    #[error("Document for '{0}' has no text content; upstream conversion likely failed")]
    EmptyDocument(String),

    /// Invalid jurisdiction code format.
    #[error("Invalid jurisdiction code: '{0}'. Expected a two-letter state code (e.g., CA)")]
    InvalidJurisdiction(String),

    /// Document year outside the plausible range for a QAP.
    #[error("Implausible document year: {year}. Expected a year between {min} and {max}")]
    InvalidYear { year: i32, min: i32, max: i32 },
}

/// Result type alias for pipeline operations.
pub type Result<T> = std::result::Result<T, PipelineError>;
