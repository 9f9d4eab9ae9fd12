//! Multi-pattern definition extraction and deduplication.

mod extractor;
mod patterns;

pub use extractor::DefinitionsExtractor;
pub use patterns::{DefinitionPattern, PatternKind, DEFINITION_PATTERNS};
