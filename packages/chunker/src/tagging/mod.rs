//! Reference and domain-term tagging for assembled chunks.

mod patterns;
mod tagger;

pub use patterns::LIHTC_LEXICON;
pub use tagger::{
    federal_references, lihtc_entities, qap_cross_references, state_references, tag,
};
