//! Per-strategy chunk assembly.

mod assembler;
mod tables;

pub use assembler::ChunkAssembler;
pub use tables::{looks_like_scoring_matrix, looks_like_table};
