//! Section segmentation for converted QAP text.

mod splitter;

pub use splitter::{split_sections, Header};
