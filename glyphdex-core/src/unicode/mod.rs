//! Unicode emoji recognition and normalization
//!
//! Tables are built once from an `emoji-test.txt`-shaped dataset and never
//! mutated afterward:
//! - `dataset`: parses the reference data into canonical sequences
//! - `qualification`: derives every partially-qualified variant
//! - `classifier`: membership and canonicalization lookups over both tables

mod classifier;
mod dataset;
mod qualification;

pub use classifier::EmojiClassifier;
pub use dataset::{DatasetError, BUILTIN_DATASET};
