//! Emoji classification and canonicalization
//!
//! Both tables are built by the constructor and immutable afterward, so the
//! lookups are safe for unsynchronized concurrent use.

use std::path::Path;

use indexmap::IndexSet;
use rustc_hash::FxHashMap;

use super::dataset::{self, DatasetError};
use super::qualification;

/// Read-only emoji lookup tables built from one reference dataset.
pub struct EmojiClassifier {
    /// Canonical fully-qualified sequences, in dataset order.
    canonical: IndexSet<String>,
    /// Partially-/un-qualified variant -> canonical sequence.
    qualification: FxHashMap<String, String>,
}

impl EmojiClassifier {
    /// Builds the tables from the bundled reference dataset.
    pub fn builtin() -> Result<Self, DatasetError> {
        Self::from_dataset(dataset::BUILTIN_DATASET)
    }

    /// Builds the tables from caller-supplied data in the `emoji-test.txt`
    /// shape.
    pub fn from_dataset(data: &str) -> Result<Self, DatasetError> {
        let canonical = dataset::canonical_sequences(data)?;
        let qualification = qualification::qualification_map(&canonical);
        Ok(Self {
            canonical,
            qualification,
        })
    }

    /// Builds the tables from a dataset file on disk.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, DatasetError> {
        let canonical = dataset::canonical_sequences_from_path(path.as_ref())?;
        let qualification = qualification::qualification_map(&canonical);
        Ok(Self {
            canonical,
            qualification,
        })
    }

    /// Whether `sequence` is a canonical fully-qualified emoji. Exact
    /// sequence membership; no prefix or partial matching.
    #[inline]
    pub fn is_unicode_emoji(&self, sequence: &str) -> bool {
        self.canonical.contains(sequence)
    }

    /// Returns the canonical form of a partially-qualified variant, or
    /// `sequence` unchanged when it is already canonical or unknown.
    #[inline]
    pub fn fully_qualify<'a>(&'a self, sequence: &'a str) -> &'a str {
        self.qualification
            .get(sequence)
            .map(String::as_str)
            .unwrap_or(sequence)
    }

    /// Number of canonical sequences, regional indicators included.
    pub fn canonical_count(&self) -> usize {
        self.canonical.len()
    }

    /// Number of derived variant keys.
    pub fn variant_count(&self) -> usize {
        self.qualification.len()
    }
}
