//! Registry types - custom emoji metadata

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// One custom emoji as produced by a loader, before sanitization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawEmoji {
    /// Short name the emoji is addressed by
    pub name: String,
    /// Resource location (path, URL, ...)
    pub locator: String,
    /// Grouping tags, absent when the loader has none
    pub tags: Option<Vec<String>>,
}

/// One custom emoji as stored in a registry snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmojiEntry {
    /// Short name the emoji is addressed by
    pub name: String,
    /// Resource location (path, URL, ...)
    pub locator: String,
    /// Grouping tags
    pub tags: BTreeSet<String>,
    /// Name with markup stripped
    pub sanitized_name: String,
    /// Locator with markup stripped
    pub sanitized_locator: String,
}
