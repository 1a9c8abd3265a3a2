//! glyphdex-core: Emoji recognition and custom emoji registry
//!
//! This crate provides the two emoji tables the rest of the system reads:
//! - Unicode: canonical fully-qualified sequence recognition and
//!   normalization of partially-qualified variants
//! - Registry: a reloadable, atomically-replaceable table of custom emoji
//!   loaded from the filesystem

pub mod registry;
pub mod unicode;

// Re-exports for convenience
pub use registry::{
    EmojiEntry, EmojiLoader, EmojiRegistry, FsLoader, LoaderConfig, LoaderError,
    Passthrough, RawEmoji, RegistrySnapshot, ReloadError, Sanitize, StripMarkup,
};
pub use unicode::{DatasetError, EmojiClassifier};
