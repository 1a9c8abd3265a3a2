//! Custom emoji registry
//!
//! A reloadable table of custom emoji built wholesale from loader output:
//! - `types`: raw loader output and the stored entry shape
//! - `loader`: the loader contract and the filesystem implementation
//! - `sanitize`: markup stripping applied to names and locators
//! - `store`: the atomically-replaceable snapshot table

mod loader;
mod sanitize;
mod store;
mod types;

pub use loader::{EmojiLoader, FsLoader, LoaderConfig, LoaderError};
pub use sanitize::{Passthrough, Sanitize, StripMarkup};
pub use store::{EmojiRegistry, RegistrySnapshot, ReloadError};
pub use types::{EmojiEntry, RawEmoji};
