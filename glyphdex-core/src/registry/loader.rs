//! Filesystem emoji loader
//!
//! Walks a directory tree and emits one raw emoji per image file. Files in a
//! pack subdirectory are tagged with the pack name; hidden entries are
//! skipped. An unusable root fails the whole load, while unreadable
//! individual entries are skipped so one broken file cannot empty the
//! registry.

use std::path::{Component, Path, PathBuf};

use thiserror::Error;
use walkdir::{DirEntry, WalkDir};

use super::types::RawEmoji;

/// Source of raw registry entries, invoked once per reload.
pub trait EmojiLoader {
    fn load(&self) -> Result<Vec<RawEmoji>, LoaderError>;
}

/// Failure producing loader output.
#[derive(Debug, Error)]
pub enum LoaderError {
    #[error("emoji directory {0} is missing or not a directory")]
    MissingRoot(PathBuf),
    #[error("failed to scan emoji directory: {0}")]
    Walk(#[from] walkdir::Error),
}

/// Configuration for the filesystem loader
#[derive(Debug, Clone)]
pub struct LoaderConfig {
    /// Root directory holding custom emoji files
    pub root: PathBuf,
    /// File extensions treated as emoji images
    pub extensions: Vec<String>,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("emoji"),
            extensions: ["png", "gif", "jpg", "jpeg", "webp"]
                .iter()
                .map(|e| e.to_string())
                .collect(),
        }
    }
}

/// Loader scanning a directory tree for emoji image files
pub struct FsLoader {
    config: LoaderConfig,
}

impl FsLoader {
    pub fn new(config: LoaderConfig) -> Self {
        Self { config }
    }

    fn is_image(&self, path: &Path) -> bool {
        let ext = match path.extension().and_then(|e| e.to_str()) {
            Some(ext) => ext.to_lowercase(),
            None => return false,
        };
        self.config.extensions.iter().any(|allowed| *allowed == ext)
    }
}

impl EmojiLoader for FsLoader {
    fn load(&self) -> Result<Vec<RawEmoji>, LoaderError> {
        if !self.config.root.is_dir() {
            return Err(LoaderError::MissingRoot(self.config.root.clone()));
        }

        let mut emojis = Vec::new();
        let walk = WalkDir::new(&self.config.root)
            .min_depth(1)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| !is_hidden(entry));

        for entry in walk {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    log::warn!(
                        "skipping unreadable entry under {}: {}",
                        self.config.root.display(),
                        err
                    );
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }

            let path = entry.path();
            if !self.is_image(path) {
                continue;
            }
            let name = match path.file_stem().and_then(|s| s.to_str()) {
                Some(name) => name.to_string(),
                None => continue,
            };

            let relative = path.strip_prefix(&self.config.root).unwrap_or(path);
            emojis.push(RawEmoji {
                name,
                locator: relative.to_string_lossy().replace('\\', "/"),
                tags: pack_tag(relative),
            });
        }

        log::debug!(
            "emoji loader found {} files under {}",
            emojis.len(),
            self.config.root.display()
        );
        Ok(emojis)
    }
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

/// The pack a file belongs to is its first path component under the root.
/// Top-level files belong to no pack and carry no tags.
fn pack_tag(relative: &Path) -> Option<Vec<String>> {
    let mut components = relative.components();
    let first = components.next()?;
    components.next()?;

    match first {
        Component::Normal(pack) => pack.to_str().map(|p| vec![p.to_string()]),
        _ => None,
    }
}
