//! Registry store - atomically-replaceable custom emoji table
//!
//! Readers load the current snapshot through an atomic swap cell and never
//! block. Writers build a fresh table off to the side, serialized on a single
//! lock, and publish it in one store; a reader sees either the table before a
//! reload or the table after, never a mix.

use std::collections::BTreeSet;
use std::sync::{Arc, Mutex, PoisonError};

use arc_swap::ArcSwap;
use indexmap::IndexMap;
use thiserror::Error;

use super::loader::{EmojiLoader, LoaderError};
use super::sanitize::Sanitize;
use super::types::{EmojiEntry, RawEmoji};

/// Failure surfaced by [`EmojiRegistry::reload`]. The previously published
/// snapshot stays intact when this is returned.
#[derive(Debug, Error)]
pub enum ReloadError {
    #[error("emoji loader failed: {0}")]
    Loader(#[from] LoaderError),
}

/// One immutable, fully-built registry table.
#[derive(Debug, Clone, Default)]
pub struct RegistrySnapshot {
    entries: IndexMap<String, EmojiEntry>,
}

impl RegistrySnapshot {
    fn from_raw(raw: Vec<RawEmoji>, sanitizer: &dyn Sanitize) -> Self {
        let mut entries = IndexMap::with_capacity(raw.len());
        for emoji in raw {
            let tags: BTreeSet<String> = emoji.tags.unwrap_or_default().into_iter().collect();
            let entry = EmojiEntry {
                sanitized_name: sanitizer.sanitize(&emoji.name),
                sanitized_locator: sanitizer.sanitize(&emoji.locator),
                name: emoji.name,
                locator: emoji.locator,
                tags,
            };
            // Within one load a later entry overwrites an earlier one with
            // the same name; the name keeps its first insertion position.
            entries.insert(entry.name.clone(), entry);
        }
        Self { entries }
    }

    #[inline]
    pub fn get(&self, name: &str) -> Option<&EmojiEntry> {
        self.entries.get(name)
    }

    /// Entries in the snapshot's internal key order.
    pub fn iter(&self) -> impl Iterator<Item = &EmojiEntry> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Concurrently-readable store of custom emoji, rebuilt wholesale on reload.
pub struct EmojiRegistry {
    snap: ArcSwap<RegistrySnapshot>,
    loader: Box<dyn EmojiLoader + Send + Sync>,
    sanitizer: Box<dyn Sanitize + Send + Sync>,
    /// Serializes load/reload/clear so the published table is always the
    /// result of exactly one writer.
    write_lock: Mutex<()>,
}

impl EmojiRegistry {
    /// Creates an empty registry around a loader and a sanitizer. No loading
    /// happens until [`reload`](Self::reload) is called.
    pub fn new<L, S>(loader: L, sanitizer: S) -> Self
    where
        L: EmojiLoader + Send + Sync + 'static,
        S: Sanitize + Send + Sync + 'static,
    {
        Self {
            snap: ArcSwap::from_pointee(RegistrySnapshot::default()),
            loader: Box::new(loader),
            sanitizer: Box::new(sanitizer),
            write_lock: Mutex::new(()),
        }
    }

    /// Replaces the published table with one built from `raw`.
    pub fn load(&self, raw: Vec<RawEmoji>) {
        let _guard = self.lock_writer();
        let snapshot = RegistrySnapshot::from_raw(raw, self.sanitizer.as_ref());
        self.snap.store(Arc::new(snapshot));
    }

    /// Invokes the loader and replaces the published table with its output.
    /// On loader failure the previous table stays published and the error is
    /// returned. Returns the number of entries in the new table.
    pub fn reload(&self) -> Result<usize, ReloadError> {
        let _guard = self.lock_writer();
        let raw = match self.loader.load() {
            Ok(raw) => raw,
            Err(err) => {
                log::warn!("emoji reload failed, keeping previous table: {err}");
                return Err(ReloadError::Loader(err));
            }
        };
        let snapshot = RegistrySnapshot::from_raw(raw, self.sanitizer.as_ref());
        let count = snapshot.len();
        self.snap.store(Arc::new(snapshot));
        log::debug!("emoji registry reloaded, {count} entries");
        Ok(count)
    }

    /// Replaces the published table with an empty one.
    pub fn clear(&self) {
        let _guard = self.lock_writer();
        self.snap.store(Arc::new(RegistrySnapshot::default()));
    }

    /// Locator for `name`, if present.
    pub fn get(&self, name: &str) -> Option<String> {
        self.snap.load().get(name).map(|entry| entry.locator.clone())
    }

    pub fn exists(&self, name: &str) -> bool {
        self.snap.load().get(name).is_some()
    }

    /// All entries of the current snapshot, in its internal key order. The
    /// order is stable only within one snapshot.
    pub fn list_all(&self) -> Vec<EmojiEntry> {
        self.snap.load().iter().cloned().collect()
    }

    /// The current snapshot, for callers needing a coherent view across
    /// several reads.
    pub fn snapshot(&self) -> Arc<RegistrySnapshot> {
        self.snap.load_full()
    }

    pub fn len(&self) -> usize {
        self.snap.load().len()
    }

    pub fn is_empty(&self) -> bool {
        self.snap.load().is_empty()
    }

    fn lock_writer(&self) -> std::sync::MutexGuard<'_, ()> {
        // A poisoned lock only means another writer panicked mid-build; the
        // published snapshot is still whole, so writing may continue.
        self.write_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::sanitize::{Passthrough, StripMarkup};
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::thread;

    struct StaticLoader(Vec<RawEmoji>);

    impl EmojiLoader for StaticLoader {
        fn load(&self) -> Result<Vec<RawEmoji>, LoaderError> {
            Ok(self.0.clone())
        }
    }

    struct FailingLoader;

    impl EmojiLoader for FailingLoader {
        fn load(&self) -> Result<Vec<RawEmoji>, LoaderError> {
            Err(LoaderError::MissingRoot(PathBuf::from("/gone")))
        }
    }

    fn raw(name: &str, locator: &str, tags: &[&str]) -> RawEmoji {
        RawEmoji {
            name: name.to_string(),
            locator: locator.to_string(),
            tags: if tags.is_empty() {
                None
            } else {
                Some(tags.iter().map(|t| t.to_string()).collect())
            },
        }
    }

    #[test]
    fn test_load_round_trip() {
        let registry = EmojiRegistry::new(StaticLoader(Vec::new()), Passthrough);
        registry.load(vec![raw("smile", "/e/smile.png", &["happy"])]);

        assert_eq!(registry.get("smile"), Some("/e/smile.png".to_string()));
        assert!(registry.exists("smile"));
        assert!(!registry.exists("frown"));

        let all = registry.list_all();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].name, "smile");
        assert_eq!(all[0].locator, "/e/smile.png");
        assert!(all[0].tags.contains("happy"));
    }

    #[test]
    fn test_missing_tags_default_to_empty_set() {
        let registry = EmojiRegistry::new(StaticLoader(Vec::new()), Passthrough);
        registry.load(vec![raw("plain", "/e/plain.png", &[])]);

        assert!(registry.list_all()[0].tags.is_empty());
    }

    #[test]
    fn test_duplicate_name_last_write_wins() {
        let registry = EmojiRegistry::new(StaticLoader(Vec::new()), Passthrough);
        registry.load(vec![
            raw("blob", "/v1/blob.png", &[]),
            raw("other", "/e/other.png", &[]),
            raw("blob", "/v2/blob.png", &[]),
        ]);

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.get("blob"), Some("/v2/blob.png".to_string()));
        // The duplicate keeps its original table position.
        assert_eq!(registry.list_all()[0].name, "blob");
    }

    #[test]
    fn test_sanitizer_is_applied_to_name_and_locator() {
        let registry = EmojiRegistry::new(StaticLoader(Vec::new()), StripMarkup);
        registry.load(vec![raw("<b>blob</b>", "/e/<i>blob</i>.png", &[])]);

        let all = registry.list_all();
        assert_eq!(all[0].name, "<b>blob</b>");
        assert_eq!(all[0].sanitized_name, "blob");
        assert_eq!(all[0].sanitized_locator, "/e/blob.png");
    }

    #[test]
    fn test_reload_replaces_table_wholesale() {
        let registry = EmojiRegistry::new(
            StaticLoader(vec![raw("fresh", "/e/fresh.png", &[])]),
            Passthrough,
        );
        registry.load(vec![raw("stale", "/e/stale.png", &[])]);

        let count = registry.reload().unwrap();

        assert_eq!(count, 1);
        assert!(registry.exists("fresh"));
        assert!(!registry.exists("stale"));
    }

    #[test]
    fn test_failed_reload_preserves_previous_table() {
        let registry = EmojiRegistry::new(FailingLoader, Passthrough);
        registry.load(vec![raw("keep", "/e/keep.png", &[])]);
        let before = registry.list_all();

        assert!(registry.reload().is_err());

        assert_eq!(registry.list_all(), before);
        assert_eq!(registry.get("keep"), Some("/e/keep.png".to_string()));
    }

    #[test]
    fn test_clear_empties_the_table() {
        let registry = EmojiRegistry::new(StaticLoader(Vec::new()), Passthrough);
        registry.load(vec![raw("gone", "/e/gone.png", &[])]);

        registry.clear();

        assert!(registry.is_empty());
        assert!(registry.list_all().is_empty());
    }

    #[test]
    fn test_snapshot_is_coherent_across_reads() {
        let registry = EmojiRegistry::new(StaticLoader(Vec::new()), Passthrough);
        registry.load(vec![raw("pinned", "/e/pinned.png", &[])]);

        let snapshot = registry.snapshot();
        registry.clear();

        // The held snapshot still sees the pre-clear table.
        assert_eq!(snapshot.len(), 1);
        assert!(snapshot.get("pinned").is_some());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_readers_never_observe_a_torn_table() {
        let registry = Arc::new(EmojiRegistry::new(StaticLoader(Vec::new()), Passthrough));
        let small: Vec<RawEmoji> = (0..2).map(|i| raw(&format!("s{i}"), "/e/s.png", &[])).collect();
        let large: Vec<RawEmoji> = (0..64).map(|i| raw(&format!("l{i}"), "/e/l.png", &[])).collect();
        registry.load(small.clone());

        let stop = Arc::new(AtomicBool::new(false));
        let mut readers = Vec::new();
        for _ in 0..4 {
            let registry = Arc::clone(&registry);
            let stop = Arc::clone(&stop);
            readers.push(thread::spawn(move || {
                while !stop.load(Ordering::Relaxed) {
                    let len = registry.snapshot().len();
                    assert!(len == 2 || len == 64, "torn table of {len} entries");
                }
            }));
        }

        for _ in 0..200 {
            registry.load(large.clone());
            registry.load(small.clone());
        }
        stop.store(true, Ordering::Relaxed);

        for reader in readers {
            reader.join().unwrap();
        }
    }
}
