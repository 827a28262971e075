//! Key-value persistence for engagement state.
//!
//! Everything persisted is an independently keyed string: the hint flag,
//! the current-viewer blob, and one JSON id array per viewer's favorites.

use crate::error::{Result, StoreError};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, warn};

/// Synchronous string store. Last write wins.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;

    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    fn remove(&mut self, key: &str) -> Result<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &mut S {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        (**self).remove(key)
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        (**self).remove(key)
    }
}

// =============================================================================
// Memory Store
// =============================================================================

/// Store that lives only as long as the process
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}

// =============================================================================
// File Store
// =============================================================================

/// Store backed by one JSON object of key to string value.
///
/// The file is read once on open and rewritten in full on every write. The
/// new contents go to a sibling temporary file that is then renamed over
/// the store, so an interrupted write leaves the previous contents intact.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FileStore {
    /// Open the store at `path`. A missing or blank file is an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let entries = if path.exists() {
            let raw = fs::read_to_string(&path)?;
            if raw.trim().is_empty() {
                BTreeMap::new()
            } else {
                serde_json::from_str(&raw)?
            }
        } else {
            BTreeMap::new()
        };

        debug!("Opened store {} with {} keys", path.display(), entries.len());
        Ok(Self { path, entries })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir)?;

        let mut staged = NamedTempFile::new_in(dir)?;
        serde_json::to_writer_pretty(staged.as_file_mut(), &self.entries)?;
        staged.as_file().sync_all()?;
        staged.persist(&self.path).map_err(|e| e.error)?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        self.flush()
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        if self.entries.remove(key).is_some() {
            self.flush()?;
        }
        Ok(())
    }
}

// =============================================================================
// Resilient Store
// =============================================================================

/// Wraps a store so that its failures never reach the caller.
///
/// Every value read or written is mirrored in memory. The first error from
/// the primary store logs a warning and stops all writes to it; from then
/// on writes and removals live only in the mirror. Degraded reads prefer
/// the mirror, treat keys removed in this session as absent, and otherwise
/// still consult the primary, so a store that can be read but not written
/// keeps serving what it already holds.
#[derive(Debug)]
pub struct ResilientStore<S> {
    primary: S,
    mirror: MemoryStore,
    /// Keys removed through this wrapper
    removed: HashSet<String>,
    degraded: bool,
}

impl<S: KeyValueStore> ResilientStore<S> {
    pub fn new(primary: S) -> Self {
        Self {
            primary,
            mirror: MemoryStore::new(),
            removed: HashSet::new(),
            degraded: false,
        }
    }

    /// True once the primary store has failed
    pub fn is_degraded(&self) -> bool {
        self.degraded
    }

    pub fn get(&mut self, key: &str) -> Option<String> {
        if !self.degraded {
            match self.primary.get(key) {
                Ok(Some(value)) => {
                    self.mirror.entries.insert(key.to_string(), value.clone());
                    return Some(value);
                }
                Ok(None) => {
                    self.mirror.entries.remove(key);
                    return None;
                }
                Err(e) => self.degrade(&e),
            }
        }

        if let Some(value) = self.mirror.entries.get(key) {
            return Some(value.clone());
        }
        if self.removed.contains(key) {
            return None;
        }
        match self.primary.get(key) {
            Ok(Some(value)) => {
                self.mirror.entries.insert(key.to_string(), value.clone());
                Some(value)
            }
            Ok(None) => None,
            Err(e) => {
                debug!("Degraded read of {} failed: {}", key, e);
                None
            }
        }
    }

    pub fn set(&mut self, key: &str, value: &str) {
        self.mirror.entries.insert(key.to_string(), value.to_string());
        self.removed.remove(key);
        if !self.degraded {
            if let Err(e) = self.primary.set(key, value) {
                self.degrade(&e);
            }
        }
    }

    pub fn remove(&mut self, key: &str) {
        self.mirror.entries.remove(key);
        self.removed.insert(key.to_string());
        if !self.degraded {
            if let Err(e) = self.primary.remove(key) {
                self.degrade(&e);
            }
        }
    }

    fn degrade(&mut self, error: &StoreError) {
        warn!("Persistence unavailable, keeping state in memory: {}", error);
        self.degraded = true;
    }
}


#[cfg(test)]
mod tests {
    use super::testing::{BrokenStore, ReadOnlyStore};
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_memory_store_basic() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get("a").unwrap(), None);

        store.set("a", "1").unwrap();
        assert_eq!(store.get("a").unwrap().as_deref(), Some("1"));

        store.set("a", "2").unwrap();
        assert_eq!(store.get("a").unwrap().as_deref(), Some("2"));

        store.remove("a").unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_file_store_persists_across_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("state").join("store.json");

        let mut store = FileStore::open(&path).unwrap();
        store.set("favorites:1", r#"["1","3"]"#).unwrap();
        store.set("hint", "true").unwrap();
        store.remove("hint").unwrap();
        drop(store);

        let reopened = FileStore::open(&path).unwrap();
        assert_eq!(
            reopened.get("favorites:1").unwrap().as_deref(),
            Some(r#"["1","3"]"#)
        );
        assert_eq!(reopened.get("hint").unwrap(), None);
    }

    #[test]
    fn test_file_store_replaces_file_without_leftovers() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("store.json");
        fs::write(&path, r#"{"old": "value"}"#).unwrap();

        let mut store = FileStore::open(&path).unwrap();
        for i in 0..5 {
            store.set(&format!("key{}", i), "v").unwrap();
        }

        let names: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name())
            .collect();
        assert_eq!(names, vec![std::ffi::OsString::from("store.json")]);

        let raw = fs::read_to_string(&path).unwrap();
        let on_disk: BTreeMap<String, String> = serde_json::from_str(&raw).unwrap();
        assert_eq!(on_disk.len(), 6);
        assert_eq!(on_disk["old"], "value");
    }

    #[test]
    fn test_file_store_missing_and_blank_files_are_empty() {
        let dir = TempDir::new().unwrap();
        let missing = FileStore::open(dir.path().join("nope.json")).unwrap();
        assert_eq!(missing.get("x").unwrap(), None);

        let blank = dir.path().join("blank.json");
        fs::write(&blank, "  \n").unwrap();
        assert!(FileStore::open(&blank).is_ok());
    }

    #[test]
    fn test_file_store_rejects_malformed_contents() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("store.json");
        fs::write(&path, "[1, 2, 3]").unwrap();

        let result = FileStore::open(&path);
        assert!(matches!(result, Err(StoreError::Json(_))));
    }

    #[test]
    fn test_resilient_store_passes_through_healthy_store() {
        let mut inner = MemoryStore::new();
        inner.set("seeded", "yes").unwrap();

        let mut store = ResilientStore::new(&mut inner);
        assert_eq!(store.get("seeded").as_deref(), Some("yes"));
        store.set("k", "v");
        assert!(!store.is_degraded());
        drop(store);

        assert_eq!(inner.get("k").unwrap().as_deref(), Some("v"));
    }

    #[test]
    fn test_resilient_store_degrades_to_memory() {
        let mut store = ResilientStore::new(BrokenStore);
        assert_eq!(store.get("k"), None);
        assert!(store.is_degraded());

        store.set("k", "v");
        assert_eq!(store.get("k").as_deref(), Some("v"));

        store.remove("k");
        assert_eq!(store.get("k"), None);
    }

    #[test]
    fn test_degraded_reads_still_see_stored_values() {
        let mut store = ResilientStore::new(ReadOnlyStore::with(&[
            ("hint", "true"),
            ("favorites:2", r#"["7"]"#),
            ("stale", "x"),
        ]));

        store.set("favorites:1", r#"["1"]"#);
        assert!(store.is_degraded());

        // Never read before degrading, still served from the primary
        assert_eq!(store.get("hint").as_deref(), Some("true"));
        assert_eq!(store.get("favorites:2").as_deref(), Some(r#"["7"]"#));
        assert_eq!(store.get("favorites:1").as_deref(), Some(r#"["1"]"#));
        assert_eq!(store.get("missing"), None);
    }

    #[test]
    fn test_degraded_writes_and_removals_win_over_primary() {
        let mut store = ResilientStore::new(ReadOnlyStore::with(&[("a", "old"), ("b", "old")]));

        store.set("a", "new");
        assert!(store.is_degraded());
        assert_eq!(store.get("a").as_deref(), Some("new"));

        store.remove("b");
        assert_eq!(store.get("b"), None);

        store.set("b", "again");
        assert_eq!(store.get("b").as_deref(), Some("again"));
    }
}
