//! Persistent key-value slot holding the best score.

use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};

use crate::constants::{HIGH_SCORE_KEY, SCORES_FILE};
use crate::utils::persistence::{load_json_at, save_json_at, skydash_dir};

/// A tiny string key-value store that survives restarts.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> io::Result<()>;
    fn remove(&mut self, key: &str) -> io::Result<()>;

    /// Whether writes outlive the process.
    fn is_persistent(&self) -> bool {
        true
    }
}

/// Read the stored best score, treating a missing or malformed value as zero.
pub fn load_best_score(store: &dyn KeyValueStore) -> u32 {
    store
        .get(HIGH_SCORE_KEY)
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(0)
}

/// Overwrite the stored best score.
pub fn save_best_score(store: &mut dyn KeyValueStore, score: u32) -> io::Result<()> {
    store.set(HIGH_SCORE_KEY, &score.to_string())
}

/// JSON-file backed store. Every write flushes the whole map to disk.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl JsonFileStore {
    /// Open (or lazily create) a store at `path`.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = load_json_at(&path);
        Self { path, entries }
    }

    /// Open the store in ~/.skydash/.
    pub fn open_default() -> io::Result<Self> {
        Ok(Self::open(skydash_dir()?.join(SCORES_FILE)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> io::Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        save_json_at(&self.path, &self.entries)
    }

    fn remove(&mut self, key: &str) -> io::Result<()> {
        if self.entries.remove(key).is_some() {
            save_json_at(&self.path, &self.entries)?;
        }
        Ok(())
    }
}

/// In-memory store for tests and for running without a home directory.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> io::Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> io::Result<()> {
        self.entries.remove(key);
        Ok(())
    }

    fn is_persistent(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_best_defaults_to_zero() {
        let store = MemoryStore::default();
        assert_eq!(load_best_score(&store), 0);
    }

    #[test]
    fn test_malformed_best_defaults_to_zero() {
        let mut store = MemoryStore::default();
        store.set(HIGH_SCORE_KEY, "lots").unwrap();
        assert_eq!(load_best_score(&store), 0);
    }

    #[test]
    fn test_file_store_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SCORES_FILE);

        let mut store = JsonFileStore::open(&path);
        assert_eq!(load_best_score(&store), 0);
        save_best_score(&mut store, 42).unwrap();

        let reopened = JsonFileStore::open(&path);
        assert_eq!(load_best_score(&reopened), 42);
    }

    #[test]
    fn test_only_file_store_is_persistent() {
        let dir = tempfile::tempdir().unwrap();
        assert!(JsonFileStore::open(dir.path().join(SCORES_FILE)).is_persistent());
        assert!(!MemoryStore::default().is_persistent());
    }

    #[test]
    fn test_file_store_remove() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SCORES_FILE);

        let mut store = JsonFileStore::open(&path);
        save_best_score(&mut store, 7).unwrap();
        store.remove(HIGH_SCORE_KEY).unwrap();

        let reopened = JsonFileStore::open(&path);
        assert_eq!(load_best_score(&reopened), 0);
    }
}
