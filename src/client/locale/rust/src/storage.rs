/* src/client/locale/rust/src/storage.rs */

//! Durable per-origin string key/value stores with browser local-storage
//! semantics: synchronous, and a key that was never written reads as `None`.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::errors::StorageError;

pub trait KeyValueStore {
  fn get(&self, key: &str) -> Option<String>;
  fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
  fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for &mut T {
  fn get(&self, key: &str) -> Option<String> {
    (**self).get(key)
  }

  fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
    (**self).set(key, value)
  }

  fn remove(&mut self, key: &str) -> Result<(), StorageError> {
    (**self).remove(key)
  }
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Box<T> {
  fn get(&self, key: &str) -> Option<String> {
    (**self).get(key)
  }

  fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
    (**self).set(key, value)
  }

  fn remove(&mut self, key: &str) -> Result<(), StorageError> {
    (**self).remove(key)
  }
}

/// Process-local store; contents vanish with the value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryStore {
  entries: BTreeMap<String, String>,
}

impl MemoryStore {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_entries<I, K, V>(entries: I) -> Self
  where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
  {
    Self { entries: entries.into_iter().map(|(k, v)| (k.into(), v.into())).collect() }
  }

  pub fn entries(&self) -> &BTreeMap<String, String> {
    &self.entries
  }
}

impl KeyValueStore for MemoryStore {
  fn get(&self, key: &str) -> Option<String> {
    self.entries.get(key).cloned()
  }

  fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
    self.entries.insert(key.to_string(), value.to_string());
    Ok(())
  }

  fn remove(&mut self, key: &str) -> Result<(), StorageError> {
    self.entries.remove(key);
    Ok(())
  }
}

/// Write-through store backed by a single JSON object file.
///
/// Reads are served from memory. Every mutation rewrites the whole file; a
/// failed write leaves the in-memory entry updated and reports `Io`.
#[derive(Debug)]
pub struct FileStore {
  path: PathBuf,
  entries: BTreeMap<String, String>,
}

impl FileStore {
  /// Open (or lazily create) the store at `path`. A missing file is an empty
  /// store; an unreadable or corrupt one is also treated as empty.
  pub fn open(path: impl Into<PathBuf>) -> Self {
    let path = path.into();
    let entries = match load_entries(&path) {
      Ok(entries) => entries,
      Err(err) => {
        tracing::warn!(path = %path.display(), %err, "discarding unreadable preference file");
        BTreeMap::new()
      }
    };
    Self { path, entries }
  }

  pub fn path(&self) -> &Path {
    &self.path
  }

  fn flush(&self) -> Result<(), StorageError> {
    if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
      std::fs::create_dir_all(parent)
        .map_err(|e| StorageError::Io(format!("create {}: {e}", parent.display())))?;
    }
    let json = serde_json::to_string_pretty(&self.entries)
      .map_err(|e| StorageError::Io(format!("encode: {e}")))?;
    std::fs::write(&self.path, json)
      .map_err(|e| StorageError::Io(format!("write {}: {e}", self.path.display())))
  }
}

fn load_entries(path: &Path) -> Result<BTreeMap<String, String>, StorageError> {
  let content = match std::fs::read_to_string(path) {
    Ok(content) => content,
    Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
    Err(e) => return Err(StorageError::Unavailable(format!("read {}: {e}", path.display()))),
  };
  if content.trim().is_empty() {
    return Ok(BTreeMap::new());
  }
  serde_json::from_str(&content).map_err(|e| StorageError::Corrupt(e.to_string()))
}

impl KeyValueStore for FileStore {
  fn get(&self, key: &str) -> Option<String> {
    self.entries.get(key).cloned()
  }

  fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
    self.entries.insert(key.to_string(), value.to_string());
    self.flush()
  }

  fn remove(&mut self, key: &str) -> Result<(), StorageError> {
    if self.entries.remove(key).is_none() {
      return Ok(());
    }
    self.flush()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn memory_absent_key_is_none() {
    let store = MemoryStore::new();
    assert_eq!(store.get("missing"), None);
  }

  #[test]
  fn memory_set_get_remove() {
    let mut store = MemoryStore::new();
    store.set("k", "v").unwrap();
    assert_eq!(store.get("k").as_deref(), Some("v"));
    store.remove("k").unwrap();
    assert_eq!(store.get("k"), None);
    // removing again is fine
    store.remove("k").unwrap();
  }

  #[test]
  fn file_store_persists_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("prefs.json");
    {
      let mut store = FileStore::open(&path);
      store.set("preferred-language", "zh-TW").unwrap();
      store.set("preferred-currency", "TWD").unwrap();
      store.remove("preferred-currency").unwrap();
    }
    let store = FileStore::open(&path);
    assert_eq!(store.get("preferred-language").as_deref(), Some("zh-TW"));
    assert_eq!(store.get("preferred-currency"), None);
  }

  #[test]
  fn file_store_corrupt_file_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("prefs.json");
    std::fs::write(&path, "not json").unwrap();
    let mut store = FileStore::open(&path);
    assert_eq!(store.get("preferred-language"), None);
    // next write replaces the corrupt content
    store.set("preferred-language", "en").unwrap();
    let reopened = FileStore::open(&path);
    assert_eq!(reopened.get("preferred-language").as_deref(), Some("en"));
  }

  #[test]
  fn file_store_write_failure_keeps_memory() {
    let dir = tempfile::tempdir().unwrap();
    // parent is a regular file, so create_dir_all fails
    let blocker = dir.path().join("blocker");
    std::fs::write(&blocker, "").unwrap();
    let mut store = FileStore::open(blocker.join("prefs.json"));
    let err = store.set("preferred-language", "en").unwrap_err();
    assert!(matches!(err, StorageError::Io(_)));
    assert_eq!(store.get("preferred-language").as_deref(), Some("en"));
  }

  #[test]
  fn mut_ref_forwards() {
    fn write<S: KeyValueStore>(mut store: S) {
      store.set("k", "v").unwrap();
    }
    let mut inner = MemoryStore::new();
    write(&mut inner);
    assert_eq!(inner.get("k").as_deref(), Some("v"));
  }
}
