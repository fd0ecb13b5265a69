//! Origin-scoped key/value persistence.
//!
//! [`FileStore`] keeps one JSON object per origin:
//!
//! ```text
//! {dir}/
//! +-- puffin-docs.json    # {"puffin-docs-theme": "dark"}
//! +-- other-site.json
//! ```

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

/// Error returned by [`KeyValueStore`] backends.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Store unavailable: {0}")]
    Unavailable(String),
    #[error("Cannot access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid store file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// String key/value persistence scoped to one origin.
pub trait KeyValueStore: Send + Sync {
    /// Read a value. Missing keys are `Ok(None)`.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Write a value, replacing any previous one.
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// In-memory store.
///
/// Can be constructed unavailable to simulate blocked persistence.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: RwLock<HashMap<String, String>>,
    unavailable: bool,
}

impl MemoryStore {
    /// Create an empty, available store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store whose every operation fails.
    #[must_use]
    pub fn unavailable() -> Self {
        Self {
            values: RwLock::default(),
            unavailable: true,
        }
    }

    /// Pre-populate a value.
    #[must_use]
    pub fn with_value(self, key: impl Into<String>, value: impl Into<String>) -> Self {
        if let Ok(mut values) = self.values.write() {
            values.insert(key.into(), value.into());
        }
        self
    }

    fn check(&self) -> Result<(), StoreError> {
        if self.unavailable {
            return Err(StoreError::Unavailable("memory store disabled".to_owned()));
        }
        Ok(())
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.check()?;
        let values = self
            .values
            .read()
            .map_err(|_| StoreError::Unavailable("lock poisoned".to_owned()))?;
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.check()?;
        let mut values = self
            .values
            .write()
            .map_err(|_| StoreError::Unavailable("lock poisoned".to_owned()))?;
        values.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

/// File-backed store: one JSON object file per origin.
///
/// Every operation reads the file afresh, so separate processes see each
/// other's writes (last writer wins).
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Create a store for `origin` under `dir`. Nothing is touched until first use.
    #[must_use]
    pub fn new(dir: &Path, origin: &str) -> Self {
        Self {
            path: dir.join(format!("{origin}.json")),
        }
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<BTreeMap<String, String>, StoreError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(source) => {
                return Err(StoreError::Io {
                    path: self.path.clone(),
                    source,
                });
            }
        };
        serde_json::from_str(&content).map_err(|source| StoreError::Parse {
            path: self.path.clone(),
            source,
        })
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.load()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        // A corrupt file is replaced rather than blocking every later write
        let mut values = match self.load() {
            Ok(values) => values,
            Err(StoreError::Parse { path, source }) => {
                tracing::warn!(path = %path.display(), error = %source, "Replacing corrupt store file");
                BTreeMap::new()
            }
            Err(e) => return Err(e),
        };
        values.insert(key.to_owned(), value.to_owned());

        let io_err = |source: std::io::Error| StoreError::Io {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        let json = serde_json::to_string_pretty(&values).map_err(|source| StoreError::Parse {
            path: self.path.clone(),
            source,
        })?;
        fs::write(&self.path, json).map_err(io_err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_memory_store_roundtrip() {
        let store = MemoryStore::new();
        assert_eq!(store.get("k").unwrap(), None);
        store.set("k", "v").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));
    }

    #[test]
    fn test_memory_store_unavailable() {
        let store = MemoryStore::unavailable();
        assert!(matches!(store.get("k"), Err(StoreError::Unavailable(_))));
        assert!(store.set("k", "v").is_err());
    }

    #[test]
    fn test_file_store_missing_file_is_empty() {
        let tmp = TempDir::new().unwrap();
        let store = FileStore::new(tmp.path(), "site");
        assert_eq!(store.get("theme").unwrap(), None);
        assert!(!store.path().exists());
    }

    #[test]
    fn test_file_store_persists_across_instances() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("nested/store");

        FileStore::new(&dir, "site").set("theme", "light").unwrap();
        FileStore::new(&dir, "site").set("other", "x").unwrap();

        let store = FileStore::new(&dir, "site");
        assert_eq!(store.get("theme").unwrap().as_deref(), Some("light"));
        assert_eq!(store.get("other").unwrap().as_deref(), Some("x"));
        assert!(dir.join("site.json").exists());
    }

    #[test]
    fn test_file_store_origins_are_isolated() {
        let tmp = TempDir::new().unwrap();
        FileStore::new(tmp.path(), "a").set("theme", "light").unwrap();
        assert_eq!(FileStore::new(tmp.path(), "b").get("theme").unwrap(), None);
    }

    #[test]
    fn test_file_store_corrupt_file() {
        let tmp = TempDir::new().unwrap();
        let store = FileStore::new(tmp.path(), "site");
        fs::write(store.path(), "not json").unwrap();

        assert!(matches!(store.get("theme"), Err(StoreError::Parse { .. })));

        store.set("theme", "dark").unwrap();
        assert_eq!(store.get("theme").unwrap().as_deref(), Some("dark"));
    }

    #[test]
    fn test_file_store_unwritable_dir() {
        let tmp = TempDir::new().unwrap();
        let blocker = tmp.path().join("file");
        fs::write(&blocker, "").unwrap();

        // Parent "directory" is a regular file
        let store = FileStore::new(&blocker, "site");
        assert!(matches!(store.set("theme", "dark"), Err(StoreError::Io { .. })));
    }
}
