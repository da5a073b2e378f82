use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// A small durable key-value store holding whole serialized blobs.
///
/// Every write replaces the stored value for the key.
pub trait OverlayStore {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn write(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to read store entry at {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to write store entry at {path}: {source}")]
    Write {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to serialize overlay: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("storage backend unavailable: {0}")]
    Unavailable(String),
}

impl PartialEq for StoreError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Read { path: left, .. }, Self::Read { path: right, .. }) => left == right,
            (Self::Write { path: left, .. }, Self::Write { path: right, .. }) => left == right,
            (Self::Serialize(_), Self::Serialize(_)) => true,
            (Self::Unavailable(left), Self::Unavailable(right)) => left == right,
            _ => false,
        }
    }
}

impl Eq for StoreError {}

/// Process-local store, used by tests and as a fallback when no durable
/// backend is available.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(key: &str, value: &str) -> Self {
        let mut entries = HashMap::new();
        entries.insert(key.to_string(), value.to_string());
        Self { entries }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }
}

impl OverlayStore for MemoryStore {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Stores each key as `<dir>/<key>.json`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl OverlayStore for FileStore {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }

        fs::read_to_string(&path)
            .map(Some)
            .map_err(|source| StoreError::Read {
                path: path.display().to_string(),
                source,
            })
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let path = self.path_for(key);

        fs::create_dir_all(&self.dir).map_err(|source| StoreError::Write {
            path: self.dir.display().to_string(),
            source,
        })?;

        fs::write(&path, value).map_err(|source| StoreError::Write {
            path: path.display().to_string(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_replaces_values() {
        let mut store = MemoryStore::new();
        assert_eq!(store.read("edits"), Ok(None));

        store.write("edits", "{}").expect("write should succeed");
        store.write("edits", "{\"1\":{}}").expect("write should succeed");

        assert_eq!(store.read("edits"), Ok(Some("{\"1\":{}}".to_string())));
    }

    #[test]
    fn file_store_missing_key_reads_as_none() {
        let root = tempfile::tempdir().expect("temporary directory should be created");
        let store = FileStore::new(root.path());

        assert_eq!(store.read("edits"), Ok(None));
    }

    #[test]
    fn file_store_creates_directory_and_persists() {
        let root = tempfile::tempdir().expect("temporary directory should be created");
        let nested = root.path().join("data").join("elemquiz");
        let mut store = FileStore::new(&nested);

        store.write("edits", "{}").expect("write should create directories");

        let reopened = FileStore::new(&nested);
        assert_eq!(reopened.read("edits"), Ok(Some("{}".to_string())));
        assert!(nested.join("edits.json").exists());
    }
}
