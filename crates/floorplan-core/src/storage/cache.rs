//! Local cache of the working design.

use super::{StorageError, StorageResult};
use crate::document::DesignDocument;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

/// Key-value cache holding designs between sessions.
pub trait LocalCache {
    /// Get the design stored under `key`, if any.
    fn get(&self, key: &str) -> StorageResult<Option<DesignDocument>>;

    /// Store a design under `key`.
    fn set(&mut self, key: &str, document: &DesignDocument) -> StorageResult<()>;
}

/// Cache kept in memory.
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: HashMap<String, DesignDocument>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LocalCache for MemoryCache {
    fn get(&self, key: &str) -> StorageResult<Option<DesignDocument>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, document: &DesignDocument) -> StorageResult<()> {
        self.entries.insert(key.to_string(), document.clone());
        Ok(())
    }
}

/// Cache storing one JSON file per key.
#[derive(Debug, Clone)]
pub struct FileCache {
    dir: PathBuf,
}

impl FileCache {
    /// Create a cache in `dir`, creating the directory if needed.
    pub fn new(dir: PathBuf) -> StorageResult<Self> {
        fs::create_dir_all(&dir)
            .map_err(|e| StorageError::Io(format!("Failed to create cache directory: {}", e)))?;
        Ok(Self { dir })
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        let safe_key: String = key
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
            .collect();
        self.dir.join(format!("{}.json", safe_key))
    }
}

impl LocalCache for FileCache {
    fn get(&self, key: &str) -> StorageResult<Option<DesignDocument>> {
        let path = self.entry_path(key);
        if !path.exists() {
            return Ok(None);
        }
        let json = fs::read_to_string(&path)
            .map_err(|e| StorageError::Io(format!("Failed to read {}: {}", path.display(), e)))?;
        DesignDocument::from_json(&json)
            .map(Some)
            .map_err(|e| StorageError::Serialization(e.to_string()))
    }

    fn set(&mut self, key: &str, document: &DesignDocument) -> StorageResult<()> {
        let path = self.entry_path(key);
        let json = document
            .to_json()
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        fs::write(&path, json)
            .map_err(|e| StorageError::Io(format!("Failed to write {}: {}", path.display(), e)))
    }
}
