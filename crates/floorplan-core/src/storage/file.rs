//! File-based storage implementation.

use super::{BoxFuture, Storage, StorageError, StorageResult};
use crate::document::DesignDocument;
use std::fs;
use std::path::{Path, PathBuf};

/// Stores designs as JSON files in a directory.
pub struct FileStorage {
    /// Base directory for design files.
    base_path: PathBuf,
}

impl FileStorage {
    /// Create a new file storage with the given base directory.
    ///
    /// Creates the directory if it doesn't exist.
    pub fn new(base_path: PathBuf) -> StorageResult<Self> {
        if !base_path.exists() {
            fs::create_dir_all(&base_path).map_err(|e| {
                StorageError::Io(format!("Failed to create storage directory: {}", e))
            })?;
        }
        Ok(Self { base_path })
    }

    /// Directory used when none is configured.
    ///
    /// On Linux: `~/.local/share/floorplan/designs/`
    pub fn default_path() -> StorageResult<PathBuf> {
        let base = dirs::data_local_dir()
            .or_else(dirs::home_dir)
            .ok_or_else(|| StorageError::Io("Could not determine home directory".to_string()))?;
        Ok(base.join("floorplan").join("designs"))
    }

    /// Create file storage in the default location.
    pub fn default_location() -> StorageResult<Self> {
        Self::new(Self::default_path()?)
    }

    /// File name a design is stored under.
    ///
    /// Anything outside `[A-Za-z0-9_-]` in the stem is replaced so names
    /// cannot escape the base directory.
    pub fn normalize_file_name(file_name: &str) -> String {
        let stem = file_name.strip_suffix(".json").unwrap_or(file_name);
        let safe_stem: String = stem
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
            .collect();
        format!("{}.json", safe_stem)
    }

    fn design_path(&self, file_name: &str) -> PathBuf {
        self.base_path.join(Self::normalize_file_name(file_name))
    }

    /// Get the base path.
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }
}

impl Storage for FileStorage {
    fn save_as(
        &self,
        file_name: &str,
        document: &DesignDocument,
    ) -> BoxFuture<'_, StorageResult<()>> {
        let path = self.design_path(file_name);
        let json = match document.to_json() {
            Ok(j) => j,
            Err(e) => {
                return Box::pin(async move { Err(StorageError::Serialization(e.to_string())) });
            }
        };

        Box::pin(async move {
            fs::write(&path, json).map_err(|e| {
                StorageError::Io(format!("Failed to write {}: {}", path.display(), e))
            })?;
            log::info!("Saved design to {}", path.display());
            Ok(())
        })
    }

    fn load(&self, file_name: &str) -> BoxFuture<'_, StorageResult<DesignDocument>> {
        let path = self.design_path(file_name);
        let name = file_name.to_string();

        Box::pin(async move {
            if !path.exists() {
                return Err(StorageError::NotFound(name));
            }

            let json = fs::read_to_string(&path).map_err(|e| {
                StorageError::Io(format!("Failed to read {}: {}", path.display(), e))
            })?;

            DesignDocument::from_json(&json).map_err(|e| {
                StorageError::Serialization(format!("Failed to parse {}: {}", path.display(), e))
            })
        })
    }

    fn list(&self) -> BoxFuture<'_, StorageResult<Vec<String>>> {
        let base = self.base_path.clone();

        Box::pin(async move {
            if !base.exists() {
                return Ok(vec![]);
            }

            let entries = fs::read_dir(&base)
                .map_err(|e| StorageError::Io(format!("Failed to read directory: {}", e)))?;

            let mut names: Vec<String> = entries
                .flatten()
                .map(|entry| entry.path())
                .filter(|path| path.extension().is_some_and(|e| e == "json"))
                .filter_map(|path| path.file_name()?.to_str().map(str::to_string))
                .collect();
            names.sort();
            Ok(names)
        })
    }

    fn exists(&self, file_name: &str) -> BoxFuture<'_, StorageResult<bool>> {
        let path = self.design_path(file_name);
        Box::pin(async move { Ok(path.exists()) })
    }
}
