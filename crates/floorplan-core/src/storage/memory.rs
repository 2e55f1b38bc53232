//! In-memory storage implementation.

use super::{BoxFuture, Storage, StorageError, StorageResult};
use crate::document::DesignDocument;
use std::collections::BTreeMap;
use std::sync::RwLock;

/// In-memory storage for testing and ephemeral use.
#[derive(Default)]
pub struct MemoryStorage {
    designs: RwLock<BTreeMap<String, DesignDocument>>,
}

impl MemoryStorage {
    /// Create a new empty memory storage.
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_error(e: impl std::fmt::Display) -> StorageError {
    StorageError::Other(format!("Lock error: {}", e))
}

impl Storage for MemoryStorage {
    fn save_as(
        &self,
        file_name: &str,
        document: &DesignDocument,
    ) -> BoxFuture<'_, StorageResult<()>> {
        let file_name = file_name.to_string();
        let document = document.clone();
        Box::pin(async move {
            let mut designs = self.designs.write().map_err(lock_error)?;
            designs.insert(file_name, document);
            Ok(())
        })
    }

    fn load(&self, file_name: &str) -> BoxFuture<'_, StorageResult<DesignDocument>> {
        let file_name = file_name.to_string();
        Box::pin(async move {
            let designs = self.designs.read().map_err(lock_error)?;
            designs
                .get(&file_name)
                .cloned()
                .ok_or(StorageError::NotFound(file_name))
        })
    }

    fn list(&self) -> BoxFuture<'_, StorageResult<Vec<String>>> {
        Box::pin(async move {
            let designs = self.designs.read().map_err(lock_error)?;
            Ok(designs.keys().cloned().collect())
        })
    }

    fn exists(&self, file_name: &str) -> BoxFuture<'_, StorageResult<bool>> {
        let file_name = file_name.to_string();
        Box::pin(async move {
            let designs = self.designs.read().map_err(lock_error)?;
            Ok(designs.contains_key(&file_name))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::test_util::block_on;

    #[test]
    fn test_save_and_load() {
        let storage = MemoryStorage::new();
        let mut doc = DesignDocument::default();
        doc.name = Some("flat".into());

        let file_name = block_on(storage.save(&doc)).unwrap();
        let loaded = block_on(storage.load(&file_name)).unwrap();

        assert_eq!(loaded, doc);
    }

    #[test]
    fn test_not_found() {
        let storage = MemoryStorage::new();
        let result = block_on(storage.load("design_missing.json"));

        assert!(matches!(result, Err(StorageError::NotFound(_))));
    }

    #[test]
    fn test_exists() {
        let storage = MemoryStorage::new();
        let doc = DesignDocument::default();

        assert!(!block_on(storage.exists("a.json")).unwrap());
        block_on(storage.save_as("a.json", &doc)).unwrap();
        assert!(block_on(storage.exists("a.json")).unwrap());
        assert!(!block_on(storage.exists("b.json")).unwrap());
    }

    #[test]
    fn test_list_sorted() {
        let storage = MemoryStorage::new();
        let doc = DesignDocument::default();

        block_on(storage.save_as("b.json", &doc)).unwrap();
        block_on(storage.save_as("a.json", &doc)).unwrap();

        let list = block_on(storage.list()).unwrap();
        assert_eq!(list, vec!["a.json".to_string(), "b.json".to_string()]);
    }
}
