//! Storage abstraction for persistence.

mod cache;
mod file;
mod memory;

pub use cache::{FileCache, LocalCache, MemoryCache};
pub use file::FileStorage;
pub use memory::MemoryStorage;

use crate::document::DesignDocument;
use std::future::Future;
use std::pin::Pin;
use thiserror::Error;
use uuid::Uuid;

/// Storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Design not found: {0}")]
    NotFound(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("IO error: {0}")]
    Io(String),
    #[error("Storage error: {0}")]
    Other(String),
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Boxed future for async operations.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Generate a fresh file name for a saved design.
pub fn generate_file_name() -> String {
    format!("design_{}.json", Uuid::new_v4().simple())
}

/// Trait for design storage backends.
///
/// Designs are addressed by file name (`design_<id>.json`).
pub trait Storage: Send + Sync {
    /// Save a design under a freshly generated file name and return it.
    fn save(&self, document: &DesignDocument) -> BoxFuture<'_, StorageResult<String>> {
        let file_name = generate_file_name();
        let write = self.save_as(&file_name, document);
        Box::pin(async move {
            write.await?;
            Ok(file_name)
        })
    }

    /// Save a design under a given file name, replacing any previous one.
    fn save_as(
        &self,
        file_name: &str,
        document: &DesignDocument,
    ) -> BoxFuture<'_, StorageResult<()>>;

    /// Load a design.
    fn load(&self, file_name: &str) -> BoxFuture<'_, StorageResult<DesignDocument>>;

    /// List all saved file names, sorted.
    fn list(&self) -> BoxFuture<'_, StorageResult<Vec<String>>>;

    /// Check if a design exists.
    fn exists(&self, file_name: &str) -> BoxFuture<'_, StorageResult<bool>>;
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_names() {
        let a = generate_file_name();
        let b = generate_file_name();
        assert!(a.starts_with("design_"));
        assert!(a.ends_with(".json"));
        assert_eq!(a.len(), "design_".len() + 32 + ".json".len());
        assert_ne!(a, b);
    }
}
