//! Object-store abstraction trait
//!
//! This module defines the `ObjectStore` port that all storage backends
//! must implement, together with the storage error type.

use async_trait::async_trait;
use noteshare_core::{AppError, StorageBackend};
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    PutFailed(String),

    #[error("Download failed: {0}")]
    GetFailed(String),

    #[error("Listing failed: {0}")]
    ListFailed(String),

    #[error("Object not found: {0}")]
    NotFound(String),

    #[error("Object already exists: {0}")]
    AlreadyExists(String),

    #[error("Storage backend error: {0}")]
    BackendError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotFound(key) => AppError::NotFound(key),
            StorageError::AlreadyExists(key) => AppError::DuplicateKey(key),
            other => AppError::StorageUnavailable(other.to_string()),
        }
    }
}

/// One page of a key listing.
#[derive(Debug, Clone, Default)]
pub struct ObjectPage {
    /// Keys in backend listing order (lexicographic for S3).
    pub keys: Vec<String>,
    /// Cursor for the next page; only meaningful while `is_truncated`.
    pub next_token: Option<String>,
    /// More keys remain after this page.
    pub is_truncated: bool,
}

/// Object-store abstraction trait
///
/// All backends (S3, memory) must implement this trait so the gateway can
/// work against any of them without coupling to implementation details.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// True iff an object with exactly this key is present.
    async fn exists(&self, key: &str) -> StorageResult<bool>;

    /// Store `data` under `key`. Whether an existing object is overwritten
    /// is backend-dependent; uniqueness is the caller's concern.
    async fn put(&self, key: &str, data: Vec<u8>, content_type: &str) -> StorageResult<()>;

    /// Store `data` under `key` only if the key is absent, failing with
    /// `AlreadyExists` otherwise.
    ///
    /// The default implementation is a check-then-write sequence and is
    /// NOT atomic: two concurrent callers can both pass the check and both
    /// write, with last-write-wins deciding the outcome. Backends with a
    /// conditional-write primitive override this with an atomic version.
    async fn put_if_absent(
        &self,
        key: &str,
        data: Vec<u8>,
        content_type: &str,
    ) -> StorageResult<()> {
        if self.exists(key).await? {
            return Err(StorageError::AlreadyExists(key.to_string()));
        }
        self.put(key, data, content_type).await
    }

    /// Fetch an object's content. Fails with `NotFound` when absent.
    async fn get(&self, key: &str) -> StorageResult<Vec<u8>>;

    /// Return one listing page. Callers chain pages through
    /// `next_token` until `is_truncated` is false.
    async fn list_page(
        &self,
        prefix: Option<&str>,
        continuation_token: Option<&str>,
        max_keys: i32,
    ) -> StorageResult<ObjectPage>;

    /// Get the storage backend type
    fn backend_type(&self) -> StorageBackend;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_error_maps_to_app_error() {
        let err: AppError = StorageError::NotFound("notes.txt".to_string()).into();
        assert!(matches!(err, AppError::NotFound(key) if key == "notes.txt"));

        let err: AppError = StorageError::AlreadyExists("notes.txt".to_string()).into();
        assert!(matches!(err, AppError::DuplicateKey(key) if key == "notes.txt"));

        let err: AppError = StorageError::BackendError("boom".to_string()).into();
        assert!(matches!(err, AppError::StorageUnavailable(_)));
    }
}
