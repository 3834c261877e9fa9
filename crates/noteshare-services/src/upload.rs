//! Upload orchestration.
//!
//! Validates, sanitizes, duplicate-checks and persists one or many files.
//! Batch uploads preserve relative paths and are processed sequentially;
//! they are NOT transactional, so items stored before a failure stay
//! stored and are reported through `AppError::PartialBatchFailure`.

use chrono::Utc;
use noteshare_core::{resolve_content_type, sanitize_key, AppError};
use noteshare_storage::{ObjectStore, StorageError};
use std::sync::Arc;

/// A file received at the HTTP boundary, decoupled from any multipart type.
#[derive(Debug, Clone)]
pub struct IncomingFile {
    /// Name the client attached to the part, if any.
    pub filename: Option<String>,
    /// Client-declared MIME type, if any.
    pub content_type: Option<String>,
    pub data: Vec<u8>,
}

#[derive(Clone)]
pub struct UploadService {
    store: Arc<dyn ObjectStore>,
}

impl UploadService {
    pub fn new(store: Arc<dyn ObjectStore>) -> Self {
        Self { store }
    }

    /// Upload one file under its own (sanitized) name. Files without a
    /// name fall back to a timestamped one.
    pub async fn upload_file(&self, file: IncomingFile) -> Result<String, AppError> {
        let requested = match file.filename.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => format!("file_{}", Utc::now().timestamp_millis()),
        };
        self.store_as(file, &requested).await
    }

    /// Upload one file under a caller-chosen name; a blank name falls back
    /// to the file's own.
    pub async fn upload_with_name(
        &self,
        file: IncomingFile,
        custom_name: &str,
    ) -> Result<String, AppError> {
        if custom_name.trim().is_empty() {
            return self.upload_file(file).await;
        }
        self.store_as(file, custom_name).await
    }

    /// Upload one file under a relative path, preserving folder structure.
    pub async fn upload_with_path(
        &self,
        file: IncomingFile,
        path: &str,
    ) -> Result<String, AppError> {
        if path.trim().is_empty() {
            return self.upload_file(file).await;
        }
        self.store_as(file, path).await
    }

    /// Upload a list of files, pairing each with its relative path when one
    /// is present and falling back to the file's own name otherwise.
    ///
    /// Items are processed in order; the first failure stops the batch and
    /// the returned error lists every key stored before it.
    pub async fn upload_batch(
        &self,
        files: Vec<IncomingFile>,
        paths: Vec<Option<String>>,
    ) -> Result<Vec<String>, AppError> {
        let mut keys: Vec<String> = Vec::with_capacity(files.len());
        for (index, file) in files.into_iter().enumerate() {
            let path = paths
                .get(index)
                .cloned()
                .flatten()
                .filter(|p| !p.trim().is_empty());
            let label = path
                .clone()
                .or_else(|| file.filename.clone())
                .unwrap_or_else(|| format!("file #{}", index));

            let result = match path {
                Some(path) => self.upload_with_path(file, &path).await,
                None => self.upload_file(file).await,
            };
            match result {
                Ok(key) => keys.push(key),
                Err(source) => {
                    return Err(AppError::PartialBatchFailure {
                        succeeded: keys,
                        failed_item: label,
                        source: Box::new(source),
                    });
                }
            }
        }
        Ok(keys)
    }

    /// Pre-flight check for single uploads: is the sanitized candidate
    /// name already an exact key?
    pub async fn object_exists(&self, name: &str) -> Result<bool, AppError> {
        Ok(self.store.exists(&sanitize_key(name)).await?)
    }

    /// Pre-flight check for folder uploads: does any key live under the
    /// sanitized root? The root is capped with exactly one trailing `/`.
    pub async fn folder_exists(&self, root: &str) -> Result<bool, AppError> {
        let mut prefix = sanitize_key(root);
        if !prefix.ends_with('/') {
            prefix.push('/');
        }
        let page = self.store.list_page(Some(&prefix), None, 1).await?;
        Ok(!page.keys.is_empty())
    }

    async fn store_as(&self, file: IncomingFile, requested: &str) -> Result<String, AppError> {
        let key = sanitize_key(requested);
        if key.is_empty() {
            return Err(AppError::BadInput(format!(
                "`{}` does not yield a usable storage key",
                requested
            )));
        }

        if self.store.exists(&key).await? {
            return Err(AppError::DuplicateKey(key));
        }

        let content_type = resolve_content_type(&key, file.content_type.as_deref());
        let size = file.data.len();
        match self.store.put_if_absent(&key, file.data, &content_type).await {
            Ok(()) => {
                tracing::info!(
                    key = %key,
                    size_bytes = size,
                    content_type = %content_type,
                    "Stored object"
                );
                Ok(key)
            }
            Err(StorageError::AlreadyExists(key)) => Err(AppError::DuplicateKey(key)),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use noteshare_storage::MemoryObjectStore;

    fn file(name: Option<&str>, content_type: Option<&str>, data: &[u8]) -> IncomingFile {
        IncomingFile {
            filename: name.map(str::to_string),
            content_type: content_type.map(str::to_string),
            data: data.to_vec(),
        }
    }

    fn service_with_store() -> (UploadService, Arc<MemoryObjectStore>) {
        let store = Arc::new(MemoryObjectStore::new());
        (UploadService::new(store.clone()), store)
    }

    #[tokio::test]
    async fn test_upload_uses_sanitized_filename() {
        let (service, store) = service_with_store();
        let key = service
            .upload_file(file(Some("my notes.txt"), None, b"content"))
            .await
            .unwrap();
        assert_eq!(key, "my_notes.txt");
        assert!(store.exists("my_notes.txt").await.unwrap());
    }

    #[tokio::test]
    async fn test_custom_name_wins_over_filename() {
        let (service, store) = service_with_store();
        let key = service
            .upload_with_name(file(Some("upload.bin"), None, b"x"), "renamed.txt")
            .await
            .unwrap();
        assert_eq!(key, "renamed.txt");
        assert!(store.exists("renamed.txt").await.unwrap());
        assert!(!store.exists("upload.bin").await.unwrap());
    }

    #[tokio::test]
    async fn test_blank_custom_name_falls_back_to_filename() {
        let (service, _store) = service_with_store();
        let key = service
            .upload_with_name(file(Some("fallback.txt"), None, b"x"), "   ")
            .await
            .unwrap();
        assert_eq!(key, "fallback.txt");
    }

    #[tokio::test]
    async fn test_nameless_file_gets_timestamped_key() {
        let (service, _store) = service_with_store();
        let key = service.upload_file(file(None, None, b"x")).await.unwrap();
        assert!(key.starts_with("file_"), "unexpected key {:?}", key);
    }

    #[tokio::test]
    async fn test_duplicate_upload_is_rejected_and_content_preserved() {
        let (service, store) = service_with_store();
        store
            .put("notes.txt", b"original".to_vec(), "text/plain")
            .await
            .unwrap();

        let err = service
            .upload_with_name(file(Some("whatever.txt"), None, b"overwrite"), "notes.txt")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::DuplicateKey(key) if key == "notes.txt"));
        assert_eq!(store.get("notes.txt").await.unwrap(), b"original");
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_traversal_in_requested_name_is_neutralized() {
        let (service, store) = service_with_store();
        let key = service
            .upload_with_name(file(Some("x"), None, b"x"), "../../etc/passwd")
            .await
            .unwrap();
        assert_eq!(key, "etc/passwd");
        assert!(store.exists("etc/passwd").await.unwrap());
    }

    #[tokio::test]
    async fn test_empty_key_is_bad_input() {
        let (service, store) = service_with_store();
        let err = service
            .upload_with_name(file(Some("x"), None, b"x"), "../")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::BadInput(_)));
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_batch_preserves_paths_and_order() {
        let (service, _store) = service_with_store();
        let keys = service
            .upload_batch(
                vec![
                    file(Some("a.txt"), None, b"a"),
                    file(Some("b.txt"), None, b"b"),
                ],
                vec![
                    Some("dir/a.txt".to_string()),
                    Some("dir/b.txt".to_string()),
                ],
            )
            .await
            .unwrap();
        assert_eq!(keys, vec!["dir/a.txt", "dir/b.txt"]);
    }

    #[tokio::test]
    async fn test_batch_missing_path_falls_back_to_filename() {
        let (service, store) = service_with_store();
        let keys = service
            .upload_batch(
                vec![
                    file(Some("a.txt"), None, b"a"),
                    file(Some("b.txt"), None, b"b"),
                ],
                vec![Some("dir/a.txt".to_string())],
            )
            .await
            .unwrap();
        assert_eq!(keys, vec!["dir/a.txt", "b.txt"]);
        assert!(store.exists("b.txt").await.unwrap());
    }

    #[tokio::test]
    async fn test_batch_failure_keeps_earlier_items_and_reports_them() {
        let (service, store) = service_with_store();
        store
            .put("dir/b.txt", b"existing".to_vec(), "text/plain")
            .await
            .unwrap();

        let err = service
            .upload_batch(
                vec![
                    file(Some("a.txt"), None, b"a"),
                    file(Some("b.txt"), None, b"b"),
                    file(Some("c.txt"), None, b"c"),
                ],
                vec![
                    Some("dir/a.txt".to_string()),
                    Some("dir/b.txt".to_string()),
                    Some("dir/c.txt".to_string()),
                ],
            )
            .await
            .unwrap_err();

        match err {
            AppError::PartialBatchFailure {
                succeeded,
                failed_item,
                source,
            } => {
                assert_eq!(succeeded, vec!["dir/a.txt"]);
                assert_eq!(failed_item, "dir/b.txt");
                assert!(matches!(*source, AppError::DuplicateKey(_)));
            }
            other => panic!("expected PartialBatchFailure, got {:?}", other),
        }

        // First item persisted, third never attempted.
        assert!(store.exists("dir/a.txt").await.unwrap());
        assert!(!store.exists("dir/c.txt").await.unwrap());
    }

    #[tokio::test]
    async fn test_preflight_object_exists_sanitizes_candidate() {
        let (service, store) = service_with_store();
        store
            .put("my_notes.txt", b"x".to_vec(), "text/plain")
            .await
            .unwrap();
        assert!(service.object_exists("  my notes.txt ").await.unwrap());
        assert!(!service.object_exists("other.txt").await.unwrap());
    }

    #[tokio::test]
    async fn test_preflight_folder_exists_caps_prefix() {
        let (service, store) = service_with_store();
        store
            .put("docs/a.txt", b"x".to_vec(), "text/plain")
            .await
            .unwrap();
        assert!(service.folder_exists("docs").await.unwrap());
        assert!(service.folder_exists("docs/").await.unwrap());
        // Prefix match is exact: "doc" is not a folder root here.
        assert!(!service.folder_exists("doc").await.unwrap());
        // Case-sensitive by design.
        assert!(!service.folder_exists("Docs").await.unwrap());
    }
}
