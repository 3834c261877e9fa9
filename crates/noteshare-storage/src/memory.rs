//! In-process object store.
//!
//! Keeps objects in a sorted map and paginates lexicographically with real
//! continuation tokens, so callers exercise the same page-chaining code
//! paths they would against S3. Used for development and tests.

use crate::traits::{ObjectPage, ObjectStore, StorageError, StorageResult};
use async_trait::async_trait;
use noteshare_core::StorageBackend;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

struct StoredObject {
    data: Vec<u8>,
    #[allow(dead_code)]
    content_type: String,
}

/// In-memory object store
pub struct MemoryObjectStore {
    objects: RwLock<BTreeMap<String, StoredObject>>,
    page_limit: Option<usize>,
}

impl MemoryObjectStore {
    pub fn new() -> Self {
        Self {
            objects: RwLock::new(BTreeMap::new()),
            page_limit: None,
        }
    }

    /// Cap listing pages below the caller-requested `max_keys`, the way S3
    /// caps pages at 1000 keys server-side. Small caps let tests drive
    /// multi-page continuation chains with few objects.
    pub fn with_page_limit(limit: usize) -> Self {
        Self {
            objects: RwLock::new(BTreeMap::new()),
            page_limit: Some(limit.max(1)),
        }
    }

    /// Number of stored objects.
    pub async fn len(&self) -> usize {
        self.objects.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.objects.read().await.is_empty()
    }
}

impl Default for MemoryObjectStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ObjectStore for MemoryObjectStore {
    async fn exists(&self, key: &str) -> StorageResult<bool> {
        Ok(self.objects.read().await.contains_key(key))
    }

    async fn put(&self, key: &str, data: Vec<u8>, content_type: &str) -> StorageResult<()> {
        self.objects.write().await.insert(
            key.to_string(),
            StoredObject {
                data,
                content_type: content_type.to_string(),
            },
        );
        Ok(())
    }

    async fn put_if_absent(
        &self,
        key: &str,
        data: Vec<u8>,
        content_type: &str,
    ) -> StorageResult<()> {
        // Check and insert under a single write lock: atomic, unlike the
        // default trait implementation.
        let mut objects = self.objects.write().await;
        if objects.contains_key(key) {
            return Err(StorageError::AlreadyExists(key.to_string()));
        }
        objects.insert(
            key.to_string(),
            StoredObject {
                data,
                content_type: content_type.to_string(),
            },
        );
        Ok(())
    }

    async fn get(&self, key: &str) -> StorageResult<Vec<u8>> {
        self.objects
            .read()
            .await
            .get(key)
            .map(|object| object.data.clone())
            .ok_or_else(|| StorageError::NotFound(key.to_string()))
    }

    async fn list_page(
        &self,
        prefix: Option<&str>,
        continuation_token: Option<&str>,
        max_keys: i32,
    ) -> StorageResult<ObjectPage> {
        let requested = max_keys.max(1) as usize;
        let cap = match self.page_limit {
            Some(limit) => requested.min(limit),
            None => requested,
        };

        let objects = self.objects.read().await;
        let mut keys = Vec::new();
        let mut truncated = false;
        for key in objects.keys() {
            if let Some(prefix) = prefix {
                if !key.starts_with(prefix) {
                    continue;
                }
            }
            if let Some(token) = continuation_token {
                if key.as_str() <= token {
                    continue;
                }
            }
            if keys.len() == cap {
                truncated = true;
                break;
            }
            keys.push(key.clone());
        }

        let next_token = if truncated { keys.last().cloned() } else { None };
        Ok(ObjectPage {
            keys,
            next_token,
            is_truncated: truncated,
        })
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Memory
    }
}
