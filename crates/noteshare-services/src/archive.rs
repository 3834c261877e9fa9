//! Folder-to-zip archiving.
//!
//! Streams every object under a key prefix into a single zip buffer. One
//! object is held in memory at a time; the full backend content is never
//! resident at once. Any per-object failure aborts the build so callers
//! never receive a partial archive.

use noteshare_core::AppError;
use noteshare_storage::ObjectStore;
use std::io::Write;

const ARCHIVE_PAGE_SIZE: i32 = 1000;

/// Build a zip archive of all objects under `prefix`.
///
/// `prefix` must end with `/`; the HTTP boundary appends it when missing.
/// Entry names are the object keys with the prefix stripped; the bare
/// prefix key (a "directory marker" object) is skipped.
pub async fn archive_folder(store: &dyn ObjectStore, prefix: &str) -> Result<Vec<u8>, AppError> {
    use zip::write::{FileOptions, ZipWriter};
    use zip::CompressionMethod;

    let mut buffer = Vec::new();
    let mut entries = 0usize;
    {
        let mut zip = ZipWriter::new(std::io::Cursor::new(&mut buffer));
        let options = FileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .unix_permissions(0o644);

        let mut token: Option<String> = None;
        loop {
            let page = store
                .list_page(Some(prefix), token.as_deref(), ARCHIVE_PAGE_SIZE)
                .await
                .map_err(|e| {
                    AppError::ArchiveBuildFailed(format!("listing `{}`: {}", prefix, e))
                })?;

            for key in &page.keys {
                let Some(relative) = key.strip_prefix(prefix) else {
                    continue;
                };
                if relative.is_empty() {
                    continue;
                }

                let data = store.get(key).await.map_err(|e| {
                    AppError::ArchiveBuildFailed(format!("fetching `{}`: {}", key, e))
                })?;

                zip.start_file(relative, options).map_err(|e| {
                    AppError::ArchiveBuildFailed(format!("adding `{}`: {}", relative, e))
                })?;
                zip.write_all(&data).map_err(|e| {
                    AppError::ArchiveBuildFailed(format!("writing `{}`: {}", relative, e))
                })?;
                entries += 1;
            }

            if !page.is_truncated {
                break;
            }
            token = page.next_token;
            if token.is_none() {
                break;
            }
        }

        zip.finish()
            .map_err(|e| AppError::ArchiveBuildFailed(e.to_string()))?;
    }

    tracing::info!(
        prefix = %prefix,
        entries = entries,
        archive_bytes = buffer.len(),
        "Folder archive built"
    );

    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use noteshare_storage::MemoryObjectStore;
    use std::io::Read;

    async fn seeded_store() -> MemoryObjectStore {
        let store = MemoryObjectStore::new();
        // Bare directory marker plus two real objects.
        store.put("f/", Vec::new(), "application/octet-stream").await.unwrap();
        store.put("f/a.txt", b"alpha".to_vec(), "text/plain").await.unwrap();
        store
            .put("f/sub/b.txt", b"bravo".to_vec(), "text/plain")
            .await
            .unwrap();
        store
            .put("other/c.txt", b"charlie".to_vec(), "text/plain")
            .await
            .unwrap();
        store
    }

    fn read_entries(buffer: Vec<u8>) -> Vec<(String, Vec<u8>)> {
        let mut archive = zip::ZipArchive::new(std::io::Cursor::new(buffer)).unwrap();
        let mut entries = Vec::new();
        for i in 0..archive.len() {
            let mut entry = archive.by_index(i).unwrap();
            let mut content = Vec::new();
            entry.read_to_end(&mut content).unwrap();
            entries.push((entry.name().to_string(), content));
        }
        entries
    }

    #[tokio::test]
    async fn test_archive_contains_relative_paths_and_skips_marker() {
        let store = seeded_store().await;
        let buffer = archive_folder(&store, "f/").await.unwrap();
        let entries = read_entries(buffer);

        let names: Vec<&str> = entries.iter().map(|(name, _)| name.as_str()).collect();
        assert_eq!(names, vec!["a.txt", "sub/b.txt"]);
        assert_eq!(entries[0].1, b"alpha");
        assert_eq!(entries[1].1, b"bravo");
    }

    #[tokio::test]
    async fn test_archive_of_empty_prefix_is_valid_and_empty() {
        let store = MemoryObjectStore::new();
        let buffer = archive_folder(&store, "missing/").await.unwrap();
        assert!(read_entries(buffer).is_empty());
    }

    #[tokio::test]
    async fn test_archive_spans_multiple_pages() {
        let store = MemoryObjectStore::with_page_limit(2);
        for i in 0..7u8 {
            store
                .put(&format!("f/{}.txt", i), vec![b'0' + i], "text/plain")
                .await
                .unwrap();
        }
        let buffer = archive_folder(&store, "f/").await.unwrap();
        assert_eq!(read_entries(buffer).len(), 7);
    }
}
