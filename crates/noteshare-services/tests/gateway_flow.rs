//! End-to-end gateway flow over the in-memory backend: upload a folder
//! tree, list and search it, then pull it back out as a zip archive.

use noteshare_core::AppError;
use noteshare_services::{archive_folder, list_keys, IncomingFile, UploadService};
use noteshare_storage::{MemoryObjectStore, ObjectStore};
use std::io::Read;
use std::sync::Arc;

fn text_file(name: &str, body: &str) -> IncomingFile {
    IncomingFile {
        filename: Some(name.to_string()),
        content_type: Some("text/plain".to_string()),
        data: body.as_bytes().to_vec(),
    }
}

#[tokio::test]
async fn test_folder_upload_list_and_archive_roundtrip() {
    let store = Arc::new(MemoryObjectStore::new());
    let uploads = UploadService::new(store.clone());

    // Nothing under the root yet, so the pre-flight check passes.
    assert!(!uploads.folder_exists("project").await.unwrap());

    let keys = uploads
        .upload_batch(
            vec![
                text_file("readme.md", "hello"),
                text_file("main.rs", "fn main() {}"),
                text_file("notes.txt", "remember"),
            ],
            vec![
                Some("project/readme.md".to_string()),
                Some("project/src/main.rs".to_string()),
                Some("project/docs/notes.txt".to_string()),
            ],
        )
        .await
        .unwrap();
    assert_eq!(
        keys,
        vec![
            "project/readme.md",
            "project/src/main.rs",
            "project/docs/notes.txt"
        ]
    );

    // The root is now taken for future folder uploads.
    assert!(uploads.folder_exists("project").await.unwrap());

    // Search is a case-insensitive substring match over the whole namespace.
    let hits = list_keys(store.as_ref(), Some("MAIN"), 1000).await.unwrap();
    assert_eq!(hits, vec!["project/src/main.rs"]);

    // Archive the folder and read the zip back.
    let buffer = archive_folder(store.as_ref(), "project/").await.unwrap();
    let mut archive = zip::ZipArchive::new(std::io::Cursor::new(buffer)).unwrap();
    let mut names: Vec<String> = (0..archive.len())
        .map(|i| archive.by_index(i).unwrap().name().to_string())
        .collect();
    names.sort();
    assert_eq!(names, vec!["docs/notes.txt", "readme.md", "src/main.rs"]);

    let mut body = String::new();
    archive
        .by_name("src/main.rs")
        .unwrap()
        .read_to_string(&mut body)
        .unwrap();
    assert_eq!(body, "fn main() {}");
}

#[tokio::test]
async fn test_paginated_backend_feeds_listing_and_archive() {
    // A 2-key page cap with 6 objects forces three continuation rounds.
    let store = Arc::new(MemoryObjectStore::with_page_limit(2));
    let uploads = UploadService::new(store.clone());

    for i in 0..6 {
        uploads
            .upload_with_path(
                text_file(&format!("{}.txt", i), "body"),
                &format!("bulk/{}.txt", i),
            )
            .await
            .unwrap();
    }

    let all = list_keys(store.as_ref(), None, 1000).await.unwrap();
    assert_eq!(all.len(), 6);

    let buffer = archive_folder(store.as_ref(), "bulk/").await.unwrap();
    let archive = zip::ZipArchive::new(std::io::Cursor::new(buffer)).unwrap();
    assert_eq!(archive.len(), 6);
}

#[tokio::test]
async fn test_batch_conflict_reports_partial_success() {
    let store = Arc::new(MemoryObjectStore::new());
    let uploads = UploadService::new(store.clone());

    store
        .put("team/b.txt", b"already here".to_vec(), "text/plain")
        .await
        .unwrap();

    let err = uploads
        .upload_batch(
            vec![text_file("a.txt", "a"), text_file("b.txt", "b")],
            vec![
                Some("team/a.txt".to_string()),
                Some("team/b.txt".to_string()),
            ],
        )
        .await
        .unwrap_err();

    match err {
        AppError::PartialBatchFailure {
            succeeded,
            failed_item,
            ..
        } => {
            assert_eq!(succeeded, vec!["team/a.txt"]);
            assert_eq!(failed_item, "team/b.txt");
        }
        other => panic!("expected PartialBatchFailure, got {:?}", other),
    }

    assert!(store.exists("team/a.txt").await.unwrap());
    assert_eq!(store.get("team/b.txt").await.unwrap(), b"already here");
}
