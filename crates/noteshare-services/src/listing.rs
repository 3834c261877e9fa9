//! Namespace listing and search.

use noteshare_core::AppError;
use noteshare_storage::ObjectStore;

/// Enumerate every key in the namespace, chaining listing pages until the
/// backend reports exhaustion, then apply the optional case-insensitive
/// substring filter. Result order is the backend's listing order.
pub async fn list_keys(
    store: &dyn ObjectStore,
    search: Option<&str>,
    page_size: i32,
) -> Result<Vec<String>, AppError> {
    let mut keys = Vec::new();
    let mut token: Option<String> = None;
    loop {
        let page = store.list_page(None, token.as_deref(), page_size).await?;
        keys.extend(page.keys);
        if !page.is_truncated {
            break;
        }
        token = page.next_token;
        if token.is_none() {
            // Backend claimed truncation but returned no cursor.
            break;
        }
    }

    match search.map(str::trim) {
        Some(term) if !term.is_empty() => {
            let needle = term.to_lowercase();
            Ok(keys
                .into_iter()
                .filter(|key| key.to_lowercase().contains(&needle))
                .collect())
        }
        _ => Ok(keys),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use noteshare_storage::MemoryObjectStore;

    async fn seeded_store(keys: &[&str]) -> MemoryObjectStore {
        let store = MemoryObjectStore::new();
        for key in keys {
            store
                .put(key, vec![0], "application/octet-stream")
                .await
                .unwrap();
        }
        store
    }

    #[tokio::test]
    async fn test_list_without_search_returns_everything() {
        let store = seeded_store(&["alpha.txt", "Beta.txt", "gamma.pdf"]).await;
        let keys = list_keys(&store, None, 1000).await.unwrap();
        assert_eq!(keys, vec!["Beta.txt", "alpha.txt", "gamma.pdf"]);
    }

    #[tokio::test]
    async fn test_blank_search_is_no_filter() {
        let store = seeded_store(&["alpha.txt"]).await;
        let keys = list_keys(&store, Some("   "), 1000).await.unwrap();
        assert_eq!(keys, vec!["alpha.txt"]);
    }

    #[tokio::test]
    async fn test_search_is_case_insensitive_substring() {
        let store = seeded_store(&["alpha.txt", "Beta.txt", "gamma.pdf"]).await;
        let keys = list_keys(&store, Some("eta"), 1000).await.unwrap();
        assert_eq!(keys, vec!["Beta.txt"]);

        let keys = list_keys(&store, Some("A.TXT"), 1000).await.unwrap();
        assert_eq!(keys, vec!["Beta.txt", "alpha.txt"]);
    }

    #[tokio::test]
    async fn test_listing_aggregates_across_pages() {
        let store = MemoryObjectStore::with_page_limit(2);
        for i in 0..7 {
            store
                .put(&format!("note{}.txt", i), vec![0], "text/plain")
                .await
                .unwrap();
        }
        let keys = list_keys(&store, None, 1000).await.unwrap();
        assert_eq!(keys.len(), 7);
        let filtered = list_keys(&store, Some("NOTE3"), 1000).await.unwrap();
        assert_eq!(filtered, vec!["note3.txt"]);
    }
}
