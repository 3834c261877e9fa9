//! Service construction at process startup.

use crate::state::AppState;
use noteshare_core::Config;
use noteshare_services::{ActivityLog, UploadService};
use noteshare_storage::create_object_store;
use std::sync::Arc;

/// Build the shared application state: the backend store handle is
/// acquired once here and injected everywhere else.
pub async fn build_state(config: &Config) -> Result<Arc<AppState>, anyhow::Error> {
    let store = create_object_store(config).await?;
    tracing::info!(backend = %store.backend_type(), "Object store initialized");

    let uploads = UploadService::new(store.clone());
    let activity = ActivityLog::spawn();

    Ok(Arc::new(AppState {
        config: config.clone(),
        store,
        uploads,
        activity,
    }))
}
