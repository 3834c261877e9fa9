use noteshare_core::Config;
use noteshare_services::{ActivityLog, UploadService};
use noteshare_storage::ObjectStore;
use std::sync::Arc;

/// Shared application state.
///
/// The store handle is acquired once at startup and injected here;
/// request handlers never construct or tear down backend connections.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub store: Arc<dyn ObjectStore>,
    pub uploads: UploadService,
    pub activity: ActivityLog,
}

#[allow(dead_code)]
fn _assert_app_state_send_sync() {
    fn assert_send<T: Send>() {}
    fn assert_sync<T: Sync>() {}

    assert_send::<AppState>();
    assert_sync::<AppState>();
}
