//! User activity events for the fire-and-forget audit collaborator.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Action categories recorded by the activity log. Login and Register are
/// produced by the (external) authentication collaborator over the same
/// interface; the gateway itself emits Upload and Download.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActivityAction {
    Login,
    Register,
    Upload,
    Download,
}

/// One recorded user action.
#[derive(Debug, Clone, Serialize)]
pub struct ActivityEvent {
    pub id: Uuid,
    pub username: String,
    pub action: ActivityAction,
    /// Extra info like file keys, search queries, counts
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,
    pub occurred_at: DateTime<Utc>,
}

impl ActivityEvent {
    pub fn new(
        username: impl Into<String>,
        action: ActivityAction,
        details: Option<String>,
        ip_address: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            username: username.into(),
            action,
            details,
            ip_address,
            occurred_at: Utc::now(),
        }
    }
}
