//! Fire-and-forget activity logging.
//!
//! Producers enqueue events and return immediately; a detached worker
//! emits each event as a structured tracing record under the `activity`
//! target. Failures on either side are swallowed so logging can never
//! block or fail a primary operation. Ordering across concurrent events
//! is not guaranteed.

use noteshare_core::models::{ActivityAction, ActivityEvent};
use tokio::sync::mpsc;

/// Handle for recording user activity.
#[derive(Clone)]
pub struct ActivityLog {
    tx: mpsc::UnboundedSender<ActivityEvent>,
}

impl ActivityLog {
    /// Spawn the background writer and return a producer handle.
    /// Must be called from within a tokio runtime.
    pub fn spawn() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        tokio::spawn(run_writer(rx));
        Self { tx }
    }

    /// Enqueue one event. Never blocks and never errors; if the writer is
    /// gone the event is silently dropped.
    pub fn record(
        &self,
        username: impl Into<String>,
        action: ActivityAction,
        details: Option<String>,
        ip_address: Option<String>,
    ) {
        let event = ActivityEvent::new(username, action, details, ip_address);
        let _ = self.tx.send(event);
    }
}

async fn run_writer(mut rx: mpsc::UnboundedReceiver<ActivityEvent>) {
    while let Some(event) = rx.recv().await {
        let entry = serde_json::to_string(&event).unwrap_or_else(|_| "{}".to_string());
        tracing::event!(
            target: "activity",
            tracing::Level::INFO,
            entry = %entry,
            username = %event.username,
            action = ?event.action,
            "User activity"
        );
    }
}
