//! Upload response models shared between the services and the HTTP layer.

use serde::Serialize;
use utoipa::ToSchema;

/// Body returned by a successful upload.
///
/// Sanitization may alter requested names, so callers must use the keys
/// returned here rather than the names they sent.
#[derive(Debug, Serialize, ToSchema)]
pub struct UploadResponse {
    /// Final storage keys, in upload order.
    pub keys: Vec<String>,
}
