use std::sync::Arc;

use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, StatusCode},
    response::Response,
};
use noteshare_core::models::ActivityAction;
use noteshare_core::AppError;

use crate::actor::Actor;
use crate::client_ip::OriginAddr;
use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;

/// Download a single object by key.
///
/// The key may contain `/` separators, so the route captures the full
/// remaining path.
#[utoipa::path(
    get,
    path = "/api/notes/download/{key}",
    tag = "notes",
    params(
        ("key" = String, Path, description = "Storage key, possibly containing `/`")
    ),
    responses(
        (status = 200, description = "Object content", content_type = "application/octet-stream"),
        (status = 404, description = "No object under this key", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state), fields(actor = %actor.0))]
pub async fn download_note(
    State(state): State<Arc<AppState>>,
    actor: Actor,
    OriginAddr(origin): OriginAddr,
    Path(key): Path<String>,
) -> Result<Response, HttpAppError> {
    let data = state.store.get(&key).await?;

    state.activity.record(
        actor.0,
        ActivityAction::Download,
        Some(format!("key={}", key)),
        origin,
    );

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "application/octet-stream")
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", key),
        )
        .body(Body::from(data))
        .map_err(|e| HttpAppError(AppError::Internal(format!("Failed to build response: {}", e))))
}
