use std::sync::Arc;

use axum::{
    body::Body,
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::Response,
};
use noteshare_core::models::ActivityAction;
use noteshare_core::AppError;
use noteshare_services::archive;
use serde::Deserialize;
use utoipa::IntoParams;

use crate::actor::Actor;
use crate::client_ip::OriginAddr;
use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;

#[derive(Debug, Deserialize, IntoParams)]
pub struct FolderQuery {
    /// Folder prefix to archive; `path` is accepted as an alias.
    pub prefix: Option<String>,
    pub path: Option<String>,
}

/// Download a whole folder prefix as a zip archive.
#[utoipa::path(
    get,
    path = "/api/notes/download-folder",
    tag = "notes",
    params(FolderQuery),
    responses(
        (status = 200, description = "Zip archive of the folder", content_type = "application/octet-stream"),
        (status = 400, description = "No prefix given", body = ErrorResponse),
        (status = 500, description = "Archive build failure", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state), fields(actor = %actor.0))]
pub async fn download_folder(
    State(state): State<Arc<AppState>>,
    actor: Actor,
    OriginAddr(origin): OriginAddr,
    Query(query): Query<FolderQuery>,
) -> Result<Response, HttpAppError> {
    let prefix = query
        .prefix
        .or(query.path)
        .map(|p| p.trim().to_string())
        .filter(|p| !p.is_empty())
        .ok_or_else(|| AppError::BadInput("Missing `prefix` query parameter".to_string()))?;

    zip_response(&state, actor.0, origin, prefix).await
}

/// Path-parameter variant of the folder download.
#[utoipa::path(
    get,
    path = "/api/notes/download-folder/{path}",
    tag = "notes",
    params(
        ("path" = String, Path, description = "Folder prefix, possibly containing `/`")
    ),
    responses(
        (status = 200, description = "Zip archive of the folder", content_type = "application/octet-stream"),
        (status = 500, description = "Archive build failure", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state), fields(actor = %actor.0))]
pub async fn download_folder_by_path(
    State(state): State<Arc<AppState>>,
    actor: Actor,
    OriginAddr(origin): OriginAddr,
    Path(folder_path): Path<String>,
) -> Result<Response, HttpAppError> {
    let folder_path = folder_path.trim().to_string();
    if folder_path.is_empty() {
        return Err(AppError::BadInput("Missing folder path".to_string()).into());
    }
    zip_response(&state, actor.0, origin, folder_path).await
}

async fn zip_response(
    state: &AppState,
    actor: String,
    origin: Option<String>,
    mut prefix: String,
) -> Result<Response, HttpAppError> {
    // Folder semantics require a trailing `/` on the prefix.
    if !prefix.ends_with('/') {
        prefix.push('/');
    }

    let archive_bytes = archive::archive_folder(state.store.as_ref(), &prefix).await?;

    state.activity.record(
        actor,
        ActivityAction::Download,
        Some(format!("folder={}", prefix)),
        origin,
    );

    let filename = format!("{}.zip", prefix.replace('/', ""));
    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "application/octet-stream")
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", filename),
        )
        .body(Body::from(archive_bytes))
        .map_err(|e| HttpAppError(AppError::Internal(format!("Failed to build response: {}", e))))
}
