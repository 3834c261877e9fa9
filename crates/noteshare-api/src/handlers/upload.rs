use std::sync::Arc;

use axum::{
    extract::{multipart::Field, Multipart, State},
    Json,
};
use noteshare_core::models::{ActivityAction, UploadResponse};
use noteshare_core::AppError;
use noteshare_services::IncomingFile;

use crate::actor::Actor;
use crate::client_ip::OriginAddr;
use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;

/// Decoded multipart upload request.
#[derive(Default)]
struct UploadForm {
    files: Vec<IncomingFile>,
    paths: Vec<String>,
    custom_name: Option<String>,
    original_name: Option<String>,
    file_type: Option<String>,
    description: Option<String>,
    batch_upload: bool,
    root_dir_name: Option<String>,
}

async fn read_text(field: Field<'_>) -> Result<String, AppError> {
    field
        .text()
        .await
        .map_err(|e| AppError::BadInput(format!("Malformed multipart field: {}", e)))
}

async fn read_form(mut multipart: Multipart) -> Result<UploadForm, AppError> {
    let mut form = UploadForm::default();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadInput(format!("Malformed multipart body: {}", e)))?
    {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "files" => {
                let filename = field.file_name().map(str::to_string);
                let content_type = field.content_type().map(str::to_string);
                let data = field.bytes().await.map_err(|e| {
                    AppError::BadInput(format!("Failed reading uploaded file: {}", e))
                })?;
                form.files.push(IncomingFile {
                    filename,
                    content_type,
                    data: data.to_vec(),
                });
            }
            "paths" => form.paths.push(read_text(field).await?),
            "customName" => form.custom_name = Some(read_text(field).await?),
            "originalName" => form.original_name = Some(read_text(field).await?),
            "fileType" => form.file_type = Some(read_text(field).await?),
            "description" => form.description = Some(read_text(field).await?),
            "batchUpload" => form.batch_upload = read_text(field).await?.trim() == "true",
            "rootDirName" => form.root_dir_name = Some(read_text(field).await?),
            // Unknown fields are ignored.
            _ => {}
        }
    }
    Ok(form)
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Upload one or many files.
///
/// Two modes share this endpoint: single uploads (optionally renamed via
/// `customName`) and batch/folder uploads (`batchUpload=true`) where each
/// file is paired with a relative `paths` entry. Both run a pre-flight
/// duplicate check before any upload work starts.
#[utoipa::path(
    post,
    path = "/api/notes/upload",
    tag = "notes",
    responses(
        (status = 200, description = "All files stored", body = UploadResponse),
        (status = 400, description = "Missing files or unusable names", body = ErrorResponse),
        (status = 409, description = "Name or folder already taken", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, multipart), fields(actor = %actor.0))]
pub async fn upload_notes(
    State(state): State<Arc<AppState>>,
    actor: Actor,
    OriginAddr(origin): OriginAddr,
    multipart: Multipart,
) -> Result<Json<UploadResponse>, HttpAppError> {
    let form = read_form(multipart).await?;

    if form.files.is_empty() {
        return Err(AppError::BadInput("No files provided".to_string()).into());
    }

    // Pre-flight duplicate checks, before any upload work.
    if form.batch_upload {
        if let Some(root) = non_blank(form.root_dir_name.as_deref()) {
            if state.uploads.folder_exists(root).await? {
                return Err(AppError::FolderNameTaken(root.to_string()).into());
            }
        }
    } else {
        let candidate = non_blank(form.custom_name.as_deref())
            .or_else(|| non_blank(form.original_name.as_deref()));
        if let Some(candidate) = candidate {
            if state.uploads.object_exists(candidate).await? {
                return Err(AppError::FileNameTaken(candidate.to_string()).into());
            }
        }
    }

    let keys = if form.batch_upload {
        let paths: Vec<Option<String>> = (0..form.files.len())
            .map(|i| form.paths.get(i).cloned())
            .collect();
        state.uploads.upload_batch(form.files, paths).await?
    } else {
        let custom_name = form.custom_name.clone().unwrap_or_default();
        let mut keys = Vec::with_capacity(form.files.len());
        for file in form.files {
            keys.push(state.uploads.upload_with_name(file, &custom_name).await?);
        }
        keys
    };

    let mut detail = format!("uploaded {} object(s): {}", keys.len(), keys.join(", "));
    if let Some(file_type) = non_blank(form.file_type.as_deref()) {
        detail.push_str(&format!("; type: {}", file_type));
    }
    if let Some(description) = non_blank(form.description.as_deref()) {
        detail.push_str(&format!("; description: {}", description));
    }
    state
        .activity
        .record(actor.0, ActivityAction::Upload, Some(detail), origin);

    Ok(Json(UploadResponse { keys }))
}
