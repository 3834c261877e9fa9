//! OpenAPI document aggregation.

use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::upload::upload_notes,
        crate::handlers::list::list_notes,
        crate::handlers::download::download_note,
        crate::handlers::folder_download::download_folder,
        crate::handlers::folder_download::download_folder_by_path,
        crate::handlers::health::health,
    ),
    components(schemas(
        noteshare_core::models::UploadResponse,
        crate::error::ErrorResponse,
    )),
    tags(
        (name = "notes", description = "File management gateway endpoints"),
        (name = "health", description = "Service probes")
    )
)]
pub struct ApiDoc;
