//! Route configuration and setup

use crate::api_doc::ApiDoc;
use crate::handlers;
use crate::state::AppState;
use axum::{
    http::HeaderValue,
    routing::{get, post},
    Json, Router,
};
use noteshare_core::Config;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

/// Setup all application routes
pub fn routes(config: &Config, state: Arc<AppState>) -> Router {
    let cors = setup_cors(config);

    Router::new()
        .route("/health", get(handlers::health::health))
        .route("/api/notes", get(handlers::list::list_notes))
        .route("/api/notes/upload", post(handlers::upload::upload_notes))
        .route(
            "/api/notes/download/{*key}",
            get(handlers::download::download_note),
        )
        .route(
            "/api/notes/download-folder",
            get(handlers::folder_download::download_folder),
        )
        .route(
            "/api/notes/download-folder/{*path}",
            get(handlers::folder_download::download_folder_by_path),
        )
        .route("/api/openapi.json", get(openapi_json))
        .merge(Router::from(
            utoipa_rapidoc::RapiDoc::new("/api/openapi.json").path("/docs"),
        ))
        .layer(axum::extract::DefaultBodyLimit::max(
            config.max_upload_size_bytes,
        ))
        .layer(RequestBodyLimitLayer::new(config.max_upload_size_bytes))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

fn setup_cors(config: &Config) -> CorsLayer {
    if config.cors_origins.iter().any(|origin| origin == "*") {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<HeaderValue> = config
            .cors_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    }
}
