use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use noteshare_services::listing;

#[derive(Debug, Deserialize, IntoParams)]
pub struct ListQuery {
    /// Case-insensitive substring filter over the key namespace.
    pub search: Option<String>,
}

/// List every stored key, optionally filtered.
#[utoipa::path(
    get,
    path = "/api/notes",
    tag = "notes",
    params(ListQuery),
    responses(
        (status = 200, description = "Matching keys in backend listing order", body = Vec<String>),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state))]
pub async fn list_notes(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<String>>, HttpAppError> {
    let keys = listing::list_keys(
        state.store.as_ref(),
        query.search.as_deref(),
        state.config.list_page_size,
    )
    .await?;
    Ok(Json(keys))
}
