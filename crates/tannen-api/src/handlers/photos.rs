use std::sync::Arc;

use axum::{extract::State, Json};
use tannen_core::models::PhotoListResponse;

use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;

/// List stored photo names in display order.
#[utoipa::path(
    get,
    path = "/api/photos",
    tag = "photos",
    responses(
        (status = 200, description = "Stored photo names", body = PhotoListResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state))]
pub async fn list_photos(
    State(state): State<Arc<AppState>>,
) -> Result<Json<PhotoListResponse>, HttpAppError> {
    let photos = state.store.list().await?;
    Ok(Json(PhotoListResponse { photos }))
}
