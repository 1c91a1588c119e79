use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::{
        multipart::{Multipart, MultipartRejection},
        State,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tannen_core::models::EndpointUploadResponse;
use tannen_core::{AppError, SlotName};

use crate::error::ErrorResponse;
use crate::state::AppState;

/// Upload photos handler
///
/// Accepts one multipart form with an optional `top` file field and body
/// fields `photo_1`, `photo_2`, … contiguous from 1. Each present field is
/// written to the photos directory under its slot name, overwriting
/// whatever was there. Processing stops at the first missing body index;
/// later indices are ignored.
///
/// The response contract is deliberately blunt: `{"success":true,"count":n}`
/// on completion, and a generic 500 `{"error":"Upload failed"}` for any
/// failure, with no partial-success reporting.
#[utoipa::path(
    post,
    path = "/api/upload-photos",
    tag = "photos",
    request_body(content = inline(Object), content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Photos written", body = EndpointUploadResponse),
        (status = 500, description = "Upload failed", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, multipart), fields(operation = "upload_photos"))]
pub async fn upload_photos(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Response {
    match receive_and_store(&state, multipart).await {
        Ok(count) => (
            StatusCode::OK,
            Json(EndpointUploadResponse {
                success: true,
                count,
            }),
        )
            .into_response(),
        Err(err) => {
            tracing::error!(
                error = %err.detailed_message(),
                error_type = err.error_type(),
                "photo upload failed"
            );
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({ "error": "Upload failed" })),
            )
                .into_response()
        }
    }
}

async fn receive_and_store(
    state: &AppState,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<usize, AppError> {
    let mut multipart =
        multipart.map_err(|e| AppError::InvalidInput(format!("Malformed form: {}", e)))?;

    // Drain the form first; field order is the client's business, slot
    // names are decided by field names alone.
    let mut fields: HashMap<String, (String, Vec<u8>)> = HashMap::new();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::InvalidInput(format!("Malformed form: {}", e)))?
    {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };
        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::InvalidInput(format!("Malformed form: {}", e)))?;
        fields.insert(name, (content_type, data.to_vec()));
    }

    if let Some((content_type, data)) = fields.remove("top") {
        state
            .store
            .upload(&SlotName::Top, &content_type, data)
            .await
            .map_err(|e| AppError::Storage(e.to_string()))?;
    }

    // Body fields must be contiguous from photo_1; the first missing index
    // ends processing.
    let mut count = 0;
    let mut index = 1u32;
    while let Some((content_type, data)) = fields.remove(&format!("photo_{}", index)) {
        state
            .store
            .upload(&SlotName::body(index), &content_type, data)
            .await
            .map_err(|e| AppError::Storage(e.to_string()))?;
        count += 1;
        index += 1;
    }

    tracing::info!(body_count = count, "photos written");
    Ok(count)
}
