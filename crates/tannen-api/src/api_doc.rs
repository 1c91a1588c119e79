//! OpenAPI document for the photo endpoints.

use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::upload::upload_photos,
        crate::handlers::photos::list_photos,
    ),
    components(schemas(
        tannen_core::models::EndpointUploadResponse,
        tannen_core::models::PhotoListResponse,
        crate::error::ErrorResponse,
    )),
    tags(
        (name = "photos", description = "Photo intake and listing")
    )
)]
pub struct ApiDoc;
