mod helpers;

use axum_test::multipart::{MultipartForm, Part};
use helpers::{png_fixture, setup_test_app};
use tannen_core::models::PhotoListResponse;

#[tokio::test]
async fn test_list_photos_empty() {
    let app = setup_test_app().await;

    let response = app.client().get("/api/photos").await;

    assert_eq!(response.status_code(), 200);
    let body: PhotoListResponse = response.json();
    assert!(body.photos.is_empty());
}

#[tokio::test]
async fn test_list_photos_in_display_order() {
    let app = setup_test_app().await;

    let form = MultipartForm::new()
        .add_part(
            "photo_1",
            Part::bytes(png_fixture()).file_name("a.png").mime_type("image/png"),
        )
        .add_part(
            "photo_2",
            Part::bytes(png_fixture()).file_name("b.png").mime_type("image/png"),
        )
        .add_part(
            "top",
            Part::bytes(png_fixture()).file_name("c.png").mime_type("image/png"),
        );
    app.client().post("/api/upload-photos").multipart(form).await;

    let response = app.client().get("/api/photos").await;

    assert_eq!(response.status_code(), 200);
    let body: PhotoListResponse = response.json();
    assert_eq!(body.photos, vec!["top.jpg", "1.jpg", "2.jpg"]);
}

#[tokio::test]
async fn test_uploaded_photo_is_served_statically() {
    let app = setup_test_app().await;

    let form = MultipartForm::new().add_part(
        "top",
        Part::bytes(png_fixture()).file_name("c.png").mime_type("image/png"),
    );
    app.client().post("/api/upload-photos").multipart(form).await;

    let response = app.client().get("/photos/top.jpg").await;

    assert_eq!(response.status_code(), 200);
    assert_eq!(response.as_bytes().to_vec(), png_fixture());
}

#[tokio::test]
async fn test_healthz() {
    let app = setup_test_app().await;

    let response = app.client().get("/healthz").await;

    assert_eq!(response.status_code(), 200);
    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], "ok");
}
