mod helpers;

use axum_test::multipart::{MultipartForm, Part};
use helpers::{png_fixture, setup_test_app};
use tannen_core::models::EndpointUploadResponse;

fn image_part(data: Vec<u8>, file_name: &str) -> Part {
    Part::bytes(data).file_name(file_name).mime_type("image/png")
}

#[tokio::test]
async fn test_upload_top_and_contiguous_body_photos() {
    let app = setup_test_app().await;

    let form = MultipartForm::new()
        .add_part("top", image_part(png_fixture(), "cover.png"))
        .add_part("photo_1", image_part(png_fixture(), "a.png"))
        .add_part("photo_2", image_part(png_fixture(), "b.png"));

    let response = app.client().post("/api/upload-photos").multipart(form).await;

    assert_eq!(response.status_code(), 200);
    let body: EndpointUploadResponse = response.json();
    assert!(body.success);
    assert_eq!(body.count, 2);

    assert!(app.photo_path("top.jpg").exists());
    assert!(app.photo_path("1.jpg").exists());
    assert!(app.photo_path("2.jpg").exists());
}

#[tokio::test]
async fn test_upload_stops_at_the_first_missing_index() {
    let app = setup_test_app().await;

    // photo_2 is missing, so photo_3 must be ignored entirely.
    let form = MultipartForm::new()
        .add_part("top", image_part(png_fixture(), "cover.png"))
        .add_part("photo_1", image_part(png_fixture(), "a.png"))
        .add_part("photo_3", image_part(png_fixture(), "c.png"));

    let response = app.client().post("/api/upload-photos").multipart(form).await;

    assert_eq!(response.status_code(), 200);
    let body: EndpointUploadResponse = response.json();
    assert_eq!(body.count, 1);

    assert!(app.photo_path("1.jpg").exists());
    assert!(!app.photo_path("3.jpg").exists());
}

#[tokio::test]
async fn test_upload_without_body_photos_counts_zero() {
    let app = setup_test_app().await;

    let form = MultipartForm::new().add_part("top", image_part(png_fixture(), "cover.png"));

    let response = app.client().post("/api/upload-photos").multipart(form).await;

    assert_eq!(response.status_code(), 200);
    let body: EndpointUploadResponse = response.json();
    assert!(body.success);
    assert_eq!(body.count, 0);
    assert!(app.photo_path("top.jpg").exists());
    assert!(!app.photo_path("1.jpg").exists());
}

#[tokio::test]
async fn test_upload_with_no_fields_succeeds_with_zero_count() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .post("/api/upload-photos")
        .multipart(MultipartForm::new())
        .await;

    assert_eq!(response.status_code(), 200);
    let body: EndpointUploadResponse = response.json();
    assert!(body.success);
    assert_eq!(body.count, 0);
}

#[tokio::test]
async fn test_reupload_overwrites_the_stored_photo() {
    let app = setup_test_app().await;

    let first = MultipartForm::new().add_part("top", image_part(b"first".to_vec(), "a.png"));
    app.client().post("/api/upload-photos").multipart(first).await;

    let second = MultipartForm::new().add_part("top", image_part(b"second".to_vec(), "b.png"));
    let response = app
        .client()
        .post("/api/upload-photos")
        .multipart(second)
        .await;

    assert_eq!(response.status_code(), 200);
    let stored = std::fs::read(app.photo_path("top.jpg")).unwrap();
    assert_eq!(stored, b"second");
}

#[tokio::test]
async fn test_malformed_body_returns_the_generic_failure() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .post("/api/upload-photos")
        .text("definitely not a multipart form")
        .await;

    assert_eq!(response.status_code(), 500);
    let body: serde_json::Value = response.json();
    assert_eq!(body, serde_json::json!({ "error": "Upload failed" }));
}
