use crate::traits::{PhotoStore, StoreError, StoreResult};
use async_trait::async_trait;
use percent_encoding::{percent_encode, AsciiSet, CONTROLS};
use std::time::Duration;
use tannen_client::Session;
use tannen_core::constants::BUCKET_CACHE_CONTROL_SECS;
use tannen_core::{Config, SlotName, StorageBackend};
use uuid::Uuid;

/// Characters escaped in object path segments.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'<')
    .add(b'>')
    .add(b'`')
    .add(b'#')
    .add(b'?')
    .add(b'{')
    .add(b'}');

/// Hosted bucket storage implementation
///
/// Talks to the backend's storage REST API. Objects are namespaced per
/// user (`{user_id}/{name}`), so each account decorates its own tree; the
/// session passed at construction provides both the namespace and the
/// bearer token.
#[derive(Clone)]
pub struct BucketPhotoStore {
    client: reqwest::Client,
    base_url: String,
    anon_key: String,
    bucket: String,
    user_id: Uuid,
    access_token: String,
}

impl BucketPhotoStore {
    pub fn new(config: &Config, session: &Session) -> StoreResult<Self> {
        Self::with_backend(
            config.backend_url.clone(),
            config.backend_anon_key.clone(),
            config.bucket.clone(),
            session,
        )
    }

    pub fn with_backend(
        base_url: String,
        anon_key: String,
        bucket: String,
        session: &Session,
    ) -> StoreResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .map_err(|e| StoreError::ConfigError(e.to_string()))?;

        Ok(BucketPhotoStore {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            anon_key,
            bucket,
            user_id: session.user_id,
            access_token: session.access_token.clone(),
        })
    }

    /// Object key inside the bucket: `{user_id}/{file_name}`.
    fn object_path(&self, name: &SlotName) -> String {
        format!("{}/{}", self.user_id, name.file_name())
    }

    fn object_url(&self, path: &str) -> String {
        format!(
            "{}/storage/v1/object/{}/{}",
            self.base_url, self.bucket, path
        )
    }

    fn authed(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request
            .header("apikey", self.anon_key.as_str())
            .header("Authorization", format!("Bearer {}", self.access_token))
    }
}

/// Storage API errors come back as `{"statusCode":..,"error":..,"message":..}`;
/// surface the message field, falling back to the raw body.
fn backend_message(status: reqwest::StatusCode, body: &str) -> String {
    #[derive(serde::Deserialize)]
    struct StorageApiError {
        message: Option<String>,
        error: Option<String>,
    }

    if let Ok(parsed) = serde_json::from_str::<StorageApiError>(body) {
        if let Some(message) = parsed.message.or(parsed.error) {
            return message;
        }
    }

    if body.trim().is_empty() {
        format!("HTTP {}", status)
    } else {
        body.trim().to_string()
    }
}

#[derive(Debug, serde::Deserialize)]
struct ObjectEntry {
    name: String,
}

#[async_trait]
impl PhotoStore for BucketPhotoStore {
    async fn upload(
        &self,
        name: &SlotName,
        content_type: &str,
        data: Vec<u8>,
    ) -> StoreResult<String> {
        let path = self.object_path(name);
        let size = data.len();
        let start = std::time::Instant::now();

        let response = self
            .authed(self.client.post(self.object_url(&path)))
            .header("Content-Type", content_type)
            .header("x-upsert", "true")
            .header("cache-control", BUCKET_CACHE_CONTROL_SECS.to_string())
            .body(data)
            .send()
            .await
            .map_err(|e| StoreError::UploadFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = backend_message(status, &body);
            tracing::error!(
                bucket = %self.bucket,
                path = %path,
                size_bytes = size,
                status = %status,
                error = %message,
                "Bucket upload failed"
            );
            return Err(StoreError::UploadFailed(message));
        }

        tracing::info!(
            bucket = %self.bucket,
            path = %path,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Bucket upload successful"
        );

        Ok(self.public_url(name))
    }

    async fn delete(&self, name: &SlotName) -> StoreResult<()> {
        let path = self.object_path(name);

        let response = self
            .authed(self.client.delete(self.object_url(&path)))
            .send()
            .await
            .map_err(|e| StoreError::DeleteFailed(e.to_string()))?;

        let status = response.status();
        // A missing object is not distinguished from success.
        if !status.is_success() && status != reqwest::StatusCode::NOT_FOUND {
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::DeleteFailed(backend_message(status, &body)));
        }

        tracing::info!(bucket = %self.bucket, path = %path, "Bucket delete successful");

        Ok(())
    }

    async fn list(&self) -> StoreResult<Vec<String>> {
        let url = format!("{}/storage/v1/object/list/{}", self.base_url, self.bucket);

        // Default page size only; the namespace holds at most a few dozen
        // photos.
        let response = self
            .authed(self.client.post(&url))
            .json(&serde_json::json!({ "prefix": self.user_id.to_string() }))
            .send()
            .await
            .map_err(|e| StoreError::ListFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::ListFailed(backend_message(status, &body)));
        }

        let entries: Vec<ObjectEntry> = response
            .json()
            .await
            .map_err(|e| StoreError::ListFailed(e.to_string()))?;

        let mut names: Vec<SlotName> = entries
            .iter()
            .filter_map(|entry| SlotName::parse(&entry.name))
            .collect();
        names.sort();
        Ok(names.iter().map(SlotName::file_name).collect())
    }

    fn public_url(&self, name: &SlotName) -> String {
        let path = self.object_path(name);
        let encoded: String = path
            .split('/')
            .map(|segment| percent_encode(segment.as_bytes(), PATH_SEGMENT).to_string())
            .collect::<Vec<_>>()
            .join("/");
        format!(
            "{}/storage/v1/object/public/{}/{}",
            self.base_url, self.bucket, encoded
        )
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Bucket
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_session(user_id: Uuid) -> Session {
        Session {
            user_id,
            email: Some("elf@example.com".to_string()),
            access_token: "token-123".to_string(),
            refresh_token: None,
            expires_at: None,
        }
    }

    fn test_store(server: &mockito::ServerGuard, user_id: Uuid) -> BucketPhotoStore {
        BucketPhotoStore::with_backend(
            server.url(),
            "anon-key".to_string(),
            "christmas-tree-photos".to_string(),
            &test_session(user_id),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn upload_upserts_into_the_user_namespace() {
        let mut server = mockito::Server::new_async().await;
        let user_id = Uuid::new_v4();
        let mock = server
            .mock(
                "POST",
                format!("/storage/v1/object/christmas-tree-photos/{}/top.jpg", user_id).as_str(),
            )
            .match_header("x-upsert", "true")
            .match_header("authorization", "Bearer token-123")
            .with_status(200)
            .with_body(r#"{"Key":"christmas-tree-photos/top.jpg"}"#)
            .create_async()
            .await;

        let store = test_store(&server, user_id);
        let url = store
            .upload(&SlotName::Top, "image/jpeg", b"cover".to_vec())
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(
            url,
            format!(
                "{}/storage/v1/object/public/christmas-tree-photos/{}/top.jpg",
                server.url(),
                user_id
            )
        );
    }

    #[tokio::test]
    async fn upload_failure_carries_the_backend_message() {
        let mut server = mockito::Server::new_async().await;
        let user_id = Uuid::new_v4();
        server
            .mock(
                "POST",
                format!("/storage/v1/object/christmas-tree-photos/{}/1.jpg", user_id).as_str(),
            )
            .with_status(404)
            .with_body(r#"{"statusCode":"404","error":"Not found","message":"Bucket not found"}"#)
            .create_async()
            .await;

        let store = test_store(&server, user_id);
        let err = store
            .upload(&SlotName::body(1), "image/jpeg", b"body".to_vec())
            .await
            .unwrap_err();

        match err {
            StoreError::UploadFailed(message) => assert_eq!(message, "Bucket not found"),
            other => panic!("expected UploadFailed, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn list_filters_and_orders_slot_names() {
        let mut server = mockito::Server::new_async().await;
        let user_id = Uuid::new_v4();
        server
            .mock("POST", "/storage/v1/object/list/christmas-tree-photos")
            .with_status(200)
            .with_body(
                r#"[{"name":"2.jpg"},{"name":"top.jpg"},{"name":".emptyFolderPlaceholder"},{"name":"1.jpg"}]"#,
            )
            .create_async()
            .await;

        let store = test_store(&server, user_id);
        let names = store.list().await.unwrap();
        assert_eq!(names, vec!["top.jpg", "1.jpg", "2.jpg"]);
    }

    #[tokio::test]
    async fn delete_maps_backend_failure() {
        let mut server = mockito::Server::new_async().await;
        let user_id = Uuid::new_v4();
        server
            .mock(
                "DELETE",
                format!("/storage/v1/object/christmas-tree-photos/{}/3.jpg", user_id).as_str(),
            )
            .with_status(500)
            .with_body(r#"{"message":"backend exploded"}"#)
            .create_async()
            .await;

        let store = test_store(&server, user_id);
        let err = store.delete(&SlotName::body(3)).await.unwrap_err();
        assert!(matches!(err, StoreError::DeleteFailed(m) if m == "backend exploded"));
    }

    #[tokio::test]
    async fn delete_missing_object_is_success() {
        let mut server = mockito::Server::new_async().await;
        let user_id = Uuid::new_v4();
        server
            .mock(
                "DELETE",
                format!("/storage/v1/object/christmas-tree-photos/{}/9.jpg", user_id).as_str(),
            )
            .with_status(404)
            .with_body(r#"{"message":"Object not found"}"#)
            .create_async()
            .await;

        let store = test_store(&server, user_id);
        assert!(store.delete(&SlotName::body(9)).await.is_ok());
    }

    #[test]
    fn public_url_needs_no_network() {
        let session = test_session(Uuid::nil());
        let store = BucketPhotoStore::with_backend(
            "https://backend.test".to_string(),
            "anon-key".to_string(),
            "christmas-tree-photos".to_string(),
            &session,
        )
        .unwrap();

        assert_eq!(
            store.public_url(&SlotName::body(4)),
            format!(
                "https://backend.test/storage/v1/object/public/christmas-tree-photos/{}/4.jpg",
                Uuid::nil()
            )
        );
    }
}
