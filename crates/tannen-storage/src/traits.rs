//! Storage abstraction trait
//!
//! Every photo backend implements [`PhotoStore`]. Uploads are
//! overwrite-if-exists: slot names are the only identity a photo has, so
//! re-uploading a name replaces the previous object with no versioning.

use async_trait::async_trait;
use tannen_core::{SlotName, StorageBackend};
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Delete failed: {0}")]
    DeleteFailed(String),

    #[error("List failed: {0}")]
    ListFailed(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Storage abstraction trait
///
/// Writes are never retried here; a failed call surfaces the backend's
/// message and the caller decides whether the workflow continues.
#[async_trait]
pub trait PhotoStore: Send + Sync {
    /// Store `data` under the slot name, overwriting any existing object.
    /// Returns the public URL of the stored photo.
    async fn upload(
        &self,
        name: &SlotName,
        content_type: &str,
        data: Vec<u8>,
    ) -> StoreResult<String>;

    /// Remove the object at the slot name. A missing object is treated as
    /// success; only a backend-reported failure is an error.
    async fn delete(&self, name: &SlotName) -> StoreResult<()>;

    /// Names currently stored in this backend's namespace, in display
    /// order. Relies on the backend's default page size; no pagination.
    async fn list(&self) -> StoreResult<Vec<String>>;

    /// Derive the public retrieval URL for a slot name. Performs no
    /// existence check and never fails.
    fn public_url(&self, name: &SlotName) -> String;

    /// Which backend this store writes through.
    fn backend_type(&self) -> StorageBackend;
}
