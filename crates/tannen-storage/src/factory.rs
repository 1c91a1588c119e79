//! Storage factory
//!
//! Selects a [`PhotoStore`] backend from configuration. The bucket backend
//! needs a signed-in session for its namespace and bearer token; the local
//! backend ignores it.

use crate::bucket::BucketPhotoStore;
use crate::local::LocalPhotoStore;
use crate::traits::{PhotoStore, StoreError, StoreResult};
use std::sync::Arc;
use tannen_client::Session;
use tannen_core::{Config, StorageBackend};

pub async fn create_store(
    config: &Config,
    session: Option<&Session>,
) -> StoreResult<Arc<dyn PhotoStore>> {
    match config.storage_backend {
        StorageBackend::Local => {
            let store = LocalPhotoStore::new(
                config.photos_dir.clone(),
                config.photos_base_url.clone(),
            )
            .await?;
            tracing::info!(
                backend = %StorageBackend::Local,
                photos_dir = %config.photos_dir,
                "Photo store initialized"
            );
            Ok(Arc::new(store))
        }
        StorageBackend::Bucket => {
            let session = session.ok_or_else(|| {
                StoreError::ConfigError(
                    "bucket storage requires a signed-in session".to_string(),
                )
            })?;
            let store = BucketPhotoStore::new(config, session)?;
            tracing::info!(
                backend = %StorageBackend::Bucket,
                bucket = %config.bucket,
                user_id = %session.user_id,
                "Photo store initialized"
            );
            Ok(Arc::new(store))
        }
    }
}
