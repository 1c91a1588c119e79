//! Storage setup and initialization

use anyhow::Result;
use std::sync::Arc;
use tannen_core::Config;
use tannen_storage::{LocalPhotoStore, PhotoStore};

/// The endpoint always writes through the local path; the bucket backend
/// belongs to the client side and needs a user session the server never
/// holds.
pub async fn setup_storage(config: &Config) -> Result<Arc<dyn PhotoStore>> {
    let store =
        LocalPhotoStore::new(config.photos_dir.clone(), config.photos_base_url.clone()).await?;

    tracing::info!(
        photos_dir = %config.photos_dir,
        photos_base_url = %config.photos_base_url,
        "Photo store initialized"
    );

    Ok(Arc::new(store))
}
