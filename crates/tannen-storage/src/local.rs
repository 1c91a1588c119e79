use crate::traits::{PhotoStore, StoreError, StoreResult};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tannen_core::{SlotName, StorageBackend};
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// Local filesystem storage implementation
///
/// Writes photos flat into one directory; this is the namespace the upload
/// endpoint owns and the web viewer reads from. Writes always overwrite.
#[derive(Clone)]
pub struct LocalPhotoStore {
    base_path: PathBuf,
    base_url: String,
}

impl LocalPhotoStore {
    /// Create a new LocalPhotoStore instance
    ///
    /// # Arguments
    /// * `base_path` - Photo directory (e.g., "public/photos"), created if absent
    /// * `base_url` - Base URL the directory is served under
    pub async fn new(base_path: impl Into<PathBuf>, base_url: String) -> StoreResult<Self> {
        let base_path = base_path.into();

        fs::create_dir_all(&base_path).await.map_err(|e| {
            StoreError::ConfigError(format!(
                "Failed to create photos directory {}: {}",
                base_path.display(),
                e
            ))
        })?;

        Ok(LocalPhotoStore {
            base_path,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Slot names are fixed-format (`top.jpg`, `{n}.jpg`), so joining them
    /// can never escape the base directory.
    fn file_path(&self, name: &SlotName) -> PathBuf {
        self.base_path.join(name.file_name())
    }
}

#[async_trait]
impl PhotoStore for LocalPhotoStore {
    async fn upload(
        &self,
        name: &SlotName,
        _content_type: &str,
        data: Vec<u8>,
    ) -> StoreResult<String> {
        let path = self.file_path(name);
        let size = data.len();

        let start = std::time::Instant::now();

        let mut file = fs::File::create(&path).await.map_err(|e| {
            StoreError::UploadFailed(format!("Failed to create file {}: {}", path.display(), e))
        })?;

        file.write_all(&data).await.map_err(|e| {
            StoreError::UploadFailed(format!("Failed to write file {}: {}", path.display(), e))
        })?;

        file.sync_all().await.map_err(|e| {
            StoreError::UploadFailed(format!("Failed to sync file {}: {}", path.display(), e))
        })?;

        let url = self.public_url(name);

        tracing::info!(
            path = %path.display(),
            name = %name,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local photo write successful"
        );

        Ok(url)
    }

    async fn delete(&self, name: &SlotName) -> StoreResult<()> {
        let path = self.file_path(name);

        if !fs::try_exists(&path).await.unwrap_or(false) {
            return Ok(());
        }

        fs::remove_file(&path).await.map_err(|e| {
            StoreError::DeleteFailed(format!("Failed to delete file {}: {}", path.display(), e))
        })?;

        tracing::info!(path = %path.display(), name = %name, "Local photo delete successful");

        Ok(())
    }

    async fn list(&self) -> StoreResult<Vec<String>> {
        let mut entries = fs::read_dir(&self.base_path).await.map_err(|e| {
            StoreError::ListFailed(format!(
                "Failed to read photos directory {}: {}",
                self.base_path.display(),
                e
            ))
        })?;

        let mut names: Vec<SlotName> = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| StoreError::ListFailed(e.to_string()))?
        {
            let file_name = entry.file_name();
            // Files outside the naming scheme are not photos; skip them.
            if let Some(name) = file_name.to_str().and_then(SlotName::parse) {
                names.push(name);
            }
        }

        names.sort();
        Ok(names.iter().map(SlotName::file_name).collect())
    }

    fn public_url(&self, name: &SlotName) -> String {
        format!("{}/{}", self.base_url, name.file_name())
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Local
    }
}
