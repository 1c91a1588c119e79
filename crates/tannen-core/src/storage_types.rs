use std::fmt;
use std::str::FromStr;

/// Which persistence path a binary writes through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    /// Local photos directory, written by the upload endpoint.
    Local,
    /// Hosted storage bucket, written by the bucket client.
    Bucket,
}

impl fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageBackend::Local => write!(f, "local"),
            StorageBackend::Bucket => write!(f, "bucket"),
        }
    }
}

impl FromStr for StorageBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "local" => Ok(StorageBackend::Local),
            "bucket" => Ok(StorageBackend::Bucket),
            other => Err(format!("unknown storage backend: {}", other)),
        }
    }
}
