//! Tannen core library
//!
//! Shared foundation for the tannen workspace: configuration, the unified
//! error type, the slot naming scheme both persistence paths agree on, and
//! the response models exchanged between the API and its clients.

pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod naming;
pub mod storage_types;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use naming::SlotName;
pub use storage_types::StorageBackend;
