//! Tannen intake library
//!
//! The photo intake workflow: an [`IntakeTray`] collects a top (cover)
//! photo and an ordered run of body photos, validates every candidate,
//! keeps body slot names dense while entries come and go, and pushes the
//! lot through a [`tannen_storage::PhotoStore`] one object at a time.
//!
//! The tray knows nothing about any UI toolkit. File selection, oversize
//! confirmation, and previews come in through small capability traits so
//! the whole workflow is testable headlessly.

pub mod candidate;
pub mod pending;
pub mod preview;
pub mod tray;
pub mod validate;

pub use candidate::{ConfirmOversize, FileCandidate};
pub use pending::PendingPhoto;
pub use preview::{NullPreview, Preview, PreviewFactory};
pub use tray::{IntakeError, IntakeTray, UploadReport};
pub use validate::Rejection;
