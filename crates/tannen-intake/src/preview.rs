//! Preview handles.
//!
//! Each pending photo owns one preview handle, created at selection time.
//! The tray releases a handle when its photo is removed, replaced, or
//! successfully submitted; there is no other release path.

use crate::candidate::FileCandidate;

/// A local preview resource tied to one pending photo.
pub trait Preview: Send {
    /// Free the resource. Must be safe to call more than once.
    fn release(&mut self);
}

/// Preview for surfaces that render nothing (CLI, tests).
pub struct NullPreview;

impl Preview for NullPreview {
    fn release(&mut self) {}
}

/// Creates a preview for a newly accepted candidate.
pub type PreviewFactory = Box<dyn Fn(&FileCandidate) -> Box<dyn Preview + Send> + Send + Sync>;

pub(crate) fn null_preview_factory() -> PreviewFactory {
    Box::new(|_| Box::new(NullPreview))
}
