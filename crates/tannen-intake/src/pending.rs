//! Pending uploads.

use std::fmt;
use tannen_core::SlotName;

use crate::candidate::FileCandidate;
use crate::preview::Preview;

/// A selected file waiting in the tray: its bytes, its preview handle, and
/// the slot name it is currently assigned. The name mutates while sibling
/// slots are added or removed before submission.
pub struct PendingPhoto {
    file_name: String,
    content_type: String,
    bytes: Vec<u8>,
    name: SlotName,
    preview: Box<dyn Preview + Send>,
}

impl PendingPhoto {
    pub(crate) fn new(
        candidate: FileCandidate,
        name: SlotName,
        preview: Box<dyn Preview + Send>,
    ) -> Self {
        Self {
            file_name: candidate.file_name,
            content_type: candidate.content_type,
            bytes: candidate.bytes,
            name,
            preview,
        }
    }

    /// Slot name this photo will be stored under.
    pub fn name(&self) -> SlotName {
        self.name
    }

    /// Original file name of the selected file.
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    pub(crate) fn set_name(&mut self, name: SlotName) {
        self.name = name;
    }

    pub(crate) fn release_preview(&mut self) {
        self.preview.release();
    }
}

impl fmt::Debug for PendingPhoto {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PendingPhoto")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("size", &self.bytes.len())
            .field("name", &self.name)
            .finish()
    }
}
