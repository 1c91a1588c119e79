//! The intake tray state machine.

use tannen_core::SlotName;
use tannen_storage::{PhotoStore, StoreError};
use thiserror::Error;

use crate::candidate::{ConfirmOversize, FileCandidate};
use crate::pending::PendingPhoto;
use crate::preview::{null_preview_factory, PreviewFactory};
use crate::validate::{validate, Rejection};

/// Intake workflow errors.
#[derive(Debug, Error)]
pub enum IntakeError {
    #[error("a top (cover) photo is required before uploading")]
    MissingTop,

    #[error("a submission is already in progress")]
    SubmitInProgress,

    #[error("upload failed for {name}: {source}")]
    Upload {
        name: String,
        #[source]
        source: StoreError,
    },
}

impl IntakeError {
    /// Likely-cause hint for a failed upload, suitable for a user notice.
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            IntakeError::Upload { .. } => Some(
                "check that the storage bucket exists, is set to public access, \
                 and the network connection is up",
            ),
            _ => None,
        }
    }
}

/// Outcome of a fully successful submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadReport {
    /// Number of body photos stored; the top photo is implied.
    pub body_count: usize,
}

/// Holds pending photos between selection and submission.
///
/// Invariant: body photos always carry the dense slot names
/// `1.jpg..{len}.jpg` in vector order.
pub struct IntakeTray {
    top: Option<PendingPhoto>,
    body: Vec<PendingPhoto>,
    submitting: bool,
    drag_active: bool,
    previews: PreviewFactory,
}

impl IntakeTray {
    pub fn new() -> Self {
        Self::with_preview_factory(null_preview_factory())
    }

    /// Tray whose accepted photos get previews from `previews`.
    pub fn with_preview_factory(previews: PreviewFactory) -> Self {
        Self {
            top: None,
            body: Vec::new(),
            submitting: false,
            drag_active: false,
            previews,
        }
    }

    pub fn top(&self) -> Option<&PendingPhoto> {
        self.top.as_ref()
    }

    pub fn body(&self) -> &[PendingPhoto] {
        &self.body
    }

    pub fn is_empty(&self) -> bool {
        self.top.is_none() && self.body.is_empty()
    }

    pub fn submitting(&self) -> bool {
        self.submitting
    }

    pub fn drag_active(&self) -> bool {
        self.drag_active
    }

    pub fn begin_drag(&mut self) {
        self.drag_active = true;
    }

    pub fn end_drag(&mut self) {
        self.drag_active = false;
    }

    /// Select the top (cover) photo, replacing any previous one. The
    /// replaced photo's preview is released.
    pub fn set_top(
        &mut self,
        candidate: FileCandidate,
        confirm: &mut dyn ConfirmOversize,
    ) -> Result<(), Rejection> {
        validate(&candidate, confirm)?;

        if let Some(mut previous) = self.top.take() {
            previous.release_preview();
        }

        let preview = (self.previews)(&candidate);
        self.top = Some(PendingPhoto::new(candidate, SlotName::Top, preview));
        Ok(())
    }

    /// Drop the top photo, releasing its preview.
    pub fn clear_top(&mut self) {
        if let Some(mut top) = self.top.take() {
            top.release_preview();
        }
    }

    /// Append validated body photos to the end of the sequence. Each
    /// accepted file is named `current length + 1` at the moment it lands,
    /// so a batch with rejections still produces dense names. Returns the
    /// rejections for the caller to surface.
    pub fn add_body(
        &mut self,
        candidates: impl IntoIterator<Item = FileCandidate>,
        confirm: &mut dyn ConfirmOversize,
    ) -> Vec<Rejection> {
        let mut rejections = Vec::new();

        for candidate in candidates {
            match validate(&candidate, confirm) {
                Ok(()) => {
                    let name = SlotName::body(self.body.len() as u32 + 1);
                    let preview = (self.previews)(&candidate);
                    self.body.push(PendingPhoto::new(candidate, name, preview));
                }
                Err(rejection) => rejections.push(rejection),
            }
        }

        rejections
    }

    /// Remove the body photo at `index` and renumber everything after it
    /// down by one, keeping the 1-based sequence gap-free. Returns false
    /// when the index is out of range.
    pub fn remove_body(&mut self, index: usize) -> bool {
        if index >= self.body.len() {
            return false;
        }

        let mut removed = self.body.remove(index);
        removed.release_preview();

        for (i, photo) in self.body.iter_mut().enumerate() {
            photo.set_name(SlotName::body(i as u32 + 1));
        }

        #[cfg(debug_assertions)]
        {
            let names: Vec<SlotName> = self.body.iter().map(|p| p.name()).collect();
            debug_assert!(tannen_core::naming::body_sequence_is_dense(&names));
        }

        true
    }

    /// Push every pending photo through `store`.
    ///
    /// Uploads run strictly one at a time, top first, then body photos in
    /// sequence order; each must land before the next starts. That is a
    /// serialization contract keeping slot names and stored bytes in step,
    /// not an artifact of the async style. The first failure aborts the
    /// rest; photos uploaded before it are not rolled back.
    ///
    /// On full success the tray is emptied and every preview released.
    pub async fn submit(&mut self, store: &dyn PhotoStore) -> Result<UploadReport, IntakeError> {
        if self.submitting {
            return Err(IntakeError::SubmitInProgress);
        }
        if self.top.is_none() {
            return Err(IntakeError::MissingTop);
        }

        self.submitting = true;
        let outcome = self.upload_in_order(store).await;
        self.submitting = false;

        match outcome {
            Ok(body_count) => {
                self.consume_all();
                tracing::info!(body_count, "photo submission complete");
                Ok(UploadReport { body_count })
            }
            Err(err) => Err(err),
        }
    }

    async fn upload_in_order(&self, store: &dyn PhotoStore) -> Result<usize, IntakeError> {
        let top = self.top.as_ref().ok_or(IntakeError::MissingTop)?;

        store
            .upload(&SlotName::Top, top.content_type(), top.bytes().to_vec())
            .await
            .map_err(|source| IntakeError::Upload {
                name: SlotName::Top.file_name(),
                source,
            })?;
        tracing::info!(name = %SlotName::Top, "photo uploaded");

        for photo in &self.body {
            let name = photo.name();
            store
                .upload(&name, photo.content_type(), photo.bytes().to_vec())
                .await
                .map_err(|source| IntakeError::Upload {
                    name: name.file_name(),
                    source,
                })?;
            tracing::info!(name = %name, "photo uploaded");
        }

        Ok(self.body.len())
    }

    fn consume_all(&mut self) {
        if let Some(mut top) = self.top.take() {
            top.release_preview();
        }
        for mut photo in self.body.drain(..) {
            photo.release_preview();
        }
    }

    /// Render the manual move-to-folder instructions for every pending
    /// file, for users who skip the network path. Returns `None` when
    /// nothing is selected.
    pub fn move_instructions(&self, target_dir: &str) -> Option<String> {
        if self.is_empty() {
            return None;
        }

        let mut out = String::new();
        out.push_str(&format!(
            "Save the selected photos into {} by hand:\n\n",
            target_dir
        ));

        let mut item = 1;
        if let Some(top) = &self.top {
            out.push_str(&format!(
                "{}. Cover photo \"{}\": save as \"{}\"\n",
                item,
                top.file_name(),
                SlotName::Top
            ));
            item += 1;
        }

        for (i, photo) in self.body.iter().enumerate() {
            out.push_str(&format!(
                "{}. Body photo {} \"{}\": save as \"{}\"\n",
                item,
                i + 1,
                photo.file_name(),
                photo.name()
            ));
            item += 1;
        }

        Some(out)
    }
}

impl Default for IntakeTray {
    fn default() -> Self {
        Self::new()
    }
}
