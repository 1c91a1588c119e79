//! Candidate validation policy.
//!
//! Applied to every file before it becomes a pending photo. Rejections are
//! user-facing notices handled locally; nothing here ever reaches a
//! backend.

use tannen_core::constants::SIZE_WARN_THRESHOLD;
use thiserror::Error;

use crate::candidate::{ConfirmOversize, FileCandidate};

/// Why a candidate was not accepted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("{file_name} is not an image file")]
    NotAnImage { file_name: String },

    #[error("{file_name} skipped: {size_kib} KiB exceeds the {limit_kib} KiB guideline")]
    Declined {
        file_name: String,
        size_kib: usize,
        limit_kib: usize,
    },
}

/// Accept or reject one candidate.
///
/// Files whose declared media type is not `image/*` are rejected outright.
/// Files over [`SIZE_WARN_THRESHOLD`] are accepted only after explicit
/// confirmation; declining discards them without error.
pub fn validate(
    candidate: &FileCandidate,
    confirm: &mut dyn ConfirmOversize,
) -> Result<(), Rejection> {
    if !candidate.content_type.starts_with("image/") {
        return Err(Rejection::NotAnImage {
            file_name: candidate.file_name.clone(),
        });
    }

    if candidate.size() > SIZE_WARN_THRESHOLD
        && !confirm.confirm_oversize(&candidate.file_name, candidate.size())
    {
        return Err(Rejection::Declined {
            file_name: candidate.file_name.clone(),
            size_kib: candidate.size() / 1024,
            limit_kib: SIZE_WARN_THRESHOLD / 1024,
        });
    }

    Ok(())
}
