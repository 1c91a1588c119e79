//! Workspace-wide constants.

use std::time::Duration;

/// Storage bucket holding tree photos on the hosted backend.
pub const PHOTO_BUCKET: &str = "christmas-tree-photos";

/// File size above which the intake flow asks for explicit confirmation
/// before accepting a photo. Large photos still work, they just make the
/// tree animation stutter on slow connections.
pub const SIZE_WARN_THRESHOLD: usize = 500 * 1024;

/// Delay between a successful submission and the view refresh, so the
/// backend has settled before photos are re-listed.
pub const REFRESH_DELAY: Duration = Duration::from_millis(1500);

/// Cache lifetime requested for uploaded bucket objects, in seconds.
pub const BUCKET_CACHE_CONTROL_SECS: u32 = 3600;
