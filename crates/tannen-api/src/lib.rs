//! Tannen API server library
//!
//! The local persistence path: a multipart upload endpoint writing photos
//! into the configured directory under the slot-name scheme, a listing
//! endpoint, and static serving of the photos directory.

pub mod api_doc;
pub mod error;
pub mod handlers;
pub mod setup;
pub mod state;
