//! Application setup and initialization
//!
//! Initialization logic kept out of main.rs so integration tests can build
//! the full router against a throwaway photos directory.

pub mod routes;
pub mod server;
pub mod storage;

use crate::state::AppState;
use anyhow::{Context, Result};
use std::sync::Arc;
use tannen_core::Config;

/// Initialize the entire application
pub async fn initialize_app(config: &Config) -> Result<(Arc<AppState>, axum::Router)> {
    // Validate configuration first - fail fast on misconfiguration
    config
        .validate()
        .context("Configuration validation failed")?;

    // Setup storage
    let store = storage::setup_storage(config).await?;

    let state = Arc::new(AppState {
        store,
        config: config.clone(),
    });

    // Setup routes
    let router = routes::setup_routes(config, state.clone())?;

    Ok((state, router))
}
