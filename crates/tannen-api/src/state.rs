//! Application state.

use std::sync::Arc;
use tannen_core::Config;
use tannen_storage::PhotoStore;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    /// The local persistence path the upload endpoint writes through.
    pub store: Arc<dyn PhotoStore>,
    pub config: Config,
}

fn _assert_app_state_send_sync() {
    fn assert_send<T: Send>() {}
    fn assert_sync<T: Sync>() {}
    assert_send::<AppState>();
    assert_sync::<AppState>();
}
