use axum_test::TestServer;
use tannen_api::setup;
use tannen_core::{Config, StorageBackend};
use tempfile::TempDir;

/// Test application: the full router wired to a throwaway photos directory.
pub struct TestApp {
    pub server: TestServer,
    pub photos_dir: TempDir,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }

    pub fn photo_path(&self, name: &str) -> std::path::PathBuf {
        self.photos_dir.path().join(name)
    }
}

pub fn test_config(photos_dir: &std::path::Path) -> Config {
    Config {
        server_port: 0,
        cors_origins: vec!["*".to_string()],
        environment: "test".to_string(),
        backend_url: "https://backend.test".to_string(),
        backend_anon_key: "anon-key".to_string(),
        bucket: "christmas-tree-photos".to_string(),
        photos_dir: photos_dir.display().to_string(),
        photos_base_url: "http://localhost:4000/photos".to_string(),
        storage_backend: StorageBackend::Local,
        max_upload_size_bytes: 10 * 1024 * 1024,
    }
}

/// Setup a test application with an isolated photos directory
pub async fn setup_test_app() -> TestApp {
    let photos_dir = tempfile::tempdir().expect("Failed to create temp photos dir");
    let config = test_config(photos_dir.path());

    let (_state, router) = setup::initialize_app(&config)
        .await
        .expect("Failed to initialize app");

    TestApp {
        server: TestServer::new(router).expect("Failed to start test server"),
        photos_dir,
    }
}

/// A tiny valid 1x1 PNG, enough for endpoints that never decode pixels.
pub fn png_fixture() -> Vec<u8> {
    vec![
        0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, // PNG signature
        0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44, 0x52, // IHDR chunk
        0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, // 1x1 dimensions
        0x08, 0x02, 0x00, 0x00, 0x00, 0x90, 0x77, 0x53, 0xDE, 0x00, 0x00, 0x00, 0x0C, 0x49,
        0x44, 0x41, 0x54, // IDAT chunk
        0x08, 0xD7, 0x63, 0xF8, 0x00, 0x00, 0x00, 0x00, 0x01, 0x00, 0x01, 0x00, 0x18, 0xDD,
        0x8D, 0x89, 0x00, 0x00, 0x00, 0x00, 0x49, 0x45, 0x4E, 0x44, 0xAE, 0x42, 0x60,
        0x82, // IEND chunk
    ]
}
