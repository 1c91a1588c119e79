use anyhow::Result;
use tannen_core::Config;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let config = Config::from_env()?;

    // Initialize the application (storage, routes)
    let (_state, router) = tannen_api::setup::initialize_app(&config).await?;

    // Start the server
    tannen_api::setup::server::start_server(&config, router).await?;

    Ok(())
}
