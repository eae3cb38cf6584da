use anyhow::Result;
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

use stub_api::{StubConfig, serve, state::AppState};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    info!("Starting stub API");

    let config = StubConfig::from_env();
    let listener = tokio::net::TcpListener::bind(&config.addr).await?;
    info!("Stub API listening on {}", config.addr);

    serve(listener, AppState::new(config.jwt)).await
}
