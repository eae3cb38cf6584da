//! In-memory reference server for the hoot REST contract
//!
//! Implements sign-up, sign-in and the hoot and comment endpoints over
//! in-memory repositories. It exists to exercise the client end to end;
//! state is lost when the process exits.

pub mod error;
pub mod jwt;
pub mod middleware;
pub mod repositories;
pub mod routes;
pub mod state;

use std::net::SocketAddr;

use anyhow::Result;
use tokio::{net::TcpListener, task::JoinHandle};
use tracing::{error, info};

use crate::{
    jwt::{JwtConfig, JwtService},
    repositories::{HootRepository, UserRepository},
    state::AppState,
};

/// Stub API configuration
#[derive(Debug, Clone)]
pub struct StubConfig {
    /// Listen address
    pub addr: String,
    pub jwt: JwtConfig,
}

impl StubConfig {
    /// Create a new StubConfig from environment variables
    ///
    /// # Environment Variables
    /// - `STUB_API_ADDR`: listen address (default: "0.0.0.0:3000")
    /// - see [`JwtConfig::from_env`] for token settings
    pub fn from_env() -> Self {
        let addr = std::env::var("STUB_API_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());

        StubConfig {
            addr,
            jwt: JwtConfig::from_env(),
        }
    }
}

impl AppState {
    /// Fresh state with empty repositories
    pub fn new(jwt: JwtConfig) -> Self {
        AppState {
            jwt_service: JwtService::new(jwt),
            user_repository: UserRepository::new(),
            hoot_repository: HootRepository::new(),
        }
    }
}

/// Serve the stub API on an already bound listener until it fails
pub async fn serve(listener: TcpListener, state: AppState) -> Result<()> {
    let app = routes::create_router(state);
    axum::serve(listener, app).await?;
    Ok(())
}

/// Start a stub API on an ephemeral localhost port in the background
pub async fn spawn_local(jwt: JwtConfig) -> Result<(SocketAddr, JoinHandle<()>)> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    info!("Stub API listening on {}", addr);

    let handle = tokio::spawn(async move {
        if let Err(e) = serve(listener, AppState::new(jwt)).await {
            error!("Stub API stopped: {}", e);
        }
    });

    Ok((addr, handle))
}
