//! Web server for Chirpy.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;

use crate::auth::CredentialHasher;
use crate::config::{Config, ServerConfig};
use crate::{ChirpyError, Database, Result};

use super::router::create_router;
use super::state::AppState;

/// HTTP server for the API and static files.
pub struct WebServer {
    /// Address to bind.
    addr: SocketAddr,
    /// Application state.
    state: AppState,
    /// Server configuration.
    server_config: ServerConfig,
}

impl WebServer {
    /// Create a new web server.
    ///
    /// Fails if the configuration is invalid or the address cannot be parsed.
    pub fn new(config: &Config, db: Database) -> Result<Self> {
        let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
            .parse()
            .map_err(|e| ChirpyError::Config(format!("invalid server address: {e}")))?;

        let state = AppState::from_config(db, config)?;

        Ok(Self {
            addr,
            state,
            server_config: config.server.clone(),
        })
    }

    /// Replace the password hasher.
    pub fn with_hasher(mut self, hasher: CredentialHasher) -> Self {
        self.state = self.state.with_hasher(hasher);
        self
    }

    /// Get the configured address.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    fn into_parts(self) -> (SocketAddr, Router) {
        let router = create_router(Arc::new(self.state), &self.server_config);
        (self.addr, router)
    }

    /// Run the web server until it fails.
    pub async fn run(self) -> std::io::Result<()> {
        let (addr, router) = self.into_parts();

        let listener = TcpListener::bind(addr).await?;
        tracing::info!("Web server listening on http://{}", listener.local_addr()?);

        axum::serve(listener, router).await
    }

    /// Run the server in the background and return the bound address.
    ///
    /// This is useful for testing when binding to port 0.
    pub async fn run_with_addr(self) -> std::io::Result<SocketAddr> {
        let (addr, router) = self.into_parts();

        let listener = TcpListener::bind(addr).await?;
        let local_addr = listener.local_addr()?;
        tracing::info!("Web server listening on http://{}", local_addr);

        tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, router).await {
                tracing::error!("Web server error: {}", e);
            }
        });

        Ok(local_addr)
    }
}
