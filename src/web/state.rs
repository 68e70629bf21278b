//! Shared application state for handlers.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Duration;

use crate::auth::{CredentialHasher, TokenService};
use crate::config::Config;
use crate::{ChirpyError, Database, Result};

/// Application state shared across handlers.
pub struct AppState {
    /// Database handle.
    pub db: Database,
    /// Password hasher.
    pub hasher: CredentialHasher,
    /// Token issuer/validator.
    pub tokens: TokenService,
    /// Default and maximum token lifetime.
    pub token_ttl: Duration,
    /// Deployment platform.
    pub platform: String,
    /// Requests served under `/app/` since start or last reset.
    hits: AtomicU64,
}

impl AppState {
    /// Create application state with the default hasher on the `prod` platform.
    pub fn new(db: Database, tokens: TokenService, token_ttl: Duration) -> Self {
        Self {
            db,
            hasher: CredentialHasher::default(),
            tokens,
            token_ttl,
            platform: "prod".to_string(),
            hits: AtomicU64::new(0),
        }
    }

    /// Build application state from configuration.
    pub fn from_config(db: Database, config: &Config) -> Result<Self> {
        config.validate()?;

        let ttl_secs = i64::try_from(config.auth.token_ttl_secs)
            .map_err(|_| ChirpyError::Config("token_ttl_secs is too large".to_string()))?;
        let token_ttl = Duration::try_seconds(ttl_secs)
            .ok_or_else(|| ChirpyError::Config("token_ttl_secs is too large".to_string()))?;

        let tokens =
            TokenService::new(config.auth.token_secret.as_bytes()).with_issuer(&config.auth.issuer);

        Ok(Self::new(db, tokens, token_ttl).with_platform(&config.server.platform))
    }

    /// Replace the password hasher.
    pub fn with_hasher(mut self, hasher: CredentialHasher) -> Self {
        self.hasher = hasher;
        self
    }

    /// Set the deployment platform.
    pub fn with_platform(mut self, platform: impl Into<String>) -> Self {
        self.platform = platform.into();
        self
    }

    /// Whether development-only endpoints are enabled.
    pub fn is_dev(&self) -> bool {
        self.platform == "dev"
    }

    /// Count one file server hit and return the new total.
    pub fn record_hit(&self) -> u64 {
        self.hits.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// Current hit count.
    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    /// Reset the hit counter to zero.
    pub fn reset_hits(&self) {
        self.hits.store(0, Ordering::Relaxed);
    }
}
