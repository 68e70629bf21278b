//! Configuration module for Chirpy.

use serde::Deserialize;
use std::path::Path;

use crate::{ChirpyError, Result};

/// Environment variable overriding `auth.token_secret`.
pub const ENV_TOKEN_SECRET: &str = "CHIRPY_TOKEN_SECRET";
/// Environment variable overriding `server.platform`.
pub const ENV_PLATFORM: &str = "CHIRPY_PLATFORM";
/// Environment variable overriding `database.path`.
pub const ENV_DATABASE_PATH: &str = "CHIRPY_DATABASE_PATH";

/// HTTP server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port number to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Deployment platform. Admin reset is only allowed on `dev`.
    #[serde(default = "default_platform")]
    pub platform: String,
    /// CORS allowed origins.
    #[serde(default)]
    pub cors_origins: Vec<String>,
    /// Directory served under `/app/`.
    #[serde(default = "default_static_path")]
    pub static_path: String,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_platform() -> String {
    "prod".to_string()
}

fn default_static_path() -> String {
    ".".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            platform: default_platform(),
            cors_origins: vec![],
            static_path: default_static_path(),
        }
    }
}

impl ServerConfig {
    /// Whether development-only endpoints are enabled.
    pub fn is_dev(&self) -> bool {
        self.platform == "dev"
    }
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_db_path")]
    pub path: String,
}

fn default_db_path() -> String {
    "data/chirpy.db".to_string()
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Path to the log file.
    #[serde(default = "default_log_file")]
    pub file: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_file() -> String {
    "logs/chirpy.log".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: default_log_file(),
        }
    }
}

/// Authentication configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Shared secret for signing bearer tokens (must be set).
    #[serde(default)]
    pub token_secret: String,
    /// Default and maximum token lifetime in seconds.
    #[serde(default = "default_token_ttl")]
    pub token_ttl_secs: u64,
    /// Issuer claim written into tokens.
    #[serde(default = "default_issuer")]
    pub issuer: String,
}

fn default_token_ttl() -> u64 {
    3600 // 1 hour
}

fn default_issuer() -> String {
    crate::auth::DEFAULT_ISSUER.to_string()
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            token_secret: String::new(),
            token_ttl_secs: default_token_ttl(),
            issuer: default_issuer(),
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database configuration.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Authentication configuration.
    #[serde(default)]
    pub auth: AuthConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ChirpyError::Io)?;
        Self::parse(&content)
    }

    /// Load configuration from a TOML file and apply environment variable overrides.
    pub fn load_with_env<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| ChirpyError::Config(format!("config parse error: {e}")))
    }

    /// Apply environment variable overrides to the configuration.
    ///
    /// Supported environment variables:
    /// - `CHIRPY_TOKEN_SECRET`: token signing secret
    /// - `CHIRPY_PLATFORM`: deployment platform
    /// - `CHIRPY_DATABASE_PATH`: SQLite database path
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply overrides from an arbitrary key lookup. Empty values are ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.is_empty());

        if let Some(secret) = get(ENV_TOKEN_SECRET) {
            self.auth.token_secret = secret;
        }
        if let Some(platform) = get(ENV_PLATFORM) {
            self.server.platform = platform;
        }
        if let Some(path) = get(ENV_DATABASE_PATH) {
            self.database.path = path;
        }
    }

    /// Validate the configuration.
    ///
    /// Returns an error if the token secret is empty or the token lifetime is zero.
    pub fn validate(&self) -> Result<()> {
        if self.auth.token_secret.is_empty() {
            return Err(ChirpyError::Config(format!(
                "token_secret is not set. Set it in config.toml or via {ENV_TOKEN_SECRET}."
            )));
        }
        if self.auth.token_ttl_secs == 0 {
            return Err(ChirpyError::Config(
                "token_ttl_secs must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}
