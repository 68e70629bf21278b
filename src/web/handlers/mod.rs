//! API handlers.

pub mod admin;
pub mod auth;
pub mod chirp;
pub mod health;
pub mod user;

pub use admin::{metrics, reset};
pub use auth::login;
pub use chirp::{create_chirp, get_chirp, list_chirps, validate_chirp};
pub use health::healthz;
pub use user::create_user;

use crate::web::error::ApiError;

/// Map a failed blocking task to an internal error.
pub(crate) fn join_error(e: tokio::task::JoinError) -> ApiError {
    tracing::error!("Blocking task failed: {}", e);
    ApiError::internal("An internal error occurred")
}
