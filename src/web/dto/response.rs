//! Response DTOs for Web API.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::db::{Chirp, User};

/// Public view of a user; never includes the password hash.
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    /// User ID.
    pub id: Uuid,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last update time.
    pub updated_at: DateTime<Utc>,
    /// Login email.
    pub email: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            created_at: user.created_at,
            updated_at: user.updated_at,
            email: user.email,
        }
    }
}

/// Login response: the user plus a bearer token.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    /// Authenticated user.
    #[serde(flatten)]
    pub user: UserResponse,
    /// Signed access token.
    pub token: String,
}

/// Chirp response.
#[derive(Debug, Clone, Serialize)]
pub struct ChirpResponse {
    /// Chirp ID.
    pub id: Uuid,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last update time.
    pub updated_at: DateTime<Utc>,
    /// Cleaned chirp text.
    pub body: String,
    /// Author ID.
    pub user_id: Uuid,
}

impl From<Chirp> for ChirpResponse {
    fn from(chirp: Chirp) -> Self {
        Self {
            id: chirp.id,
            created_at: chirp.created_at,
            updated_at: chirp.updated_at,
            body: chirp.body,
            user_id: chirp.user_id,
        }
    }
}

/// Result of validating a chirp without storing it.
#[derive(Debug, Serialize)]
pub struct CleanedChirpResponse {
    /// Body with banned words masked.
    pub cleaned_body: String,
}
