//! User model for Chirpy.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// A registered user.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    /// Unique user ID; the subject of issued tokens.
    pub id: Uuid,
    /// Login email (unique, case-insensitive).
    pub email: String,
    /// Argon2id PHC string.
    pub hashed_password: String,
    /// Account creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Data for creating a new user.
#[derive(Debug, Clone)]
pub struct NewUser {
    /// Login email.
    pub email: String,
    /// Password hash (must already be hashed).
    pub hashed_password: String,
}

impl NewUser {
    /// Create a new user record.
    pub fn new(email: impl Into<String>, hashed_password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            hashed_password: hashed_password.into(),
        }
    }
}
