//! Chirp model for Chirpy.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// A posted chirp.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Chirp {
    /// Unique chirp ID.
    pub id: Uuid,
    /// Cleaned chirp text.
    pub body: String,
    /// Author.
    pub user_id: Uuid,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Data for creating a new chirp.
#[derive(Debug, Clone)]
pub struct NewChirp {
    /// Chirp text, already validated and cleaned.
    pub body: String,
    /// Author.
    pub user_id: Uuid,
}

impl NewChirp {
    /// Create a new chirp record.
    pub fn new(body: impl Into<String>, user_id: Uuid) -> Self {
        Self {
            body: body.into(),
            user_id,
        }
    }
}
