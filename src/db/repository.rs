//! User repository for Chirpy.

use chrono::Utc;
use uuid::Uuid;

use super::user::{NewUser, User};
use super::DbPool;
use crate::{ChirpyError, Result};

const USER_COLUMNS: &str = "id, email, hashed_password, created_at, updated_at";

/// Map an insert error, turning unique violations into `Conflict`.
pub(super) fn map_insert_error(e: sqlx::Error, entity: &str) -> ChirpyError {
    match e.as_database_error() {
        Some(db_err) if db_err.is_unique_violation() => ChirpyError::Conflict(entity.to_string()),
        _ => ChirpyError::Database(e.to_string()),
    }
}

/// Repository for user CRUD operations.
pub struct UserRepository<'a> {
    pool: &'a DbPool,
}

impl<'a> UserRepository<'a> {
    /// Create a new UserRepository with the given pool reference.
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }

    /// Create a new user and return it.
    ///
    /// Fails with `Conflict` if the email is already registered.
    pub async fn create(&self, new_user: &NewUser) -> Result<User> {
        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            email: new_user.email.clone(),
            hashed_password: new_user.hashed_password.clone(),
            created_at: now,
            updated_at: now,
        };

        sqlx::query(
            "INSERT INTO users (id, email, hashed_password, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(user.id)
        .bind(&user.email)
        .bind(&user.hashed_password)
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(self.pool)
        .await
        .map_err(|e| map_insert_error(e, "user"))?;

        Ok(user)
    }

    /// Get a user by ID.
    pub async fn get_by_id(&self, id: Uuid) -> Result<Option<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?");
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .fetch_optional(self.pool)
            .await?;
        Ok(user)
    }

    /// Get a user by email (case-insensitive).
    pub async fn get_by_email(&self, email: &str) -> Result<Option<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE email = ?");
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(email)
            .fetch_optional(self.pool)
            .await?;
        Ok(user)
    }

    /// Delete every user (and, by cascade, their chirps).
    ///
    /// Returns the number of users removed.
    pub async fn delete_all(&self) -> Result<u64> {
        let result = sqlx::query("DELETE FROM users").execute(self.pool).await?;
        Ok(result.rows_affected())
    }
}
