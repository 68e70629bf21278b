//! Chirp repository for Chirpy.

use chrono::Utc;
use uuid::Uuid;

use super::chirp::{Chirp, NewChirp};
use super::repository::map_insert_error;
use super::DbPool;
use crate::{ChirpyError, Result};

const CHIRP_COLUMNS: &str = "id, body, user_id, created_at, updated_at";

/// Repository for chirp operations.
pub struct ChirpRepository<'a> {
    pool: &'a DbPool,
}

impl<'a> ChirpRepository<'a> {
    /// Create a new repository instance.
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }

    /// Create a new chirp and return it.
    ///
    /// Fails with `NotFound("user")` if the author does not exist.
    pub async fn create(&self, new_chirp: &NewChirp) -> Result<Chirp> {
        let now = Utc::now();
        let chirp = Chirp {
            id: Uuid::new_v4(),
            body: new_chirp.body.clone(),
            user_id: new_chirp.user_id,
            created_at: now,
            updated_at: now,
        };

        sqlx::query(
            "INSERT INTO chirps (id, body, user_id, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(chirp.id)
        .bind(&chirp.body)
        .bind(chirp.user_id)
        .bind(chirp.created_at)
        .bind(chirp.updated_at)
        .execute(self.pool)
        .await
        .map_err(|e| {
            let unknown_author = e
                .as_database_error()
                .is_some_and(|db_err| db_err.is_foreign_key_violation());
            if unknown_author {
                ChirpyError::NotFound("user".to_string())
            } else {
                map_insert_error(e, "chirp")
            }
        })?;

        Ok(chirp)
    }

    /// Get a chirp by ID.
    pub async fn get_by_id(&self, id: Uuid) -> Result<Option<Chirp>> {
        let sql = format!("SELECT {CHIRP_COLUMNS} FROM chirps WHERE id = ?");
        let chirp = sqlx::query_as::<_, Chirp>(&sql)
            .bind(id)
            .fetch_optional(self.pool)
            .await?;
        Ok(chirp)
    }

    /// List all chirps, oldest first.
    pub async fn list(&self) -> Result<Vec<Chirp>> {
        let sql = format!("SELECT {CHIRP_COLUMNS} FROM chirps ORDER BY created_at ASC, rowid ASC");
        let chirps = sqlx::query_as::<_, Chirp>(&sql).fetch_all(self.pool).await?;
        Ok(chirps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{NewUser, UserRepository};
    use crate::Database;

    async fn setup() -> (Database, Uuid) {
        let db = Database::open_in_memory().await.unwrap();
        let user = UserRepository::new(db.pool())
            .create(&NewUser::new("author@example.com", "hash"))
            .await
            .unwrap();
        (db, user.id)
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let (db, user_id) = setup().await;
        let repo = ChirpRepository::new(db.pool());

        let chirp = repo
            .create(&NewChirp::new("I'm the one who knocks!", user_id))
            .await
            .unwrap();
        let found = repo.get_by_id(chirp.id).await.unwrap().unwrap();

        assert_eq!(found.body, "I'm the one who knocks!");
        assert_eq!(found.user_id, user_id);
    }

    #[tokio::test]
    async fn test_get_missing() {
        let (db, _) = setup().await;
        let repo = ChirpRepository::new(db.pool());

        assert!(repo.get_by_id(Uuid::new_v4()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_in_creation_order() {
        let (db, user_id) = setup().await;
        let repo = ChirpRepository::new(db.pool());

        for body in ["first", "second", "third"] {
            repo.create(&NewChirp::new(body, user_id)).await.unwrap();
        }

        let bodies: Vec<String> = repo
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.body)
            .collect();
        assert_eq!(bodies, vec!["first", "second", "third"]);
    }

    #[tokio::test]
    async fn test_unknown_author_rejected() {
        let (db, _) = setup().await;
        let repo = ChirpRepository::new(db.pool());

        let result = repo.create(&NewChirp::new("orphan", Uuid::new_v4())).await;
        assert!(matches!(result, Err(ChirpyError::NotFound(ref what)) if what == "user"));
    }

    #[tokio::test]
    async fn test_deleting_users_cascades() {
        let (db, user_id) = setup().await;
        let repo = ChirpRepository::new(db.pool());
        repo.create(&NewChirp::new("gone soon", user_id)).await.unwrap();

        UserRepository::new(db.pool()).delete_all().await.unwrap();

        assert!(repo.list().await.unwrap().is_empty());
    }
}
