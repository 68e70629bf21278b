//! User handlers.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};

use super::join_error;
use crate::db::{NewUser, UserRepository};
use crate::web::dto::{CreateUserRequest, UserResponse, ValidatedJson};
use crate::web::error::ApiError;
use crate::web::state::AppState;

/// POST /api/users - Register a new user.
pub async fn create_user(
    State(state): State<Arc<AppState>>,
    ValidatedJson(req): ValidatedJson<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    let CreateUserRequest { email, password } = req;

    let hashing_state = state.clone();
    let hashed_password = tokio::task::spawn_blocking(move || hashing_state.hasher.hash(&password))
        .await
        .map_err(join_error)??;

    let repo = UserRepository::new(state.db.pool());
    let user = repo.create(&NewUser::new(email, hashed_password)).await?;

    tracing::info!(user_id = %user.id, "User registered");
    Ok((StatusCode::CREATED, Json(user.into())))
}
