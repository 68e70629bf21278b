//! Chirp handlers.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::db::{ChirpRepository, NewChirp, UserRepository};
use crate::moderation;
use crate::web::dto::{ChirpRequest, ChirpResponse, CleanedChirpResponse, ValidatedJson};
use crate::web::error::{ApiError, INVALID_TOKEN};
use crate::web::middleware::AuthUser;
use crate::web::state::AppState;
use crate::ChirpyError;

/// POST /api/validate_chirp - Check a chirp without storing it.
pub async fn validate_chirp(
    ValidatedJson(req): ValidatedJson<ChirpRequest>,
) -> Result<Json<CleanedChirpResponse>, ApiError> {
    let cleaned_body = moderation::validate_chirp(&req.body)?;
    Ok(Json(CleanedChirpResponse { cleaned_body }))
}

fn author_gone(user_id: Uuid) -> ApiError {
    tracing::debug!(user_id = %user_id, "Token subject no longer exists");
    ApiError::unauthorized(INVALID_TOKEN)
}

/// POST /api/chirps - Post a chirp as the authenticated user.
pub async fn create_chirp(
    State(state): State<Arc<AppState>>,
    AuthUser(user_id): AuthUser,
    ValidatedJson(req): ValidatedJson<ChirpRequest>,
) -> Result<(StatusCode, Json<ChirpResponse>), ApiError> {
    let body = moderation::validate_chirp(&req.body)?;

    // Tokens outlive their users, e.g. across an admin reset.
    if UserRepository::new(state.db.pool())
        .get_by_id(user_id)
        .await?
        .is_none()
    {
        return Err(author_gone(user_id));
    }

    let repo = ChirpRepository::new(state.db.pool());
    let chirp = repo
        .create(&NewChirp::new(body, user_id))
        .await
        .map_err(|e| match e {
            ChirpyError::NotFound(_) => author_gone(user_id),
            other => other.into(),
        })?;

    tracing::info!(chirp_id = %chirp.id, user_id = %user_id, "Chirp created");
    Ok((StatusCode::CREATED, Json(chirp.into())))
}

/// GET /api/chirps - List all chirps, oldest first.
pub async fn list_chirps(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<ChirpResponse>>, ApiError> {
    let repo = ChirpRepository::new(state.db.pool());
    let chirps = repo.list().await?;
    Ok(Json(chirps.into_iter().map(ChirpResponse::from).collect()))
}

/// GET /api/chirps/:chirp_id - Get a single chirp.
pub async fn get_chirp(
    State(state): State<Arc<AppState>>,
    Path(chirp_id): Path<String>,
) -> Result<Json<ChirpResponse>, ApiError> {
    let id = Uuid::parse_str(&chirp_id).map_err(|_| ApiError::bad_request("Invalid chirp ID"))?;

    let repo = ChirpRepository::new(state.db.pool());
    let chirp = repo
        .get_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Chirp not found"))?;

    Ok(Json(chirp.into()))
}
