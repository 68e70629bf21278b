//! Authentication handlers.

use std::sync::Arc;

use axum::{extract::State, Json};
use chrono::Duration;

use super::join_error;
use crate::db::UserRepository;
use crate::web::dto::{LoginRequest, LoginResponse, ValidatedJson};
use crate::web::error::{ApiError, INVALID_CREDENTIALS};
use crate::web::state::AppState;

/// Token lifetime for a login request.
///
/// A positive request below `max` is honoured; anything else gets `max`.
fn token_ttl(requested: Option<i64>, max: Duration) -> Duration {
    requested
        .filter(|secs| *secs > 0)
        .and_then(Duration::try_seconds)
        .filter(|ttl| *ttl < max)
        .unwrap_or(max)
}

/// POST /api/login - Exchange credentials for an access token.
///
/// An unknown email and a wrong password produce the same 401 after the
/// same amount of hashing work.
pub async fn login(
    State(state): State<Arc<AppState>>,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let repo = UserRepository::new(state.db.pool());
    let user = repo.get_by_email(&req.email).await?;

    let verify_state = state.clone();
    let password = req.password;
    let stored_hash = user.as_ref().map(|u| u.hashed_password.clone());
    let verified = tokio::task::spawn_blocking(move || match stored_hash {
        Some(hash) => verify_state.hasher.verify(&password, &hash),
        None => Err(verify_state.hasher.verify_dummy(&password)),
    })
    .await
    .map_err(join_error)?;

    let user = match (verified, user) {
        (Ok(()), Some(user)) => user,
        (Err(e), _) => return Err(e.into()),
        (Ok(()), None) => return Err(ApiError::unauthorized(INVALID_CREDENTIALS)),
    };

    let ttl = token_ttl(req.expires_in_seconds, state.token_ttl);
    let token = state.tokens.issue(user.id, ttl)?;

    tracing::info!(user_id = %user.id, ttl_secs = ttl.num_seconds(), "User logged in");
    Ok(Json(LoginResponse {
        user: user.into(),
        token,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_ttl_defaults_to_max() {
        let max = Duration::hours(1);
        assert_eq!(token_ttl(None, max), max);
    }

    #[test]
    fn test_token_ttl_honours_shorter_request() {
        let max = Duration::hours(1);
        assert_eq!(token_ttl(Some(60), max), Duration::seconds(60));
    }

    #[test]
    fn test_token_ttl_caps_and_rejects_nonpositive() {
        let max = Duration::hours(1);
        assert_eq!(token_ttl(Some(7200), max), max);
        assert_eq!(token_ttl(Some(3600), max), max);
        assert_eq!(token_ttl(Some(0), max), max);
        assert_eq!(token_ttl(Some(-5), max), max);
        assert_eq!(token_ttl(Some(i64::MAX), max), max);
    }
}
