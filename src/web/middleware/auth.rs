//! Bearer token authentication.

use std::sync::Arc;

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use uuid::Uuid;

use crate::web::error::ApiError;
use crate::web::state::AppState;

/// Extractor for authenticated users.
///
/// Reads `Authorization: Bearer <token>` and yields the token's subject.
/// A missing or non-bearer header and every kind of invalid token are all
/// rejected with 401.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthUser(pub Uuid);

#[async_trait]
impl FromRequestParts<Arc<AppState>> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|e| {
                    tracing::debug!("Bearer header rejected: {}", e);
                    ApiError::unauthorized("Missing authorization")
                })?;

        let user_id = state.tokens.validate(bearer.token())?;
        Ok(AuthUser(user_id))
    }
}
