//! Admin handlers.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::Html};

use crate::db::UserRepository;
use crate::web::error::ApiError;
use crate::web::state::AppState;

/// GET /admin/metrics - File server hit count as HTML.
pub async fn metrics(State(state): State<Arc<AppState>>) -> Html<String> {
    Html(format!(
        "<html>\n  <body>\n    <h1>Welcome, Chirpy Admin</h1>\n    <p>Chirpy has been visited {} times!</p>\n  </body>\n</html>\n",
        state.hits()
    ))
}

/// POST /admin/reset - Zero the hit counter and delete all users.
///
/// Only available on the `dev` platform.
pub async fn reset(State(state): State<Arc<AppState>>) -> Result<StatusCode, ApiError> {
    if !state.is_dev() {
        tracing::warn!(platform = %state.platform, "Reset refused outside dev");
        return Err(ApiError::forbidden("Reset is only allowed in dev environment"));
    }

    state.reset_hits();
    let deleted = UserRepository::new(state.db.pool()).delete_all().await?;

    tracing::info!(deleted_users = deleted, "State reset");
    Ok(StatusCode::OK)
}
