//! File server hit counting.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::web::state::AppState;

/// Count every request that reaches the static file server.
pub async fn count_hits(
    State(state): State<Arc<AppState>>,
    req: Request,
    next: Next,
) -> Response {
    let hits = state.record_hit();
    tracing::trace!(hits, path = %req.uri().path(), "File server hit");
    next.run(req).await
}
