//! Router configuration for Web API.

use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{services::ServeDir, trace::TraceLayer};

use super::handlers::{
    create_chirp, create_user, get_chirp, healthz, list_chirps, login, metrics, reset,
    validate_chirp,
};
use super::middleware::{count_hits, create_cors_layer};
use super::state::AppState;
use crate::config::ServerConfig;

/// Create the application router.
///
/// - `/api/*` JSON API
/// - `/admin/*` metrics page and dev-only reset
/// - `/app/*` static files, each request counted
pub fn create_router(state: Arc<AppState>, server: &ServerConfig) -> Router {
    let api_routes = Router::new()
        .route("/healthz", get(healthz))
        .route("/users", post(create_user))
        .route("/login", post(login))
        .route("/validate_chirp", post(validate_chirp))
        .route("/chirps", get(list_chirps).post(create_chirp))
        .route("/chirps/:chirp_id", get(get_chirp));

    let admin_routes = Router::new()
        .route("/metrics", get(metrics))
        .route("/reset", post(reset));

    let app_routes = Router::new()
        .nest_service("/app", ServeDir::new(&server.static_path))
        .layer(middleware::from_fn_with_state(state.clone(), count_hits));

    Router::new()
        .nest("/api", api_routes)
        .nest("/admin", admin_routes)
        .merge(app_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(create_cors_layer(&server.cors_origins)),
        )
        .with_state(state)
}
