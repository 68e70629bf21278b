//! Shared helpers for Web API integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum_test::TestServer;
use chirpy::auth::{CredentialHasher, HashCost};
use chirpy::config::Config;
use chirpy::web::{create_router, AppState};
use chirpy::Database;
use serde_json::{json, Value};

/// Secret used to sign tokens in tests.
pub const TEST_SECRET: &str = "test-secret-key-for-testing-only";

/// Create a test configuration.
pub fn create_test_config() -> Config {
    let mut config = Config::default();
    config.server.host = "127.0.0.1".to_string();
    config.server.port = 0;
    config.auth.token_secret = TEST_SECRET.to_string();
    config
}

/// Create a test server from a configuration, with an in-memory database
/// and a cheap hash cost.
pub async fn create_test_server_with(config: &Config) -> (TestServer, Arc<AppState>) {
    let db = Database::open_in_memory()
        .await
        .expect("Failed to create test database");

    let state = AppState::from_config(db, config)
        .expect("Failed to build app state")
        .with_hasher(CredentialHasher::new(HashCost::MINIMAL).expect("valid hash cost"));
    let state = Arc::new(state);

    let router = create_router(state.clone(), &config.server);
    let server = TestServer::new(router).expect("Failed to create test server");

    (server, state)
}

/// Create a test server with the default test configuration.
pub async fn create_test_server() -> (TestServer, Arc<AppState>) {
    create_test_server_with(&create_test_config()).await
}

/// Register a user and return the response body.
pub async fn create_user(server: &TestServer, email: &str, password: &str) -> Value {
    let response = server
        .post("/api/users")
        .json(&json!({ "email": email, "password": password }))
        .await;
    response.assert_status(axum::http::StatusCode::CREATED);
    response.json::<Value>()
}

/// Log in and return the access token.
pub async fn login(server: &TestServer, email: &str, password: &str) -> String {
    let response = server
        .post("/api/login")
        .json(&json!({ "email": email, "password": password }))
        .await;
    response.assert_status_ok();
    response.json::<Value>()["token"]
        .as_str()
        .expect("token in login response")
        .to_string()
}

/// Register a user, log in, and return `(user_id, token)`.
pub async fn create_user_with_token(
    server: &TestServer,
    email: &str,
    password: &str,
) -> (String, String) {
    let user = create_user(server, email, password).await;
    let token = login(server, email, password).await;
    (user["id"].as_str().unwrap().to_string(), token)
}
