//! Request DTOs for Web API.

use serde::Deserialize;
use validator::{Validate, ValidationError};

use crate::auth::validate_password;

/// Apply the registration password policy.
fn password_policy(value: &str) -> Result<(), ValidationError> {
    validate_password(value).map_err(|e| {
        ValidationError::new("password_policy").with_message(e.to_string().into())
    })
}

/// User registration request.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserRequest {
    /// Login email.
    #[validate(email(message = "Must be a valid email address"))]
    pub email: String,
    /// Plaintext password.
    #[validate(custom(function = "password_policy"))]
    pub password: String,
}

/// Login request.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    /// Login email.
    pub email: String,
    /// Plaintext password.
    pub password: String,
    /// Requested token lifetime; capped at the configured maximum.
    #[serde(default)]
    pub expires_in_seconds: Option<i64>,
}

/// Chirp body, used for both posting and validation.
#[derive(Debug, Deserialize, Validate)]
pub struct ChirpRequest {
    /// Chirp text.
    pub body: String,
}
