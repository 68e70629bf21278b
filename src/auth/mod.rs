//! Authentication core.
//!
//! Password hashing for credentials at rest and stateless signed bearer
//! tokens for sessions. Neither component does I/O or holds mutable state.

pub mod clock;
mod password;
mod token;

pub use clock::{Clock, FixedClock, SystemClock};
pub use password::{
    validate_password, CredentialHasher, HashCost, PasswordError, MAX_PASSWORD_LENGTH,
    MIN_PASSWORD_LENGTH,
};
pub use token::{
    issue_token, validate_token, Claims, TokenError, TokenService, ALGORITHM, DEFAULT_ISSUER,
};
