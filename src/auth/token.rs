//! Stateless bearer tokens.
//!
//! A token is `<header>.<payload>.<signature>`, each segment base64url
//! without padding. The signature is HMAC-SHA256 over the ASCII bytes of
//! `<header>.<payload>`, which makes the format a standard HS256 JWT.
//! Nothing about a token is stored server side; validation is recomputation.

use std::fmt;
use std::sync::Arc;

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use chrono::Duration;
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use thiserror::Error;
use uuid::Uuid;

use super::clock::{Clock, SystemClock};

type HmacSha256 = Hmac<Sha256>;

const TOKEN_TARGET: &str = "chirpy::auth::token";

/// Segment delimiter.
const DELIMITER: char = '.';

/// Signing algorithm identifier placed in the header.
pub const ALGORITHM: &str = "HS256";

/// Issuer written into tokens unless overridden.
pub const DEFAULT_ISSUER: &str = "chirpy";

/// Token-related errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    /// Wrong segment count, bad encoding, or unparseable header, claims or subject.
    #[error("malformed token")]
    MalformedToken,

    /// The signature does not match the header and payload.
    #[error("invalid token signature")]
    InvalidSignature,

    /// The signature is valid but the token is past its expiry.
    #[error("token expired")]
    TokenExpired,

    /// The token could not be produced.
    #[error("token signing failed: {0}")]
    Signing(String),
}

#[derive(Debug, Serialize, Deserialize)]
struct Header {
    alg: String,
    typ: String,
}

impl Default for Header {
    fn default() -> Self {
        Self {
            alg: ALGORITHM.to_string(),
            typ: "JWT".to_string(),
        }
    }
}

/// Claims carried in the token payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Issuer.
    #[serde(default)]
    pub iss: String,
    /// Subject, the user ID in hyphenated UUID form.
    pub sub: String,
    /// Issued at, unix seconds.
    pub iat: i64,
    /// Expires at, unix seconds.
    pub exp: i64,
}

/// Issues and validates signed bearer tokens under one shared secret.
#[derive(Clone)]
pub struct TokenService {
    secret: Arc<[u8]>,
    clock: Arc<dyn Clock>,
    issuer: String,
}

impl TokenService {
    /// Create a service using the system clock.
    pub fn new(secret: impl AsRef<[u8]>) -> Self {
        Self {
            secret: Arc::from(secret.as_ref()),
            clock: Arc::new(SystemClock),
            issuer: DEFAULT_ISSUER.to_string(),
        }
    }

    /// Replace the time source.
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    /// Replace the issuer written into new tokens.
    pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = issuer.into();
        self
    }

    /// Issue a token for `subject` valid for `ttl` from now.
    ///
    /// `ttl` may be zero or negative, which produces an already expired token.
    /// Claims have one-second resolution: for a positive `ttl` the expiry is
    /// rounded up, so the token is valid at every instant before
    /// `now + ttl`.
    pub fn issue(&self, subject: Uuid, ttl: Duration) -> Result<String, TokenError> {
        let now = self.clock.now();
        let expires_at = now
            .checked_add_signed(ttl)
            .ok_or_else(|| TokenError::Signing("expiry out of range".to_string()))?;
        let mut exp = expires_at.timestamp();
        if ttl > Duration::zero() && expires_at.timestamp_subsec_nanos() > 0 {
            exp += 1;
        }
        let claims = Claims {
            iss: self.issuer.clone(),
            sub: subject.to_string(),
            iat: now.timestamp(),
            exp,
        };
        self.encode(&claims)
    }

    /// Validate a token and return its subject.
    ///
    /// The signature is checked before anything in the payload is looked at,
    /// so a forged expiry or subject can only ever produce `InvalidSignature`.
    pub fn validate(&self, token: &str) -> Result<Uuid, TokenError> {
        let claims = self.decode(token)?;

        if self.clock.now().timestamp() >= claims.exp {
            tracing::debug!(target: TOKEN_TARGET, exp = claims.exp, "Token expired");
            return Err(TokenError::TokenExpired);
        }

        Uuid::parse_str(&claims.sub).map_err(|_| {
            tracing::debug!(target: TOKEN_TARGET, "Token subject is not a UUID");
            TokenError::MalformedToken
        })
    }

    fn encode(&self, claims: &Claims) -> Result<String, TokenError> {
        let header_json = serde_json::to_vec(&Header::default())
            .map_err(|e| TokenError::Signing(e.to_string()))?;
        let payload_json =
            serde_json::to_vec(claims).map_err(|e| TokenError::Signing(e.to_string()))?;

        let signing_input = format!(
            "{}{DELIMITER}{}",
            URL_SAFE_NO_PAD.encode(header_json),
            URL_SAFE_NO_PAD.encode(payload_json)
        );

        let mut mac = self.mac()?;
        mac.update(signing_input.as_bytes());
        let signature = mac.finalize().into_bytes();

        Ok(format!(
            "{signing_input}{DELIMITER}{}",
            URL_SAFE_NO_PAD.encode(signature)
        ))
    }

    /// Verify structure and signature, then parse the claims.
    fn decode(&self, token: &str) -> Result<Claims, TokenError> {
        let segments: Vec<&str> = token.split(DELIMITER).collect();
        let [header_b64, payload_b64, signature_b64] = segments[..] else {
            tracing::debug!(
                target: TOKEN_TARGET,
                segments = segments.len(),
                "Token has wrong number of segments"
            );
            return Err(TokenError::MalformedToken);
        };

        let header = decode_segment(header_b64)?;
        let payload = decode_segment(payload_b64)?;
        let signature = decode_segment(signature_b64)?;

        let mut mac = self.mac()?;
        mac.update(header_b64.as_bytes());
        mac.update(&[DELIMITER as u8]);
        mac.update(payload_b64.as_bytes());
        mac.verify_slice(&signature).map_err(|_| {
            tracing::debug!(target: TOKEN_TARGET, "Token signature mismatch");
            TokenError::InvalidSignature
        })?;

        let header: Header =
            serde_json::from_slice(&header).map_err(|_| TokenError::MalformedToken)?;
        if header.alg != ALGORITHM {
            tracing::debug!(target: TOKEN_TARGET, alg = %header.alg, "Unexpected token algorithm");
            return Err(TokenError::MalformedToken);
        }

        serde_json::from_slice(&payload).map_err(|e| {
            tracing::debug!(target: TOKEN_TARGET, error = %e, "Token claims unparseable");
            TokenError::MalformedToken
        })
    }

    fn mac(&self) -> Result<HmacSha256, TokenError> {
        HmacSha256::new_from_slice(&self.secret).map_err(|e| TokenError::Signing(e.to_string()))
    }
}

impl fmt::Debug for TokenService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenService")
            .field("secret", &"<redacted>")
            .field("issuer", &self.issuer)
            .finish()
    }
}

fn decode_segment(segment: &str) -> Result<Vec<u8>, TokenError> {
    URL_SAFE_NO_PAD.decode(segment).map_err(|_| {
        tracing::debug!(target: TOKEN_TARGET, "Token segment is not base64url");
        TokenError::MalformedToken
    })
}

/// Issue a token against the system clock.
///
/// # Examples
///
/// ```
/// use chirpy::auth::{issue_token, validate_token};
/// use chrono::Duration;
/// use uuid::Uuid;
///
/// let user = Uuid::new_v4();
/// let token = issue_token(user, b"superSecretKey", Duration::hours(1)).unwrap();
/// assert_eq!(validate_token(&token, b"superSecretKey").unwrap(), user);
/// assert!(validate_token(&token, b"anotherSecret").is_err());
/// ```
pub fn issue_token(subject: Uuid, secret: &[u8], ttl: Duration) -> Result<String, TokenError> {
    TokenService::new(secret).issue(subject, ttl)
}

/// Validate a token against the system clock.
pub fn validate_token(token: &str, secret: &[u8]) -> Result<Uuid, TokenError> {
    TokenService::new(secret).validate(token)
}
