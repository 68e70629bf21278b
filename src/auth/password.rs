//! Password hashing and verification.
//!
//! Passwords are stored as Argon2id PHC strings. The encoded string carries
//! the algorithm, version, cost parameters, salt and digest, so verification
//! never needs to know which cost the hash was created with.

use argon2::{
    password_hash::{
        Error as ArgonError, PasswordHash, PasswordHasher, PasswordVerifier, SaltString,
    },
    Algorithm, Argon2, Params, Version,
};
use rand_core::OsRng;
use thiserror::Error;

const PASSWORD_TARGET: &str = "chirpy::auth::password";

/// Minimum password length accepted at registration.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Maximum password length accepted at registration.
pub const MAX_PASSWORD_LENGTH: usize = 128;

/// Salt used when burning time on a hash that could not be parsed.
const DUMMY_SALT: &str = "Y2hpcnB5ZHVtbXlzYWx0";

/// Password-related errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PasswordError {
    /// The random source or the hashing algorithm failed.
    #[error("password hashing failed: {0}")]
    HashingFailure(String),

    /// The password does not match the stored hash.
    #[error("password does not match")]
    CredentialMismatch,

    /// The stored hash could not be parsed.
    #[error("malformed password hash")]
    MalformedHash,

    /// Password is shorter than [`MIN_PASSWORD_LENGTH`].
    #[error("password must be at least {MIN_PASSWORD_LENGTH} characters")]
    TooShort,

    /// Password is longer than [`MAX_PASSWORD_LENGTH`].
    #[error("password must be at most {MAX_PASSWORD_LENGTH} characters")]
    TooLong,
}

/// Argon2 cost parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashCost {
    /// Memory cost in KiB.
    pub memory_kib: u32,
    /// Number of passes.
    pub iterations: u32,
    /// Degree of parallelism.
    pub parallelism: u32,
}

impl HashCost {
    /// 19 MiB, 2 passes, 1 lane.
    pub const DEFAULT: HashCost = HashCost {
        memory_kib: 19456,
        iterations: 2,
        parallelism: 1,
    };

    /// The smallest cost Argon2 accepts. Only suitable for tests.
    pub const MINIMAL: HashCost = HashCost {
        memory_kib: 8,
        iterations: 1,
        parallelism: 1,
    };
}

impl Default for HashCost {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Hashes and verifies passwords with a fixed Argon2id cost.
#[derive(Debug, Clone)]
pub struct CredentialHasher {
    argon2: Argon2<'static>,
    cost: HashCost,
}

impl CredentialHasher {
    /// Create a hasher with the given cost.
    pub fn new(cost: HashCost) -> Result<Self, PasswordError> {
        let params = Params::new(cost.memory_kib, cost.iterations, cost.parallelism, None)
            .map_err(|e| {
                tracing::error!(target: PASSWORD_TARGET, error = %e, "Invalid Argon2 parameters");
                PasswordError::HashingFailure(e.to_string())
            })?;

        Ok(Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
            cost,
        })
    }

    /// The cost new hashes are produced with.
    pub fn cost(&self) -> HashCost {
        self.cost
    }

    /// Hash a password with a fresh random salt.
    ///
    /// Hashing the same password twice yields different strings.
    ///
    /// # Examples
    ///
    /// ```
    /// use chirpy::auth::{CredentialHasher, HashCost};
    ///
    /// let hasher = CredentialHasher::new(HashCost::MINIMAL).unwrap();
    /// let hash = hasher.hash("hunter22").unwrap();
    /// assert!(hash.starts_with("$argon2id$"));
    /// ```
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);

        let hash = self
            .argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| {
                tracing::error!(target: PASSWORD_TARGET, error = %e, "Password hashing failed");
                PasswordError::HashingFailure(e.to_string())
            })?;

        Ok(hash.to_string())
    }

    /// Verify a password against a hash produced by [`CredentialHasher::hash`].
    ///
    /// The parameters embedded in `encoded_hash` are used, not this hasher's
    /// cost. A hash that cannot be parsed, or that names another algorithm,
    /// still costs one Argon2 evaluation before `MalformedHash` is returned.
    pub fn verify(&self, password: &str, encoded_hash: &str) -> Result<(), PasswordError> {
        let parsed = match PasswordHash::new(encoded_hash) {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!(target: PASSWORD_TARGET, error = %e, "Stored password hash is malformed");
                self.burn(password);
                return Err(PasswordError::MalformedHash);
            }
        };

        match self.argon2.verify_password(password.as_bytes(), &parsed) {
            Ok(()) => Ok(()),
            Err(ArgonError::Password) => {
                tracing::debug!(target: PASSWORD_TARGET, "Password mismatch");
                Err(PasswordError::CredentialMismatch)
            }
            Err(e) => {
                tracing::warn!(target: PASSWORD_TARGET, error = %e, "Stored password hash is unusable");
                self.burn(password);
                Err(PasswordError::MalformedHash)
            }
        }
    }

    /// Spend roughly one verification's worth of work and report a mismatch.
    ///
    /// Used when there is no stored hash to check against, e.g. an unknown
    /// account at login.
    pub fn verify_dummy(&self, password: &str) -> PasswordError {
        self.burn(password);
        PasswordError::CredentialMismatch
    }

    fn burn(&self, password: &str) {
        if let Ok(salt) = SaltString::from_b64(DUMMY_SALT) {
            let _ = self.argon2.hash_password(password.as_bytes(), &salt);
        }
    }
}

impl Default for CredentialHasher {
    fn default() -> Self {
        Self::new(HashCost::DEFAULT).expect("default Argon2 parameters are valid")
    }
}

/// Check registration password requirements.
///
/// Length is counted in characters and must lie between
/// [`MIN_PASSWORD_LENGTH`] and [`MAX_PASSWORD_LENGTH`].
///
/// # Examples
///
/// ```
/// use chirpy::auth::validate_password;
///
/// assert!(validate_password("short").is_err());
/// assert!(validate_password("long_enough_123").is_ok());
/// ```
pub fn validate_password(password: &str) -> Result<(), PasswordError> {
    let len = password.chars().count();
    if len < MIN_PASSWORD_LENGTH {
        return Err(PasswordError::TooShort);
    }
    if len > MAX_PASSWORD_LENGTH {
        return Err(PasswordError::TooLong);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hasher() -> CredentialHasher {
        CredentialHasher::new(HashCost::MINIMAL).unwrap()
    }

    #[test]
    fn test_hash_is_phc_string() {
        let hash = hasher().hash("test_password_123").unwrap();

        assert!(hash.starts_with("$argon2id$"));
        assert!(hash.contains("$v=19$"));
        assert!(hash.contains("m=8,t=1,p=1"));
    }

    #[test]
    fn test_default_cost_in_hash() {
        let hasher = CredentialHasher::default();
        assert_eq!(hasher.cost(), HashCost::DEFAULT);

        let hash = hasher.hash("password").unwrap();
        assert!(hash.contains("m=19456,t=2,p=1"));
    }

    #[test]
    fn test_same_password_different_hashes() {
        let hasher = hasher();
        let hash1 = hasher.hash("same_password").unwrap();
        let hash2 = hasher.hash("same_password").unwrap();

        assert_ne!(hash1, hash2);
        assert!(hasher.verify("same_password", &hash1).is_ok());
        assert!(hasher.verify("same_password", &hash2).is_ok());
    }

    #[test]
    fn test_verify_correct() {
        let hasher = hasher();
        let hash = hasher.hash("correct_password").unwrap();

        assert!(hasher.verify("correct_password", &hash).is_ok());
    }

    #[test]
    fn test_verify_wrong() {
        let hasher = hasher();
        let hash = hasher.hash("correct_password").unwrap();

        assert_eq!(
            hasher.verify("wrong_password", &hash),
            Err(PasswordError::CredentialMismatch)
        );
    }

    #[test]
    fn test_verify_malformed_hash() {
        assert_eq!(
            hasher().verify("any_password", "not_a_valid_hash"),
            Err(PasswordError::MalformedHash)
        );
        assert_eq!(
            hasher().verify("any_password", ""),
            Err(PasswordError::MalformedHash)
        );
    }

    #[test]
    fn test_verify_foreign_algorithm_costs_a_hash() {
        const SCRYPT_HASH: &str =
            "$scrypt$ln=16,r=8,p=1$aM15713r3Xsvxbi31lqr1Q$nFNh2CVHVjNldFVKDHDlm4CbdRSCdEBsjjJxD+iCs5E";
        let hasher = CredentialHasher::new(HashCost {
            memory_kib: 8192,
            iterations: 2,
            parallelism: 1,
        })
        .unwrap();
        let stored = hasher.hash("correct_password").unwrap();

        let started = std::time::Instant::now();
        assert_eq!(
            hasher.verify("wrong_password", &stored),
            Err(PasswordError::CredentialMismatch)
        );
        let mismatch = started.elapsed();

        let started = std::time::Instant::now();
        assert_eq!(
            hasher.verify("wrong_password", SCRYPT_HASH),
            Err(PasswordError::MalformedHash)
        );
        let foreign = started.elapsed();

        assert!(
            foreign * 4 >= mismatch,
            "foreign hash took {foreign:?}, mismatch took {mismatch:?}"
        );
    }

    #[test]
    fn test_verify_uses_parameters_from_hash() {
        let cheap = hasher();
        let hash = cheap.hash("portable").unwrap();

        let other = CredentialHasher::new(HashCost {
            memory_kib: 64,
            iterations: 2,
            parallelism: 1,
        })
        .unwrap();

        assert!(other.verify("portable", &hash).is_ok());
    }

    #[test]
    fn test_long_password_has_no_cap() {
        let hasher = hasher();
        let long_password = "a".repeat(10_000);
        let hash = hasher.hash(&long_password).unwrap();

        assert!(hasher.verify(&long_password, &hash).is_ok());
    }

    #[test]
    fn test_unicode_and_special_chars() {
        let hasher = hasher();
        for password in ["パスワード123", "p@$$w0rd!#$%^&*()", "emoji 🐦 chirp"] {
            let hash = hasher.hash(password).unwrap();
            assert!(hasher.verify(password, &hash).is_ok());
        }
    }

    #[test]
    fn test_verify_dummy_reports_mismatch() {
        assert_eq!(
            hasher().verify_dummy("whatever"),
            PasswordError::CredentialMismatch
        );
    }

    #[test]
    fn test_invalid_cost_rejected() {
        let result = CredentialHasher::new(HashCost {
            memory_kib: 0,
            iterations: 0,
            parallelism: 0,
        });
        assert!(matches!(result, Err(PasswordError::HashingFailure(_))));
    }

    #[test]
    fn test_validate_password_bounds() {
        assert_eq!(validate_password("short"), Err(PasswordError::TooShort));
        assert!(validate_password("12345678").is_ok());
        assert!(validate_password(&"a".repeat(128)).is_ok());
        assert_eq!(
            validate_password(&"a".repeat(129)),
            Err(PasswordError::TooLong)
        );
    }

    #[test]
    fn test_validate_password_counts_chars() {
        // 8 characters, 24 bytes
        assert!(validate_password("パスワードパスワ").is_ok());
    }

    #[test]
    fn test_password_error_display() {
        assert_eq!(
            PasswordError::TooShort.to_string(),
            "password must be at least 8 characters"
        );
        assert_eq!(
            PasswordError::CredentialMismatch.to_string(),
            "password does not match"
        );
        assert_eq!(
            PasswordError::MalformedHash.to_string(),
            "malformed password hash"
        );
    }
}
