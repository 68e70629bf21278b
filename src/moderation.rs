//! Chirp validation and profanity filtering.

use thiserror::Error;

/// Maximum chirp length in characters.
pub const MAX_CHIRP_LENGTH: usize = 140;

/// Replacement for filtered words.
const MASK: &str = "****";

/// Words masked in chirp bodies, compared case-insensitively.
const BANNED_WORDS: &[&str] = &["kerfuffle", "sharbert", "fornax"];

/// Reasons a chirp body is rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChirpError {
    /// The body is empty or whitespace.
    #[error("Chirp cannot be empty")]
    Empty,

    /// The body exceeds [`MAX_CHIRP_LENGTH`].
    #[error("Chirp is too long")]
    TooLong,
}

/// Replace banned words with `****`.
///
/// Words are separated by single spaces and must match exactly apart from
/// case; a banned word with punctuation attached (`sharbert!`) is kept.
///
/// # Examples
///
/// ```
/// use chirpy::moderation::clean_body;
///
/// assert_eq!(clean_body("What a Kerfuffle today"), "What a **** today");
/// assert_eq!(clean_body("Sharbert!"), "Sharbert!");
/// ```
pub fn clean_body(body: &str) -> String {
    body.split(' ')
        .map(|word| {
            let lower = word.to_lowercase();
            if BANNED_WORDS.contains(&lower.as_str()) {
                MASK
            } else {
                word
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Check a chirp body and return its cleaned form.
pub fn validate_chirp(body: &str) -> Result<String, ChirpError> {
    if body.trim().is_empty() {
        return Err(ChirpError::Empty);
    }
    if body.chars().count() > MAX_CHIRP_LENGTH {
        return Err(ChirpError::TooLong);
    }
    Ok(clean_body(body))
}
