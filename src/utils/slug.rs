//! Slug generation and validation.
//!
//! Generated slugs are fixed-width random identifiers; requested slugs are
//! validated against the public format rules before any store access.

use crate::error::AppError;
use base64::Engine as _;
use regex::Regex;
use serde_json::json;
use std::sync::LazyLock;

/// Random bytes per generated slug; 6 bytes encode to exactly 8 characters.
const SLUG_LENGTH_BYTES: usize = 6;

/// Maximum accepted length for a requested slug.
const MAX_REQUESTED_LEN: usize = 64;

/// Slugs reserved for system endpoints to prevent routing conflicts.
const RESERVED_SLUGS: &[&str] = &["api", "health"];

/// Allowed characters for a requested slug.
static SLUG_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").unwrap());

/// Generates a random 8-character URL-safe slug.
///
/// Uses `getrandom` for entropy and URL-safe base64 without padding, so the
/// output alphabet is exactly the accepted slug alphabet.
///
/// # Panics
///
/// Panics if the system random number generator fails (extremely rare).
pub fn generate_slug() -> String {
    let mut buffer = [0u8; SLUG_LENGTH_BYTES];

    getrandom::fill(&mut buffer).expect("Failed to generate random bytes");

    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(buffer)
}

/// Validates a user-requested slug.
///
/// # Rules
///
/// - Non-empty, at most 64 characters
/// - Letters, digits, hyphens, and underscores only
/// - Not a reserved route word
///
/// # Errors
///
/// Returns [`AppError::Validation`] if any rule is violated.
pub fn validate_requested_slug(slug: &str) -> Result<(), AppError> {
    if slug.is_empty() || slug.len() > MAX_REQUESTED_LEN {
        return Err(AppError::bad_request(
            "Custom slug must be 1-64 characters",
            json!({ "provided_length": slug.len() }),
        ));
    }

    if !SLUG_REGEX.is_match(slug) {
        return Err(AppError::bad_request(
            "Custom slug can only contain letters, numbers, hyphens, or underscores",
            json!({ "slug": slug }),
        ));
    }

    if RESERVED_SLUGS.contains(&slug) {
        return Err(AppError::bad_request(
            "This slug is reserved",
            json!({ "slug": slug }),
        ));
    }

    Ok(())
}
