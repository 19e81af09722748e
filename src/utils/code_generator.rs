//! Short code generation and validation utilities.

use crate::error::AppError;
use rand::Rng;
use regex::Regex;
use serde_json::json;
use std::sync::LazyLock;

/// Alphabet for generated codes: 26 lowercase, 26 uppercase, 10 digits.
pub const CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Length of a generated short code.
pub const CODE_LENGTH: usize = 8;

/// Length of an OAuth state token.
const STATE_LENGTH: usize = 32;

/// Codes that would shadow a fixed route.
const RESERVED_CODES: &[&str] = &["dashboard", "login", "logout", "callback", "static"];

/// Characters that stop a code from surviving as a single `/{short_url}` path
/// segment: separators, percent escapes, whitespace and control characters.
static UNROUTABLE_CHARS_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[/?#%\\\s\p{Cc}]").expect("valid unroutable chars regex"));

fn random_alphanumeric(len: usize) -> String {
    let mut rng = rand::rng();

    (0..len)
        .map(|_| {
            let idx = rng.random_range(0..CHARSET.len());
            CHARSET[idx] as char
        })
        .collect()
}

/// Generates a random 8-character alphanumeric short code.
///
/// Availability is not checked here; the store's uniqueness constraint
/// catches collisions at insert time.
pub fn generate_code() -> String {
    random_alphanumeric(CODE_LENGTH)
}

/// Generates an unguessable anti-forgery token for the OAuth redirect.
pub fn generate_state_token() -> String {
    random_alphanumeric(STATE_LENGTH)
}

/// Validates a user-chosen short code (custom name or rename target).
///
/// Any name is accepted as long as it reads back unchanged from a single path
/// segment, so `my.link`, `v1.2` or `a~b` are fine.
///
/// # Rules
///
/// - Must not be empty, `.` or `..`
/// - Must not contain `/`, `?`, `#`, `%`, `\`, whitespace or control characters
/// - Cannot be a reserved route name
///
/// # Errors
///
/// Returns [`AppError::Validation`] if any rule is violated.
pub fn validate_custom_code(code: &str) -> Result<(), AppError> {
    if code.is_empty() {
        return Err(AppError::bad_request(
            "Short URL must not be empty",
            json!({}),
        ));
    }

    if code == "." || code == ".." || UNROUTABLE_CHARS_REGEX.is_match(code) {
        return Err(AppError::bad_request(
            "Short URL cannot contain '/', '?', '#', '%', '\\', spaces or control characters",
            json!({ "code": code }),
        ));
    }

    if RESERVED_CODES.contains(&code) {
        return Err(AppError::bad_request(
            "This short URL is reserved",
            json!({ "code": code }),
        ));
    }

    Ok(())
}
