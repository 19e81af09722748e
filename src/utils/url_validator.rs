//! Syntactic URL validation.
//!
//! Only the shape is checked: the string must parse as an absolute URL with a
//! scheme and a host. Reachability, scheme allow-listing and SSRF filtering
//! are out of scope.
//!
//! The raw string is what gets stored and later sent back as `Location`, so it
//! must not contain control characters. `Url::parse` quietly drops tabs and
//! newlines, which is why they are checked before parsing.

use url::Url;

/// Returns true if `input` parses as an absolute URL with a non-empty host
/// and contains no control characters.
pub fn is_valid_url(input: &str) -> bool {
    if input.chars().any(char::is_control) {
        return false;
    }

    match Url::parse(input) {
        Ok(url) => !url.scheme().is_empty() && url.host_str().is_some_and(|h| !h.is_empty()),
        Err(_) => false,
    }
}
