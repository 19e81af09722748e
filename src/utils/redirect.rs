//! Redirect responses.

use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};

/// Builds a `302 Found` response pointing at `location`.
///
/// `axum::response::Redirect` only offers 303/307/308.
pub fn found(location: &str) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location.to_string())]).into_response()
}
