//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    response::Response,
};

use crate::error::AppError;
use crate::state::AppState;
use crate::utils::redirect::found;

/// Redirects a short URL to its original URL.
///
/// # Endpoint
///
/// `GET /{short_url}`
///
/// Answers with `302 Found`. Every visit hits the database; there is no
/// cache in front of the store.
///
/// # Errors
///
/// Returns 404 Not Found with a plain-text body if the short URL doesn't exist.
pub async fn redirect_handler(
    Path(short_url): Path<String>,
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    let link = state.link_service.resolve(&short_url).await?;

    tracing::debug!(short_url, "Redirecting");
    Ok(found(&link.original_url))
}
