//! Handler for the link shortening endpoint.

use axum::{
    Form, Json,
    extract::{State, rejection::FormRejection},
    http::HeaderMap,
};

use crate::api::dto::shorten::{ShortenForm, ShortenResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short link for a long URL.
///
/// # Endpoint
///
/// `POST /` with an `application/x-www-form-urlencoded` body:
///
/// ```text
/// url=https://example.com/some/long/path&custom_name=docs
/// ```
///
/// # Ownership
///
/// A caller with a valid session becomes the link's owner. Anonymous links
/// have no owner and never show up on any dashboard.
///
/// # Response
///
/// ```json
/// { "shortURL": "aB3dE9xZ" }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request for a malformed form, an invalid URL, an invalid
/// custom name, or a custom name that is already taken.
pub async fn shorten_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Form<ShortenForm>, FormRejection>,
) -> Result<Json<ShortenResponse>, AppError> {
    let Form(form) = payload?;
    let owner = state.auth_service.current_user(&headers);

    let link = state
        .link_service
        .create_short_link(form.url, form.custom_name, owner)
        .await?;

    Ok(Json(ShortenResponse {
        short_url: link.short_url,
    }))
}
