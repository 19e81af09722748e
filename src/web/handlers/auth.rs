//! GitHub sign-in, callback and sign-out.

use axum::{
    extract::{Query, State},
    http::{HeaderMap, header::SET_COOKIE},
    response::{AppendHeaders, IntoResponse, Response},
};
use serde::Deserialize;
use serde_json::json;

use crate::error::AppError;
use crate::state::AppState;
use crate::utils::redirect::found;

/// Query parameters GitHub appends to the callback URL.
#[derive(Debug, Deserialize)]
pub struct CallbackQuery {
    pub code: Option<String>,
    pub state: Option<String>,
}

/// Sends the browser to GitHub's consent page.
///
/// # Endpoint
///
/// `GET /login`
///
/// A fresh state token is generated per attempt and remembered in the
/// `oauth_state` cookie so the callback can check it.
pub async fn login_handler(State(state): State<AppState>) -> Response {
    let login = state.auth_service.begin_login();

    (
        AppendHeaders([(SET_COOKIE, login.state_cookie)]),
        found(&login.authorize_url),
    )
        .into_response()
}

/// Completes the sign-in and establishes the session.
///
/// # Endpoint
///
/// `GET /callback?code=...&state=...`
///
/// # Errors
///
/// Returns 400 Bad Request if `state` doesn't match the `oauth_state` cookie
/// or `code` is missing. Returns 500 if GitHub rejects the code or the user
/// lookup fails; no session cookie is set in that case.
pub async fn callback_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<CallbackQuery>,
) -> Result<Response, AppError> {
    state
        .auth_service
        .verify_state(&headers, query.state.as_deref())?;

    let code = query
        .code
        .filter(|c| !c.is_empty())
        .ok_or_else(|| AppError::bad_request("Missing authorization code", json!({})))?;

    let user_id = state.auth_service.complete_login(&code).await?;

    Ok((
        AppendHeaders([
            (SET_COOKIE, state.auth_service.session_cookie(&user_id)),
            (SET_COOKIE, state.auth_service.clear_state_cookie()),
        ]),
        found("/"),
    )
        .into_response())
}

/// Ends the session.
///
/// # Endpoint
///
/// `GET /logout`
pub async fn logout_handler(State(state): State<AppState>) -> Response {
    (
        AppendHeaders([(SET_COOKIE, state.auth_service.clear_session_cookie())]),
        found("/"),
    )
        .into_response()
}
