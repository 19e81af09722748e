//! Home page handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, http::HeaderMap, response::IntoResponse};

use crate::state::AppState;

/// Template for the home page.
///
/// Renders `templates/index.html`: the shortening form, plus either a sign-in
/// link or links to the dashboard and logout.
#[derive(Template, WebTemplate)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub logged_in: bool,
}

/// Renders the home page.
///
/// # Endpoint
///
/// `GET /`
pub async fn home_handler(State(state): State<AppState>, headers: HeaderMap) -> impl IntoResponse {
    IndexTemplate {
        logged_in: state.auth_service.is_logged_in(&headers),
    }
}
