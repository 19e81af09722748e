//! Dashboard page handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{Extension, extract::State};

use crate::domain::entities::Link;
use crate::error::AppError;
use crate::state::AppState;
use crate::web::middleware::web_auth::CurrentUser;

/// Template for the dashboard.
///
/// Renders `templates/dashboard.html` with a table of the caller's links.
/// Rename and delete actions are sent by `static/app.js` as JSON to
/// `PUT /dashboard` and `DELETE /dashboard`.
#[derive(Template, WebTemplate)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub user_id: String,
    pub links: Vec<Link>,
}

/// Renders the caller's links.
///
/// # Endpoint
///
/// `GET /dashboard` (session required)
///
/// # Errors
///
/// Returns 500 Internal Server Error if the links cannot be loaded.
pub async fn dashboard_handler(
    State(state): State<AppState>,
    Extension(CurrentUser(user_id)): Extension<CurrentUser>,
) -> Result<DashboardTemplate, AppError> {
    let links = state.link_service.list_links(&user_id).await?;

    Ok(DashboardTemplate { user_id, links })
}
