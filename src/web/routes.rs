//! Web route configuration.

use crate::api::handlers::{delete_link_handler, rename_link_handler, shorten_handler};
use crate::state::AppState;
use crate::web::handlers::{
    callback_handler, dashboard_handler, home_handler, login_handler, logout_handler,
};
use axum::{Router, routing::get};

/// Dashboard routes requiring a session.
///
/// Protected via [`crate::web::middleware::web_auth`].
///
/// # Endpoints
///
/// - `GET    /dashboard` - List the caller's links
/// - `DELETE /dashboard` - Delete one of the caller's links
/// - `PUT    /dashboard` - Rename one of the caller's links
pub fn protected_routes() -> Router<AppState> {
    Router::new().route(
        "/dashboard",
        get(dashboard_handler)
            .delete(delete_link_handler)
            .put(rename_link_handler),
    )
}

/// Public routes.
///
/// # Endpoints
///
/// - `GET  /`         - Home page
/// - `POST /`         - Shorten a URL
/// - `GET  /login`    - Start GitHub sign-in
/// - `GET  /callback` - GitHub OAuth callback
/// - `GET  /logout`   - End the session
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home_handler).post(shorten_handler))
        .route("/login", get(login_handler))
        .route("/callback", get(callback_handler))
        .route("/logout", get(logout_handler))
}
