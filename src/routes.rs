//! Top-level router configuration combining API and web routes.
//!
//! # Route Structure
//!
//! - `GET  /`              - Home page (public)
//! - `POST /`              - Shorten a URL (public, owner recorded if signed in)
//! - `GET  /login`, `/callback`, `/logout` - GitHub sign-in flow (public)
//! - `/dashboard`          - Link management (cookie session required)
//! - `GET  /{short_url}`   - Short link redirect (public)
//! - `/static/*`           - Static assets
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Authentication** - Cookie session for `/dashboard`
//! - **Path normalization** - Trailing slash handling (applied in [`crate::server`])

use crate::api::handlers::redirect_handler;
use crate::api::middleware::tracing;
use crate::state::AppState;
use crate::web;
use crate::web::middleware::web_auth;
use axum::routing::get;
use axum::{Router, middleware};
use tower_http::services::ServeDir;

/// Directory served under `/static`, fixed at build time like the templates so
/// the binary does not depend on its working directory.
pub const STATIC_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/static");

/// Constructs the application router with all routes and middleware.
///
/// Static paths (`/login`, `/dashboard`, ...) take precedence over the
/// `/{short_url}` capture, which is also why those names are reserved for
/// custom short URLs.
pub fn app_router(state: AppState) -> Router {
    let web_protected = web::routes::protected_routes().route_layer(
        middleware::from_fn_with_state(state.clone(), web_auth::layer),
    );

    Router::new()
        .merge(web_protected)
        .merge(web::routes::public_routes())
        .route("/{short_url}", get(redirect_handler))
        .nest_service("/static", ServeDir::new(STATIC_DIR))
        .with_state(state)
        .layer(tracing::layer())
}
