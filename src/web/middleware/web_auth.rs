//! Cookie-session guard for the dashboard.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::state::AppState;
use crate::utils::redirect::found;

/// GitHub user id of the signed-in caller, inserted as a request extension.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub String);

/// Lets a request through only if it carries a valid session cookie.
///
/// # Cookie Format
///
/// ```text
/// Cookie: user_id=<github id>
/// ```
///
/// With `SESSION_SECRET` configured the value is `<github id>.<hex signature>`;
/// see [`crate::application::services::AuthService::current_user`].
///
/// # Differences from a JSON API guard
///
/// Requests without a session are redirected to `/` with `302 Found` rather
/// than answered with `401`, for every method including `DELETE` and `PUT`.
pub async fn layer(State(st): State<AppState>, mut req: Request, next: Next) -> Response {
    match st.auth_service.current_user(req.headers()) {
        Some(user_id) => {
            req.extensions_mut().insert(CurrentUser(user_id));
            next.run(req).await
        }
        None => found("/"),
    }
}
