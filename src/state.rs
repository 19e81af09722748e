//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::{AuthService, LinkService};
use crate::infrastructure::persistence::SqliteLinkRepository;

/// Services reachable from handlers and middleware.
///
/// Cloned per request; the services themselves live behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<LinkService<SqliteLinkRepository>>,
    pub auth_service: Arc<AuthService>,
}

impl AppState {
    pub fn new(
        link_service: Arc<LinkService<SqliteLinkRepository>>,
        auth_service: Arc<AuthService>,
    ) -> Self {
        Self {
            link_service,
            auth_service,
        }
    }
}
