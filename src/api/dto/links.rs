//! DTOs for the dashboard link management endpoints.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Body of `DELETE /dashboard`.
#[derive(Debug, Deserialize, Validate)]
pub struct DeleteLinkRequest {
    #[validate(length(min = 1, message = "Link id is required"))]
    pub id: String,
}

#[derive(Debug, Serialize)]
pub struct DeleteLinkResponse {
    pub success: bool,
    pub id: String,
}

/// Body of `PUT /dashboard`.
///
/// The character rules for `new_name` are enforced by the link service so
/// they match the rules for custom names at creation time.
#[derive(Debug, Deserialize, Validate)]
pub struct RenameLinkRequest {
    #[validate(length(min = 1, message = "Link id is required"))]
    pub id: String,

    #[validate(length(min = 1, message = "New name is required"))]
    pub new_name: String,
}

#[derive(Debug, Serialize)]
pub struct RenameLinkResponse {
    pub success: bool,
}
