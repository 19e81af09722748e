//! Handlers for the owner's link management (rename, delete).
//!
//! Both run behind [`crate::web::middleware::web_auth`], which supplies the
//! caller as a [`CurrentUser`] extension.

use axum::{
    Extension, Json,
    extract::{State, rejection::JsonRejection},
};
use validator::Validate;

use crate::api::dto::links::{
    DeleteLinkRequest, DeleteLinkResponse, RenameLinkRequest, RenameLinkResponse,
};
use crate::error::AppError;
use crate::state::AppState;
use crate::web::middleware::web_auth::CurrentUser;

/// Deletes one of the caller's links.
///
/// # Endpoint
///
/// `DELETE /dashboard` with body `{"id": "..."}`
///
/// # Ownership
///
/// The delete is filtered by owner. Naming a link that belongs to someone
/// else (or doesn't exist) changes nothing and still reports success.
///
/// # Errors
///
/// Returns 400 Bad Request if the body is malformed.
pub async fn delete_link_handler(
    State(state): State<AppState>,
    Extension(CurrentUser(user_id)): Extension<CurrentUser>,
    payload: Result<Json<DeleteLinkRequest>, JsonRejection>,
) -> Result<Json<DeleteLinkResponse>, AppError> {
    let Json(payload) = payload?;
    payload.validate()?;

    state.link_service.delete_link(&payload.id, &user_id).await?;

    Ok(Json(DeleteLinkResponse {
        success: true,
        id: payload.id,
    }))
}

/// Changes the short URL of one of the caller's links.
///
/// # Endpoint
///
/// `PUT /dashboard` with body `{"id": "...", "new_name": "..."}`
///
/// The old short URL stops resolving immediately.
///
/// # Errors
///
/// Returns 400 Bad Request if the body is malformed, the new name is invalid,
/// or the new name is already taken.
pub async fn rename_link_handler(
    State(state): State<AppState>,
    Extension(CurrentUser(user_id)): Extension<CurrentUser>,
    payload: Result<Json<RenameLinkRequest>, JsonRejection>,
) -> Result<Json<RenameLinkResponse>, AppError> {
    let Json(payload) = payload?;
    payload.validate()?;

    state
        .link_service
        .rename_link(&payload.id, &user_id, &payload.new_name)
        .await?;

    Ok(Json(RenameLinkResponse { success: true }))
}
