//! Repository trait for short link data access.

use crate::domain::entities::{Link, NewLink};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for the `links` table.
///
/// Every operation is a single SQL statement. Mutations are scoped by both
/// link id and owner, so a request from a non-owner matches zero rows instead
/// of failing.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::SqliteLinkRepository`] - SQLite implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Inserts a new link.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the short URL is already taken.
    /// Returns [`AppError::Internal`] on other database errors.
    async fn create(&self, new_link: NewLink) -> Result<Link, AppError>;

    /// Finds a link by its short URL.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_short_url(&self, short_url: &str) -> Result<Option<Link>, AppError>;

    /// Lists every link owned by `user_id`, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn list_by_owner(&self, user_id: &str) -> Result<Vec<Link>, AppError>;

    /// Changes the short URL of the link matching `id` and `user_id`.
    ///
    /// Returns the number of affected rows (0 or 1).
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if `new_short_url` is already taken.
    /// Returns [`AppError::Internal`] on other database errors.
    async fn rename(&self, id: &str, user_id: &str, new_short_url: &str)
    -> Result<u64, AppError>;

    /// Deletes the link matching `id` and `user_id`.
    ///
    /// Returns the number of affected rows (0 or 1).
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn delete(&self, id: &str, user_id: &str) -> Result<u64, AppError>;

    /// Counts all stored links.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn count(&self) -> Result<i64, AppError>;
}
