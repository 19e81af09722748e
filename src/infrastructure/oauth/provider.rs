//! Identity provider trait.

use async_trait::async_trait;

use crate::error::AppError;

/// An OAuth2 authorization-code provider that can identify a user.
///
/// The login flow is: redirect the browser to [`Self::authorize_url`], receive
/// a code on the callback, trade it with [`Self::exchange_code`], then resolve
/// the numeric account id with [`Self::fetch_user_id`].
///
/// # Implementations
///
/// - [`crate::infrastructure::oauth::GitHubProvider`] - GitHub OAuth app
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Builds the provider URL the browser is sent to, carrying `state`.
    fn authorize_url(&self, state: &str) -> String;

    /// Exchanges an authorization code for an access token.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Upstream`] on network failure, a non-2xx response,
    /// or a response without an access token.
    async fn exchange_code(&self, code: &str) -> Result<String, AppError>;

    /// Fetches the authenticated account's numeric id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Upstream`] on network failure, a non-2xx response,
    /// or a body without an integer `id`.
    async fn fetch_user_id(&self, access_token: &str) -> Result<i64, AppError>;
}
