//! OAuth2 identity provider integration.
//!
//! Provides an [`IdentityProvider`] trait with one production implementation:
//! - [`GitHubProvider`] - GitHub OAuth app (authorization-code flow)

mod github;
mod provider;

pub use github::{GitHubConfig, GitHubProvider};
pub use provider::IdentityProvider;

#[cfg(test)]
pub use provider::MockIdentityProvider;
