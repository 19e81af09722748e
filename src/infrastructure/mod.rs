//! Infrastructure layer for external integrations.
//!
//! This layer implements interfaces defined by the domain layer, providing
//! concrete implementations for persistence and the identity provider.
//!
//! # Modules
//!
//! - [`oauth`] - OAuth2 identity provider abstraction and the GitHub client
//! - [`persistence`] - SQLite repository implementations

pub mod oauth;
pub mod persistence;
