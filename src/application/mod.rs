//! Application layer services implementing business logic.
//!
//! Services consume repository and provider traits and expose a small API to
//! the HTTP handlers.
//!
//! # Available Services
//!
//! - [`services::link_service::LinkService`] - Shortening, lookup, rename and delete
//! - [`services::auth_service::AuthService`] - OAuth login and session cookies

pub mod services;
