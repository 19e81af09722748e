//! # ghlink
//!
//! A URL shortener with GitHub sign-in, built with Axum and SQLite.
//!
//! ## Architecture
//!
//! The crate is split into layers:
//!
//! - **Domain Layer** ([`domain`]) - The link entity and the store contract
//! - **Application Layer** ([`application`]) - Link and session services
//! - **Infrastructure Layer** ([`infrastructure`]) - SQLite store and GitHub OAuth client
//! - **API Layer** ([`api`]) - JSON and redirect handlers, DTOs, and middleware
//! - **Web Layer** ([`web`]) - HTML pages and the sign-in flow
//!
//! ## Features
//!
//! - Random 8-character codes or caller-chosen custom names
//! - Anonymous shortening, owner-scoped management after GitHub sign-in
//! - Optional HMAC-signed session cookies
//!
//! ## Quick Start
//!
//! ```bash
//! export DB_PATH="links.db"
//! export GITHUB_CLIENT_ID="..."
//! export GITHUB_CLIENT_SECRET="..."
//! export GITHUB_REDIRECT_URL="http://localhost:8080/callback"
//!
//! cargo run
//! ```
//!
//! Migrations are applied automatically at startup.
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;
pub mod web;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{AuthService, LinkService, SessionSettings};
    pub use crate::domain::entities::{Link, NewLink};
    pub use crate::error::AppError;
    pub use crate::state::AppState;
}
