//! Browser-facing pages and the GitHub sign-in flow.
//!
//! Pages are rendered server-side with Askama templates.
//!
//! # Modules
//!
//! - [`handlers`] - Page rendering and OAuth redirect handlers
//! - [`middleware`] - Session guard for `/dashboard`
//! - [`routes`] - Web route configuration

pub mod handlers;
pub mod middleware;
pub mod routes;
