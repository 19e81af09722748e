//! HTML page handlers and the OAuth redirect endpoints.

mod auth;
mod dashboard;
mod home;

pub use auth::{callback_handler, login_handler, logout_handler};
pub use dashboard::dashboard_handler;
pub use home::home_handler;
