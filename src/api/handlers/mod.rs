//! HTTP request handlers for the JSON and redirect endpoints.

pub mod links;
pub mod redirect;
pub mod shorten;

pub use links::{delete_link_handler, rename_link_handler};
pub use redirect::redirect_handler;
pub use shorten::shorten_handler;
