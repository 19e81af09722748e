//! SQLite persistence.
//!
//! - [`Database`] - Opens the store file and applies embedded migrations
//! - [`SqliteLinkRepository`] - Link storage and retrieval

pub mod database;
pub mod sqlite_link_repository;

pub use database::Database;
pub use sqlite_link_repository::SqliteLinkRepository;
