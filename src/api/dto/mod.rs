//! Data Transfer Objects for the JSON endpoints.
//!
//! Request bodies use Serde for deserialization and validator for input
//! validation.

pub mod links;
pub mod shorten;
