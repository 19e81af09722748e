//! Utility functions for code generation, URL checks, and HTTP plumbing.
//!
//! - [`code_generator`] - Short code generation and validation
//! - [`url_validator`] - Syntactic URL checks
//! - [`cookies`] - Cookie parsing and `Set-Cookie` construction
//! - [`redirect`] - `302 Found` responses

pub mod code_generator;
pub mod cookies;
pub mod redirect;
pub mod url_validator;
