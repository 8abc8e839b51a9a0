//! HTTP client module for the CodeChecker server.
//!
//! This module provides the `ApiClient` used to issue the form-encoded
//! login request against the server's form-login endpoint.

pub mod client;
pub mod error;

pub use client::ApiClient;
pub use error::ApiError;
