//! Core library for the codecheck client.
//!
//! Provides the HTTP client for the CodeChecker server, the session
//! client with its persistent logged-in flag, secure credential storage,
//! and application configuration.

pub mod api;
pub mod auth;
pub mod config;

pub use api::{ApiClient, ApiError};
pub use auth::{Credentials, SessionClient, SessionStore, SESSION_KEY};
pub use config::Config;
