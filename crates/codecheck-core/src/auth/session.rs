//! Session client bridging login/logout actions to the HTTP client and
//! the local store.
//!
//! The session model is deliberately minimal: a single `"session"` key in
//! the store whose presence means "logged in". The flag is written by the
//! caller after it has inspected the login response, removed by `logout`,
//! and read by `is_logged_in`. There is no expiry and no token payload.

use std::sync::Arc;

use anyhow::Result;
use reqwest::Response;
use tracing::info;

use crate::api::{ApiClient, ApiError};

use super::credentials::Credentials;
use super::store::SessionStore;

/// Store key holding the logged-in flag
pub const SESSION_KEY: &str = "session";

pub struct SessionClient {
    api: ApiClient,
    store: Arc<dyn SessionStore>,
}

impl SessionClient {
    pub fn new(api: ApiClient, store: Arc<dyn SessionStore>) -> Self {
        Self { api, store }
    }

    /// Send the login request and hand the raw response back.
    ///
    /// The logged-in flag is not touched here. The caller inspects the
    /// response and stores the flag on success, so a login by itself never
    /// flips `is_logged_in`.
    pub async fn login(&self, credentials: &Credentials) -> Result<Response, ApiError> {
        self.api.login(credentials).await
    }

    /// Drop the logged-in flag.
    ///
    /// A no-op when already logged out. Purely local: the server-side
    /// session is left untouched.
    pub fn logout(&self) -> Result<()> {
        self.store.remove(SESSION_KEY)?;
        info!("Session cleared");
        Ok(())
    }

    /// Whether the logged-in flag is present in the store.
    ///
    /// Trusts the store unconditionally: no network call, no value
    /// inspection.
    pub fn is_logged_in(&self) -> Result<bool> {
        Ok(self.store.get(SESSION_KEY)?.is_some())
    }
}
