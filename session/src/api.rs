//! Auth service boundary.
//!
//! SYSTEM CONTEXT
//! ==============
//! The console talks to a remote API for login, registration, token refresh
//! and the current-user lookup. This module defines the transport-neutral
//! trait, the endpoint paths and the error type; the browser (`gloo-net`)
//! and CLI (`reqwest`) crates provide implementations.
//!
//! ERROR HANDLING
//! ==============
//! Callers only distinguish success from failure. The variants exist for
//! logging and for the login form's message, not for retry decisions.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use crate::types::{Credentials, TokenPair, User};

pub const LOGIN_PATH: &str = "/api/auth/login";
pub const REGISTER_PATH: &str = "/api/auth/register";
pub const REFRESH_PATH: &str = "/api/auth/refresh";
pub const WHOAMI_PATH: &str = "/api/users/me";

/// Failure talking to the remote API.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The server answered with a non-success status.
    #[error("request rejected ({status}): {message}")]
    Rejected { status: u16, message: String },
    /// The request never produced a response.
    #[error("request failed: {0}")]
    Transport(String),
    /// The response body did not match the expected schema.
    #[error("invalid response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Build a rejection from a status code and raw response body.
    ///
    /// FastAPI-style `{"detail": "..."}` bodies contribute their message;
    /// anything else falls back to the body text or a generic status line.
    #[must_use]
    pub fn rejected(status: u16, body: &str) -> Self {
        Self::Rejected { status, message: rejection_message(status, body) }
    }
}

fn rejection_message(status: u16, body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        match value.get("detail") {
            Some(serde_json::Value::String(detail)) => return detail.clone(),
            Some(serde_json::Value::Array(items)) => {
                let messages: Vec<&str> = items
                    .iter()
                    .filter_map(|item| item.get("msg").and_then(serde_json::Value::as_str))
                    .collect();
                if !messages.is_empty() {
                    return messages.join("; ");
                }
            }
            _ => {}
        }
    }
    let trimmed = body.trim();
    if trimmed.is_empty() { format!("HTTP {status}") } else { trimmed.to_owned() }
}

/// Join the configured API base URL and an endpoint path.
#[must_use]
pub fn endpoint(base_url: &str, path: &str) -> String {
    format!("{}{path}", base_url.trim_end_matches('/'))
}

/// Remote auth operations used by the session core.
///
/// Futures are not required to be `Send`: the browser transport is
/// single-threaded.
#[async_trait::async_trait(?Send)]
pub trait AuthApi {
    /// Exchange credentials for a token pair.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on bad credentials or transport failure.
    async fn login(&self, credentials: &Credentials) -> Result<TokenPair, ApiError>;

    /// Create an account and return its first token pair.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if registration is refused or the request fails.
    async fn register(&self, credentials: &Credentials) -> Result<TokenPair, ApiError>;

    /// Trade a refresh token for a new token pair.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] for expired/invalid tokens and transport failures alike.
    async fn refresh(&self, refresh_token: &str) -> Result<TokenPair, ApiError>;

    /// Look up the user owning `access_token`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the token is refused or the request fails.
    async fn whoami(&self, access_token: &str) -> Result<User, ApiError>;
}
