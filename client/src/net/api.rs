//! REST API helpers for communicating with the trading API.
//!
//! Client-side (csr): real HTTP calls via `gloo-net`.
//! Native builds (tests): stubs returning [`ApiError::Transport`] since these
//! endpoints are only reachable from the browser.
//!
//! ERROR HANDLING
//! ==============
//! Every call returns `Result<_, ApiError>`. Non-success statuses carry the
//! server's `detail` message so pages can show it verbatim; nothing here
//! panics or retries.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use session::{ApiError, AuthApi, Authenticator, Credentials, TokenPair, User};

use super::types::{Batch, IntegrationAccount, Unit};

pub const ACCOUNTS_PATH: &str = "/api/backpack/accounts";
pub const BATCHES_PATH: &str = "/api/backpack/batches";
pub const UNITS_PATH: &str = "/api/backpack/units";

#[cfg(any(test, feature = "csr"))]
fn units_path(is_active: bool) -> String {
    format!("{UNITS_PATH}?is_active={is_active}")
}

#[cfg(any(test, feature = "csr"))]
fn bearer(access_token: &str) -> String {
    format!("Bearer {access_token}")
}

#[cfg(not(feature = "csr"))]
fn unavailable() -> ApiError {
    ApiError::Transport("not available outside the browser".to_owned())
}

#[cfg(feature = "csr")]
fn transport(err: &gloo_net::Error) -> ApiError {
    ApiError::Transport(err.to_string())
}

/// Decode a JSON body, turning non-success statuses into [`ApiError::Rejected`].
#[cfg(feature = "csr")]
async fn read_json<T: serde::de::DeserializeOwned>(resp: gloo_net::http::Response) -> Result<T, ApiError> {
    if !resp.ok() {
        let body = resp.text().await.unwrap_or_default();
        return Err(ApiError::rejected(resp.status(), &body));
    }
    resp.json::<T>().await.map_err(|e| ApiError::Decode(e.to_string()))
}

#[cfg(feature = "csr")]
async fn post_json<B: serde::Serialize + ?Sized, T: serde::de::DeserializeOwned>(
    url: &str,
    body: &B,
) -> Result<T, ApiError> {
    let resp = gloo_net::http::Request::post(url)
        .json(body)
        .map_err(|e| transport(&e))?
        .send()
        .await
        .map_err(|e| transport(&e))?;
    read_json(resp).await
}

#[cfg(feature = "csr")]
async fn get_with_token<T: serde::de::DeserializeOwned>(url: &str, access_token: &str) -> Result<T, ApiError> {
    let resp = gloo_net::http::Request::get(url)
        .header("Authorization", &bearer(access_token))
        .send()
        .await
        .map_err(|e| transport(&e))?;
    read_json(resp).await
}

/// [`AuthApi`] over the browser's `fetch`.
#[derive(Clone, Debug, Default)]
pub struct HttpAuthApi {
    base_url: String,
}

impl HttpAuthApi {
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self { base_url: base_url.into() }
    }

    #[must_use]
    pub fn url(&self, path: &str) -> String {
        session::api::endpoint(&self.base_url, path)
    }
}

#[async_trait::async_trait(?Send)]
impl AuthApi for HttpAuthApi {
    async fn login(&self, credentials: &Credentials) -> Result<TokenPair, ApiError> {
        #[cfg(feature = "csr")]
        {
            post_json(&self.url(session::api::LOGIN_PATH), credentials).await
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = credentials;
            Err(unavailable())
        }
    }

    async fn register(&self, credentials: &Credentials) -> Result<TokenPair, ApiError> {
        #[cfg(feature = "csr")]
        {
            post_json(&self.url(session::api::REGISTER_PATH), credentials).await
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = credentials;
            Err(unavailable())
        }
    }

    async fn refresh(&self, refresh_token: &str) -> Result<TokenPair, ApiError> {
        #[cfg(feature = "csr")]
        {
            let body = session::types::RefreshRequest { refresh_token };
            post_json(&self.url(session::api::REFRESH_PATH), &body).await
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = refresh_token;
            Err(unavailable())
        }
    }

    async fn whoami(&self, access_token: &str) -> Result<User, ApiError> {
        #[cfg(feature = "csr")]
        {
            get_with_token(&self.url(session::api::WHOAMI_PATH), access_token).await
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = access_token;
            Err(unavailable())
        }
    }
}

/// Authenticated GET of a JSON list, using the ambient access token.
async fn fetch_list<T: serde::de::DeserializeOwned>(
    base_url: &str,
    path: &str,
    auth: &Authenticator,
) -> Result<Vec<T>, ApiError> {
    let Some(token) = auth.access_token() else {
        return Err(ApiError::Rejected { status: 401, message: "Not authenticated".to_owned() });
    };
    #[cfg(feature = "csr")]
    {
        get_with_token(&session::api::endpoint(base_url, path), &token).await
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = (base_url, path, token);
        Err(unavailable())
    }
}

/// Fetch integration accounts from `/api/backpack/accounts`.
///
/// # Errors
///
/// Returns [`ApiError`] when signed out, rejected, or the request fails.
pub async fn fetch_accounts(base_url: &str, auth: &Authenticator) -> Result<Vec<IntegrationAccount>, ApiError> {
    fetch_list(base_url, ACCOUNTS_PATH, auth).await
}

/// Fetch account batches from `/api/backpack/batches`.
///
/// # Errors
///
/// Returns [`ApiError`] when signed out, rejected, or the request fails.
pub async fn fetch_batches(base_url: &str, auth: &Authenticator) -> Result<Vec<Batch>, ApiError> {
    fetch_list(base_url, BATCHES_PATH, auth).await
}

/// Fetch trading units, filtered by whether they are still running.
///
/// # Errors
///
/// Returns [`ApiError`] when signed out, rejected, or the request fails.
pub async fn fetch_units(base_url: &str, auth: &Authenticator, is_active: bool) -> Result<Vec<Unit>, ApiError> {
    #[cfg(feature = "csr")]
    {
        fetch_list(base_url, &units_path(is_active), auth).await
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = is_active;
        fetch_list(base_url, UNITS_PATH, auth).await
    }
}
