//! `reqwest` transport for the auth API.

#[cfg(test)]
#[path = "http_test.rs"]
mod http_test;

use session::api::{LOGIN_PATH, REFRESH_PATH, REGISTER_PATH, WHOAMI_PATH, endpoint};
use session::types::RefreshRequest;
use session::{ApiError, AuthApi, Credentials, TokenPair, User};

/// [`AuthApi`] over a shared `reqwest::Client`.
#[derive(Clone, Debug)]
pub struct ReqwestAuthApi {
    client: reqwest::Client,
    base_url: String,
}

impl ReqwestAuthApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self { client: reqwest::Client::new(), base_url: base_url.into() }
    }

    pub fn url(&self, path: &str) -> String {
        endpoint(&self.base_url, path)
    }

    async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: serde::Serialize + ?Sized,
        T: serde::de::DeserializeOwned,
    {
        let response = self.client.post(self.url(path)).json(body).send().await.map_err(transport)?;
        read_json(response).await
    }
}

fn transport(error: reqwest::Error) -> ApiError {
    ApiError::Transport(error.to_string())
}

async fn read_json<T: serde::de::DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
    let status = response.status();
    let body = response.text().await.map_err(transport)?;
    decode_body(status.as_u16(), status.is_success(), &body)
}

/// Map a finished response to a value or an [`ApiError`].
fn decode_body<T: serde::de::DeserializeOwned>(status: u16, success: bool, body: &str) -> Result<T, ApiError> {
    if !success {
        return Err(ApiError::rejected(status, body));
    }
    serde_json::from_str(body).map_err(|e| ApiError::Decode(e.to_string()))
}

#[async_trait::async_trait(?Send)]
impl AuthApi for ReqwestAuthApi {
    async fn login(&self, credentials: &Credentials) -> Result<TokenPair, ApiError> {
        self.post_json(LOGIN_PATH, credentials).await
    }

    async fn register(&self, credentials: &Credentials) -> Result<TokenPair, ApiError> {
        self.post_json(REGISTER_PATH, credentials).await
    }

    async fn refresh(&self, refresh_token: &str) -> Result<TokenPair, ApiError> {
        self.post_json(REFRESH_PATH, &RefreshRequest { refresh_token }).await
    }

    async fn whoami(&self, access_token: &str) -> Result<User, ApiError> {
        let response = self
            .client
            .get(self.url(WHOAMI_PATH))
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(transport)?;
        read_json(response).await
    }
}
