//! Session data model and auth wire DTOs.
//!
//! DESIGN
//! ======
//! `Session` keeps its fields private so the only way to build an
//! authenticated value is through [`Session::authenticated`], which makes
//! "`is_authenticated` implies user and tokens" hold by construction.
//! Deserialized snapshots are checked with [`Session::is_consistent`].

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};

/// Identity of the signed-in operator as returned by `/api/users/me`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Login email; also the display name in the navigation shell.
    pub email: String,
}

impl User {
    #[must_use]
    pub fn new(email: impl Into<String>) -> Self {
        Self { email: email.into() }
    }

    /// Single uppercase letter shown in the avatar bubble.
    #[must_use]
    pub fn avatar_initial(&self) -> char {
        self.email
            .chars()
            .next()
            .and_then(|c| c.to_uppercase().next())
            .unwrap_or('U')
    }
}

/// Access/refresh token pair issued by the auth service.
///
/// Tokens are opaque: nothing in the client inspects expiry or claims.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

impl TokenPair {
    #[must_use]
    pub fn new(access_token: impl Into<String>, refresh_token: impl Into<String>) -> Self {
        Self { access_token: access_token.into(), refresh_token: refresh_token.into() }
    }
}

/// Email/password body for `/api/auth/login` and `/api/auth/register`.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Body of `POST /api/auth/refresh`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshRequest<'a> {
    pub refresh_token: &'a str,
}

/// The authenticated-identity-plus-tokens state held by one client instance.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    #[serde(default)]
    user: Option<User>,
    #[serde(default)]
    tokens: Option<TokenPair>,
    #[serde(default, rename = "isAuthenticated")]
    is_authenticated: bool,
}

impl Session {
    /// The signed-out session every client starts from.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn authenticated(user: User, tokens: TokenPair) -> Self {
        Self { user: Some(user), tokens: Some(tokens), is_authenticated: true }
    }

    #[must_use]
    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    #[must_use]
    pub fn tokens(&self) -> Option<&TokenPair> {
        self.tokens.as_ref()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.is_authenticated
    }

    /// Current refresh token, present only while a session is active.
    #[must_use]
    pub fn refresh_token(&self) -> Option<&str> {
        self.tokens.as_ref().map(|t| t.refresh_token.as_str())
    }

    #[must_use]
    pub fn access_token(&self) -> Option<&str> {
        self.tokens.as_ref().map(|t| t.access_token.as_str())
    }

    /// `true` when the authenticated flag agrees with the presence of both
    /// user and tokens. Snapshots failing this are never loaded.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        self.is_authenticated == (self.user.is_some() && self.tokens.is_some())
    }

    /// Same session with a new token pair; the user is kept.
    #[must_use]
    pub(crate) fn with_tokens(&self, tokens: TokenPair) -> Self {
        Self { user: self.user.clone(), tokens: Some(tokens), is_authenticated: self.user.is_some() }
    }
}
