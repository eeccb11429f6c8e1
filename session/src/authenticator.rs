//! Ambient request authenticator.
//!
//! Every outgoing API call reads the current access token from here. The
//! slot is written only by [`crate::SessionStore`] mutations, so the token
//! attached to requests always matches the stored session.

#[cfg(test)]
#[path = "authenticator_test.rs"]
mod authenticator_test;

use std::sync::{Arc, PoisonError, RwLock};

/// Shared handle to the current access token. Clones observe the same slot.
#[derive(Clone, Debug, Default)]
pub struct Authenticator {
    token: Arc<RwLock<Option<String>>>,
}

impl Authenticator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn access_token(&self) -> Option<String> {
        self.token.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// `Authorization` header value for the current token.
    #[must_use]
    pub fn authorization_header(&self) -> Option<String> {
        self.access_token().map(|token| format!("Bearer {token}"))
    }

    pub(crate) fn set(&self, token: Option<&str>) {
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = token.map(str::to_owned);
    }
}
