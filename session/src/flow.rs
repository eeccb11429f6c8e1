//! Interactive sign-in: credentials -> token pair -> current user -> store.
//!
//! Failures here are the only auth errors shown to the operator; the session
//! stays signed out whichever step fails.

#[cfg(test)]
#[path = "flow_test.rs"]
mod flow_test;

use log::{info, warn};

use crate::api::{ApiError, AuthApi};
use crate::store::SessionStore;
use crate::types::{Credentials, TokenPair, User};

/// Why a sign-in attempt did not produce a session.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SignInError {
    #[error("Email is required")]
    MissingEmail,
    #[error("Password is required")]
    MissingPassword,
    /// The auth service refused the credentials or was unreachable.
    #[error("Sign in failed: {0}")]
    Login(ApiError),
    /// Tokens were issued but the user lookup failed.
    #[error("Could not load your profile: {0}")]
    Whoami(ApiError),
}

/// Trim the email and require both fields.
///
/// # Errors
///
/// Returns [`SignInError::MissingEmail`] or [`SignInError::MissingPassword`].
pub fn validate_credentials(email: &str, password: &str) -> Result<Credentials, SignInError> {
    let email = email.trim();
    if email.is_empty() {
        return Err(SignInError::MissingEmail);
    }
    if password.is_empty() {
        return Err(SignInError::MissingPassword);
    }
    Ok(Credentials { email: email.to_owned(), password: password.to_owned() })
}

/// Log in with `credentials`, fetch the user, and record the session.
///
/// # Errors
///
/// Returns [`SignInError`] if the login or the user lookup fails; the store
/// is left untouched in that case.
pub async fn sign_in<A>(api: &A, store: &SessionStore, credentials: &Credentials) -> Result<User, SignInError>
where
    A: AuthApi + ?Sized,
{
    let tokens = api.login(credentials).await.map_err(|e| {
        warn!("sign in: login rejected for {}: {e}", credentials.email);
        SignInError::Login(e)
    })?;
    complete(api, store, tokens).await
}

/// Register a new account, then sign in with the issued tokens.
///
/// # Errors
///
/// Returns [`SignInError`] if registration or the user lookup fails.
pub async fn sign_up<A>(api: &A, store: &SessionStore, credentials: &Credentials) -> Result<User, SignInError>
where
    A: AuthApi + ?Sized,
{
    let tokens = api.register(credentials).await.map_err(|e| {
        warn!("sign up: registration rejected for {}: {e}", credentials.email);
        SignInError::Login(e)
    })?;
    complete(api, store, tokens).await
}

async fn complete<A>(api: &A, store: &SessionStore, tokens: TokenPair) -> Result<User, SignInError>
where
    A: AuthApi + ?Sized,
{
    let user = api.whoami(&tokens.access_token).await.map_err(|e| {
        warn!("sign in: user lookup failed: {e}");
        SignInError::Whoami(e)
    })?;
    info!("sign in: authenticated as {}", user.email);
    store.login(user.clone(), tokens);
    Ok(user)
}
