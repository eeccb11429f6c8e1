use super::*;
use crate::test_helpers::{self, EventLog, MockAuthApi};
use crate::types::Session;

use futures::executor::block_on;

fn creds() -> Credentials {
    Credentials { email: "a@b.com".into(), password: "pw".into() }
}

// =============================================================
// validate_credentials
// =============================================================

#[test]
fn validate_trims_email() {
    let creds = validate_credentials("  a@b.com ", "pw").unwrap();
    assert_eq!(creds.email, "a@b.com");
    assert_eq!(creds.password, "pw");
}

#[test]
fn validate_requires_email() {
    assert_eq!(validate_credentials("   ", "pw"), Err(SignInError::MissingEmail));
    assert_eq!(SignInError::MissingEmail.to_string(), "Email is required");
}

#[test]
fn validate_requires_password() {
    assert_eq!(validate_credentials("a@b.com", ""), Err(SignInError::MissingPassword));
    assert_eq!(SignInError::MissingPassword.to_string(), "Password is required");
}

#[test]
fn validate_keeps_password_whitespace() {
    assert_eq!(validate_credentials("a@b.com", " pw ").unwrap().password, " pw ");
}

// =============================================================
// sign_in
// =============================================================

#[test]
fn sign_in_records_session() {
    let log = EventLog::default();
    let api = MockAuthApi::new(log.clone());
    let store = test_helpers::store();

    let user = block_on(sign_in(&api, &store, &creds())).unwrap();

    assert_eq!(user, User::new("a@b.com"));
    assert!(store.is_authenticated());
    assert_eq!(store.tokens(), Some(TokenPair::new("AT1", "RT1")));
    assert_eq!(store.authenticator().access_token().as_deref(), Some("AT1"));
    assert_eq!(test_helpers::events(&log), vec!["login:a@b.com", "whoami:AT1"]);
}

#[test]
fn sign_in_rejection_leaves_store_empty() {
    let log = EventLog::default();
    let api = MockAuthApi::new(log.clone()).with_login(Err(ApiError::rejected(401, r#"{"detail":"Bad credentials"}"#)));
    let store = test_helpers::store();

    let err = block_on(sign_in(&api, &store, &creds())).unwrap_err();

    assert_eq!(err.to_string(), "Sign in failed: request rejected (401): Bad credentials");
    assert_eq!(store.session(), Session::empty());
    assert_eq!(test_helpers::events(&log), vec!["login:a@b.com"]);
}

#[test]
fn sign_in_whoami_failure_leaves_store_empty() {
    let log = EventLog::default();
    let api = MockAuthApi::new(log).with_whoami(Err(ApiError::Transport("offline".into())));
    let store = test_helpers::store();

    let err = block_on(sign_in(&api, &store, &creds())).unwrap_err();

    assert_eq!(err, SignInError::Whoami(ApiError::Transport("offline".into())));
    assert!(!store.is_authenticated());
    assert!(store.authenticator().access_token().is_none());
}

// =============================================================
// sign_up
// =============================================================

#[test]
fn sign_up_registers_then_looks_up_user() {
    let log = EventLog::default();
    let api = MockAuthApi::new(log.clone()).with_login(Ok(TokenPair::new("ATR", "RTR")));
    let store = test_helpers::store();

    block_on(sign_up(&api, &store, &creds())).unwrap();

    assert_eq!(test_helpers::events(&log), vec!["register:a@b.com", "whoami:ATR"]);
    assert_eq!(store.tokens(), Some(TokenPair::new("ATR", "RTR")));
}
