use super::*;

#[test]
fn new_authenticator_has_no_token() {
    let auth = Authenticator::new();
    assert!(auth.access_token().is_none());
    assert!(auth.authorization_header().is_none());
}

#[test]
fn set_token_formats_bearer_header() {
    let auth = Authenticator::new();
    auth.set(Some("AT1"));
    assert_eq!(auth.authorization_header().as_deref(), Some("Bearer AT1"));
}

#[test]
fn clones_see_updates() {
    let auth = Authenticator::new();
    let reader = auth.clone();
    auth.set(Some("AT1"));
    auth.set(Some("AT2"));
    assert_eq!(reader.access_token().as_deref(), Some("AT2"));
    auth.set(None);
    assert!(reader.access_token().is_none());
}
