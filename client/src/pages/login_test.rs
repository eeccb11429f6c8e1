use super::*;

#[test]
fn default_mode_is_sign_in() {
    assert_eq!(AuthMode::default(), AuthMode::SignIn);
    assert_eq!(AuthMode::default().submit_label(false), "Sign in");
}

#[test]
fn submit_label_reflects_busy_state() {
    assert_eq!(AuthMode::SignIn.submit_label(true), "Signing in...");
    assert_eq!(AuthMode::Register.submit_label(true), "Creating account...");
}

#[test]
fn toggling_twice_returns_to_start() {
    assert_eq!(AuthMode::SignIn.toggled(), AuthMode::Register);
    assert_eq!(AuthMode::SignIn.toggled().toggled(), AuthMode::SignIn);
}

#[test]
fn validation_messages_reach_the_form() {
    let email_err = validate_credentials("  ", "pw").unwrap_err();
    let password_err = validate_credentials("a@b.co", "").unwrap_err();
    assert_eq!(email_err.to_string(), "Email is required");
    assert_eq!(password_err.to_string(), "Password is required");
}
