use super::*;
use leptos::prelude::Owner;
use session::{MemoryStorage, TokenPair, User};

fn memory_store() -> SessionStore {
    SessionStore::open(MemoryStorage::new(), "auth-storage", Authenticator::new())
}

#[test]
fn signal_starts_from_store_snapshot() {
    let owner = Owner::new();
    owner.with(|| {
        let store = memory_store();
        store.login(User::new("a@b.co"), TokenPair::new("AT1", "RT1"));
        let ctx = SessionContext::new(store, ConsoleConfig::default());
        assert!(ctx.session.get_untracked().is_authenticated());
    });
}

#[test]
fn signal_follows_login_and_logout() {
    let owner = Owner::new();
    owner.with(|| {
        let ctx = SessionContext::new(memory_store(), ConsoleConfig::default());
        assert!(!ctx.session.get_untracked().is_authenticated());

        ctx.store.login(User::new("a@b.co"), TokenPair::new("AT1", "RT1"));
        let session = ctx.session.get_untracked();
        assert_eq!(session.access_token(), Some("AT1"));

        ctx.store.logout();
        assert_eq!(ctx.session.get_untracked(), Session::empty());
    });
}

#[test]
fn context_shares_the_store_authenticator() {
    let owner = Owner::new();
    owner.with(|| {
        let ctx = SessionContext::new(memory_store(), ConsoleConfig::default());
        ctx.store.login(User::new("a@b.co"), TokenPair::new("AT1", "RT1"));
        assert_eq!(ctx.authenticator().authorization_header().as_deref(), Some("Bearer AT1"));
    });
}

#[test]
fn client_config_defaults_without_build_env() {
    let config = client_config();
    if option_env!("CONSOLE_STORAGE_KEY").is_none() {
        assert_eq!(config.storage_key, "auth-storage");
    }
}
