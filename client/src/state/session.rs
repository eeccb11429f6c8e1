//! Reactive view of the session store.
//!
//! SYSTEM CONTEXT
//! ==============
//! `SessionStore` is the single writer of session state. Components never
//! mutate the signal directly: they call store operations, and the store's
//! change listener mirrors every new snapshot into `session`. The route guard,
//! nav bar and refresh installer all read the signal.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use leptos::prelude::*;
use session::{Authenticator, ConsoleConfig, Session, SessionStore};

use crate::util::storage::LocalStorage;

/// Session state provided via context at the app root.
#[derive(Clone, Debug)]
pub struct SessionContext {
    pub store: SessionStore,
    pub session: RwSignal<Session>,
    pub config: ConsoleConfig,
}

impl SessionContext {
    /// Wrap `store`, keeping `session` in step with every store mutation.
    pub fn new(store: SessionStore, config: ConsoleConfig) -> Self {
        let session = RwSignal::new(store.session());
        store.subscribe(move |next| {
            // The signal is gone once the owning scope is disposed.
            let _ = session.try_set(next.clone());
        });
        Self { store, session, config }
    }

    /// Open the browser-backed store described by `config`.
    pub fn open(config: ConsoleConfig) -> Self {
        let store = SessionStore::open(LocalStorage, config.storage_key.clone(), Authenticator::new());
        Self::new(store, config)
    }

    pub fn authenticator(&self) -> Authenticator {
        self.store.authenticator()
    }
}

/// Console configuration baked in at build time.
///
/// Browser builds have no process environment, so the same variables the CLI
/// reads at runtime are captured by `option_env!` when the WASM is compiled.
pub fn client_config() -> ConsoleConfig {
    ConsoleConfig::default()
        .with_api_base_url(option_env!("CONSOLE_API_BASE_URL"))
        .with_refresh_interval_secs(option_env!("CONSOLE_REFRESH_INTERVAL_SECS"))
        .with_storage_key(option_env!("CONSOLE_STORAGE_KEY"))
}

pub fn use_session() -> SessionContext {
    expect_context::<SessionContext>()
}
