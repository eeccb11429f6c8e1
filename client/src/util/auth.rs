//! Token refresh wiring for the app root.
//!
//! SYSTEM CONTEXT
//! ==============
//! The session crate's `RefreshLoop` is target-neutral. This module runs one
//! loop per signed-in session: it starts when a session appears, and is
//! stopped on logout, on re-login, and when the app unmounts.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use leptos::prelude::*;
use session::{LoopExit, RefreshHandle, RefreshLoop, Session, SessionStore};

use crate::net::api::HttpAuthApi;
use crate::state::session::SessionContext;
use crate::util::timer::BrowserSleeper;

/// Identity of the session a refresh loop belongs to: the store generation
/// while signed in, `None` otherwise. Token rotation keeps the key stable.
pub fn refresh_key(store: &SessionStore, session: &Session) -> Option<u64> {
    session.is_authenticated().then(|| store.generation())
}

/// Keep the access token fresh for as long as a session exists.
pub fn install_token_refresh(ctx: &SessionContext) {
    let session = ctx.session;
    let key_store = ctx.store.clone();
    let key = Memo::new(move |_| session.with(|s| refresh_key(&key_store, s)));
    let running = StoredValue::new(None::<RefreshHandle>);

    let store = ctx.store.clone();
    let config = ctx.config.clone();
    Effect::new(move |_| {
        let current = key.get();
        stop_running(running);
        if current.is_none() {
            return;
        }
        let refresh = RefreshLoop::new(store.clone(), HttpAuthApi::new(config.api_base_url.clone()), BrowserSleeper)
            .with_interval(config.refresh_interval);
        let (task, handle) = refresh.start();
        running.set_value(Some(handle));
        leptos::task::spawn_local(async move {
            if let LoopExit::Expired(e) = task.await {
                log::warn!("token refresh ended the session: {e}");
            }
        });
    });

    on_cleanup(move || stop_running(running));
}

fn stop_running(running: StoredValue<Option<RefreshHandle>>) {
    running.update_value(|slot| {
        if let Some(handle) = slot.take() {
            handle.stop();
        }
    });
}
