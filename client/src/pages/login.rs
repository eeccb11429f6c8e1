//! Login page: email + password sign-in, with an account-creation mode.
//!
//! SYSTEM CONTEXT
//! ==============
//! Rendered for every path while signed out. A successful sign-in writes the
//! session through the store, which flips the route guard; the page never
//! navigates by itself.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use leptos::prelude::*;
use session::{sign_in, sign_up, validate_credentials};

use crate::net::api::HttpAuthApi;
use crate::state::session::use_session;

/// Whether the form signs into an existing account or creates one.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AuthMode {
    #[default]
    SignIn,
    Register,
}

impl AuthMode {
    pub fn heading(self) -> &'static str {
        match self {
            Self::SignIn => "Welcome back",
            Self::Register => "Create your account",
        }
    }

    pub fn subtitle(self) -> &'static str {
        match self {
            Self::SignIn => "Sign in to your account",
            Self::Register => "Register with your email",
        }
    }

    pub fn submit_label(self, busy: bool) -> &'static str {
        match (self, busy) {
            (Self::SignIn, false) => "Sign in",
            (Self::SignIn, true) => "Signing in...",
            (Self::Register, false) => "Create account",
            (Self::Register, true) => "Creating account...",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::SignIn => Self::Register,
            Self::Register => Self::SignIn,
        }
    }

    pub fn toggle_label(self) -> &'static str {
        match self {
            Self::SignIn => "Need an account? Register",
            Self::Register => "Already registered? Sign in",
        }
    }
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let ctx = use_session();
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let mode = RwSignal::new(AuthMode::default());
    let error = RwSignal::new(None::<String>);
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        let credentials = match validate_credentials(&email.get_untracked(), &password.get_untracked()) {
            Ok(credentials) => credentials,
            Err(e) => {
                error.set(Some(e.to_string()));
                return;
            }
        };
        error.set(None);
        busy.set(true);

        let store = ctx.store.clone();
        let api = HttpAuthApi::new(ctx.config.api_base_url.clone());
        let mode = mode.get_untracked();
        leptos::task::spawn_local(async move {
            let result = match mode {
                AuthMode::SignIn => sign_in(&api, &store, &credentials).await,
                AuthMode::Register => sign_up(&api, &store, &credentials).await,
            };
            if let Err(e) = result {
                log::warn!("login page: {e}");
                let _ = error.try_set(Some(e.to_string()));
            }
            // The page unmounts on success, so the signal may be gone.
            let _ = busy.try_set(false);
        });
    };

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>{move || mode.get().heading()}</h1>
                <p class="login-card__subtitle">{move || mode.get().subtitle()}</p>
                <form class="login-form" on:submit=on_submit>
                    <input
                        class="login-input"
                        type="text"
                        placeholder="Email"
                        prop:value=move || email.get()
                        on:input=move |ev| email.set(event_target_value(&ev))
                    />
                    <input
                        class="login-input"
                        type="password"
                        placeholder="Password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                    <button class="login-button" type="submit" disabled=move || busy.get()>
                        {move || mode.get().submit_label(busy.get())}
                    </button>
                </form>
                <Show when=move || error.get().is_some()>
                    <p class="login-message login-message--error">{move || error.get().unwrap_or_default()}</p>
                </Show>
                <button
                    class="login-toggle"
                    type="button"
                    on:click=move |_| {
                        mode.update(|m| *m = m.toggled());
                        error.set(None);
                    }
                >
                    {move || mode.get().toggle_label()}
                </button>
            </div>
        </div>
    }
}
