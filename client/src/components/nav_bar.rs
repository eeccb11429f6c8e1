//! Top navigation bar for the authenticated shell.
//!
//! SYSTEM CONTEXT
//! ==============
//! Shows the brand, the three section tabs, the signed-in identity and the
//! logout control. Logging out goes through the store so the route guard,
//! the refresh loop and persisted storage all observe the same transition.

#[cfg(test)]
#[path = "nav_bar_test.rs"]
mod nav_bar_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::{use_location, use_navigate};
use session::{NAV_TABS, NavTab, Session, User};

use crate::state::session::use_session;

/// Label shown next to the avatar: the user's email, or `User`.
pub fn identity_label(session: &Session) -> String {
    session.user().map_or_else(|| "User".to_owned(), |u| u.email.clone())
}

/// Single-letter avatar text: first letter of the email uppercased, or `U`.
pub fn avatar_text(session: &Session) -> String {
    session.user().map_or('U', User::avatar_initial).to_string()
}

pub fn tab_class(tab: &NavTab, pathname: &str) -> &'static str {
    if tab.is_active(pathname) { "nav-bar__tab nav-bar__tab--active" } else { "nav-bar__tab" }
}

#[component]
pub fn NavBar() -> impl IntoView {
    let ctx = use_session();
    let session = ctx.session;
    let pathname = use_location().pathname;
    let navigate = use_navigate();

    let tabs = NAV_TABS
        .iter()
        .map(|tab| {
            let tab = *tab;
            let navigate = navigate.clone();
            view! {
                <button
                    class=move || tab_class(&tab, &pathname.get())
                    on:click=move |_| navigate(tab.path, NavigateOptions::default())
                >
                    <span class="nav-bar__tab-icon">{tab.icon}</span>
                    {tab.label}
                </button>
            }
        })
        .collect::<Vec<_>>();

    let store = ctx.store.clone();
    let on_logout = move |_| {
        store.logout();
        navigate("/", NavigateOptions::default());
    };

    view! {
        <nav class="nav-bar">
            <span class="nav-bar__brand">"Backpack"</span>
            <div class="nav-bar__tabs">{tabs}</div>
            <div class="nav-bar__identity">
                <span class="nav-bar__avatar">{move || session.with(avatar_text)}</span>
                <div class="nav-bar__who">
                    <p class="nav-bar__email">{move || session.with(identity_label)}</p>
                    <p class="nav-bar__presence">"Online"</p>
                </div>
            </div>
            <button class="btn btn--danger nav-bar__logout" on:click=on_logout>
                "Logout"
            </button>
        </nav>
    }
}
