//! Route guard: picks the login screen or the authenticated shell.
//!
//! SYSTEM CONTEXT
//! ==============
//! The client re-evaluates [`resolve`] whenever the session signal or the
//! location changes. Signed out, every path resolves to [`Route::Login`];
//! signed in, paths map onto the shell's pages.

#[cfg(test)]
#[path = "guard_test.rs"]
mod guard_test;

use crate::types::Session;

/// Which of the two top-level views is showing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardState {
    Unauthenticated,
    Authenticated,
}

impl GuardState {
    #[must_use]
    pub fn of(session: &Session) -> Self {
        if session.is_authenticated() { Self::Authenticated } else { Self::Unauthenticated }
    }
}

/// A screen the console can render.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Route {
    Login,
    Dashboard,
    Accounts,
    Trade,
    TradeHistory { batch_id: String },
    /// Signed in, but the path matches no page.
    NotFound,
}

impl Route {
    /// Canonical path for this route.
    #[must_use]
    pub fn path(&self) -> String {
        match self {
            Self::Login | Self::Dashboard | Self::NotFound => "/".to_owned(),
            Self::Accounts => "/accounts".to_owned(),
            Self::Trade => "/trade".to_owned(),
            Self::TradeHistory { batch_id } => format!("/trade/history/{batch_id}"),
        }
    }

    #[must_use]
    pub fn requires_session(&self) -> bool {
        !matches!(self, Self::Login)
    }
}

/// Resolve `path` against the session. Query strings and fragments are
/// ignored; a trailing slash is not significant.
#[must_use]
pub fn resolve(path: &str, session: &Session) -> Route {
    match GuardState::of(session) {
        GuardState::Unauthenticated => Route::Login,
        GuardState::Authenticated => match_shell_path(path),
    }
}

fn match_shell_path(path: &str) -> Route {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    match segments.as_slice() {
        [] => Route::Dashboard,
        ["accounts"] => Route::Accounts,
        ["trade"] => Route::Trade,
        ["trade", "history", batch_id] => Route::TradeHistory { batch_id: (*batch_id).to_owned() },
        _ => Route::NotFound,
    }
}

/// One entry of the shell's navigation bar.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NavTab {
    pub path: &'static str,
    pub label: &'static str,
    pub icon: &'static str,
}

impl NavTab {
    /// Tabs highlight on an exact path match only.
    #[must_use]
    pub fn is_active(&self, pathname: &str) -> bool {
        self.path == pathname
    }
}

pub const NAV_TABS: [NavTab; 3] = [
    NavTab { path: "/", label: "Dashboard", icon: "📊" },
    NavTab { path: "/accounts", label: "Accounts", icon: "👤" },
    NavTab { path: "/trade", label: "Trade", icon: "📈" },
];
