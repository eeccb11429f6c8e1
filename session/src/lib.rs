//! Authenticated-session core for the Backpack trading console.
//!
//! This crate owns everything the console needs to know about "who is signed
//! in": the persisted [`Session`], the [`SessionStore`] that mutates it, the
//! [`Authenticator`] slot read by outgoing requests, the login flow, the
//! background [`RefreshLoop`] and the route guard that picks between the
//! login screen and the authenticated shell.
//!
//! It is target-independent. The browser client and the CLI plug in their
//! own HTTP transport ([`AuthApi`]), durable storage ([`SessionStorage`]) and
//! timer ([`Sleeper`]).

pub mod api;
pub mod authenticator;
pub mod config;
pub mod flow;
pub mod guard;
pub mod refresh;
pub mod storage;
pub mod store;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;

pub use api::{ApiError, AuthApi};
pub use authenticator::Authenticator;
pub use config::ConsoleConfig;
pub use flow::{SignInError, sign_in, sign_up, validate_credentials};
pub use guard::{GuardState, NAV_TABS, NavTab, Route, resolve};
pub use refresh::{LoopExit, RefreshHandle, RefreshLoop, Sleeper, Tick};
pub use storage::{MemoryStorage, SessionStorage, StorageError};
pub use store::{RefreshOutcome, RefreshTicket, SessionStore};
pub use types::{Credentials, Session, TokenPair, User};
