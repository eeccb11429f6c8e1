//! Session store: the single authoritative holder of authentication state.
//!
//! DESIGN
//! ======
//! The store is an explicitly owned handle (cheap to clone, shared by the
//! route guard, the login flow and the refresh loop). Persistence is an
//! explicit pair: the snapshot is loaded once in [`SessionStore::open`] and
//! saved after every mutation.
//!
//! Every `login`/`logout` bumps a generation counter. Refresh attempts carry
//! a [`RefreshTicket`] taken before the network call; results landing after
//! the session changed (logout, re-login, or an overlapping refresh that
//! already rotated the tokens) are discarded instead of applied.
//!
//! ERROR HANDLING
//! ==============
//! A missing, unreadable or malformed snapshot loads as the empty session.
//! Save failures are logged; the in-memory session stays authoritative.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::authenticator::Authenticator;
use crate::storage::SessionStorage;
use crate::types::{Session, TokenPair, User};

/// Storage key used when none is configured.
pub const DEFAULT_STORAGE_KEY: &str = "auth-storage";

/// Version written into the persisted envelope; other versions load as empty.
pub const PERSIST_VERSION: u32 = 0;

type Listener = Arc<dyn Fn(&Session) + Send + Sync>;

/// On-disk envelope: `{ "state": { ... }, "version": 0 }`.
#[derive(Debug, Serialize, Deserialize)]
struct PersistedSession {
    state: Session,
    version: u32,
}

/// Snapshot of the session a refresh attempt was started for.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RefreshTicket {
    generation: u64,
    refresh_token: String,
}

impl RefreshTicket {
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[must_use]
    pub fn refresh_token(&self) -> &str {
        &self.refresh_token
    }
}

/// What happened to a refresh result handed back to the store.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// Tokens replaced, user kept.
    Applied,
    /// The session moved on since the ticket was taken; result dropped.
    Stale,
}

struct StoreInner {
    session: Session,
    generation: u64,
    key: String,
    storage: Box<dyn SessionStorage>,
    authenticator: Authenticator,
    listeners: Vec<Listener>,
}

/// Cloneable handle to the one session of this client instance.
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<Mutex<StoreInner>>,
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.lock();
        f.debug_struct("SessionStore")
            .field("key", &inner.key)
            .field("generation", &inner.generation)
            .field("is_authenticated", &inner.session.is_authenticated())
            .finish_non_exhaustive()
    }
}

impl SessionStore {
    /// Open the store over `storage`, loading any snapshot saved under `key`.
    ///
    /// Never fails: an absent or unusable snapshot yields the empty session.
    pub fn open(storage: impl SessionStorage + 'static, key: impl Into<String>, authenticator: Authenticator) -> Self {
        let key = key.into();
        let session = load_snapshot(&storage, &key);
        authenticator.set(session.access_token());
        Self {
            inner: Arc::new(Mutex::new(StoreInner {
                session,
                generation: 0,
                key,
                storage: Box::new(storage),
                authenticator,
                listeners: Vec::new(),
            })),
        }
    }

    /// Record a successful login. Inputs are trusted.
    pub fn login(&self, user: User, tokens: TokenPair) {
        info!("session: login as {}", user.email);
        self.mutate(|inner| {
            inner.session = Session::authenticated(user, tokens);
            inner.generation += 1;
        });
    }

    /// Clear the session. Safe to call on an already empty session.
    pub fn logout(&self) {
        info!("session: logout");
        self.mutate(|inner| {
            inner.session = Session::empty();
            inner.generation += 1;
        });
    }

    /// Copy of the current session.
    #[must_use]
    pub fn session(&self) -> Session {
        self.lock().session.clone()
    }

    #[must_use]
    pub fn user(&self) -> Option<User> {
        self.lock().session.user().cloned()
    }

    #[must_use]
    pub fn tokens(&self) -> Option<TokenPair> {
        self.lock().session.tokens().cloned()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.lock().session.is_authenticated()
    }

    /// Counter bumped by every login and logout.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.lock().generation
    }

    #[must_use]
    pub fn authenticator(&self) -> Authenticator {
        self.lock().authenticator.clone()
    }

    /// Register a callback invoked with the new session after each mutation.
    pub fn subscribe(&self, listener: impl Fn(&Session) + Send + Sync + 'static) {
        self.lock().listeners.push(Arc::new(listener));
    }

    /// Ticket for a refresh attempt, `None` when no session is active.
    #[must_use]
    pub fn refresh_ticket(&self) -> Option<RefreshTicket> {
        let inner = self.lock();
        if !inner.session.is_authenticated() {
            return None;
        }
        inner
            .session
            .refresh_token()
            .map(|token| RefreshTicket { generation: inner.generation, refresh_token: token.to_owned() })
    }

    /// Merge a refreshed token pair if `ticket` still describes the session.
    pub fn apply_refresh(&self, ticket: &RefreshTicket, tokens: TokenPair) -> RefreshOutcome {
        let mut applied = false;
        self.mutate_if(|inner| {
            if !ticket_is_current(inner, ticket) {
                return false;
            }
            inner.session = inner.session.with_tokens(tokens);
            applied = true;
            true
        });
        if applied {
            debug!("session: tokens refreshed");
            RefreshOutcome::Applied
        } else {
            debug!("session: discarded stale refresh result (generation {})", ticket.generation);
            RefreshOutcome::Stale
        }
    }

    /// Log out because the refresh for `ticket` failed.
    ///
    /// Returns `false` (and leaves the store alone) when the session already
    /// moved on, so a late failure cannot end a newer session.
    pub fn expire(&self, ticket: &RefreshTicket) -> bool {
        let mut expired = false;
        self.mutate_if(|inner| {
            if !ticket_is_current(inner, ticket) {
                return false;
            }
            inner.session = Session::empty();
            inner.generation += 1;
            expired = true;
            true
        });
        if expired {
            info!("session: expired after failed refresh");
        }
        expired
    }

    fn lock(&self) -> MutexGuard<'_, StoreInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn mutate(&self, f: impl FnOnce(&mut StoreInner)) {
        self.mutate_if(|inner| {
            f(inner);
            true
        });
    }

    /// Apply `f`; when it reports a change, sync the authenticator, persist,
    /// and notify listeners after the lock is released.
    fn mutate_if(&self, f: impl FnOnce(&mut StoreInner) -> bool) {
        let (snapshot, listeners) = {
            let mut inner = self.lock();
            if !f(&mut inner) {
                return;
            }
            inner.authenticator.set(inner.session.access_token());
            persist(&inner);
            (inner.session.clone(), inner.listeners.clone())
        };
        for listener in listeners {
            listener(&snapshot);
        }
    }
}

fn ticket_is_current(inner: &StoreInner, ticket: &RefreshTicket) -> bool {
    inner.generation == ticket.generation
        && inner.session.is_authenticated()
        && inner.session.refresh_token() == Some(ticket.refresh_token.as_str())
}

fn load_snapshot(storage: &dyn SessionStorage, key: &str) -> Session {
    let raw = match storage.read(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Session::empty(),
        Err(e) => {
            warn!("session: could not read stored session: {e}");
            return Session::empty();
        }
    };
    match serde_json::from_str::<PersistedSession>(&raw) {
        Ok(persisted) if persisted.version == PERSIST_VERSION && persisted.state.is_consistent() => {
            debug!("session: restored (authenticated={})", persisted.state.is_authenticated());
            persisted.state
        }
        Ok(persisted) => {
            warn!("session: ignoring stored session (version {})", persisted.version);
            Session::empty()
        }
        Err(e) => {
            warn!("session: ignoring malformed stored session: {e}");
            Session::empty()
        }
    }
}

fn persist(inner: &StoreInner) {
    let envelope = PersistedSession { state: inner.session.clone(), version: PERSIST_VERSION };
    let raw = match serde_json::to_string(&envelope) {
        Ok(raw) => raw,
        Err(e) => {
            warn!("session: could not encode session: {e}");
            return;
        }
    };
    if let Err(e) = inner.storage.write(&inner.key, &raw) {
        warn!("session: could not persist session: {e}");
    }
}
