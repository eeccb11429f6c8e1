//! Scripted auth service and timer shared by the unit tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::api::{ApiError, AuthApi};
use crate::authenticator::Authenticator;
use crate::refresh::Sleeper;
use crate::storage::MemoryStorage;
use crate::store::{DEFAULT_STORAGE_KEY, SessionStore};
use crate::types::{Credentials, TokenPair, User};

/// Ordered record of calls made against the mocks.
pub type EventLog = Arc<Mutex<Vec<String>>>;

type Hook = Box<dyn FnMut() + Send>;

pub fn store() -> SessionStore {
    SessionStore::open(MemoryStorage::new(), DEFAULT_STORAGE_KEY, Authenticator::new())
}

pub fn events(log: &EventLog) -> Vec<String> {
    log.lock().unwrap().clone()
}

#[derive(Clone)]
pub struct MockAuthApi {
    pub log: EventLog,
    login: Arc<Mutex<Result<TokenPair, ApiError>>>,
    whoami: Arc<Mutex<Result<User, ApiError>>>,
    refreshes: Arc<Mutex<VecDeque<Result<TokenPair, ApiError>>>>,
    before_refresh_reply: Arc<Mutex<Option<Hook>>>,
}

impl MockAuthApi {
    pub fn new(log: EventLog) -> Self {
        Self {
            log,
            login: Arc::new(Mutex::new(Ok(TokenPair::new("AT1", "RT1")))),
            whoami: Arc::new(Mutex::new(Ok(User::new("a@b.com")))),
            refreshes: Arc::new(Mutex::new(VecDeque::new())),
            before_refresh_reply: Arc::new(Mutex::new(None)),
        }
    }

    pub fn with_login(self, result: Result<TokenPair, ApiError>) -> Self {
        *self.login.lock().unwrap() = result;
        self
    }

    pub fn with_whoami(self, result: Result<User, ApiError>) -> Self {
        *self.whoami.lock().unwrap() = result;
        self
    }

    /// Queue refresh replies; an exhausted queue answers with a rejection.
    pub fn with_refreshes(self, replies: Vec<Result<TokenPair, ApiError>>) -> Self {
        self.refreshes.lock().unwrap().extend(replies);
        self
    }

    /// Run `hook` while the next refresh call is "in flight".
    pub fn before_refresh_reply(self, hook: impl FnMut() + Send + 'static) -> Self {
        *self.before_refresh_reply.lock().unwrap() = Some(Box::new(hook));
        self
    }

    pub fn refresh_calls(&self) -> usize {
        events(&self.log).iter().filter(|e| e.starts_with("refresh")).count()
    }

    fn record(&self, event: String) {
        self.log.lock().unwrap().push(event);
    }
}

#[async_trait::async_trait(?Send)]
impl AuthApi for MockAuthApi {
    async fn login(&self, credentials: &Credentials) -> Result<TokenPair, ApiError> {
        self.record(format!("login:{}", credentials.email));
        self.login.lock().unwrap().clone()
    }

    async fn register(&self, credentials: &Credentials) -> Result<TokenPair, ApiError> {
        self.record(format!("register:{}", credentials.email));
        self.login.lock().unwrap().clone()
    }

    async fn refresh(&self, refresh_token: &str) -> Result<TokenPair, ApiError> {
        self.record(format!("refresh:{refresh_token}"));
        if let Some(mut hook) = self.before_refresh_reply.lock().unwrap().take() {
            hook();
        }
        self.refreshes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ApiError::rejected(401, r#"{"detail":"expired"}"#)))
    }

    async fn whoami(&self, access_token: &str) -> Result<User, ApiError> {
        self.record(format!("whoami:{access_token}"));
        self.whoami.lock().unwrap().clone()
    }
}

/// Timer that completes immediately and logs each wait.
pub struct RecordingSleeper {
    pub log: EventLog,
    on_sleep: Mutex<Option<Hook>>,
}

impl RecordingSleeper {
    pub fn new(log: EventLog) -> Self {
        Self { log, on_sleep: Mutex::new(None) }
    }

    /// Run `hook` on every wait, e.g. to log out mid-loop.
    pub fn on_sleep(self, hook: impl FnMut() + Send + 'static) -> Self {
        *self.on_sleep.lock().unwrap() = Some(Box::new(hook));
        self
    }
}

#[async_trait::async_trait(?Send)]
impl Sleeper for RecordingSleeper {
    async fn sleep(&self, duration: Duration) {
        self.log.lock().unwrap().push(format!("sleep:{}", duration.as_secs()));
        if let Some(hook) = self.on_sleep.lock().unwrap().as_mut() {
            hook();
        }
    }
}
