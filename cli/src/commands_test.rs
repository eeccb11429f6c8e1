use super::*;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use session::{ApiError, Authenticator, Credentials, MemoryStorage, TokenPair};

#[derive(Clone, Default)]
struct ScriptedApi {
    refreshes: Arc<Mutex<VecDeque<Result<TokenPair, ApiError>>>>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl ScriptedApi {
    fn with_refreshes(replies: Vec<Result<TokenPair, ApiError>>) -> Self {
        let api = Self::default();
        api.refreshes.lock().unwrap().extend(replies);
        api
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait::async_trait(?Send)]
impl AuthApi for ScriptedApi {
    async fn login(&self, credentials: &Credentials) -> Result<TokenPair, ApiError> {
        self.calls.lock().unwrap().push(format!("login:{}", credentials.email));
        if credentials.password == "wrong" {
            return Err(ApiError::rejected(401, r#"{"detail":"Invalid credentials"}"#));
        }
        Ok(TokenPair::new("AT1", "RT1"))
    }

    async fn register(&self, credentials: &Credentials) -> Result<TokenPair, ApiError> {
        self.calls.lock().unwrap().push(format!("register:{}", credentials.email));
        Ok(TokenPair::new("AT1", "RT1"))
    }

    async fn refresh(&self, refresh_token: &str) -> Result<TokenPair, ApiError> {
        self.calls.lock().unwrap().push(format!("refresh:{refresh_token}"));
        self.refreshes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ApiError::rejected(401, "")))
    }

    async fn whoami(&self, access_token: &str) -> Result<User, ApiError> {
        self.calls.lock().unwrap().push(format!("whoami:{access_token}"));
        Ok(User::new("ops@example.com"))
    }
}

/// Resolves immediately, so loop iterations run back to back.
struct InstantSleeper;

#[async_trait::async_trait(?Send)]
impl Sleeper for InstantSleeper {
    async fn sleep(&self, _duration: Duration) {}
}

/// Never resolves; only a stop ends the wait.
struct ForeverSleeper;

#[async_trait::async_trait(?Send)]
impl Sleeper for ForeverSleeper {
    async fn sleep(&self, _duration: Duration) {
        std::future::pending::<()>().await;
    }
}

fn memory_store() -> SessionStore {
    SessionStore::open(MemoryStorage::new(), "auth-storage", Authenticator::new())
}

fn signed_in_store() -> SessionStore {
    let store = memory_store();
    store.login(User::new("ops@example.com"), TokenPair::new("AT1", "RT1"));
    store
}

// =============================================================
// login / status
// =============================================================

#[tokio::test]
async fn login_signs_in_and_looks_up_user() {
    let api = ScriptedApi::default();
    let store = memory_store();
    let user = login(&api, &store, " ops@example.com ", "pw", false).await.unwrap();

    assert_eq!(user.email, "ops@example.com");
    assert_eq!(api.calls(), vec!["login:ops@example.com", "whoami:AT1"]);
    assert_eq!(status_line(&store.session()), "signed in as ops@example.com");
}

#[tokio::test]
async fn register_uses_register_endpoint() {
    let api = ScriptedApi::default();
    let store = memory_store();
    login(&api, &store, "new@example.com", "pw", true).await.unwrap();
    assert_eq!(api.calls()[0], "register:new@example.com");
    assert!(store.is_authenticated());
}

#[tokio::test]
async fn login_with_missing_password_never_calls_api() {
    let api = ScriptedApi::default();
    let store = memory_store();
    let err = login(&api, &store, "ops@example.com", "", false).await.unwrap_err();

    assert_eq!(err.to_string(), "Password is required");
    assert!(api.calls().is_empty());
}

#[tokio::test]
async fn rejected_login_leaves_session_signed_out() {
    let api = ScriptedApi::default();
    let store = memory_store();
    let err = login(&api, &store, "ops@example.com", "wrong", false).await.unwrap_err();

    assert!(err.to_string().contains("Invalid credentials"));
    assert_eq!(status_line(&store.session()), "signed out");
}

// =============================================================
// refresh
// =============================================================

#[tokio::test]
async fn refresh_once_rotates_tokens() {
    let store = signed_in_store();
    let api = ScriptedApi::with_refreshes(vec![Ok(TokenPair::new("AT2", "RT2"))]);
    let refresh = RefreshLoop::new(store.clone(), api, InstantSleeper);

    assert_eq!(refresh_once(&refresh).await.unwrap(), "tokens refreshed");
    assert_eq!(store.authenticator().access_token().as_deref(), Some("AT2"));
}

#[tokio::test]
async fn refresh_once_failure_signs_out() {
    let store = signed_in_store();
    let refresh = RefreshLoop::new(store.clone(), ScriptedApi::default(), InstantSleeper);

    let err = refresh_once(&refresh).await.unwrap_err();
    assert!(matches!(err, CliError::SessionExpired(_)));
    assert!(!store.is_authenticated());
}

#[tokio::test]
async fn refresh_once_without_session_is_an_error() {
    let api = ScriptedApi::default();
    let refresh = RefreshLoop::new(memory_store(), api.clone(), InstantSleeper);

    assert!(matches!(refresh_once(&refresh).await, Err(CliError::NotSignedIn)));
    assert!(api.calls().is_empty());
}

// =============================================================
// watch
// =============================================================

#[tokio::test]
async fn watch_runs_until_refresh_fails() {
    let store = signed_in_store();
    let api = ScriptedApi::with_refreshes(vec![Ok(TokenPair::new("AT2", "RT2")), Ok(TokenPair::new("AT3", "RT3"))]);
    let refresh = RefreshLoop::new(store.clone(), api.clone(), InstantSleeper);

    let exit = watch(refresh, std::future::pending()).await;

    assert!(matches!(exit, LoopExit::Expired(_)));
    assert_eq!(api.calls(), vec!["refresh:RT1", "refresh:RT2", "refresh:RT3"]);
    assert!(!store.is_authenticated());
    assert!(watch_result(exit).is_err());
}

#[tokio::test]
async fn watch_stops_on_shutdown_and_keeps_session() {
    let store = signed_in_store();
    let api = ScriptedApi::with_refreshes(vec![Ok(TokenPair::new("AT2", "RT2"))]);
    let refresh = RefreshLoop::new(store.clone(), api, ForeverSleeper);

    let exit = watch(refresh, async {}).await;

    assert_eq!(exit, LoopExit::Stopped);
    assert!(store.is_authenticated());
    assert!(watch_result(exit).is_ok());
}

#[test]
fn watch_without_session_reports_not_signed_in() {
    assert!(matches!(watch_result(LoopExit::Idle), Err(CliError::NotSignedIn)));
}
