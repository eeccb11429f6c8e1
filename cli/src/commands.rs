//! Session operations behind the CLI subcommands.
//!
//! Operations are generic over the transport and timer so tests drive them
//! with scripted mocks instead of a server.

#[cfg(test)]
#[path = "commands_test.rs"]
mod commands_test;

use std::future::Future;
use std::time::Duration;

use session::{AuthApi, LoopExit, RefreshLoop, Session, SessionStore, Sleeper, Tick, User, sign_in, sign_up};
use tracing::info;

use crate::CliError;

/// [`Sleeper`] backed by the tokio timer.
#[derive(Clone, Copy, Debug, Default)]
pub struct TokioSleeper;

#[async_trait::async_trait(?Send)]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Sign in (or register first) and persist the resulting session.
pub async fn login<A: AuthApi>(
    api: &A,
    store: &SessionStore,
    email: &str,
    password: &str,
    register: bool,
) -> Result<User, CliError> {
    let credentials = session::validate_credentials(email, password)?;
    let user = if register {
        sign_up(api, store, &credentials).await?
    } else {
        sign_in(api, store, &credentials).await?
    };
    Ok(user)
}

/// One-line summary of the saved session.
pub fn status_line(session: &Session) -> String {
    match session.user() {
        Some(user) if session.is_authenticated() => format!("signed in as {}", user.email),
        _ => "signed out".to_owned(),
    }
}

/// Perform a single refresh attempt; a failure signs the session out.
pub async fn refresh_once<A: AuthApi, S: Sleeper>(refresh: &RefreshLoop<A, S>) -> Result<&'static str, CliError> {
    match refresh.tick().await {
        Tick::Idle => Err(CliError::NotSignedIn),
        Tick::Refreshed => Ok("tokens refreshed"),
        Tick::Stale => Ok("session changed during refresh; result discarded"),
        Tick::Expired(e) => Err(CliError::SessionExpired(e)),
    }
}

/// Run the refresh loop until the session ends or `shutdown` resolves.
///
/// On shutdown the loop is stopped and awaited, so a refresh already in
/// flight still lands in the store before the process exits.
pub async fn watch<A, S, F>(refresh: RefreshLoop<A, S>, shutdown: F) -> LoopExit
where
    A: AuthApi,
    S: Sleeper,
    F: Future<Output = ()>,
{
    let (task, handle) = refresh.start();
    tokio::pin!(task);
    tokio::select! {
        exit = &mut task => exit,
        () = shutdown => {
            info!("shutdown requested, stopping refresh loop");
            handle.stop();
            task.await
        }
    }
}

/// Map a finished watch to the process result.
pub fn watch_result(exit: LoopExit) -> Result<(), CliError> {
    match exit {
        LoopExit::Idle => Err(CliError::NotSignedIn),
        LoopExit::Expired(e) => Err(CliError::SessionExpired(e)),
        LoopExit::SessionEnded | LoopExit::Stopped => Ok(()),
    }
}
