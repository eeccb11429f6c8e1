mod commands;
mod http;
mod storage;


use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use session::config::{API_BASE_URL_VAR, REFRESH_INTERVAL_VAR, STORAGE_KEY_VAR};
use session::{ApiError, Authenticator, ConsoleConfig, RefreshLoop, SessionStore, SignInError};
use tracing::info;

use crate::commands::TokioSleeper;
use crate::http::ReqwestAuthApi;
use crate::storage::FileStorage;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    SignIn(#[from] SignInError),
    #[error("no saved session; run `backpack-cli login` first")]
    NotSignedIn,
    #[error("refresh failed, session signed out: {0}")]
    SessionExpired(ApiError),
}

#[derive(Parser, Debug)]
#[command(name = "backpack-cli", about = "Backpack console session CLI")]
struct Cli {
    #[arg(long, env = API_BASE_URL_VAR, default_value = "http://127.0.0.1:8000")]
    base_url: String,

    /// Seconds between refreshes in `watch`; invalid values use the default.
    #[arg(long, env = REFRESH_INTERVAL_VAR)]
    refresh_interval_secs: Option<String>,

    #[arg(long, env = STORAGE_KEY_VAR)]
    storage_key: Option<String>,

    #[arg(long, env = "CONSOLE_SESSION_FILE", default_value = ".backpack-session.json")]
    session_file: PathBuf,

    #[command(subcommand)]
    command: Command,
}

impl Cli {
    fn config(&self) -> ConsoleConfig {
        ConsoleConfig::default()
            .with_api_base_url(Some(&self.base_url))
            .with_refresh_interval_secs(self.refresh_interval_secs.as_deref())
            .with_storage_key(self.storage_key.as_deref())
    }
}

#[derive(Args, Debug)]
struct CredentialArgs {
    #[arg(long)]
    email: String,

    #[arg(long, env = "CONSOLE_PASSWORD", hide_env_values = true)]
    password: String,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Sign in and save the session.
    Login(CredentialArgs),
    /// Create an account, then sign in with it.
    Register(CredentialArgs),
    /// Clear the saved session.
    Logout,
    /// Show who is signed in.
    Status,
    /// Refresh the saved tokens once.
    Refresh,
    /// Keep the session alive until it ends or Ctrl-C.
    Watch,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let config = cli.config();
    let store = SessionStore::open(FileStorage::new(&cli.session_file), config.storage_key.clone(), Authenticator::new());
    let api = ReqwestAuthApi::new(config.api_base_url.clone());

    match cli.command {
        Command::Login(args) => {
            let user = commands::login(&api, &store, &args.email, &args.password, false).await?;
            println!("signed in as {}", user.email);
        }
        Command::Register(args) => {
            let user = commands::login(&api, &store, &args.email, &args.password, true).await?;
            println!("registered and signed in as {}", user.email);
        }
        Command::Logout => {
            store.logout();
            println!("signed out");
        }
        Command::Status => println!("{}", commands::status_line(&store.session())),
        Command::Refresh => {
            let refresh = RefreshLoop::new(store, api, TokioSleeper);
            println!("{}", commands::refresh_once(&refresh).await?);
        }
        Command::Watch => {
            let refresh = RefreshLoop::new(store, api, TokioSleeper).with_interval(config.refresh_interval);
            let shutdown = async {
                if let Err(e) = tokio::signal::ctrl_c().await {
                    tracing::warn!("ctrl-c handler unavailable: {e}");
                    std::future::pending::<()>().await;
                }
            };
            let exit = commands::watch(refresh, shutdown).await;
            info!(?exit, "watch finished");
            commands::watch_result(exit)?;
        }
    }
    Ok(())
}
