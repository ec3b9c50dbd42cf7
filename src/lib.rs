pub mod api;
mod cli;
pub mod config;
pub mod dashboard;
pub mod forms;
pub mod manage;
pub mod models;
pub mod navigation;
pub mod notify;
pub mod patch;
pub mod session;
mod utils;

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use api::{ApiClient, ApiError};
use config::ClientConfig;
use dashboard::DashboardController;
use manage::ManageController;
use navigation::{Navigator, Route};
use notify::Notifier;
use session::{SessionContext, SessionStore};

const ENABLE_LOGS: bool = true;

/// Everything a shell needs to drive the client. The session context is
/// shared by both view controllers; nothing here is global.
pub struct AppState {
    pub config: ClientConfig,
    pub session: Arc<SessionContext>,
    pub manage: ManageController,
    pub dashboard: DashboardController,
    pub notifier: Notifier,
    pub navigator: Navigator,
}

impl AppState {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let api = ApiClient::new(&config)?;
        Self::with_api(config, api)
    }

    pub fn with_api(config: ClientConfig, api: ApiClient) -> Result<Self> {
        let store = SessionStore::new(config.session_path())?;
        let navigator = Navigator::new(Route::Login);
        let notifier = Notifier::new();
        let session = Arc::new(SessionContext::new(api, store, navigator.clone()));

        Ok(Self {
            manage: ManageController::new(session.clone(), notifier.clone()),
            dashboard: DashboardController::new(session.clone(), notifier.clone()),
            session,
            notifier,
            navigator,
            config,
        })
    }

    /// Restore a persisted session and land on the matching route.
    pub async fn bootstrap(&self) -> bool {
        let authenticated = self.session.bootstrap().await;
        self.navigator.go(if authenticated {
            Route::Dashboard
        } else {
            Route::Login
        });
        authenticated
    }

    /// Command-boundary handling for a direct façade call: unauthorized
    /// policy, one logged error and one fixed notification on failure.
    pub(crate) async fn report<T>(
        &self,
        result: Result<T, ApiError>,
        failure: &str,
    ) -> Result<T, String> {
        self.session.check(result).await.map_err(|err| {
            crate::log_error!("{failure} ({err})");
            self.notifier.error(failure);
            err.to_string()
        })
    }
}

pub fn run() -> Result<()> {
    let config = ClientConfig::from_env()?;

    // RUST_LOG still wins over the default level.
    env_logger::Builder::new()
        .filter_level(if config.debug {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        })
        .parse_default_env()
        .init();

    log::info!("labdesk starting up against {}", config.api_base_url);

    let args = cli::Cli::parse();

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?;

    runtime.block_on(async move {
        let state = AppState::new(config)?;
        cli::dispatch(&state, args.command).await
    })
}
