//! Authenticated identity for the lifetime of the client.
//!
//! [`SessionContext`] is created once by the shell and handed to every view
//! controller. It is also the one place that reacts to an expired token:
//! controllers pass façade results through [`SessionContext::check`], which
//! tears the session down and routes to login on [`ApiError::Unauthorized`].

pub mod commands;
pub mod store;

use serde::Serialize;
use tokio::sync::Mutex;

use crate::{
    api::{ApiClient, ApiError},
    log_error, log_info, log_warn,
    models::{LoginRequest, RegisterRequest, User},
    navigation::{Navigator, Route},
};

pub use store::{PersistedSession, SessionStore};

const ENABLE_LOGS: bool = true;

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SessionState {
    pub user: Option<User>,
    #[serde(skip)]
    pub token: Option<String>,
    pub loading: bool,
}

impl SessionState {
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some() && self.token.is_some()
    }
}

pub struct SessionContext {
    state: Mutex<SessionState>,
    store: SessionStore,
    api: ApiClient,
    navigator: Navigator,
}

impl SessionContext {
    pub fn new(api: ApiClient, store: SessionStore, navigator: Navigator) -> Self {
        Self {
            state: Mutex::new(SessionState::default()),
            store,
            api,
            navigator,
        }
    }

    /// Restore a persisted session if the backend still accepts its token.
    /// Returns whether a session is active afterwards.
    pub async fn bootstrap(&self) -> bool {
        let Some(persisted) = self.store.load() else {
            return false;
        };

        self.state.lock().await.loading = true;

        let validated = self.api.validate_token(&persisted.token).await;

        let mut state = self.state.lock().await;
        state.loading = false;
        match validated {
            Ok(echoed) => {
                let user = echoed.unwrap_or(persisted.user);
                log_info!("Restored session for {}", user.email);
                state.user = Some(user);
                state.token = Some(persisted.token);
                true
            }
            Err(err) => {
                log_warn!("Stored token rejected, clearing session: {err}");
                state.user = None;
                state.token = None;
                drop(state);
                self.clear_store();
                false
            }
        }
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<User, ApiError> {
        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let auth = self.check(self.api.login(&request).await).await?;

        if let Err(err) = self.store.save(&auth.token, &auth.user) {
            log_error!("Failed to persist session: {err:#}");
        }

        {
            let mut state = self.state.lock().await;
            state.user = Some(auth.user.clone());
            state.token = Some(auth.token);
            state.loading = false;
        }

        log_info!("Logged in as {}", auth.user.email);
        self.navigator.go(Route::Dashboard);
        Ok(auth.user)
    }

    /// Create an account. The caller still has to log in.
    pub async fn register(&self, name: &str, email: &str, password: &str) -> Result<User, ApiError> {
        let request = RegisterRequest {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        };
        self.check(self.api.register(&request).await).await
    }

    pub async fn logout(&self) {
        self.teardown().await;
        log_info!("Logged out");
    }

    pub async fn snapshot(&self) -> SessionState {
        self.state.lock().await.clone()
    }

    pub async fn token(&self) -> Option<String> {
        self.state.lock().await.token.clone()
    }

    pub async fn user(&self) -> Option<User> {
        self.state.lock().await.user.clone()
    }

    pub async fn is_authenticated(&self) -> bool {
        self.state.lock().await.is_authenticated()
    }

    /// Token for the next façade call. Without a session the view is sent to
    /// login and no request is made.
    pub async fn require_token(&self) -> Result<String, ApiError> {
        match self.token().await {
            Some(token) => Ok(token),
            None => {
                self.navigator.go(Route::Login);
                Err(ApiError::Unauthorized)
            }
        }
    }

    /// Pass a façade result through the unauthorized policy. Applies to auth
    /// calls too: a 401 from login still drops whatever session was stored.
    pub async fn check<T>(&self, result: Result<T, ApiError>) -> Result<T, ApiError> {
        if let Err(ApiError::Unauthorized) = &result {
            log_warn!("Backend rejected the session token; signing out");
            self.teardown().await;
        }
        result
    }

    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    async fn teardown(&self) {
        {
            let mut state = self.state.lock().await;
            state.user = None;
            state.token = None;
            state.loading = false;
        }
        self.clear_store();
        self.navigator.go(Route::Login);
    }

    fn clear_store(&self) {
        if let Err(err) = self.store.clear() {
            log_error!("Failed to clear persisted session: {err:#}");
        }
    }
}
