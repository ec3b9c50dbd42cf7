use serde::{Deserialize, Serialize};
use tokio::sync::watch;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum Route {
    Login,
    Dashboard,
    Manage,
}

impl Default for Route {
    fn default() -> Self {
        Route::Login
    }
}

/// Current route of the shell. Views read it; the session context moves it
/// to [`Route::Login`] when the session ends.
#[derive(Clone)]
pub struct Navigator {
    tx: watch::Sender<Route>,
}

impl Navigator {
    pub fn new(initial: Route) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self { tx }
    }

    pub fn current(&self) -> Route {
        *self.tx.borrow()
    }

    pub fn go(&self, route: Route) {
        self.tx.send_replace(route);
    }

    pub fn subscribe(&self) -> watch::Receiver<Route> {
        self.tx.subscribe()
    }
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new(Route::default())
    }
}
