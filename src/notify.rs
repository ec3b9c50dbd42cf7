use serde::Serialize;
use tokio::sync::broadcast;

const CHANNEL_CAPACITY: usize = 64;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum NotificationLevel {
    Success,
    Error,
}

/// One user-visible outcome of an action.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub level: NotificationLevel,
    pub title: String,
    pub description: String,
}

/// Fan-out of notifications to whoever presents them. Sending with no
/// subscriber is not an error; the notification is simply dropped.
#[derive(Clone)]
pub struct Notifier {
    tx: broadcast::Sender<Notification>,
}

impl Notifier {
    pub fn new() -> Self {
        let (tx, _rx) = broadcast::channel(CHANNEL_CAPACITY);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Notification> {
        self.tx.subscribe()
    }

    pub fn success(&self, title: &str, description: &str) {
        self.emit(NotificationLevel::Success, title, description);
    }

    pub fn error(&self, description: &str) {
        self.emit(NotificationLevel::Error, "Error", description);
    }

    fn emit(&self, level: NotificationLevel, title: &str, description: &str) {
        let _ = self.tx.send(Notification {
            level,
            title: title.to_string(),
            description: description.to_string(),
        });
    }
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new()
    }
}
