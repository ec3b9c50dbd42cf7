use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf, sync::RwLock};

use crate::models::User;

/// What survives between runs: the bearer token and the user it belongs to.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PersistedSession {
    pub token: String,
    pub user: User,
    pub logged_in_at: DateTime<Utc>,
}

/// File-backed session record. A missing or unreadable file means "no
/// session"; clearing deletes the file.
pub struct SessionStore {
    path: PathBuf,
    data: RwLock<Option<PersistedSession>>,
}

impl SessionStore {
    pub fn new(path: PathBuf) -> Result<Self> {
        let data = if path.exists() {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read session from {}", path.display()))?;
            serde_json::from_str(&contents).ok()
        } else {
            None
        };

        Ok(Self {
            path,
            data: RwLock::new(data),
        })
    }

    pub fn load(&self) -> Option<PersistedSession> {
        match self.data.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn save(&self, token: &str, user: &User) -> Result<PersistedSession> {
        let record = PersistedSession {
            token: token.to_string(),
            user: user.clone(),
            logged_in_at: Utc::now(),
        };

        let mut guard = self
            .data
            .write()
            .map_err(|_| anyhow!("session store lock poisoned"))?;
        self.persist(&record)?;
        *guard = Some(record.clone());
        Ok(record)
    }

    pub fn clear(&self) -> Result<()> {
        let mut guard = self
            .data
            .write()
            .map_err(|_| anyhow!("session store lock poisoned"))?;
        *guard = None;
        if self.path.exists() {
            fs::remove_file(&self.path)
                .with_context(|| format!("Failed to remove session at {}", self.path.display()))?;
        }
        Ok(())
    }

    fn persist(&self, record: &PersistedSession) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("failed to create session directory {}", parent.display())
            })?;
        }
        let serialized = serde_json::to_string_pretty(record)?;
        fs::write(&self.path, serialized)
            .with_context(|| format!("Failed to write session to {}", self.path.display()))
    }
}
