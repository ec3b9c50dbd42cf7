use anyhow::{Context, Result};
use std::{path::PathBuf, time::Duration};

/// Production backend used when `LABDESK_API_URL` is not set.
pub const DEFAULT_API_BASE_URL: &str =
    "https://cadlab-api-c7dbcre5czgvbzcj.brazilsouth-01.azurewebsites.net";

const SESSION_FILE_NAME: &str = "session.json";

// Client configuration sourced from environment variables.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    // Backend base URL, without a trailing slash.
    pub api_base_url: String,
    // Directory holding the persisted session.
    pub data_dir: PathBuf,
    // Per-request timeout. `None` keeps the transport default.
    pub request_timeout: Option<Duration>,
    // Verbose logging.
    pub debug: bool,
}

impl ClientConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_base_url = lookup("LABDESK_API_URL")
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string())
            .trim()
            .trim_end_matches('/')
            .to_string();

        let data_dir = match lookup("LABDESK_DATA_DIR").filter(|value| !value.is_empty()) {
            Some(dir) => PathBuf::from(dir),
            None => lookup("HOME")
                .map(|home| PathBuf::from(home).join(".labdesk"))
                .unwrap_or_else(|| PathBuf::from(".labdesk")),
        };

        let request_timeout = lookup("LABDESK_REQUEST_TIMEOUT_MS")
            .map(|value| {
                value
                    .trim()
                    .parse::<u64>()
                    .with_context(|| format!("invalid LABDESK_REQUEST_TIMEOUT_MS '{value}'"))
            })
            .transpose()?
            .map(Duration::from_millis);

        let debug = lookup("LABDESK_DEBUG")
            .map(|value| value == "1" || value.eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        Ok(Self {
            api_base_url,
            data_dir,
            request_timeout,
            debug,
        })
    }

    pub fn session_path(&self) -> PathBuf {
        self.data_dir.join(SESSION_FILE_NAME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<ClientConfig> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ClientConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = config_from(&[("HOME", "/home/ana")]).unwrap();
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(config.data_dir, PathBuf::from("/home/ana/.labdesk"));
        assert_eq!(config.request_timeout, None);
        assert!(!config.debug);
        assert_eq!(
            config.session_path(),
            PathBuf::from("/home/ana/.labdesk/session.json")
        );
    }

    #[test]
    fn overrides_are_read_and_base_url_trimmed() {
        let config = config_from(&[
            ("LABDESK_API_URL", "http://localhost:8080/"),
            ("LABDESK_DATA_DIR", "/tmp/labdesk"),
            ("LABDESK_REQUEST_TIMEOUT_MS", "2500"),
            ("LABDESK_DEBUG", "true"),
        ])
        .unwrap();
        assert_eq!(config.api_base_url, "http://localhost:8080");
        assert_eq!(config.data_dir, PathBuf::from("/tmp/labdesk"));
        assert_eq!(config.request_timeout, Some(Duration::from_millis(2500)));
        assert!(config.debug);
    }

    #[test]
    fn invalid_timeout_is_rejected() {
        let err = config_from(&[("LABDESK_REQUEST_TIMEOUT_MS", "soon")]).unwrap_err();
        assert!(err.to_string().contains("LABDESK_REQUEST_TIMEOUT_MS"));
    }

    #[test]
    fn missing_home_falls_back_to_working_directory() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.data_dir, PathBuf::from(".labdesk"));
    }
}
