//! Outbound HTTP façade for the laboratory backend.
//!
//! Every backend call goes through [`ApiClient::execute`], which owns the
//! header policy and the status-to-error mapping. Resource operations live in
//! the sibling files as `impl ApiClient` blocks. The façade has no side
//! effects beyond the request: a 401 comes back as [`ApiError::Unauthorized`]
//! and the session layer decides what to do with it.

mod auth;
mod bookings;
mod error;
mod labs;
mod rooms;

use anyhow::{Context, Result};
use reqwest::{header::CONTENT_TYPE, Method, RequestBuilder, StatusCode};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::config::ClientConfig;
use crate::log_debug;

pub use error::{ApiError, FALLBACK_MESSAGE};

const ENABLE_LOGS: bool = true;

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().context("failed to build HTTP client")?;
        Ok(Self::with_client(http, &config.api_base_url))
    }

    pub fn with_client(http: reqwest::Client, base_url: &str) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, endpoint: &str, token: Option<&str>) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, endpoint);
        log_debug!("{method} {url}");

        let builder = self
            .http
            .request(method, url)
            .header(CONTENT_TYPE, "application/json");
        match token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    fn with_body<B: Serialize + ?Sized>(builder: RequestBuilder, body: &B) -> RequestBuilder {
        builder.json(body)
    }

    async fn execute<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, ApiError> {
        let response = builder.send().await?;
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED {
            return Err(ApiError::Unauthorized);
        }

        let bytes = response.bytes().await?;

        if !status.is_success() {
            let message = serde_json::from_slice::<ErrorBody>(&bytes)
                .ok()
                .and_then(|body| body.message)
                .filter(|message| !message.trim().is_empty());
            return Err(ApiError::RequestFailed {
                status: status.as_u16(),
                message,
            });
        }

        // Some endpoints answer 2xx with no body at all.
        let payload: &[u8] = if bytes.iter().all(u8::is_ascii_whitespace) {
            b"null"
        } else {
            &bytes
        };
        serde_json::from_slice(payload).map_err(|err| ApiError::InvalidResponse(err.to_string()))
    }
}
