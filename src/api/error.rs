use thiserror::Error;

/// Display text for a failed request when the backend gives no message.
pub const FALLBACK_MESSAGE: &str = "API request failed";

#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP 401. The session holding the token is no longer usable.
    #[error("token expired or invalid")]
    Unauthorized,

    /// Any other non-2xx status.
    #[error("{}", .message.as_deref().unwrap_or(FALLBACK_MESSAGE))]
    RequestFailed { status: u16, message: Option<String> },

    /// The request never produced a response.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// A 2xx response whose body does not decode into the expected type.
    #[error("invalid response body: {0}")]
    InvalidResponse(String),
}

impl ApiError {
    pub fn request_failed<T: Into<String>>(status: u16, message: Option<T>) -> Self {
        ApiError::RequestFailed {
            status,
            message: message.map(Into::into),
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized)
    }

    /// Status code when the backend answered, `None` for transport failures.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Unauthorized => Some(401),
            ApiError::RequestFailed { status, .. } => Some(*status),
            ApiError::Transport(err) => err.status().map(|s| s.as_u16()),
            ApiError::InvalidResponse(_) => None,
        }
    }
}
