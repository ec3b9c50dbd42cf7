use reqwest::Method;
use serde_json::Value;

use super::{ApiClient, ApiError};
use crate::models::{AuthResponse, LoginRequest, RegisterRequest, User};

impl ApiClient {
    /// Create an account. Does not start a session.
    pub async fn register(&self, request: &RegisterRequest) -> Result<User, ApiError> {
        let builder = Self::with_body(self.request(Method::POST, "/auth/register", None), request);
        self.execute(builder).await
    }

    pub async fn login(&self, request: &LoginRequest) -> Result<AuthResponse, ApiError> {
        let builder = Self::with_body(self.request(Method::POST, "/auth/login", None), request);
        self.execute(builder).await
    }

    /// Returns the user echoed by the backend, if any.
    pub async fn validate_token(&self, token: &str) -> Result<Option<User>, ApiError> {
        let builder = self.request(Method::POST, "/auth/validate-token", Some(token));
        let body: Value = self.execute(builder).await?;
        Ok(body
            .get("user")
            .cloned()
            .and_then(|user| serde_json::from_value(user).ok()))
    }
}
