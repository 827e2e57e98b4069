//! `/auth` endpoints.

use crate::net::api::ApiClient;
use crate::net::error::ApiError;
use crate::net::types::{AuthResponse, LoginRequest, RegisterRequest, User};

#[derive(Clone)]
pub struct AuthService {
    api: ApiClient,
}

impl AuthService {
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// `POST /auth/login`. Sent without a bearer token.
    pub async fn login(&self, request: &LoginRequest) -> Result<AuthResponse, ApiError> {
        self.api.post_json("/auth/login", request).await
    }

    /// `POST /auth/register`. Sent without a bearer token.
    pub async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse, ApiError> {
        self.api.post_json("/auth/register", request).await
    }

    pub async fn current_user(&self) -> Result<User, ApiError> {
        self.api.get("/auth/me").await
    }
}
