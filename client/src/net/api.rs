//! HTTP client wrapper shared by every domain service.
//!
//! DESIGN
//! ======
//! One `reqwest::Client` per process, built with the configured timeouts.
//! Every request is `<base_url><path>` with a JSON body where one applies.
//! The bearer token is read from [`AuthStore`] per request so a login or
//! logout takes effect on the next call without rebuilding the client.
//!
//! ERROR HANDLING
//! ==============
//! - Non-2xx answers become [`ApiError::Status`] carrying the backend's
//!   `message` field when the body has one.
//! - A 401 on a call other than login/register, while a token is held,
//!   clears auth state, navigates to `/login`, and returns
//!   [`ApiError::Unauthorized`]. Login/register 401s are ordinary status
//!   errors so the form can show "invalid credentials".
//! - Nothing is retried.

use std::sync::Arc;
use std::time::Duration;

use reqwest::{Method, RequestBuilder, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::error::{ApiError, extract_backend_message};
use crate::config::ClientConfig;
use crate::state::auth::AuthStore;
use crate::state::router::{Route, Router};

/// Paths that never carry a bearer token and never force a logout.
const PUBLIC_PATHS: [&str; 2] = ["/auth/login", "/auth/register"];

/// True for the unauthenticated auth endpoints.
#[must_use]
pub fn is_public_path(path: &str) -> bool {
    PUBLIC_PATHS.iter().any(|public| path.contains(public))
}

#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    auth: Arc<AuthStore>,
    router: Arc<Router>,
}

impl ApiClient {
    pub fn new(config: &ClientConfig, auth: Arc<AuthStore>, router: Arc<Router>) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeouts.request_secs))
            .connect_timeout(Duration::from_secs(config.timeouts.connect_secs))
            .build()
            .map_err(|e| ApiError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, base_url: config.api_url.trim_end_matches('/').to_owned(), auth, router })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let text = self.execute(path, self.request(Method::GET, path)).await?;
        decode(&text)
    }

    /// GET with query parameters; `None` values are omitted.
    pub async fn get_with_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, Option<String>)],
    ) -> Result<T, ApiError> {
        let params: Vec<(&str, &str)> =
            query.iter().filter_map(|(k, v)| v.as_deref().map(|v| (*k, v))).collect();
        let mut builder = self.request(Method::GET, path);
        if !params.is_empty() {
            builder = builder.query(&params);
        }
        let text = self.execute(path, builder).await?;
        decode(&text)
    }

    pub async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let text = self.execute(path, self.request(Method::POST, path).json(body)).await?;
        decode(&text)
    }

    /// POST without a request body (action endpoints such as `/ignore`).
    pub async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let text = self.execute(path, self.request(Method::POST, path)).await?;
        decode(&text)
    }

    pub async fn put_json<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let text = self.execute(path, self.request(Method::PUT, path).json(body)).await?;
        decode(&text)
    }

    pub async fn patch_json<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let text = self.execute(path, self.request(Method::PATCH, path).json(body)).await?;
        decode(&text)
    }

    /// DELETE; any response body is discarded.
    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        self.execute(path, self.request(Method::DELETE, path)).await?;
        Ok(())
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        debug!(%method, path, "api: request");
        let builder = self.http.request(method, url);
        match self.auth.token() {
            Some(token) if !is_public_path(path) => builder.bearer_auth(token),
            _ => builder,
        }
    }

    async fn execute(&self, path: &str, builder: RequestBuilder) -> Result<String, ApiError> {
        let response = builder.send().await?;
        let status = response.status();
        let text = response.text().await?;
        debug!(path, status = status.as_u16(), bytes = text.len(), "api: response");

        if status == StatusCode::UNAUTHORIZED {
            return Err(self.on_unauthorized(path, &text));
        }
        if !status.is_success() {
            return Err(ApiError::Status { status: status.as_u16(), message: extract_backend_message(&text) });
        }
        Ok(text)
    }

    fn on_unauthorized(&self, path: &str, body: &str) -> ApiError {
        if is_public_path(path) || self.auth.token().is_none() {
            return ApiError::Status {
                status: StatusCode::UNAUTHORIZED.as_u16(),
                message: extract_backend_message(body),
            };
        }

        warn!(path, "api: 401 on authenticated call; clearing session");
        if let Err(e) = self.auth.clear_auth() {
            warn!(error = %e, "api: failed to clear persisted auth");
        }
        self.router.navigate(Route::Login);
        ApiError::Unauthorized
    }
}

/// Decode a JSON body. An empty body decodes as JSON `null` so unit-like
/// responses (`()`, `Option<T>`) succeed on 204.
fn decode<T: DeserializeOwned>(text: &str) -> Result<T, ApiError> {
    let text = if text.trim().is_empty() { "null" } else { text };
    serde_json::from_str(text).map_err(|e| ApiError::Decode(e.to_string()))
}

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;
