//! Error taxonomy for REST calls.
//!
//! ERROR HANDLING
//! ==============
//! Services never retry and never translate errors. The only rewrites happen
//! in the HTTP wrapper: a 401 on an authenticated call becomes
//! [`ApiError::Unauthorized`] after local auth state is cleared, and the
//! latest-scan lookup turns a 404 into an absent value.

use reqwest::StatusCode;

/// Fallback text shown when a failed call carries no backend message.
pub const GENERIC_ERROR_MESSAGE: &str = "An error occurred. Please try again.";

/// Errors produced by the HTTP client wrapper and the domain services.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request never produced a response (connect, timeout, TLS).
    #[error("request failed: {0}")]
    Transport(String),

    /// The backend answered with a non-success status.
    #[error("request failed with status {status}{}", .message.as_deref().map(|m| format!(": {m}")).unwrap_or_default())]
    Status { status: u16, message: Option<String> },

    /// A protected call was rejected; local auth state has been cleared.
    #[error("session expired or invalid; please log in again")]
    Unauthorized,

    /// The response body did not match the expected shape.
    #[error("response decode failed: {0}")]
    Decode(String),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
}

impl ApiError {
    /// HTTP status carried by the error, if the backend answered at all.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Unauthorized => Some(StatusCode::UNAUTHORIZED.as_u16()),
            Self::Transport(_) | Self::Decode(_) | Self::HttpClientBuild(_) => None,
        }
    }

    /// The backend-supplied `message`, when one was present in the body.
    #[must_use]
    pub fn backend_message(&self) -> Option<&str> {
        match self {
            Self::Status { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(StatusCode::NOT_FOUND.as_u16())
    }

    /// A 4xx answer (including [`ApiError::Unauthorized`]) that repeating
    /// the same request will not change. 408 and 429 are excluded.
    #[must_use]
    pub fn is_permanent_client_error(&self) -> bool {
        self.status().is_some_and(|s| (400..500).contains(&s) && s != 408 && s != 429)
    }

    /// Best-effort user-facing text: backend message, else `fallback`.
    #[must_use]
    pub fn user_message<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.backend_message().unwrap_or(fallback)
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_decode() {
            Self::Decode(error.to_string())
        } else {
            Self::Transport(error.to_string())
        }
    }
}

/// Pull the `message` field out of an error body, if it is JSON.
pub(crate) fn extract_backend_message(body: &str) -> Option<String> {
    let Ok(value) = serde_json::from_str::<serde_json::Value>(body) else {
        return None;
    };
    value
        .get("message")
        .and_then(serde_json::Value::as_str)
        .filter(|message| !message.trim().is_empty())
        .map(ToOwned::to_owned)
}

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;
