//! Sign-in form.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use super::heading;
use crate::context::AppContext;
use crate::net::error::ApiError;
use crate::net::types::{AuthResponse, LoginRequest};
use crate::query::hooks;
use crate::util::validation::{FormErrors, validate_email, validate_login_password};

#[derive(Debug, thiserror::Error)]
pub enum AuthFormError {
    #[error(transparent)]
    Invalid(#[from] FormErrors),
    #[error(transparent)]
    Api(#[from] ApiError),
}

#[derive(Clone, Debug, Default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    #[must_use]
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self { email: email.into(), password: password.into() }
    }

    pub fn to_request(&self) -> Result<LoginRequest, FormErrors> {
        let email = self.email.trim();
        FormErrors::check([validate_email(email), validate_login_password(&self.password)])?;
        Ok(LoginRequest { email: email.to_owned(), password: self.password.clone() })
    }

    /// Validate, sign in, and land on the dashboard.
    pub async fn submit(&self, ctx: &AppContext) -> Result<AuthResponse, AuthFormError> {
        let request = self.to_request()?;
        Ok(hooks::use_login(ctx, &request).await?)
    }
}

#[must_use]
pub fn render() -> String {
    let mut out = heading("Resonant", "AWS tag compliance");
    out.push_str("\nWelcome back\nSign in to your account to continue\n");
    out.push_str("\nDon't have an account? Run `resonant register`.\n");
    out
}
