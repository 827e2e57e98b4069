//! Account registration form.

#[cfg(test)]
#[path = "register_test.rs"]
mod register_test;

use super::heading;
use super::login::AuthFormError;
use crate::context::AppContext;
use crate::net::types::{AuthResponse, RegisterRequest};
use crate::query::hooks;
use crate::util::validation::{
    FormErrors, validate_email, validate_full_name, validate_new_password, validate_password_confirmation,
};

#[derive(Clone, Debug, Default)]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl RegisterForm {
    pub fn to_request(&self) -> Result<RegisterRequest, FormErrors> {
        let name = self.name.trim();
        let email = self.email.trim();
        FormErrors::check([
            validate_full_name(name),
            validate_email(email),
            validate_new_password(&self.password),
            validate_password_confirmation(&self.password, &self.confirm_password),
        ])?;
        Ok(RegisterRequest { email: email.to_owned(), name: name.to_owned(), password: self.password.clone() })
    }

    /// Validate, create the account, and land on the dashboard.
    pub async fn submit(&self, ctx: &AppContext) -> Result<AuthResponse, AuthFormError> {
        let request = self.to_request()?;
        Ok(hooks::use_register(ctx, &request).await?)
    }
}

#[must_use]
pub fn render() -> String {
    let mut out = heading("Resonant", "AWS tag compliance");
    out.push_str("\nCreate your account\nGet started with AWS tag compliance\n");
    out.push_str("\nAlready have an account? Run `resonant login`.\n");
    out
}
