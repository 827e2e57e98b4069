//! Local form validation.
//!
//! Forms validate before any network call; a failure never reaches the
//! backend.

#[cfg(test)]
#[path = "validation_test.rs"]
mod validation_test;

use std::sync::LazyLock;

use regex::Regex;

// ASCII only; AWS ids and ARNs never carry non-Latin digits or letters.
pub const ACCOUNT_ID_PATTERN: &str = r"^[0-9]{12}$";
pub const ROLE_ARN_PATTERN: &str = r"^arn:aws:iam::[0-9]{12}:role/[A-Za-z0-9_+=,.@\-]+$";
pub const TAG_KEY_PATTERN: &str = r"^[A-Za-z0-9_[:space:]\-:./]+$";

type Compiled = LazyLock<Result<Regex, regex::Error>>;

static ACCOUNT_ID: Compiled = LazyLock::new(|| Regex::new(ACCOUNT_ID_PATTERN));
static ROLE_ARN: Compiled = LazyLock::new(|| Regex::new(ROLE_ARN_PATTERN));
static TAG_KEY: Compiled = LazyLock::new(|| Regex::new(TAG_KEY_PATTERN));

pub const MAX_ALIAS_LEN: usize = 100;
pub const MAX_NAME_LEN: usize = 100;
pub const MAX_DESCRIPTION_LEN: usize = 500;
pub const MIN_PASSWORD_LEN: usize = 8;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    #[must_use]
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self { field, message: message.into() }
    }
}

/// Every failed check of one form submission, in field order.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{}", join_errors(.0))]
pub struct FormErrors(pub Vec<ValidationError>);

impl FormErrors {
    /// `Ok` when every check passed.
    pub fn check(results: impl IntoIterator<Item = Result<(), ValidationError>>) -> Result<(), Self> {
        let errors: Vec<ValidationError> = results.into_iter().filter_map(Result::err).collect();
        if errors.is_empty() { Ok(()) } else { Err(Self(errors)) }
    }

    #[must_use]
    pub fn field(&self, field: &str) -> Option<&ValidationError> {
        self.0.iter().find(|e| e.field == field)
    }
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors.iter().map(ToString::to_string).collect::<Vec<_>>().join("; ")
}

fn require_match(field: &'static str, pattern: &Compiled, value: &str, message: &str) -> Result<(), ValidationError> {
    let re = pattern.as_ref().map_err(|e| ValidationError::new(field, format!("invalid pattern: {e}")))?;
    if re.is_match(value) { Ok(()) } else { Err(ValidationError::new(field, message)) }
}

fn require_len(
    field: &'static str,
    value: &str,
    max: usize,
    empty_message: &str,
    long_message: &str,
) -> Result<(), ValidationError> {
    let len = value.chars().count();
    if len == 0 {
        return Err(ValidationError::new(field, empty_message));
    }
    if len > max {
        return Err(ValidationError::new(field, long_message));
    }
    Ok(())
}

// =============================================================================
// ACCOUNTS
// =============================================================================

pub fn validate_account_id(account_id: &str) -> Result<(), ValidationError> {
    require_match("accountId", &ACCOUNT_ID, account_id, "AWS Account ID must be 12 digits")
}

pub fn validate_alias(alias: &str) -> Result<(), ValidationError> {
    require_len(
        "accountAlias",
        alias,
        MAX_ALIAS_LEN,
        "Account alias is required",
        "Alias must be less than 100 characters",
    )
}

pub fn validate_role_arn(role_arn: &str) -> Result<(), ValidationError> {
    require_match("roleArn", &ROLE_ARN, role_arn, "Invalid IAM Role ARN format")
}

// =============================================================================
// AUTH
// =============================================================================

/// Shape check only: one `@`, non-empty local part, dotted domain.
pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.split('.').count() >= 2
                && domain.split('.').all(|part| !part.is_empty())
                && !email.chars().any(char::is_whitespace)
        }
        None => false,
    };
    if valid { Ok(()) } else { Err(ValidationError::new("email", "Invalid email address")) }
}

pub fn validate_login_password(password: &str) -> Result<(), ValidationError> {
    if password.is_empty() {
        return Err(ValidationError::new("password", "Password is required"));
    }
    Ok(())
}

pub fn validate_full_name(name: &str) -> Result<(), ValidationError> {
    require_len("name", name, MAX_NAME_LEN, "Full name is required", "Name must be less than 100 characters")
}

/// At least 8 characters with upper, lower, and a digit.
pub fn validate_new_password(password: &str) -> Result<(), ValidationError> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ValidationError::new("password", "Password must be at least 8 characters"));
    }
    let upper = password.chars().any(char::is_uppercase);
    let lower = password.chars().any(char::is_lowercase);
    let digit = password.chars().any(|c| c.is_ascii_digit());
    if !(upper && lower && digit) {
        return Err(ValidationError::new("password", "Password must contain uppercase, lowercase, and number"));
    }
    Ok(())
}

pub fn validate_password_confirmation(password: &str, confirmation: &str) -> Result<(), ValidationError> {
    if password == confirmation {
        Ok(())
    } else {
        Err(ValidationError::new("confirmPassword", "Passwords do not match"))
    }
}

// =============================================================================
// TAG POLICIES
// =============================================================================

pub fn validate_policy_name(name: &str) -> Result<(), ValidationError> {
    require_len("name", name, MAX_NAME_LEN, "Policy name is required", "Name must be less than 100 characters")
}

pub fn validate_description(description: &str) -> Result<(), ValidationError> {
    if description.chars().count() > MAX_DESCRIPTION_LEN {
        return Err(ValidationError::new("description", "Description must be less than 500 characters"));
    }
    Ok(())
}

pub fn validate_resource_types(resource_types: &[String]) -> Result<(), ValidationError> {
    if resource_types.is_empty() {
        return Err(ValidationError::new("resourceTypes", "Select at least one resource type"));
    }
    Ok(())
}

pub fn validate_tag_key(key: &str) -> Result<(), ValidationError> {
    if key.is_empty() {
        return Err(ValidationError::new("requiredTags", "Tag key is required"));
    }
    require_match("requiredTags", &TAG_KEY, key, "Invalid tag key format")
}
