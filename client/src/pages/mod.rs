//! Route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page composes query hooks and components into one text block. A
//! page fails only on errors that end the session; other failed sections
//! degrade to their empty or "failed to load" state.

pub mod aws_account_detail;
pub mod aws_account_settings;
pub mod aws_accounts;
pub mod dashboard;
pub mod login;
pub mod register;
pub mod settings;
pub mod tag_policies;

use tracing::warn;

use crate::net::error::ApiError;

/// Keep a section's value, or drop it with a warning unless the session
/// ended.
pub(crate) fn optional_section<T>(section: &str, result: Result<T, ApiError>) -> Result<Option<T>, ApiError> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(ApiError::Unauthorized) => Err(ApiError::Unauthorized),
        Err(e) => {
            warn!(section, error = %e, "page: section unavailable");
            Ok(None)
        }
    }
}

pub(crate) fn heading(title: &str, subtitle: &str) -> String {
    format!("{title}\n{}\n{subtitle}\n", "=".repeat(title.chars().count()))
}
