//! Auth-session state for the current user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Used by the HTTP wrapper (bearer token, forced logout on 401), route
//! guards, and user-aware pages. Restored from [`Storage`] on construction.
//!
//! ERROR HANDLING
//! ==============
//! A `user` entry that fails to decode is dropped and removed from storage.
//! Storage write failures are returned to the caller; in-memory state is
//! updated first so the running session stays consistent.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::warn;

use crate::net::types::User;
use crate::util::storage::{Storage, StorageError, save_json};

pub const TOKEN_KEY: &str = "token";
pub const USER_KEY: &str = "user";

/// Snapshot of the authenticated session.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AuthState {
    pub user: Option<User>,
    pub token: Option<String>,
    pub is_authenticated: bool,
}

impl AuthState {
    fn from_parts(user: Option<User>, token: Option<String>) -> Self {
        let is_authenticated = user.is_some() && token.is_some();
        Self { user, token, is_authenticated }
    }
}

pub struct AuthStore {
    storage: Arc<dyn Storage>,
    state: Mutex<AuthState>,
}

impl AuthStore {
    /// Restore persisted auth state and run the one-time validation pass.
    pub fn restore(storage: Arc<dyn Storage>) -> Result<Self, StorageError> {
        let token = storage.get(TOKEN_KEY)?.filter(|t| !t.is_empty());
        let user = match storage.get(USER_KEY)? {
            Some(raw) => match serde_json::from_str::<User>(&raw) {
                Ok(user) => Some(user),
                Err(e) => {
                    warn!(error = %e, "auth: dropping unreadable stored user");
                    storage.remove(USER_KEY)?;
                    None
                }
            },
            None => None,
        };

        let store = Self { storage, state: Mutex::new(AuthState::from_parts(user, token)) };
        store.validate()?;
        Ok(store)
    }

    /// A stored user without a token is a half-written session; clear it.
    pub fn validate(&self) -> Result<(), StorageError> {
        let partial = {
            let state = self.lock();
            state.user.is_some() && state.token.is_none()
        };
        if partial {
            warn!("auth: stored user has no token; clearing session");
            self.clear_auth()?;
        }
        Ok(())
    }

    #[must_use]
    pub fn snapshot(&self) -> AuthState {
        self.lock().clone()
    }

    #[must_use]
    pub fn token(&self) -> Option<String> {
        self.lock().token.clone()
    }

    #[must_use]
    pub fn user(&self) -> Option<User> {
        self.lock().user.clone()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.lock().is_authenticated
    }

    pub fn set_auth(&self, user: User, token: String) -> Result<(), StorageError> {
        *self.lock() = AuthState::from_parts(Some(user.clone()), Some(token.clone()));
        self.storage.set(TOKEN_KEY, &token)?;
        save_json(self.storage.as_ref(), USER_KEY, &user)
    }

    pub fn clear_auth(&self) -> Result<(), StorageError> {
        *self.lock() = AuthState::default();
        self.storage.remove(TOKEN_KEY)?;
        self.storage.remove(USER_KEY)
    }

    pub fn update_user(&self, user: User) -> Result<(), StorageError> {
        {
            let mut state = self.lock();
            state.user = Some(user.clone());
            state.is_authenticated = state.token.is_some();
        }
        save_json(self.storage.as_ref(), USER_KEY, &user)
    }

    fn lock(&self) -> MutexGuard<'_, AuthState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
