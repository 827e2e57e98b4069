//! Route table and authentication guard.
//!
//! SYSTEM CONTEXT
//! ==============
//! Pages are selected by [`Route`]. The HTTP wrapper navigates to
//! [`Route::Login`] when a protected call comes back 401; the CLI reads the
//! redirect history afterwards to tell the user to log in again.

#[cfg(test)]
#[path = "router_test.rs"]
mod router_test;

use std::fmt;
use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::info;

use crate::state::auth::AuthState;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Route {
    Login,
    Register,
    Dashboard,
    AwsAccounts,
    AwsAccountDetail(String),
    AwsAccountSettings(String),
    TagPolicies,
    Settings,
}

impl Route {
    /// Parse a path. `/` and unknown paths land on the dashboard.
    #[must_use]
    pub fn parse(path: &str) -> Self {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        match segments.as_slice() {
            ["login"] => Self::Login,
            ["register"] => Self::Register,
            ["aws-accounts"] => Self::AwsAccounts,
            ["aws-accounts", id] => Self::AwsAccountDetail((*id).to_owned()),
            ["aws-accounts", id, "settings"] => Self::AwsAccountSettings((*id).to_owned()),
            ["tag-policies"] => Self::TagPolicies,
            ["settings"] => Self::Settings,
            _ => Self::Dashboard,
        }
    }

    #[must_use]
    pub fn path(&self) -> String {
        match self {
            Self::Login => "/login".to_owned(),
            Self::Register => "/register".to_owned(),
            Self::Dashboard => "/dashboard".to_owned(),
            Self::AwsAccounts => "/aws-accounts".to_owned(),
            Self::AwsAccountDetail(id) => format!("/aws-accounts/{id}"),
            Self::AwsAccountSettings(id) => format!("/aws-accounts/{id}/settings"),
            Self::TagPolicies => "/tag-policies".to_owned(),
            Self::Settings => "/settings".to_owned(),
        }
    }

    #[must_use]
    pub fn is_protected(&self) -> bool {
        !matches!(self, Self::Login | Self::Register)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Resolve the route actually shown for `requested` under `auth`.
#[must_use]
pub fn guard(requested: Route, auth: &AuthState) -> Route {
    if requested.is_protected() && !(auth.is_authenticated && auth.token.is_some()) {
        Route::Login
    } else {
        requested
    }
}

/// Current route plus every navigation performed this session.
#[derive(Debug)]
pub struct Router {
    inner: Mutex<RouterInner>,
}

#[derive(Debug)]
struct RouterInner {
    current: Route,
    history: Vec<Route>,
}

impl Default for Router {
    fn default() -> Self {
        Self::new(Route::Dashboard)
    }
}

impl Router {
    #[must_use]
    pub fn new(initial: Route) -> Self {
        Self { inner: Mutex::new(RouterInner { current: initial, history: Vec::new() }) }
    }

    #[must_use]
    pub fn current(&self) -> Route {
        self.lock().current.clone()
    }

    #[must_use]
    pub fn history(&self) -> Vec<Route> {
        self.lock().history.clone()
    }

    pub fn navigate(&self, route: Route) {
        info!(to = %route, "router: navigate");
        let mut inner = self.lock();
        inner.history.push(route.clone());
        inner.current = route;
    }

    /// Navigate to `requested`, or to login when the guard rejects it.
    /// Returns the route that became current.
    pub fn navigate_guarded(&self, requested: Route, auth: &AuthState) -> Route {
        let resolved = guard(requested, auth);
        self.navigate(resolved.clone());
        resolved
    }

    /// True when a forced redirect to login happened this session.
    #[must_use]
    pub fn was_sent_to_login(&self) -> bool {
        self.lock().history.iter().any(|r| *r == Route::Login)
    }

    fn lock(&self) -> MutexGuard<'_, RouterInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
