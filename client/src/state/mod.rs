//! Global client state: auth session, theme, and current route.

pub mod auth;
pub mod router;
pub mod theme;
