//! Client library for the Resonant AWS tag-compliance dashboard.
//!
//! Layers, bottom-up: HTTP wrapper ([`net`]), domain [`services`], the
//! [`query`] cache, the scan [`poll`]er, client [`state`], text
//! [`components`], and [`pages`] composing them per route.

pub mod components;
pub mod config;
pub mod context;
pub mod net;
pub mod notify;
pub mod pages;
pub mod poll;
pub mod query;
pub mod services;
pub mod state;
pub mod util;

#[cfg(test)]
pub(crate) mod test_support;

pub use config::ClientConfig;
pub use context::{AppContext, ContextError};
pub use net::error::ApiError;
