//! Networking modules for the REST API.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` wraps HTTP (bearer token, 401 handling), `error` defines the error
//! taxonomy, and `types` defines the wire schema.

pub mod api;
pub mod error;
pub mod types;
