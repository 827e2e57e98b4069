//! Query/mutation layer: cache keys, the cache itself, the client that
//! fetches through it, and per-resource hooks.

pub mod cache;
pub mod client;
pub mod hooks;
pub mod keys;

pub use client::{Mutation, QueryClient};
pub use keys::QueryKey;
