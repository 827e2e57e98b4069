//! Utility helpers shared across client modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Persistence, relative time formatting and form validation used by the
//! services, components and pages.

pub mod storage;
pub mod time_ago;
pub mod validation;
