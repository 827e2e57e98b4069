//! Self-rescheduling fetch loops.

pub mod scan_status;
