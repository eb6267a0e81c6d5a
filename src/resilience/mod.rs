//! Resilience subsystem.
//!
//! # Design Decisions
//! - Timeouts are non-negotiable; every external call has a deadline
//! - Submissions are never retried; only receipt polling backs off
//! - Request-level deadlines are enforced by the HTTP timeout layer

pub mod backoff;

pub use backoff::calculate_backoff;
