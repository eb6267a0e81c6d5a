//! Network layer subsystem.
//!
//! Plain HTTP is served by `axum::serve` (see `http::server`); this module
//! covers TLS termination when `listener.tls` is configured.

pub mod tls;

pub use tls::{load_tls_config, serve_tls};
