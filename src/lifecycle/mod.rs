//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Load signer → Connect networks → Register deployments
//!
//! Shutdown (shutdown.rs):
//!     Trigger → Listener stops accepting → In-flight requests drain → Exit
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → Trigger graceful shutdown
//! ```

pub mod shutdown;
pub mod signals;
pub mod startup;

pub use shutdown::{Shutdown, ShutdownSignal};
pub use signals::wait_for_termination;
pub use startup::{build_relay, build_relay_with, StartupError, RPC_API_KEY_ENV_VAR};
