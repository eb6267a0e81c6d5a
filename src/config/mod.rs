//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → RelayConfig (validated, immutable)
//!     → lifecycle::startup builds gateways and deployments from it
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require a restart
//! - All fields have defaults to allow minimal configs
//! - Secrets come from the environment, never from the file

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, parse_config, ConfigError};
pub use schema::{
    ClaimKind, ConfirmationConfig, CorsConfig, ListenerConfig, LogFormat, MintDeploymentConfig,
    NetworkConfig, ObservabilityConfig, PickerConfig, RelayConfig, SecurityConfig, TimeoutConfig,
    TlsConfig,
};
