//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the relay.
//! All types derive Serde traits for deserialization from config files.
//! Secrets (signing key, RPC API key) never live here; they are read from
//! the environment at startup.

use serde::{Deserialize, Serialize};

/// Root configuration for the transaction relay.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct RelayConfig {
    /// Listener configuration (bind address, TLS).
    pub listener: ListenerConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Security hardening settings.
    pub security: SecurityConfig,

    /// Cross-origin settings.
    pub cors: CorsConfig,

    /// Confirmation polling used before reading state back after a write.
    pub confirmation: ConfirmationConfig,

    /// EVM networks the relay can submit to.
    pub networks: Vec<NetworkConfig>,

    /// Mint deployments, in routing order. The first one serves `/api/mint`.
    pub mint: Vec<MintDeploymentConfig>,

    /// Random picker deployment, if any.
    pub random_picker: Option<PickerConfig>,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,

    /// Optional TLS configuration.
    pub tls: Option<TlsConfig>,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
            tls: None,
        }
    }
}

/// TLS configuration for the listener.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TlsConfig {
    /// Path to certificate file (PEM).
    pub cert_path: String,

    /// Path to private key file (PEM).
    pub key_path: String,
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    /// Must leave room for confirmation polling.
    pub request_secs: u64,

    /// Grace period for in-flight requests on shutdown, in seconds.
    pub shutdown_grace_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            request_secs: 90,
            shutdown_grace_secs: 10,
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error). `RUST_LOG` wins when set.
    pub log_level: String,

    /// Log output format.
    pub log_format: LogFormat,

    /// Enable the Prometheus metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

/// Security hardening configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SecurityConfig {
    /// Add security response headers.
    pub enable_headers: bool,

    /// Maximum request body size in bytes.
    pub max_body_size: usize,

    /// Return RPC and signing error messages to clients verbatim.
    /// When false, clients get a generic message and only the log keeps the detail.
    pub expose_internal_errors: bool,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            enable_headers: true,
            max_body_size: 64 * 1024,
            expose_internal_errors: true,
        }
    }
}

/// Cross-origin resource sharing.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CorsConfig {
    /// Answer pre-flight requests and add CORS headers.
    pub enabled: bool,

    /// Allowed origins. Empty means any origin.
    pub allowed_origins: Vec<String>,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            allowed_origins: Vec::new(),
        }
    }
}

/// Confirmation polling after a state-changing call.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ConfirmationConfig {
    /// Give up waiting for a receipt after this many seconds.
    pub timeout_secs: u64,

    /// First backoff delay in milliseconds.
    pub base_delay_ms: u64,

    /// Backoff ceiling in milliseconds.
    pub max_delay_ms: u64,

    /// Blocks required on top of the inclusion block (0 = included is enough).
    pub confirmation_blocks: u64,
}

impl Default for ConfirmationConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            base_delay_ms: 500,
            max_delay_ms: 4000,
            confirmation_blocks: 0,
        }
    }
}

/// A JSON-RPC reachable EVM network.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct NetworkConfig {
    /// Name referenced by deployments.
    pub name: String,

    /// JSON-RPC endpoint URL. `{api_key}` is replaced with `RELAY_RPC_API_KEY`.
    pub rpc_url: String,

    /// Failover endpoints for read-only calls.
    pub failover_urls: Vec<String>,

    /// Chain ID (e.g., 42161 for Arbitrum One, 84532 for Base Sepolia).
    pub chain_id: u64,

    /// RPC request timeout in seconds.
    pub rpc_timeout_secs: u64,

    /// Refuse to submit when the network gas price is above this, in gwei.
    pub max_gas_price_gwei: u64,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            name: String::new(),
            rpc_url: "http://localhost:8545".to_string(),
            failover_urls: Vec::new(),
            chain_id: 31337,
            rpc_timeout_secs: 10,
            max_gas_price_gwei: 500,
        }
    }
}

/// Which claim ABI a mint contract exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ClaimKind {
    /// ERC-1155 drop: `claim` takes a token id.
    Edition,
    /// ERC-721 drop: `claim` mints the next token, no token id.
    Drop,
}

/// One mintable contract deployment.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MintDeploymentConfig {
    /// Route name: `/api/mint/{name}`.
    pub name: String,

    /// Network name from `[[networks]]`.
    pub network: String,

    /// Contract address (hex).
    pub contract_address: String,

    /// Claim ABI variant.
    #[serde(default = "default_claim_kind")]
    pub kind: ClaimKind,

    /// Pin every claim to this token id. Editions without a pin require
    /// `tokenId` in the request.
    #[serde(default)]
    pub token_id: Option<u64>,

    /// Price per token in wei, decimal.
    #[serde(default = "default_price")]
    pub price_per_token_wei: String,

    /// Allowlist proof quantity limit forwarded to the contract.
    #[serde(default = "default_quantity_limit")]
    pub quantity_limit_per_wallet: u64,
}

fn default_claim_kind() -> ClaimKind {
    ClaimKind::Edition
}

fn default_price() -> String {
    "0".to_string()
}

fn default_quantity_limit() -> u64 {
    100
}

/// Random picker deployment.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PickerConfig {
    /// Network name from `[[networks]]`.
    pub network: String,

    /// Contract address (hex).
    pub contract_address: String,
}
