//! Blockchain integration subsystem.
//!
//! # Data Flow
//! ```text
//! Environment (private key, RPC API key)
//!     → wallet.rs (key loading, per-chain signing wallet)
//!     → client.rs (read-side RPC with timeouts and failover)
//!     → gateway.rs (ContractGateway: sign + send, call, receipts)
//!     → transaction.rs (confirmation polling)
//! contracts.rs holds the ABI bindings.
//! ```
//!
//! # Security Constraints
//! - Private keys ONLY from environment variables
//! - Never log private keys or keyed RPC URLs
//! - All RPC calls have configurable timeouts

pub mod client;
pub mod contracts;
pub mod gateway;
pub mod transaction;
pub mod types;
pub mod wallet;

pub use client::BlockchainClient;
pub use gateway::{ContractGateway, RpcGateway};
pub use transaction::wait_for_confirmation;
pub use types::{BlockchainError, BlockchainResult, ChainId, ConfirmationStatus, ReceiptSummary};
pub use wallet::Wallet;
