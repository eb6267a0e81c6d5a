//! Read-side RPC client with timeout and failover.
//!
//! # Responsibilities
//! - Connect to the JSON-RPC endpoints of one network
//! - Query chain state (block number, gas price, receipts, `eth_call`)
//! - Handle timeouts and network errors by trying the next endpoint
//!
//! Only idempotent reads go through here. Submissions are never failed over.

use alloy::primitives::{Address, Bytes, TxHash};
use alloy::network::TransactionBuilder;
use alloy::providers::{Provider, ProviderBuilder};
use alloy::rpc::types::{TransactionReceipt, TransactionRequest};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;

use crate::blockchain::types::{BlockchainError, BlockchainResult, ChainId};
use crate::config::NetworkConfig;
use crate::observability::metrics;

/// Placeholder in RPC URLs that is replaced by the provider API key.
pub const API_KEY_PLACEHOLDER: &str = "{api_key}";

/// Substitute the API key into an RPC URL and parse it.
pub fn resolve_rpc_url(raw: &str, api_key: Option<&str>) -> BlockchainResult<url::Url> {
    let resolved = if raw.contains(API_KEY_PLACEHOLDER) {
        let key = api_key.ok_or_else(|| {
            BlockchainError::Rpc("RPC URL needs an API key but none is configured".to_string())
        })?;
        raw.replace(API_KEY_PLACEHOLDER, key)
    } else {
        raw.to_string()
    };

    // The error text must not echo the URL, it may carry the key.
    resolved
        .parse()
        .map_err(|e| BlockchainError::Rpc(format!("Invalid RPC URL: {}", e)))
}

/// Blockchain RPC client wrapper with failover support.
#[derive(Clone)]
pub struct BlockchainClient {
    /// List of providers (primary + failovers).
    providers: Vec<Arc<dyn Provider + Send + Sync>>,
    /// Network this client talks to.
    network: NetworkConfig,
    /// Request timeout duration.
    timeout_duration: Duration,
}

impl BlockchainClient {
    /// Create a new client for `network`.
    ///
    /// A chain ID mismatch or unreachable endpoint is logged, not fatal.
    pub async fn new(network: NetworkConfig, api_key: Option<&str>) -> BlockchainResult<Self> {
        let timeout_duration = Duration::from_secs(network.rpc_timeout_secs);
        let mut providers = Vec::new();

        // 1. Add primary provider
        let primary_url = resolve_rpc_url(&network.rpc_url, api_key)?;
        let primary_host = primary_url.host_str().unwrap_or_default().to_string();
        providers.push(
            Arc::new(ProviderBuilder::new().connect_http(primary_url))
                as Arc<dyn Provider + Send + Sync>,
        );

        // 2. Add failover providers
        for raw in &network.failover_urls {
            match resolve_rpc_url(raw, api_key) {
                Ok(url) => providers.push(
                    Arc::new(ProviderBuilder::new().connect_http(url))
                        as Arc<dyn Provider + Send + Sync>,
                ),
                Err(e) => {
                    tracing::warn!(network = %network.name, error = %e, "Ignoring invalid failover RPC URL");
                }
            }
        }

        let client = Self {
            providers,
            network,
            timeout_duration,
        };

        match client.verify_chain_id().await {
            Ok(()) => {
                tracing::info!(
                    network = %client.network.name,
                    rpc_host = %primary_host,
                    chain_id = client.network.chain_id,
                    "Blockchain client initialized"
                );
            }
            Err(e) => {
                tracing::warn!(
                    network = %client.network.name,
                    error = %e,
                    "Blockchain client initialized but chain verification failed"
                );
            }
        }

        Ok(client)
    }

    /// Verify the connected chain ID matches configuration.
    pub async fn verify_chain_id(&self) -> BlockchainResult<()> {
        let chain_id = self.get_chain_id().await?;
        if chain_id.0 != self.network.chain_id {
            return Err(BlockchainError::ChainMismatch {
                expected: self.network.chain_id,
                actual: chain_id.0,
            });
        }
        Ok(())
    }

    /// Get the chain ID from the RPC.
    pub async fn get_chain_id(&self) -> BlockchainResult<ChainId> {
        for (i, provider) in self.providers.iter().enumerate() {
            match timeout(self.timeout_duration, provider.get_chain_id()).await {
                Ok(Ok(result)) => return Ok(ChainId(result)),
                Ok(Err(e)) => {
                    tracing::warn!(provider_idx = i, error = %e, "RPC error, trying next provider");
                }
                Err(_) => {
                    tracing::warn!(provider_idx = i, "RPC timeout, trying next provider");
                }
            }
            metrics::record_rpc_failure("eth_chainId");
        }
        Err(BlockchainError::Rpc("All RPC providers failed".to_string()))
    }

    /// Get the latest block number.
    pub async fn get_block_number(&self) -> BlockchainResult<u64> {
        for (i, provider) in self.providers.iter().enumerate() {
            match timeout(self.timeout_duration, provider.get_block_number()).await {
                Ok(Ok(result)) => return Ok(result),
                Ok(Err(e)) => tracing::warn!(provider_idx = i, error = %e, "RPC error"),
                Err(_) => tracing::warn!(provider_idx = i, "RPC timeout"),
            }
            metrics::record_rpc_failure("eth_blockNumber");
        }
        Err(BlockchainError::Rpc("All providers failed to get block number".to_string()))
    }

    /// Get a transaction receipt by hash.
    pub async fn get_transaction_receipt(
        &self,
        tx_hash: TxHash,
    ) -> BlockchainResult<Option<TransactionReceipt>> {
        for (i, provider) in self.providers.iter().enumerate() {
            match timeout(self.timeout_duration, provider.get_transaction_receipt(tx_hash)).await {
                Ok(Ok(result)) => return Ok(result),
                Ok(Err(e)) => tracing::warn!(provider_idx = i, error = %e, "RPC error"),
                Err(_) => tracing::warn!(provider_idx = i, "RPC timeout"),
            }
            metrics::record_rpc_failure("eth_getTransactionReceipt");
        }
        Err(BlockchainError::Rpc("All providers failed to get receipt".to_string()))
    }

    /// Get current gas price in wei.
    pub async fn get_gas_price(&self) -> BlockchainResult<u128> {
        for (i, provider) in self.providers.iter().enumerate() {
            match timeout(self.timeout_duration, provider.get_gas_price()).await {
                Ok(Ok(result)) => return Ok(result),
                Ok(Err(e)) => tracing::warn!(provider_idx = i, error = %e, "RPC error"),
                Err(_) => tracing::warn!(provider_idx = i, "RPC timeout"),
            }
            metrics::record_rpc_failure("eth_gasPrice");
        }
        Err(BlockchainError::Rpc("All providers failed to get gas price".to_string()))
    }

    /// Execute a read-only contract call against the latest block.
    ///
    /// A revert is a definitive answer and is not retried on other providers.
    /// Any other error payload (rate limits, missing state) moves on to the
    /// next one.
    pub async fn call(&self, to: Address, input: Bytes) -> BlockchainResult<Bytes> {
        let request = TransactionRequest::default().with_to(to).with_input(input);
        let mut last_error = String::from("no providers configured");

        for (i, provider) in self.providers.iter().enumerate() {
            match timeout(self.timeout_duration, provider.call(request.clone())).await {
                Ok(Ok(result)) => return Ok(result),
                Ok(Err(e)) => {
                    if let Some(payload) = e.as_error_resp() {
                        let reverted = payload.code == 3
                            || payload.as_revert_data().is_some()
                            || payload.message.contains("execution reverted");
                        if reverted {
                            return Err(BlockchainError::Reverted(payload.message.to_string()));
                        }
                    }
                    tracing::warn!(provider_idx = i, error = %e, "RPC error");
                    last_error = e.to_string();
                }
                Err(_) => {
                    tracing::warn!(provider_idx = i, "RPC timeout");
                    last_error = format!("timeout after {}s", self.timeout_duration.as_secs());
                }
            }
            metrics::record_rpc_failure("eth_call");
        }
        Err(BlockchainError::Rpc(format!(
            "All providers failed eth_call: {}",
            last_error
        )))
    }

    /// Network this client was created for.
    pub fn network(&self) -> &NetworkConfig {
        &self.network
    }

    /// Per-call timeout.
    pub fn timeout_duration(&self) -> Duration {
        self.timeout_duration
    }
}

impl std::fmt::Debug for BlockchainClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlockchainClient")
            .field("network", &self.network.name)
            .field("chain_id", &self.network.chain_id)
            .field("providers", &self.providers.len())
            .field("timeout_secs", &self.network.rpc_timeout_secs)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::U256;
    use axum::routing::post;
    use axum::{Json, Router};
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::net::TcpListener;

    fn test_network() -> NetworkConfig {
        NetworkConfig {
            name: "anvil".to_string(),
            rpc_url: "http://localhost:8545".to_string(),
            failover_urls: Vec::new(),
            chain_id: 31337, // Anvil default
            rpc_timeout_secs: 2,
            max_gas_price_gwei: 100,
        }
    }

    #[test]
    fn test_resolve_rpc_url_with_key() {
        let url = resolve_rpc_url("https://arb-mainnet.g.alchemy.com/v2/{api_key}", Some("abc123"))
            .unwrap();
        assert_eq!(url.as_str(), "https://arb-mainnet.g.alchemy.com/v2/abc123");
    }

    #[test]
    fn test_resolve_rpc_url_missing_key() {
        let err = resolve_rpc_url("https://arb-mainnet.g.alchemy.com/v2/{api_key}", None)
            .unwrap_err();
        assert!(err.to_string().contains("API key"));
    }

    #[test]
    fn test_resolve_plain_url_ignores_key() {
        let url = resolve_rpc_url("https://sepolia.base.org", Some("unused")).unwrap();
        assert_eq!(url.host_str(), Some("sepolia.base.org"));
    }

    #[tokio::test]
    async fn test_client_creation() {
        // Creation must succeed even when nothing listens on the RPC port.
        let result = BlockchainClient::new(test_network(), None).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_rpc_failover() {
        let mut network = test_network();
        network.rpc_url = "http://127.0.0.1:1".to_string();
        network.failover_urls.push("http://127.0.0.1:2".to_string());

        let client = BlockchainClient::new(network, None).await.unwrap();

        let result = client.get_chain_id().await;
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("All RPC providers failed"));
    }

    /// JSON-RPC endpoint answering `eth_chainId` and replying to `eth_call`
    /// with `call_reply`. Counts the `eth_call`s it sees.
    async fn spawn_rpc(call_reply: serde_json::Value, calls: Arc<AtomicUsize>) -> String {
        let app = Router::new().route(
            "/",
            post(move |Json(request): Json<serde_json::Value>| {
                let mut reply = call_reply.clone();
                let calls = calls.clone();
                async move {
                    let id = request["id"].clone();
                    let body = match request["method"].as_str() {
                        Some("eth_call") => {
                            calls.fetch_add(1, Ordering::SeqCst);
                            reply["id"] = id;
                            reply
                        }
                        Some("eth_chainId") => json!({"jsonrpc": "2.0", "id": id, "result": "0x7a69"}),
                        _ => json!({
                            "jsonrpc": "2.0",
                            "id": id,
                            "error": {"code": -32601, "message": "method not found"}
                        }),
                    };
                    Json(body)
                }
            }),
        );
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });
        format!("http://{}", addr)
    }

    fn word(value: u64) -> String {
        format!("0x{:064x}", value)
    }

    async fn client_with(primary_reply: serde_json::Value) -> (BlockchainClient, Arc<AtomicUsize>) {
        let backup_calls = Arc::new(AtomicUsize::new(0));
        let primary = spawn_rpc(primary_reply, Arc::new(AtomicUsize::new(0))).await;
        let backup = spawn_rpc(
            json!({"jsonrpc": "2.0", "result": word(7)}),
            backup_calls.clone(),
        )
        .await;

        let mut network = test_network();
        network.rpc_url = primary;
        network.failover_urls = vec![backup];
        (BlockchainClient::new(network, None).await.unwrap(), backup_calls)
    }

    #[tokio::test]
    async fn test_call_fails_over_on_node_errors() {
        let (client, backup_calls) = client_with(json!({
            "jsonrpc": "2.0",
            "error": {"code": -32005, "message": "daily request limit exceeded"}
        }))
        .await;

        let output = client.call(Address::ZERO, Bytes::new()).await.unwrap();
        assert_eq!(output.as_ref(), U256::from(7).to_be_bytes::<32>().as_slice());
        assert_eq!(backup_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_call_stops_at_revert() {
        let (client, backup_calls) = client_with(json!({
            "jsonrpc": "2.0",
            "error": {"code": 3, "message": "execution reverted: not started"}
        }))
        .await;

        let err = client.call(Address::ZERO, Bytes::new()).await.unwrap_err();
        assert!(matches!(err, BlockchainError::Reverted(ref m) if m == "execution reverted: not started"));
        assert_eq!(backup_calls.load(Ordering::SeqCst), 0);
    }
}
