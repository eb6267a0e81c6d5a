//! The signing/reading capability handed to relay operations.
//!
//! Relay code never touches providers or keys directly; it gets a
//! `ContractGateway` for the network a deployment lives on. Production uses
//! [`RpcGateway`]; tests substitute a recording fake.

use alloy::network::TransactionBuilder;
use alloy::primitives::{Address, Bytes, TxHash, U256};
use alloy::providers::{Provider, ProviderBuilder};
use alloy::rpc::types::TransactionRequest;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::time::timeout;

use crate::blockchain::client::{resolve_rpc_url, BlockchainClient};
use crate::blockchain::types::{BlockchainError, BlockchainResult, ReceiptSummary};
use crate::blockchain::wallet::Wallet;
use crate::config::NetworkConfig;

/// Sign-and-send plus read access to one network.
#[async_trait]
pub trait ContractGateway: Send + Sync {
    /// Sign and broadcast a contract call. Returns once the node accepted it.
    async fn send_transaction(&self, to: Address, input: Bytes, value: U256)
        -> BlockchainResult<TxHash>;

    /// Read-only `eth_call` returning raw ABI-encoded output.
    async fn call(&self, to: Address, input: Bytes) -> BlockchainResult<Bytes>;

    /// `None` while the transaction is still pending.
    async fn receipt_status(&self, tx_hash: TxHash) -> BlockchainResult<Option<ReceiptSummary>>;

    /// Latest block number.
    async fn block_number(&self) -> BlockchainResult<u64>;
}

/// Gateway backed by alloy JSON-RPC providers.
pub struct RpcGateway {
    /// Read side, with failover.
    client: BlockchainClient,
    /// Write side: primary endpoint with the signer and nonce/gas/chain-id fillers.
    signer: Arc<dyn Provider + Send + Sync>,
    sender: Address,
}

impl RpcGateway {
    /// Build the gateway for `network`, signing with `wallet`.
    pub async fn connect(
        network: &NetworkConfig,
        wallet: &Wallet,
        api_key: Option<&str>,
    ) -> BlockchainResult<Self> {
        let client = BlockchainClient::new(network.clone(), api_key).await?;

        let url = resolve_rpc_url(&network.rpc_url, api_key)?;
        let signer = ProviderBuilder::new()
            .wallet(wallet.network_wallet(network.chain_id))
            .connect_http(url);

        Ok(Self {
            client,
            signer: Arc::new(signer),
            sender: wallet.address(),
        })
    }

    /// Refuse to submit into a gas spike.
    async fn check_gas_price(&self) -> BlockchainResult<()> {
        let gas_price = self.client.get_gas_price().await?;
        let gas_price_gwei = gas_price / 1_000_000_000;
        let max_gwei = self.client.network().max_gas_price_gwei;

        if gas_price_gwei > max_gwei as u128 {
            return Err(BlockchainError::GasPriceTooHigh {
                current_gwei: gas_price_gwei as u64,
                max_gwei,
            });
        }
        Ok(())
    }
}

#[async_trait]
impl ContractGateway for RpcGateway {
    async fn send_transaction(
        &self,
        to: Address,
        input: Bytes,
        value: U256,
    ) -> BlockchainResult<TxHash> {
        self.check_gas_price().await?;

        let tx = TransactionRequest::default()
            .with_from(self.sender)
            .with_to(to)
            .with_input(input)
            .with_value(value);

        let submit_timeout = self.client.timeout_duration();
        let pending = timeout(submit_timeout, self.signer.send_transaction(tx))
            .await
            .map_err(|_| BlockchainError::Timeout(submit_timeout.as_secs()))?
            .map_err(|e| BlockchainError::Submission(e.to_string()))?;

        let tx_hash = *pending.tx_hash();
        tracing::info!(
            network = %self.client.network().name,
            tx_hash = %tx_hash,
            to = %to,
            "Transaction broadcast"
        );
        Ok(tx_hash)
    }

    async fn call(&self, to: Address, input: Bytes) -> BlockchainResult<Bytes> {
        self.client.call(to, input).await
    }

    async fn receipt_status(&self, tx_hash: TxHash) -> BlockchainResult<Option<ReceiptSummary>> {
        let receipt = self.client.get_transaction_receipt(tx_hash).await?;
        Ok(receipt.map(|r| ReceiptSummary {
            success: r.status(),
            block_number: r.block_number,
        }))
    }

    async fn block_number(&self) -> BlockchainResult<u64> {
        self.client.get_block_number().await
    }
}

impl std::fmt::Debug for RpcGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RpcGateway")
            .field("client", &self.client)
            .field("sender", &self.sender)
            .finish()
    }
}
