//! Shared utilities for integration tests.
#![allow(dead_code)]

use alloy::primitives::{address, b256, Address, Bytes, TxHash, U256};
use alloy::sol_types::{SolCall, SolValue};
use async_trait::async_trait;
use axum::Router;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::{sleep, Instant};

use chain_relay::blockchain::{BlockchainError, BlockchainResult, ContractGateway, ReceiptSummary};
use chain_relay::config::{ClaimKind, ConfirmationConfig, MintDeploymentConfig, PickerConfig, RelayConfig};
use chain_relay::http::HttpServer;
use chain_relay::relay::{MintDeployment, PickerDeployment, Relay};

pub const NETWORK: &str = "testnet";
pub const MINT_CONTRACT: Address = address!("5E3e89838E344e64F783f532d289f4bB2B520459");
pub const PAID_CONTRACT: Address = address!("1111111111111111111111111111111111111111");
pub const PICKER_CONTRACT: Address = address!("f2cdb7b3dc874eb2da9c25e9aefe42b2260ffefc");
pub const RECEIVER: &str = "0x70997970C51812dc3A010C7d01b50e0d17dc79C8";
pub const MOCK_TX: TxHash =
    b256!("00000000000000000000000000000000000000000000000000000000000000aa");
pub const INCLUSION_BLOCK: u64 = 100;

/// One gateway interaction, in call order.
#[derive(Debug, Clone, PartialEq)]
pub enum GatewayCall {
    Send { to: Address, input: Bytes, value: U256 },
    ReceiptPoll,
    Read { selector: [u8; 4] },
    BlockNumber,
}

/// Gateway that records every call and answers from a script.
#[derive(Default)]
pub struct MockGateway {
    calls: Mutex<Vec<(Instant, GatewayCall)>>,
    pending_polls: AtomicUsize,
    unnumbered_receipts: AtomicUsize,
    head: AtomicU64,
    reverted: bool,
    send_error: Option<String>,
    reads: HashMap<[u8; 4], U256>,
    failing_read: Option<[u8; 4]>,
    send_delay: Option<Duration>,
    read_delay: Option<Duration>,
}

impl MockGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Report the receipt as pending for the first `polls` polls.
    pub fn pending_for(mut self, polls: usize) -> Self {
        self.pending_polls = AtomicUsize::new(polls);
        self
    }

    /// After the pending polls, return `receipts` receipts without a block number.
    pub fn unnumbered_for(mut self, receipts: usize) -> Self {
        self.unnumbered_receipts = AtomicUsize::new(receipts);
        self
    }

    pub fn send_delay(mut self, delay: Duration) -> Self {
        self.send_delay = Some(delay);
        self
    }

    pub fn read_delay(mut self, delay: Duration) -> Self {
        self.read_delay = Some(delay);
        self
    }

    pub fn reverting(mut self) -> Self {
        self.reverted = true;
        self
    }

    pub fn failing_send(mut self, message: &str) -> Self {
        self.send_error = Some(message.to_string());
        self
    }

    /// Answer `eth_call`s of `C` with `value`.
    pub fn with_read<C: SolCall>(mut self, value: u64) -> Self {
        self.reads.insert(C::SELECTOR, U256::from(value));
        self
    }

    pub fn with_read_value<C: SolCall>(mut self, value: U256) -> Self {
        self.reads.insert(C::SELECTOR, value);
        self
    }

    pub fn failing_read<C: SolCall>(mut self) -> Self {
        self.failing_read = Some(C::SELECTOR);
        self
    }

    pub fn calls(&self) -> Vec<GatewayCall> {
        self.calls.lock().unwrap().iter().map(|(_, c)| c.clone()).collect()
    }

    pub fn timed_calls(&self) -> Vec<(Instant, GatewayCall)> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: GatewayCall) {
        self.calls.lock().unwrap().push((Instant::now(), call));
    }
}

#[async_trait]
impl ContractGateway for MockGateway {
    async fn send_transaction(&self, to: Address, input: Bytes, value: U256) -> BlockchainResult<TxHash> {
        self.record(GatewayCall::Send { to, input, value });
        if let Some(delay) = self.send_delay {
            sleep(delay).await;
        }
        match &self.send_error {
            Some(message) => Err(BlockchainError::Submission(message.clone())),
            None => Ok(MOCK_TX),
        }
    }

    async fn call(&self, _to: Address, input: Bytes) -> BlockchainResult<Bytes> {
        let mut selector = [0u8; 4];
        selector.copy_from_slice(&input[..4]);
        self.record(GatewayCall::Read { selector });
        if let Some(delay) = self.read_delay {
            sleep(delay).await;
        }

        if self.failing_read == Some(selector) {
            return Err(BlockchainError::Rpc("execution reverted".to_string()));
        }
        self.reads
            .get(&selector)
            .map(|value| Bytes::from(value.abi_encode()))
            .ok_or_else(|| BlockchainError::Rpc(format!("unexpected call {:?}", selector)))
    }

    async fn receipt_status(&self, _tx_hash: TxHash) -> BlockchainResult<Option<ReceiptSummary>> {
        self.record(GatewayCall::ReceiptPoll);
        let still_pending = self
            .pending_polls
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if still_pending {
            return Ok(None);
        }
        let unnumbered = self
            .unnumbered_receipts
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        Ok(Some(ReceiptSummary {
            success: !self.reverted,
            block_number: (!unnumbered).then_some(INCLUSION_BLOCK),
        }))
    }

    async fn block_number(&self) -> BlockchainResult<u64> {
        self.record(GatewayCall::BlockNumber);
        // The chain head starts at the inclusion block and grows one block per query.
        Ok(INCLUSION_BLOCK + self.head.fetch_add(1, Ordering::SeqCst))
    }
}

pub fn confirmation() -> ConfirmationConfig {
    ConfirmationConfig {
        timeout_secs: 30,
        base_delay_ms: 500,
        max_delay_ms: 4000,
        confirmation_blocks: 0,
    }
}

/// Free edition pinned to token 0, the default deployment.
pub fn genesis_edition() -> MintDeployment {
    MintDeployment::from_config(&MintDeploymentConfig {
        name: "genesis".to_string(),
        network: NETWORK.to_string(),
        contract_address: MINT_CONTRACT.to_string(),
        kind: ClaimKind::Edition,
        token_id: Some(0),
        price_per_token_wei: "0".to_string(),
        quantity_limit_per_wallet: 100,
    })
    .unwrap()
}

/// Paid ERC-721 drop at 1000 wei per token.
pub fn paid_drop() -> MintDeployment {
    MintDeployment::from_config(&MintDeploymentConfig {
        name: "paid".to_string(),
        network: NETWORK.to_string(),
        contract_address: PAID_CONTRACT.to_string(),
        kind: ClaimKind::Drop,
        token_id: None,
        price_per_token_wei: "1000".to_string(),
        quantity_limit_per_wallet: 5,
    })
    .unwrap()
}

pub fn picker() -> PickerDeployment {
    PickerDeployment::from_config(&PickerConfig {
        network: NETWORK.to_string(),
        contract_address: PICKER_CONTRACT.to_string(),
    })
    .unwrap()
}

/// Relay with both mint deployments and the picker on one mock network.
pub fn relay(gateway: Arc<MockGateway>) -> Relay {
    relay_with_confirmation(gateway, confirmation())
}

pub fn relay_with_confirmation(gateway: Arc<MockGateway>, policy: ConfirmationConfig) -> Relay {
    Relay::new(policy)
        .with_network(NETWORK, gateway)
        .with_mint(genesis_edition())
        .with_mint(paid_drop())
        .with_picker(picker())
}

/// Full router with default middleware.
pub fn router(relay: Relay, expose_internal_errors: bool) -> Router {
    let mut config = RelayConfig::default();
    config.security.expose_internal_errors = expose_internal_errors;
    router_with(relay, config)
}

pub fn router_with(relay: Relay, mut config: RelayConfig) -> Router {
    config.confirmation = confirmation();
    HttpServer::new(&config, Arc::new(relay)).into_router()
}
