//! Confirmation monitoring for submitted transactions.
//!
//! # Responsibilities
//! - Poll for the receipt with exponential backoff
//! - Detect reverts
//! - Wait for the configured block depth
//! - Bound the whole wait by a timeout

use alloy::primitives::TxHash;
use std::time::Duration;
use tokio::time::{sleep, timeout};

use crate::blockchain::gateway::ContractGateway;
use crate::blockchain::types::{BlockchainError, BlockchainResult, ConfirmationStatus};
use crate::config::ConfirmationConfig;
use crate::resilience::calculate_backoff;

/// Wait for a transaction to be confirmed.
///
/// Returns `Confirmed` once the receipt is at least `confirmation_blocks` deep,
/// `Failed` if it reverted, and `ConfirmationTimeout` if neither happens within
/// `timeout_secs`. A receipt without a block number counts as pending when
/// a block depth is required. RPC errors while polling end the wait.
pub async fn wait_for_confirmation(
    gateway: &dyn ContractGateway,
    tx_hash: TxHash,
    policy: &ConfirmationConfig,
) -> BlockchainResult<ConfirmationStatus> {
    let required_confirmations = policy.confirmation_blocks;
    let timeout_duration = Duration::from_secs(policy.timeout_secs);

    let result = timeout(timeout_duration, async {
        let mut attempt = 0u32;

        loop {
            attempt += 1;

            match gateway.receipt_status(tx_hash).await? {
                None => {
                    tracing::debug!(tx_hash = %tx_hash, attempt, "Transaction pending");
                }
                Some(receipt) if !receipt.success => {
                    return Ok(ConfirmationStatus::Failed("Transaction reverted".to_string()));
                }
                Some(receipt) => {
                    if required_confirmations == 0 {
                        return Ok(ConfirmationStatus::Confirmed {
                            block_number: receipt.block_number.unwrap_or_default(),
                        });
                    }

                    let Some(tx_block) = receipt.block_number else {
                        tracing::debug!(tx_hash = %tx_hash, attempt, "Receipt has no block number yet");
                        sleep(calculate_backoff(attempt, policy.base_delay_ms, policy.max_delay_ms)).await;
                        continue;
                    };
                    let current_block = gateway.block_number().await?;
                    let confirmations = current_block.saturating_sub(tx_block);

                    if confirmations >= required_confirmations {
                        return Ok(ConfirmationStatus::Confirmed {
                            block_number: tx_block,
                        });
                    }

                    tracing::debug!(
                        tx_hash = %tx_hash,
                        confirmations,
                        required = required_confirmations,
                        "Waiting for confirmations"
                    );
                }
            }

            sleep(calculate_backoff(attempt, policy.base_delay_ms, policy.max_delay_ms)).await;
        }
    })
    .await;

    match result {
        Ok(status) => status,
        Err(_) => Err(BlockchainError::ConfirmationTimeout(policy.timeout_secs)),
    }
}
