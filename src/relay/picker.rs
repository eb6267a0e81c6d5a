//! Random picker contract: pick, set total, read state.

use alloy::primitives::{Address, Bytes, U256};
use alloy::sol_types::SolCall;

use crate::blockchain::contracts::IRandomPicker;
use crate::blockchain::{wait_for_confirmation, BlockchainError, ConfirmationStatus, ContractGateway};
use crate::config::{ConfirmationConfig, PickerConfig};
use crate::observability::metrics;
use crate::relay::error::{RelayError, RelayResult};
use crate::relay::types::{PickOutcome, PickerSnapshot};

/// The configured picker contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickerDeployment {
    pub network: String,
    pub contract: Address,
}

impl PickerDeployment {
    pub fn from_config(config: &PickerConfig) -> Result<Self, String> {
        let contract = config
            .contract_address
            .parse()
            .map_err(|e| format!("random_picker: invalid contract address: {}", e))?;
        Ok(Self {
            network: config.network.clone(),
            contract,
        })
    }
}

/// Submit a state-changing call with no value attached.
async fn send<C: SolCall>(
    gateway: &dyn ContractGateway,
    contract: Address,
    call: C,
) -> RelayResult<alloy::primitives::TxHash> {
    match gateway
        .send_transaction(contract, Bytes::from(call.abi_encode()), U256::ZERO)
        .await
    {
        Ok(tx_hash) => {
            metrics::record_transaction(C::SIGNATURE, "submitted");
            Ok(tx_hash)
        }
        Err(e) => {
            metrics::record_transaction(C::SIGNATURE, "failed");
            Err(e.into())
        }
    }
}

/// `eth_call` a `uint256` view function.
async fn read_u256<C>(gateway: &dyn ContractGateway, contract: Address, call: C) -> RelayResult<U256>
where
    C: SolCall<Return = U256>,
{
    let output = gateway
        .call(contract, Bytes::from(call.abi_encode()))
        .await?;
    C::abi_decode_returns(&output)
        .map_err(|e| BlockchainError::Decode(format!("{}: {}", C::SIGNATURE, e)).into())
}

/// Pick a number, wait for the transaction, then read the picked value.
///
/// The read happens only after the receipt was observed; it is not retried.
pub async fn pick_random(
    gateway: &dyn ContractGateway,
    picker: &PickerDeployment,
    confirmation: &ConfirmationConfig,
) -> RelayResult<PickOutcome> {
    let tx_hash = send(gateway, picker.contract, IRandomPicker::pickRandomNumberCall {}).await?;

    match wait_for_confirmation(gateway, tx_hash, confirmation).await? {
        ConfirmationStatus::Confirmed { block_number } => {
            tracing::info!(tx_hash = %tx_hash, block_number, "Pick confirmed");
        }
        ConfirmationStatus::Failed(reason) => {
            tracing::warn!(tx_hash = %tx_hash, reason = %reason, "Pick transaction failed");
            return Err(RelayError::Submission(reason));
        }
    }

    let picked = read_u256(gateway, picker.contract, IRandomPicker::getLastPickedCall {}).await?;

    Ok(PickOutcome::PickRandom {
        tx_hash,
        picked_number: picked.to_string(),
    })
}

/// Change the number of items to pick from.
pub async fn set_total(
    gateway: &dyn ContractGateway,
    picker: &PickerDeployment,
    new_total: U256,
) -> RelayResult<PickOutcome> {
    if new_total.is_zero() {
        return Err(RelayError::validation("Invalid newTotal value"));
    }

    let tx_hash = send(
        gateway,
        picker.contract,
        IRandomPicker::setTotalItemsCall { newTotal: new_total },
    )
    .await?;

    tracing::info!(tx_hash = %tx_hash, new_total = %new_total, "Total items update submitted");

    Ok(PickOutcome::SetTotal {
        tx_hash,
        new_total: new_total.to_string(),
    })
}

/// Read the three state values concurrently. Any failed read fails the whole
/// snapshot.
pub async fn read_state(
    gateway: &dyn ContractGateway,
    picker: &PickerDeployment,
) -> RelayResult<PickerSnapshot> {
    let (total_items, last_picked_number, pick_count) = tokio::try_join!(
        read_u256(gateway, picker.contract, IRandomPicker::totalItemsCall {}),
        read_u256(gateway, picker.contract, IRandomPicker::lastPickedNumberCall {}),
        read_u256(gateway, picker.contract, IRandomPicker::pickCountCall {}),
    )?;

    Ok(PickerSnapshot {
        total_items: total_items.to_string(),
        last_picked_number: last_picked_number.to_string(),
        pick_count: pick_count.to_string(),
    })
}
