//! Token minting through a drop contract's `claim`.

use alloy::primitives::{Address, Bytes, TxHash, U256};
use alloy::sol_types::SolCall;

use crate::blockchain::contracts::{IDropERC1155, IDropERC721, NATIVE_CURRENCY};
use crate::blockchain::ContractGateway;
use crate::config::{ClaimKind, MintDeploymentConfig};
use crate::observability::metrics;
use crate::relay::error::{RelayError, RelayResult};
use crate::relay::types::MintRequest;

/// A configured mint contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MintDeployment {
    pub name: String,
    pub network: String,
    pub contract: Address,
    pub kind: ClaimKind,
    /// Pinned token id. Wins over the request's `tokenId`.
    pub token_id: Option<U256>,
    pub price_per_token: U256,
    pub quantity_limit_per_wallet: U256,
}

impl MintDeployment {
    pub fn from_config(config: &MintDeploymentConfig) -> Result<Self, String> {
        let contract = config
            .contract_address
            .parse()
            .map_err(|e| format!("mint '{}': invalid contract address: {}", config.name, e))?;
        let price_per_token = U256::from_str_radix(&config.price_per_token_wei, 10)
            .map_err(|e| format!("mint '{}': invalid price: {}", config.name, e))?;

        Ok(Self {
            name: config.name.clone(),
            network: config.network.clone(),
            contract,
            kind: config.kind,
            token_id: config.token_id.map(U256::from),
            price_per_token,
            quantity_limit_per_wallet: U256::from(config.quantity_limit_per_wallet),
        })
    }

    /// Validate `request` and assemble the claim arguments.
    pub fn claim_parameters(&self, request: &MintRequest) -> RelayResult<ClaimParameters> {
        let address = request
            .address
            .as_deref()
            .map(str::trim)
            .filter(|a| !a.is_empty())
            .ok_or_else(|| RelayError::validation("No address provided"))?;
        let receiver: Address = address
            .parse()
            .map_err(|_| RelayError::validation(format!("Invalid address: {}", address)))?;

        let token_id = match self.kind {
            ClaimKind::Edition => Some(
                self.token_id
                    .or(request.token_id.map(U256::from))
                    .ok_or_else(|| RelayError::validation("No tokenId provided"))?,
            ),
            ClaimKind::Drop => None,
        };

        let quantity = U256::from(request.quantity.unwrap_or(1));
        if quantity.is_zero() {
            return Err(RelayError::validation("Quantity must be at least 1"));
        }
        if quantity > self.quantity_limit_per_wallet {
            return Err(RelayError::validation(format!(
                "Quantity exceeds per-wallet limit of {}",
                self.quantity_limit_per_wallet
            )));
        }

        Ok(ClaimParameters {
            receiver,
            token_id,
            quantity,
            currency: NATIVE_CURRENCY,
            price_per_token: self.price_per_token,
            quantity_limit_per_wallet: self.quantity_limit_per_wallet,
        })
    }
}

/// Arguments of a public `claim`: empty allowlist proof, native currency.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClaimParameters {
    pub receiver: Address,
    /// Present for editions, absent for ERC-721 drops.
    pub token_id: Option<U256>,
    pub quantity: U256,
    pub currency: Address,
    pub price_per_token: U256,
    pub quantity_limit_per_wallet: U256,
}

impl ClaimParameters {
    /// Native value to attach: price × quantity.
    pub fn payment_value(&self) -> RelayResult<U256> {
        self.price_per_token
            .checked_mul(self.quantity)
            .ok_or_else(|| RelayError::validation("Payment value overflows uint256"))
    }

    /// ABI-encoded `claim` call.
    pub fn calldata(&self) -> Bytes {
        let encoded = match self.token_id {
            Some(token_id) => IDropERC1155::claimCall {
                receiver: self.receiver,
                tokenId: token_id,
                quantity: self.quantity,
                currency: self.currency,
                pricePerToken: self.price_per_token,
                allowlistProof: IDropERC1155::AllowlistProof {
                    proof: Vec::new(),
                    quantityLimitPerWallet: self.quantity_limit_per_wallet,
                    pricePerToken: self.price_per_token,
                    currency: self.currency,
                },
                data: Bytes::new(),
            }
            .abi_encode(),
            None => IDropERC721::claimCall {
                receiver: self.receiver,
                quantity: self.quantity,
                currency: self.currency,
                pricePerToken: self.price_per_token,
                allowlistProof: IDropERC721::AllowlistProof {
                    proof: Vec::new(),
                    quantityLimitPerWallet: self.quantity_limit_per_wallet,
                    pricePerToken: self.price_per_token,
                    currency: self.currency,
                },
                data: Bytes::new(),
            }
            .abi_encode(),
        };
        Bytes::from(encoded)
    }
}

/// Validate, assemble and submit a claim. Nothing reaches the gateway when
/// validation fails.
pub async fn submit_mint(
    gateway: &dyn ContractGateway,
    deployment: &MintDeployment,
    request: &MintRequest,
) -> RelayResult<TxHash> {
    let params = deployment.claim_parameters(request)?;
    let value = params.payment_value()?;

    tracing::info!(
        deployment = %deployment.name,
        receiver = %params.receiver,
        token_id = ?params.token_id,
        quantity = %params.quantity,
        value = %value,
        "Submitting claim"
    );

    match gateway
        .send_transaction(deployment.contract, params.calldata(), value)
        .await
    {
        Ok(tx_hash) => {
            metrics::record_transaction("claim", "submitted");
            Ok(tx_hash)
        }
        Err(e) => {
            metrics::record_transaction("claim", "failed");
            Err(e.into())
        }
    }
}
