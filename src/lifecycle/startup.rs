//! Startup orchestration.
//!
//! Builds the relay from a validated configuration: signer from the
//! environment, one gateway per network, then the deployments. Any error is
//! fatal.

use std::sync::Arc;
use thiserror::Error;

use crate::blockchain::{BlockchainError, RpcGateway, Wallet};
use crate::config::RelayConfig;
use crate::relay::{MintDeployment, PickerDeployment, Relay};

/// Environment variable substituted for `{api_key}` in RPC URLs.
pub const RPC_API_KEY_ENV_VAR: &str = "RELAY_RPC_API_KEY";

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("Signer unavailable: {0}")]
    Wallet(#[source] BlockchainError),

    #[error("Network '{name}' unavailable: {source}")]
    Network {
        name: String,
        #[source]
        source: BlockchainError,
    },

    #[error("Invalid deployment: {0}")]
    Deployment(String),
}

/// Build the relay using the signer and API key from the environment.
pub async fn build_relay(config: &RelayConfig) -> Result<Relay, StartupError> {
    let wallet = Wallet::from_env().map_err(StartupError::Wallet)?;
    let api_key = std::env::var(RPC_API_KEY_ENV_VAR).ok();
    build_relay_with(config, &wallet, api_key.as_deref()).await
}

/// Build the relay with an explicit signer.
pub async fn build_relay_with(
    config: &RelayConfig,
    wallet: &Wallet,
    api_key: Option<&str>,
) -> Result<Relay, StartupError> {
    let mut relay = Relay::new(config.confirmation.clone());

    for network in &config.networks {
        let gateway = RpcGateway::connect(network, wallet, api_key)
            .await
            .map_err(|source| StartupError::Network {
                name: network.name.clone(),
                source,
            })?;
        tracing::info!(network = %network.name, chain_id = network.chain_id, "Network ready");
        relay = relay.with_network(network.name.clone(), Arc::new(gateway));
    }

    for mint in &config.mint {
        let deployment = MintDeployment::from_config(mint).map_err(StartupError::Deployment)?;
        tracing::info!(
            name = %deployment.name,
            network = %deployment.network,
            contract = %deployment.contract,
            "Mint deployment registered"
        );
        relay = relay.with_mint(deployment);
    }

    if let Some(picker) = &config.random_picker {
        let deployment = PickerDeployment::from_config(picker).map_err(StartupError::Deployment)?;
        tracing::info!(
            network = %deployment.network,
            contract = %deployment.contract,
            "Random picker registered"
        );
        relay = relay.with_picker(deployment);
    }

    Ok(relay)
}
