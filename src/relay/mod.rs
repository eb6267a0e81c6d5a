//! Transaction relay.
//!
//! # Data Flow
//! ```text
//! HTTP body
//!     → types.rs (MintRequest / PickRequest, field validation)
//!     → mint.rs / picker.rs (call assembly)
//!     → ContractGateway of the deployment's network (sign + send / eth_call)
//!     → picker only: confirmation polling, then read-back
//!     → TxHash / PickOutcome / PickerSnapshot
//! ```
//!
//! Deployments and gateways are fixed at startup. Requests share nothing
//! mutable.

pub mod error;
pub mod mint;
pub mod picker;
pub mod types;

use alloy::primitives::TxHash;
use std::collections::HashMap;
use std::sync::Arc;

use crate::blockchain::{BlockchainError, ContractGateway};
use crate::config::ConfirmationConfig;

pub use error::{RelayError, RelayResult};
pub use mint::{ClaimParameters, MintDeployment};
pub use picker::PickerDeployment;
pub use types::{MintRequest, PickAction, PickOutcome, PickRequest, PickerSnapshot};

/// Deployments plus the gateways that reach them.
#[derive(Clone, Default)]
pub struct Relay {
    gateways: HashMap<String, Arc<dyn ContractGateway>>,
    mints: Vec<MintDeployment>,
    picker: Option<PickerDeployment>,
    confirmation: ConfirmationConfig,
}

impl Relay {
    pub fn new(confirmation: ConfirmationConfig) -> Self {
        Self {
            confirmation,
            ..Self::default()
        }
    }

    /// Register the gateway for a network name.
    pub fn with_network(mut self, name: impl Into<String>, gateway: Arc<dyn ContractGateway>) -> Self {
        self.gateways.insert(name.into(), gateway);
        self
    }

    /// Add a mint deployment. The first one added is the default.
    pub fn with_mint(mut self, deployment: MintDeployment) -> Self {
        self.mints.push(deployment);
        self
    }

    pub fn with_picker(mut self, picker: PickerDeployment) -> Self {
        self.picker = Some(picker);
        self
    }

    fn gateway(&self, network: &str) -> RelayResult<&dyn ContractGateway> {
        self.gateways
            .get(network)
            .map(|g| g.as_ref())
            .ok_or_else(|| {
                BlockchainError::NotAvailable(format!("no gateway for network '{}'", network)).into()
            })
    }

    /// Look up a mint deployment by name, or the default one.
    pub fn mint_deployment(&self, name: Option<&str>) -> RelayResult<&MintDeployment> {
        match name {
            Some(name) => self
                .mints
                .iter()
                .find(|m| m.name == name)
                .ok_or_else(|| RelayError::NotFound(format!("Unknown mint deployment '{}'", name))),
            None => self
                .mints
                .first()
                .ok_or_else(|| RelayError::NotFound("No mint deployment configured".to_string())),
        }
    }

    fn picker(&self) -> RelayResult<&PickerDeployment> {
        self.picker
            .as_ref()
            .ok_or_else(|| RelayError::NotFound("Random picker not configured".to_string()))
    }

    /// Mint through the named (or default) deployment.
    pub async fn submit_mint(&self, name: Option<&str>, request: &MintRequest) -> RelayResult<TxHash> {
        let deployment = self.mint_deployment(name)?;
        let gateway = self.gateway(&deployment.network)?;
        mint::submit_mint(gateway, deployment, request).await
    }

    /// Run a validated picker write.
    pub async fn pick(&self, request: &PickRequest) -> RelayResult<PickOutcome> {
        let action = request.action()?;
        let picker = self.picker()?;
        let gateway = self.gateway(&picker.network)?;

        match action {
            PickAction::PickRandom => picker::pick_random(gateway, picker, &self.confirmation).await,
            PickAction::SetTotal(new_total) => picker::set_total(gateway, picker, new_total).await,
        }
    }

    /// Snapshot of the picker's public state.
    pub async fn picker_state(&self) -> RelayResult<PickerSnapshot> {
        let picker = self.picker()?;
        let gateway = self.gateway(&picker.network)?;
        picker::read_state(gateway, picker).await
    }

    /// Names of the configured mint deployments, default first.
    pub fn mint_names(&self) -> impl Iterator<Item = &str> {
        self.mints.iter().map(|m| m.name.as_str())
    }

    pub fn has_picker(&self) -> bool {
        self.picker.is_some()
    }
}

impl std::fmt::Debug for Relay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Relay")
            .field("networks", &self.gateways.keys().collect::<Vec<_>>())
            .field("mints", &self.mints)
            .field("picker", &self.picker)
            .field("confirmation", &self.confirmation)
            .finish()
    }
}
