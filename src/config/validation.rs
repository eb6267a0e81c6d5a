//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check referential integrity (deployments reference existing networks)
//! - Validate value ranges (timeouts > 0, addresses and prices parse)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: RelayConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashSet;
use std::net::SocketAddr;

use alloy::primitives::{Address, U256};

use crate::config::schema::{ClaimKind, RelayConfig};

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path of the offending field, e.g. `mint[1].network`.
    pub field: String,
    pub message: String,
}

impl ValidationError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

fn is_http_url(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

/// Validate a parsed configuration.
pub fn validate_config(config: &RelayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::new(
            "listener.bind_address",
            format!("'{}' is not a socket address", config.listener.bind_address),
        ));
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::new(
            "observability.metrics_address",
            format!("'{}' is not a socket address", config.observability.metrics_address),
        ));
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::new("timeouts.request_secs", "must be greater than 0"));
    }

    let confirmation = &config.confirmation;
    if confirmation.timeout_secs == 0 {
        errors.push(ValidationError::new("confirmation.timeout_secs", "must be greater than 0"));
    }
    if confirmation.timeout_secs >= config.timeouts.request_secs {
        errors.push(ValidationError::new(
            "confirmation.timeout_secs",
            "must be shorter than timeouts.request_secs",
        ));
    }
    if confirmation.base_delay_ms == 0 {
        errors.push(ValidationError::new("confirmation.base_delay_ms", "must be greater than 0"));
    }
    if confirmation.max_delay_ms < confirmation.base_delay_ms {
        errors.push(ValidationError::new(
            "confirmation.max_delay_ms",
            "must not be smaller than base_delay_ms",
        ));
    }

    let mut network_names = HashSet::new();
    for (i, network) in config.networks.iter().enumerate() {
        let prefix = format!("networks[{}]", i);
        if network.name.is_empty() {
            errors.push(ValidationError::new(format!("{}.name", prefix), "must not be empty"));
        } else if !network_names.insert(network.name.as_str()) {
            errors.push(ValidationError::new(
                format!("{}.name", prefix),
                format!("duplicate network '{}'", network.name),
            ));
        }
        if !is_http_url(&network.rpc_url) {
            errors.push(ValidationError::new(
                format!("{}.rpc_url", prefix),
                "RPC URLs must use http or https",
            ));
        }
        for (j, url) in network.failover_urls.iter().enumerate() {
            if !is_http_url(url) {
                errors.push(ValidationError::new(
                    format!("{}.failover_urls[{}]", prefix, j),
                    "RPC URLs must use http or https",
                ));
            }
        }
        if network.chain_id == 0 {
            errors.push(ValidationError::new(format!("{}.chain_id", prefix), "must be greater than 0"));
        }
        if network.rpc_timeout_secs == 0 {
            errors.push(ValidationError::new(
                format!("{}.rpc_timeout_secs", prefix),
                "must be greater than 0",
            ));
        }
    }

    let mut mint_names = HashSet::new();
    for (i, mint) in config.mint.iter().enumerate() {
        let prefix = format!("mint[{}]", i);
        if mint.name.is_empty() {
            errors.push(ValidationError::new(format!("{}.name", prefix), "must not be empty"));
        } else if !mint_names.insert(mint.name.as_str()) {
            errors.push(ValidationError::new(
                format!("{}.name", prefix),
                format!("duplicate mint deployment '{}'", mint.name),
            ));
        }
        if !network_names.contains(mint.network.as_str()) {
            errors.push(ValidationError::new(
                format!("{}.network", prefix),
                format!("unknown network '{}'", mint.network),
            ));
        }
        if mint.contract_address.parse::<Address>().is_err() {
            errors.push(ValidationError::new(
                format!("{}.contract_address", prefix),
                format!("'{}' is not an address", mint.contract_address),
            ));
        }
        if U256::from_str_radix(&mint.price_per_token_wei, 10).is_err() {
            errors.push(ValidationError::new(
                format!("{}.price_per_token_wei", prefix),
                "must be a decimal integer",
            ));
        }
        if mint.quantity_limit_per_wallet == 0 {
            errors.push(ValidationError::new(
                format!("{}.quantity_limit_per_wallet", prefix),
                "must be greater than 0",
            ));
        }
        if mint.kind == ClaimKind::Drop && mint.token_id.is_some() {
            errors.push(ValidationError::new(
                format!("{}.token_id", prefix),
                "drop contracts do not take a token id",
            ));
        }
    }

    if let Some(picker) = &config.random_picker {
        if !network_names.contains(picker.network.as_str()) {
            errors.push(ValidationError::new(
                "random_picker.network",
                format!("unknown network '{}'", picker.network),
            ));
        }
        if picker.contract_address.parse::<Address>().is_err() {
            errors.push(ValidationError::new(
                "random_picker.contract_address",
                format!("'{}' is not an address", picker.contract_address),
            ));
        }

        // A pick is gas check + send + confirmation + read, each RPC step
        // possibly walking every endpoint.
        let network = config.networks.iter().find(|n| n.name == picker.network);
        if let Some(network) = network {
            let endpoints = 1 + network.failover_urls.len() as u64;
            let worst_case = confirmation
                .timeout_secs
                .saturating_add(3u64.saturating_mul(network.rpc_timeout_secs).saturating_mul(endpoints));
            if confirmation.timeout_secs < config.timeouts.request_secs
                && worst_case >= config.timeouts.request_secs
            {
                errors.push(ValidationError::new(
                    "timeouts.request_secs",
                    format!(
                        "a pick on '{}' may take up to {}s, more than the {}s request timeout",
                        network.name, worst_case, config.timeouts.request_secs
                    ),
                ));
            }
        }
    }

    if config.mint.is_empty() && config.random_picker.is_none() {
        errors.push(ValidationError::new(
            "mint",
            "at least one mint deployment or a random_picker is required",
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
