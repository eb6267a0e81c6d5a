//! Request and response bodies of the relay API.

use alloy::primitives::{TxHash, U256};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::relay::error::{RelayError, RelayResult};

/// Body of `POST /api/mint`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MintRequest {
    /// Recipient of the minted token.
    #[serde(alias = "recipientAddress")]
    pub address: Option<String>,
    /// Token id, for editions that do not pin one.
    pub token_id: Option<u64>,
    /// Defaults to 1.
    pub quantity: Option<u64>,
}

/// Body of `POST /api/random-picker`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PickRequest {
    pub action: Option<String>,
    /// Number or numeric string.
    pub new_total: Option<Value>,
}

/// A validated picker action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickAction {
    PickRandom,
    SetTotal(U256),
}

const INVALID_ACTION: &str =
    "Invalid action. Use \"pickRandom\" or \"setTotal\" with newTotal parameter";
const INVALID_NEW_TOTAL: &str = "Invalid newTotal value";

impl PickRequest {
    /// Validate the request into an action.
    pub fn action(&self) -> RelayResult<PickAction> {
        match (self.action.as_deref(), &self.new_total) {
            (Some("pickRandom"), _) => Ok(PickAction::PickRandom),
            (Some("setTotal"), Some(value)) if is_given(value) => {
                parse_new_total(value).map(PickAction::SetTotal)
            }
            _ => Err(RelayError::validation(INVALID_ACTION)),
        }
    }
}

/// `newTotal` counts as missing when it is null, false, zero or empty.
fn is_given(value: &Value) -> bool {
    match value {
        Value::Null | Value::Bool(false) => false,
        Value::Number(n) => n.as_f64() != Some(0.0),
        Value::String(s) => !s.is_empty(),
        _ => true,
    }
}

/// Accept a positive integer given as a JSON number or a decimal string.
/// Integral floats such as `50.0` are whole numbers too.
fn parse_new_total(value: &Value) -> RelayResult<U256> {
    let parsed = match value {
        Value::Number(n) => n.as_u64().map(U256::from).or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && *f > 0.0 && *f < u128::MAX as f64)
                .map(|f| U256::from(f as u128))
        }),
        Value::String(s) => U256::from_str_radix(s.trim(), 10).ok(),
        _ => None,
    };

    match parsed {
        Some(total) if !total.is_zero() => Ok(total),
        _ => Err(RelayError::validation(INVALID_NEW_TOTAL)),
    }
}

/// Successful response envelope: `{"success": true, ...body}`.
#[derive(Debug, Clone, Serialize)]
pub struct Success<T> {
    pub success: bool,
    #[serde(flatten)]
    pub body: T,
}

impl<T> Success<T> {
    pub fn new(body: T) -> Self {
        Self { success: true, body }
    }
}

/// Result of a mint submission.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MintReceipt {
    pub tx_hash: TxHash,
}

/// Result of a picker write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all_fields = "camelCase")]
pub enum PickOutcome {
    #[serde(rename = "pickRandom")]
    PickRandom { tx_hash: TxHash, picked_number: String },
    #[serde(rename = "setTotal")]
    SetTotal { tx_hash: TxHash, new_total: String },
}

/// Picker state. Values are decimal strings, they may exceed 2^53.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PickerSnapshot {
    pub total_items: String,
    pub last_picked_number: String,
    pub pick_count: String,
}

/// `GET /api/random-picker` body.
#[derive(Debug, Clone, Serialize)]
pub struct StateBody {
    pub data: PickerSnapshot,
}

/// `{"error": ...}`
#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody {
    pub error: String,
}
