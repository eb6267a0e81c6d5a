//! Client for the chain relay HTTP API.

pub mod client;

pub use client::{
    HealthResponse, MintRequest, MintResponse, PickResponse, PickerState, RelayClient, SdkError,
    StateResponse,
};
