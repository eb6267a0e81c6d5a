//! Endpoint handlers.

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::http::response::success;
use crate::http::server::AppState;
use crate::relay::types::{MintReceipt, StateBody};
use crate::relay::{MintRequest, PickRequest, RelayError, RelayResult};

const MINT_METHODS: &str = "Only POST requests allowed";
const PICKER_METHODS: &str = "Only POST and GET requests allowed";

/// Decode a JSON body. An empty body is treated as `{}`.
fn parse_body<T: DeserializeOwned + Default>(body: &Bytes) -> RelayResult<T> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }
    serde_json::from_slice(body)
        .map_err(|e| RelayError::validation(format!("Invalid request body: {}", e)))
}

impl AppState {
    /// Log a failed operation and turn it into a response.
    fn reject(&self, operation: &'static str, err: RelayError) -> Response {
        if err.is_client_error() {
            tracing::warn!(operation, error = %err, "Request rejected");
        } else {
            tracing::error!(operation, error = %err, "Request failed");
        }

        if self.expose_internal_errors {
            err.into_response()
        } else {
            err.redacted().into_response()
        }
    }

    fn respond<T: Serialize>(&self, operation: &'static str, result: RelayResult<T>) -> Response {
        match result {
            Ok(body) => success(body),
            Err(e) => self.reject(operation, e),
        }
    }
}

async fn mint_with(state: &AppState, deployment: Option<&str>, body: &Bytes) -> Response {
    let result = async {
        let request: MintRequest = parse_body(body)?;
        let tx_hash = state.relay.submit_mint(deployment, &request).await?;
        tracing::info!(deployment, tx_hash = %tx_hash, "Mint submitted");
        Ok::<_, RelayError>(MintReceipt { tx_hash })
    }
    .await;
    state.respond("mint", result)
}

/// `POST /api/mint`
pub async fn mint(State(state): State<AppState>, body: Bytes) -> Response {
    mint_with(&state, None, &body).await
}

/// `POST /api/mint/{name}`
pub async fn mint_named(
    State(state): State<AppState>,
    Path(name): Path<String>,
    body: Bytes,
) -> Response {
    mint_with(&state, Some(&name), &body).await
}

pub async fn mint_method_not_allowed() -> Response {
    RelayError::MethodNotAllowed(MINT_METHODS).into_response()
}

/// `POST /api/random-picker`
pub async fn pick(State(state): State<AppState>, body: Bytes) -> Response {
    let result = async {
        let request: PickRequest = parse_body(&body)?;
        state.relay.pick(&request).await
    }
    .await;
    state.respond("pick", result)
}

/// `GET /api/random-picker`
pub async fn picker_state(State(state): State<AppState>) -> Response {
    let result = state
        .relay
        .picker_state()
        .await
        .map(|data| StateBody { data });
    state.respond("picker_state", result)
}

pub async fn picker_options() -> StatusCode {
    StatusCode::OK
}

pub async fn picker_method_not_allowed() -> Response {
    RelayError::MethodNotAllowed(PICKER_METHODS).into_response()
}

#[derive(Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub version: &'static str,
}

/// `GET /health`
pub async fn health() -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_body_is_default() {
        let request: MintRequest = parse_body(&Bytes::from_static(b"  \n")).unwrap();
        assert!(request.address.is_none());
    }

    #[test]
    fn test_malformed_body() {
        let err = parse_body::<PickRequest>(&Bytes::from_static(b"{not json")).unwrap_err();
        assert!(matches!(err, RelayError::Validation(_)));
        assert!(err.to_string().starts_with("Invalid request body: "));
    }
}
