use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::json;

/// Body of a mint request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MintRequest {
    pub address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MintResponse {
    pub success: bool,
    pub tx_hash: String,
}

/// Result of `pickRandom` or `setTotal`. Only the field matching `action` is set.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PickResponse {
    pub success: bool,
    pub action: String,
    pub tx_hash: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub picked_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_total: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PickerState {
    pub total_items: String,
    pub last_picked_number: String,
    pub pick_count: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateResponse {
    pub success: bool,
    pub data: PickerState,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: String,
}

/// Errors returned by [`RelayClient`].
#[derive(Debug, thiserror::Error)]
pub enum SdkError {
    /// Transport failure; the relay was not reached or did not answer.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    /// The relay answered with a non-2xx status.
    #[error("Relay returned {status}: {message}")]
    Api { status: u16, message: String },
    /// The response body did not have the expected shape.
    #[error("Unexpected response: {0}")]
    Decode(serde_json::Error),
}

pub struct RelayClient {
    client: Client,
    relay_url: String,
}

impl RelayClient {
    pub fn new(relay_url: &str) -> Self {
        Self {
            client: Client::new(),
            relay_url: relay_url.trim_end_matches('/').to_string(),
        }
    }

    /// Mint through the default deployment, or the named one.
    pub async fn mint(
        &self,
        deployment: Option<&str>,
        req: &MintRequest,
    ) -> Result<MintResponse, SdkError> {
        let url = match deployment {
            Some(name) => format!("{}/api/mint/{}", self.relay_url, name),
            None => format!("{}/api/mint", self.relay_url),
        };
        let resp = self.client.post(url).json(req).send().await?;
        decode(resp).await
    }

    /// Pick a random number and wait for the result.
    pub async fn pick_random(&self) -> Result<PickResponse, SdkError> {
        self.picker_action(json!({ "action": "pickRandom" })).await
    }

    /// Set the number of items the picker draws from.
    pub async fn set_total(&self, new_total: u64) -> Result<PickResponse, SdkError> {
        self.picker_action(json!({ "action": "setTotal", "newTotal": new_total }))
            .await
    }

    pub async fn state(&self) -> Result<StateResponse, SdkError> {
        let resp = self
            .client
            .get(format!("{}/api/random-picker", self.relay_url))
            .send()
            .await?;
        decode(resp).await
    }

    pub async fn health(&self) -> Result<HealthResponse, SdkError> {
        let resp = self
            .client
            .get(format!("{}/health", self.relay_url))
            .send()
            .await?;
        decode(resp).await
    }

    async fn picker_action(&self, body: serde_json::Value) -> Result<PickResponse, SdkError> {
        let resp = self
            .client
            .post(format!("{}/api/random-picker", self.relay_url))
            .json(&body)
            .send()
            .await?;
        decode(resp).await
    }
}

async fn decode<T: DeserializeOwned>(resp: Response) -> Result<T, SdkError> {
    let status = resp.status();
    let text = resp.text().await?;

    if !status.is_success() {
        let message = serde_json::from_str::<ErrorResponse>(&text)
            .map(|e| e.error)
            .unwrap_or(text);
        return Err(SdkError::Api {
            status: status.as_u16(),
            message,
        });
    }

    serde_json::from_str(&text).map_err(SdkError::Decode)
}
