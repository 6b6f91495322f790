//! Replicate text-to-video provider.
//!
//! Predictions are created against a model-scoped endpoint and polled via
//! the `urls.get` link the API hands back, so the poll URL is always
//! absolute and server-chosen.

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::error::{ProviderError, ProviderResult};
use crate::video::{download, http_client, PollStatus, Submission, VideoProvider, VideoRequest};

const DEFAULT_API_BASE: &str = "https://api.replicate.com/v1";

/// Model slug used for text-to-video predictions.
const VIDEO_MODEL: &str = "bytedance/seedance-1-lite";

/// Per-request deadline; polling supplies the long-haul patience.
const REQUEST_TIMEOUT_SECS: u64 = 60;

pub struct ReplicateVideo {
    api_token: String,
    api_base: String,
    client: reqwest::Client,
}

#[derive(Debug, Serialize)]
struct PredictionRequest<'a> {
    input: PredictionInput<'a>,
}

#[derive(Debug, Serialize)]
struct PredictionInput<'a> {
    prompt: &'a str,
    duration: u32,
    aspect_ratio: &'a str,
}

impl ReplicateVideo {
    pub fn new(api_token: impl Into<String>) -> Self {
        Self {
            api_token: api_token.into(),
            api_base: DEFAULT_API_BASE.to_string(),
            client: http_client(REQUEST_TIMEOUT_SECS),
        }
    }

    /// Point the provider at a different API base (tests use this).
    pub fn with_api_base(mut self, base: impl Into<String>) -> Self {
        self.api_base = base.into().trim_end_matches('/').to_string();
        self
    }

    fn predictions_endpoint(&self) -> String {
        format!("{}/models/{}/predictions", self.api_base, VIDEO_MODEL)
    }
}

#[async_trait]
impl VideoProvider for ReplicateVideo {
    fn name(&self) -> &'static str {
        "replicate"
    }

    async fn submit(&self, request: &VideoRequest) -> ProviderResult<Submission> {
        let body = PredictionRequest {
            input: PredictionInput {
                prompt: &request.prompt,
                duration: request.duration_secs,
                aspect_ratio: &request.aspect_ratio,
            },
        };

        let response = self
            .client
            .post(self.predictions_endpoint())
            .bearer_auth(&self.api_token)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ProviderError::from_response(response).await);
        }

        let prediction: Value = response.json().await?;
        debug!(
            "Replicate accepted prediction {:?}",
            prediction.get("id").and_then(serde_json::Value::as_str)
        );

        let poll_url = prediction
            .get("urls")
            .and_then(|urls| urls.get("get"))
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or(ProviderError::MissingField("poll url"))?;

        Ok(Submission::Job { poll_url })
    }

    async fn poll(&self, poll_url: &str) -> ProviderResult<PollStatus> {
        let response = self
            .client
            .get(poll_url)
            .bearer_auth(&self.api_token)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ProviderError::from_response(response).await);
        }

        let payload: Value = response.json().await?;
        let status = payload
            .get("status")
            .and_then(Value::as_str)
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        match status.as_str() {
            "succeeded" => {
                let asset_url = extract_output_url(&payload)
                    .ok_or(ProviderError::MissingField("asset url"))?;
                Ok(PollStatus::Completed { asset_url })
            }
            "failed" | "canceled" => Ok(PollStatus::Failed {
                reason: payload
                    .get("error")
                    .and_then(Value::as_str)
                    .unwrap_or("prediction failed")
                    .to_string(),
            }),
            _ => Ok(PollStatus::Pending),
        }
    }

    async fn fetch(&self, asset_url: &str) -> ProviderResult<Vec<u8>> {
        download(&self.client, asset_url).await
    }
}

/// The `output` field is a bare URL string or an array of them.
fn extract_output_url(payload: &Value) -> Option<String> {
    match payload.get("output")? {
        Value::String(url) => Some(url.clone()),
        Value::Array(items) => items
            .iter()
            .find_map(|item| item.as_str().map(str::to_string)),
        _ => None,
    }
}
