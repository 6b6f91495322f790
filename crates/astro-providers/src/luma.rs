//! Luma Dream Machine text-to-video provider.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ProviderError, ProviderResult};
use crate::video::{download, http_client, PollStatus, Submission, VideoProvider, VideoRequest};

const DEFAULT_API_BASE: &str = "https://api.lumalabs.ai";

const GENERATION_MODEL: &str = "ray-2";
const RESOLUTION: &str = "720p";

const REQUEST_TIMEOUT_SECS: u64 = 60;

pub struct LumaVideo {
    api_key: String,
    api_base: String,
    client: reqwest::Client,
}

#[derive(Debug, Serialize)]
struct GenerationRequest<'a> {
    prompt: &'a str,
    model: &'a str,
    resolution: &'a str,
    duration: &'a str,
    aspect_ratio: &'a str,
}

#[derive(Debug, Deserialize)]
struct Generation {
    id: Option<String>,
    state: Option<String>,
    failure_reason: Option<String>,
    assets: Option<GenerationAssets>,
}

#[derive(Debug, Deserialize)]
struct GenerationAssets {
    video: Option<String>,
}

impl LumaVideo {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_base: DEFAULT_API_BASE.to_string(),
            client: http_client(REQUEST_TIMEOUT_SECS),
        }
    }

    /// Point the provider at a different API base (tests use this).
    pub fn with_api_base(mut self, base: impl Into<String>) -> Self {
        self.api_base = base.into().trim_end_matches('/').to_string();
        self
    }

    fn generations_endpoint(&self) -> String {
        format!("{}/dream-machine/v1/generations", self.api_base)
    }

    /// Dream Machine only accepts fixed duration steps.
    fn duration_label(duration_secs: u32) -> &'static str {
        if duration_secs > 5 {
            "9s"
        } else {
            "5s"
        }
    }
}

#[async_trait]
impl VideoProvider for LumaVideo {
    fn name(&self) -> &'static str {
        "luma"
    }

    async fn submit(&self, request: &VideoRequest) -> ProviderResult<Submission> {
        let body = GenerationRequest {
            prompt: &request.prompt,
            model: GENERATION_MODEL,
            resolution: RESOLUTION,
            duration: Self::duration_label(request.duration_secs),
            aspect_ratio: &request.aspect_ratio,
        };

        let response = self
            .client
            .post(self.generations_endpoint())
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ProviderError::from_response(response).await);
        }

        let generation: Generation = response.json().await?;
        let id = generation
            .id
            .ok_or(ProviderError::MissingField("generation id"))?;
        debug!("Luma accepted generation {}", id);

        Ok(Submission::Job {
            poll_url: format!("{}/{}", self.generations_endpoint(), id),
        })
    }

    async fn poll(&self, poll_url: &str) -> ProviderResult<PollStatus> {
        let response = self
            .client
            .get(poll_url)
            .bearer_auth(&self.api_key)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ProviderError::from_response(response).await);
        }

        let generation: Generation = response.json().await?;
        let state = generation.state.unwrap_or_default();

        match state.as_str() {
            "completed" => {
                let asset_url = generation
                    .assets
                    .and_then(|assets| assets.video)
                    .ok_or(ProviderError::MissingField("asset url"))?;
                Ok(PollStatus::Completed { asset_url })
            }
            "failed" => Ok(PollStatus::Failed {
                reason: generation
                    .failure_reason
                    .unwrap_or_else(|| "generation failed".to_string()),
            }),
            // queued and dreaming both mean keep waiting.
            _ => Ok(PollStatus::Pending),
        }
    }

    async fn fetch(&self, asset_url: &str) -> ProviderResult<Vec<u8>> {
        download(&self.client, asset_url).await
    }
}
