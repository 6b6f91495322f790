//! Provider trait and the sequential generation cascade.

use std::time::Duration;

use async_trait::async_trait;
use tracing::{info, warn};

use astro_media::sniff;
use astro_models::RawMedia;

use crate::config::{ProviderConfig, DEFAULT_POLL_ATTEMPTS, DEFAULT_POLL_INTERVAL};
use crate::error::{ProviderError, ProviderResult};
use crate::luma::LumaVideo;
use crate::pollinations::PollinationsVideo;
use crate::replicate::ReplicateVideo;

/// What the cascade asks a provider to generate.
#[derive(Debug, Clone)]
pub struct VideoRequest {
    pub prompt: String,
    pub duration_secs: u32,
    pub aspect_ratio: String,
}

impl VideoRequest {
    pub fn new(prompt: impl Into<String>, duration_secs: u32) -> Self {
        Self {
            prompt: prompt.into(),
            duration_secs,
            aspect_ratio: "9:16".to_string(),
        }
    }
}

/// Outcome of submitting a generation job.
#[derive(Debug, Clone)]
pub enum Submission {
    /// Job accepted; poll this URL until it reaches a terminal state.
    Job { poll_url: String },
    /// Synchronous provider; the asset is already addressable.
    Ready { asset_url: String },
}

/// One poll observation.
#[derive(Debug, Clone)]
pub enum PollStatus {
    Pending,
    Completed { asset_url: String },
    Failed { reason: String },
}

/// A single text-to-video backend.
#[async_trait]
pub trait VideoProvider: Send + Sync {
    fn name(&self) -> &'static str;

    async fn submit(&self, request: &VideoRequest) -> ProviderResult<Submission>;

    async fn poll(&self, poll_url: &str) -> ProviderResult<PollStatus>;

    async fn fetch(&self, asset_url: &str) -> ProviderResult<Vec<u8>>;
}

/// Terminal state of one provider attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptStatus {
    Succeeded,
    Failed,
    TimedOut,
}

impl AttemptStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Succeeded => "succeeded",
            Self::Failed => "failed",
            Self::TimedOut => "timed_out",
        }
    }
}

/// Strictly sequential provider cascade.
///
/// Providers run one at a time in construction order and the first clip
/// that survives signature validation wins. Every failure mode short of
/// that, from auth errors to poll timeouts to image bytes arriving where
/// a video should be, is logged and skipped. The caller only ever sees
/// `Some(clip)` or `None`.
pub struct VideoCascade {
    providers: Vec<Box<dyn VideoProvider>>,
    poll_interval: Duration,
    poll_attempts: u32,
}

impl VideoCascade {
    /// Build the production cascade: authenticated providers first when
    /// their credential is present, the free tier always last.
    pub fn from_config(config: &ProviderConfig) -> Self {
        let mut providers: Vec<Box<dyn VideoProvider>> = Vec::new();
        if let Some(token) = &config.replicate_token {
            providers.push(Box::new(ReplicateVideo::new(token.clone())));
        }
        if let Some(key) = &config.luma_key {
            providers.push(Box::new(LumaVideo::new(key.clone())));
        }
        providers.push(Box::new(PollinationsVideo::new()));

        Self {
            providers,
            poll_interval: config.poll_interval,
            poll_attempts: config.poll_attempts,
        }
    }

    /// Cascade over an explicit provider set.
    pub fn with_providers(providers: Vec<Box<dyn VideoProvider>>) -> Self {
        Self {
            providers,
            poll_interval: DEFAULT_POLL_INTERVAL,
            poll_attempts: DEFAULT_POLL_ATTEMPTS,
        }
    }

    pub fn with_poll_schedule(mut self, interval: Duration, attempts: u32) -> Self {
        self.poll_interval = interval;
        self.poll_attempts = attempts;
        self
    }

    pub fn provider_names(&self) -> Vec<&'static str> {
        self.providers.iter().map(|p| p.name()).collect()
    }

    /// Try each provider in order; `None` means all of them failed.
    pub async fn generate(&self, request: &VideoRequest) -> Option<RawMedia> {
        for provider in &self.providers {
            let name = provider.name();
            info!("Trying video provider: {}", name);

            match self.try_provider(provider.as_ref(), request).await {
                Ok(media) => {
                    info!(
                        "Provider {} delivered a {} byte clip ({})",
                        name,
                        media.len(),
                        AttemptStatus::Succeeded.as_str()
                    );
                    return Some(media);
                }
                Err(err) => {
                    let status = if err.is_timeout() {
                        AttemptStatus::TimedOut
                    } else {
                        AttemptStatus::Failed
                    };
                    warn!("Provider {} {}: {}", name, status.as_str(), err);
                }
            }
        }

        info!("All video providers exhausted, continuing without a clip");
        None
    }

    async fn try_provider(
        &self,
        provider: &dyn VideoProvider,
        request: &VideoRequest,
    ) -> ProviderResult<RawMedia> {
        let asset_url = match provider.submit(request).await? {
            Submission::Ready { asset_url } => asset_url,
            Submission::Job { poll_url } => self.await_job(provider, &poll_url).await?,
        };

        let bytes = provider.fetch(&asset_url).await?;
        sniff::validate_video(&bytes)?;
        let kind = sniff::sniff_kind(&bytes);
        Ok(RawMedia::new(bytes, kind))
    }

    async fn await_job(
        &self,
        provider: &dyn VideoProvider,
        poll_url: &str,
    ) -> ProviderResult<String> {
        for attempt in 1..=self.poll_attempts {
            match provider.poll(poll_url).await? {
                PollStatus::Completed { asset_url } => return Ok(asset_url),
                PollStatus::Failed { reason } => return Err(ProviderError::JobFailed(reason)),
                PollStatus::Pending => {
                    if attempt < self.poll_attempts {
                        tokio::time::sleep(self.poll_interval).await;
                    }
                }
            }
        }

        Err(ProviderError::PollTimeout {
            attempts: self.poll_attempts,
        })
    }
}

/// GET an asset URL and return its raw bytes.
pub(crate) async fn download(client: &reqwest::Client, url: &str) -> ProviderResult<Vec<u8>> {
    let response = client.get(url).send().await?;
    if !response.status().is_success() {
        return Err(ProviderError::from_response(response).await);
    }
    Ok(response.bytes().await?.to_vec())
}

/// Shared client with a request deadline so a stalled download cannot hang
/// the cascade past its poll budget.
pub(crate) fn http_client(timeout_secs: u64) -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .build()
        .unwrap_or_else(|_| reqwest::Client::new())
}
