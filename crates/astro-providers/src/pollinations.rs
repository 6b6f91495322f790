//! Pollinations free-tier providers for images and video.
//!
//! Pollinations endpoints are synchronous: the URL encodes the whole job
//! and the GET that fetches it runs the generation, so these clients carry
//! a much longer request deadline than the polling providers.

use async_trait::async_trait;
use rand::Rng;
use tracing::debug;

use astro_models::media::TARGET_IMAGE_SIZE;

use crate::error::{ProviderError, ProviderResult};
use crate::video::{download, http_client, PollStatus, Submission, VideoProvider, VideoRequest};

const DEFAULT_IMAGE_BASE: &str = "https://image.pollinations.ai";
const DEFAULT_VIDEO_BASE: &str = "https://video.pollinations.ai";

/// Generation happens inside the GET, so allow it three minutes.
const FETCH_TIMEOUT_SECS: u64 = 180;

const VIDEO_MODEL: &str = "seedance";
const IMAGE_MODEL: &str = "flux";

/// Seedance accepts clip lengths in this window.
const MIN_CLIP_SECS: u32 = 5;
const MAX_CLIP_SECS: u32 = 10;

fn random_seed() -> u32 {
    rand::rng().random_range(1..=1_000_000)
}

/// Synchronous text-to-video endpoint. `submit` is `Ready` immediately and
/// the cascade goes straight to `fetch`.
pub struct PollinationsVideo {
    video_base: String,
    client: reqwest::Client,
}

impl PollinationsVideo {
    pub fn new() -> Self {
        Self {
            video_base: DEFAULT_VIDEO_BASE.to_string(),
            client: http_client(FETCH_TIMEOUT_SECS),
        }
    }

    /// Point the provider at a different endpoint (tests use this).
    pub fn with_video_base(mut self, base: impl Into<String>) -> Self {
        self.video_base = base.into().trim_end_matches('/').to_string();
        self
    }

    fn video_url(&self, request: &VideoRequest, seed: u32) -> String {
        format!(
            "{}/text-to-video/{}?model={}&duration={}&seed={}",
            self.video_base,
            urlencoding::encode(&request.prompt),
            VIDEO_MODEL,
            request.duration_secs.clamp(MIN_CLIP_SECS, MAX_CLIP_SECS),
            seed
        )
    }
}

impl Default for PollinationsVideo {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl VideoProvider for PollinationsVideo {
    fn name(&self) -> &'static str {
        "pollinations"
    }

    async fn submit(&self, request: &VideoRequest) -> ProviderResult<Submission> {
        let asset_url = self.video_url(request, random_seed());
        debug!("Pollinations video URL: {}", asset_url);
        Ok(Submission::Ready { asset_url })
    }

    async fn poll(&self, _poll_url: &str) -> ProviderResult<PollStatus> {
        // Never reached: submission is always Ready.
        Err(ProviderError::job_failed("pollinations does not poll"))
    }

    async fn fetch(&self, asset_url: &str) -> ProviderResult<Vec<u8>> {
        download(&self.client, asset_url).await
    }
}

/// Raw fetched image plus the public URL that produced it. Delivery passes
/// the URL to the Graph API while the bytes feed local normalization.
#[derive(Debug, Clone)]
pub struct FetchedImage {
    pub url: String,
    pub bytes: Vec<u8>,
}

/// Synchronous still-image endpoint.
pub struct PollinationsImage {
    image_base: String,
    client: reqwest::Client,
}

impl PollinationsImage {
    pub fn new() -> Self {
        Self {
            image_base: DEFAULT_IMAGE_BASE.to_string(),
            client: http_client(FETCH_TIMEOUT_SECS),
        }
    }

    /// Point the provider at a different endpoint (tests use this).
    pub fn with_image_base(mut self, base: impl Into<String>) -> Self {
        self.image_base = base.into().trim_end_matches('/').to_string();
        self
    }

    /// Deterministic URL for a prompt and seed.
    pub fn image_url(&self, prompt: &str, seed: u32) -> String {
        format!(
            "{}/prompt/{}?width={}&height={}&seed={}&nologo=true&model={}",
            self.image_base,
            urlencoding::encode(prompt),
            TARGET_IMAGE_SIZE,
            TARGET_IMAGE_SIZE,
            seed,
            IMAGE_MODEL
        )
    }

    /// Generate and download a fresh image for the prompt.
    pub async fn fetch_image(&self, prompt: &str) -> ProviderResult<FetchedImage> {
        let url = self.image_url(prompt, random_seed());
        debug!("Pollinations image URL: {}", url);
        let bytes = download(&self.client, &url).await?;
        Ok(FetchedImage { url, bytes })
    }
}

impl Default for PollinationsImage {
    fn default() -> Self {
        Self::new()
    }
}
