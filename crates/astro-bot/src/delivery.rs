//! Instagram Graph API delivery boundary.
//!
//! Two-phase image publish: create a media container referencing a public
//! image URL, give the Graph side a moment to ingest it, then publish the
//! container. Kept deliberately thin; everything interesting happened
//! earlier in the pipeline.

use std::time::Duration;

use serde::Deserialize;
use tracing::info;

use crate::error::{BotError, BotResult};

const DEFAULT_GRAPH_BASE: &str = "https://graph.facebook.com/v19.0";

/// Wait between container creation and publish while the Graph side
/// ingests the image.
const PROCESSING_WAIT_SECS: u64 = 10;

pub struct InstagramPublisher {
    access_token: String,
    user_id: String,
    graph_base: String,
    processing_wait: Duration,
    client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct GraphId {
    id: String,
}

impl InstagramPublisher {
    pub fn new(access_token: impl Into<String>, user_id: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            user_id: user_id.into(),
            graph_base: DEFAULT_GRAPH_BASE.to_string(),
            processing_wait: Duration::from_secs(PROCESSING_WAIT_SECS),
            client: reqwest::Client::new(),
        }
    }

    /// Point the publisher at a different Graph base (tests use this).
    pub fn with_graph_base(mut self, base: impl Into<String>) -> Self {
        self.graph_base = base.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_processing_wait(mut self, wait: Duration) -> Self {
        self.processing_wait = wait;
        self
    }

    /// Publish an image post and return the published media id.
    pub async fn publish_image(&self, image_url: &str, caption: &str) -> BotResult<String> {
        let container_id = self.create_container(image_url, caption).await?;
        info!("Created media container {}", container_id);

        tokio::time::sleep(self.processing_wait).await;

        let media_id = self.publish_container(&container_id).await?;
        info!("Published media {}", media_id);
        Ok(media_id)
    }

    async fn create_container(&self, image_url: &str, caption: &str) -> BotResult<String> {
        let url = format!("{}/{}/media", self.graph_base, self.user_id);
        let params = [
            ("image_url", image_url),
            ("caption", caption),
            ("access_token", self.access_token.as_str()),
        ];

        let response = self
            .client
            .post(&url)
            .form(&params)
            .send()
            .await
            .map_err(|e| BotError::delivery(format!("container request failed: {}", e)))?;

        parse_graph_id(response, "container").await
    }

    async fn publish_container(&self, container_id: &str) -> BotResult<String> {
        let url = format!("{}/{}/media_publish", self.graph_base, self.user_id);
        let params = [
            ("creation_id", container_id),
            ("access_token", self.access_token.as_str()),
        ];

        let response = self
            .client
            .post(&url)
            .form(&params)
            .send()
            .await
            .map_err(|e| BotError::delivery(format!("publish request failed: {}", e)))?;

        parse_graph_id(response, "publish").await
    }
}

async fn parse_graph_id(response: reqwest::Response, phase: &str) -> BotResult<String> {
    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        return Err(BotError::delivery(format!(
            "{} returned {}: {}",
            phase, status, body
        )));
    }

    let payload: GraphId = response
        .json()
        .await
        .map_err(|e| BotError::delivery(format!("{} response unreadable: {}", phase, e)))?;
    Ok(payload.id)
}
