//! Provider error types.

use astro_media::MediaError;
use thiserror::Error;

pub type ProviderResult<T> = Result<T, ProviderError>;

/// Failure of a single provider attempt.
///
/// The cascade logs these and advances to the next provider; none of them
/// ever aborts the pipeline.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("generation job failed: {0}")]
    JobFailed(String),

    #[error("gave up polling after {attempts} attempts")]
    PollTimeout { attempts: u32 },

    #[error("provider payload missing {0}")]
    MissingField(&'static str),

    #[error("payload rejected: {0}")]
    Rejected(#[from] MediaError),
}

impl ProviderError {
    pub fn job_failed(message: impl Into<String>) -> Self {
        Self::JobFailed(message.into())
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::PollTimeout { .. })
    }

    /// Fold a non-2xx response into an error, keeping a short body excerpt.
    pub(crate) async fn from_response(response: reqwest::Response) -> Self {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        Self::Http {
            status,
            body: truncate_body(&body),
        }
    }
}

fn truncate_body(body: &str) -> String {
    const MAX_CHARS: usize = 512;
    body.chars().take(MAX_CHARS).collect()
}
