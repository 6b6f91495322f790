//! Content pipeline error types.

use thiserror::Error;

pub type ContentResult<T> = Result<T, ContentError>;

#[derive(Debug, Error)]
pub enum ContentError {
    /// The model returned nothing extraction could salvage. The only way
    /// extraction itself can fail.
    #[error("model output is empty")]
    EmptyModelOutput,

    #[error("Gemini API error: {0}")]
    Api(String),
}

impl ContentError {
    pub fn api(msg: impl Into<String>) -> Self {
        Self::Api(msg.into())
    }
}
