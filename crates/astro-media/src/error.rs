//! Error types for media operations.

use std::path::PathBuf;
use thiserror::Error;

use astro_models::MediaKind;

/// Result type for media operations.
pub type MediaResult<T> = Result<T, MediaError>;

/// Errors that can occur during media processing.
#[derive(Debug, Error)]
pub enum MediaError {
    #[error("FFmpeg not found in PATH")]
    FfmpegNotFound,

    #[error("FFprobe not found in PATH")]
    FfprobeNotFound,

    #[error("edge-tts not found in PATH")]
    EdgeTtsNotFound,

    #[error("FFmpeg command failed: {message}")]
    FfmpegFailed {
        message: String,
        stderr: Option<String>,
        exit_code: Option<i32>,
    },

    #[error("FFprobe command failed: {message}")]
    FfprobeFailed {
        message: String,
        stderr: Option<String>,
    },

    #[error("Narration synthesis failed: {message}")]
    NarrationFailed { message: String },

    #[error("Image decode failed: {0}")]
    Decode(String),

    #[error("Image encode failed: {0}")]
    Encode(String),

    #[error("Media payload too small: {0} bytes")]
    TooSmall(usize),

    #[error("Expected video, payload sniffed as {0}")]
    NotVideo(MediaKind),

    #[error("Unrecognized media signature in {0} byte payload")]
    UnknownSignature(usize),

    #[error("Invalid video file: {0}")]
    InvalidVideo(String),

    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Operation timed out after {0} seconds")]
    Timeout(u64),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),
}

impl MediaError {
    /// Create an FFmpeg failure error.
    pub fn ffmpeg_failed(
        message: impl Into<String>,
        stderr: Option<String>,
        exit_code: Option<i32>,
    ) -> Self {
        Self::FfmpegFailed {
            message: message.into(),
            stderr,
            exit_code,
        }
    }

    /// Create a narration failure error.
    pub fn narration_failed(message: impl Into<String>) -> Self {
        Self::NarrationFailed {
            message: message.into(),
        }
    }

    /// True when the payload was refused by signature validation.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            MediaError::TooSmall(_) | MediaError::NotVideo(_) | MediaError::UnknownSignature(_)
        )
    }
}
