//! Raw and canonical media payloads.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Side length in pixels of the canonical square image.
pub const TARGET_IMAGE_SIZE: u32 = 1080;

/// JPEG quality used when encoding the canonical image.
pub const JPEG_QUALITY: u8 = 98;

/// Payloads below this size are rejected outright by the validator.
pub const MIN_MEDIA_BYTES: usize = 1000;

/// Unknown-signature payloads above this size are accepted as probable video.
pub const PROBABLE_VIDEO_BYTES: usize = 500_000;

/// Broad media classification derived from leading signature bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaKind {
    /// Still image container (JPEG, PNG, GIF, WebP)
    Image,
    /// Video container (MP4/MOV family, WebM/MKV, AVI, Ogg)
    Video,
    /// No recognized signature
    Unknown,
}

impl MediaKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaKind::Image => "image",
            MediaKind::Video => "video",
            MediaKind::Unknown => "unknown",
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Bytes fetched from a remote source plus their sniffed classification.
///
/// The kind is always derived from the payload itself, never from response
/// headers or status codes.
#[derive(Debug, Clone)]
pub struct RawMedia {
    pub bytes: Vec<u8>,
    pub kind: MediaKind,
}

impl RawMedia {
    pub fn new(bytes: Vec<u8>, kind: MediaKind) -> Self {
        Self { bytes, kind }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// A normalized square JPEG ready for publication.
///
/// Constructed only by the image normalizer, which guarantees
/// `width == height == TARGET_IMAGE_SIZE`.
#[derive(Debug, Clone)]
pub struct CanonicalImage {
    pub bytes: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

impl CanonicalImage {
    pub fn new(bytes: Vec<u8>, width: u32, height: u32) -> Self {
        Self {
            bytes,
            width,
            height,
        }
    }

    pub fn is_square(&self) -> bool {
        self.width == self.height
    }
}
