//! Composition parameters for the vertical reel.

use crate::media::RawMedia;

/// Output reel width in pixels.
pub const REEL_WIDTH: u32 = 1080;

/// Output reel height in pixels.
pub const REEL_HEIGHT: u32 = 1920;

/// Seconds of video kept past the end of the narration track.
pub const NARRATION_BUFFER_SECS: f64 = 1.0;

/// Reel length in seconds when no narration track is available.
pub const DEFAULT_REEL_SECS: f64 = 10.0;

/// Everything the composer needs for a single render. Consumed once.
#[derive(Debug)]
pub struct RenderJob {
    /// Source clip, already validated as video.
    pub video: RawMedia,

    /// Narration audio (MP3) when synthesis succeeded.
    pub narration: Option<Vec<u8>>,

    /// Measured narration length in seconds.
    pub narration_secs: Option<f64>,

    /// Final artifact length: narration plus buffer, or the default.
    pub target_secs: f64,
}

impl RenderJob {
    /// Derive the target duration from the narration track if present.
    pub fn new(video: RawMedia, narration: Option<(Vec<u8>, f64)>) -> Self {
        match narration {
            Some((bytes, secs)) => Self {
                video,
                narration: Some(bytes),
                narration_secs: Some(secs),
                target_secs: secs + NARRATION_BUFFER_SECS,
            },
            None => Self {
                video,
                narration: None,
                narration_secs: None,
                target_secs: DEFAULT_REEL_SECS,
            },
        }
    }

    pub fn has_narration(&self) -> bool {
        self.narration.is_some()
    }
}
