//! Media processing for the Astroboli pipeline.
//!
//! FFmpeg/ffprobe wrappers, payload signature sniffing, image
//! normalization, reel composition, and narration synthesis. External tools
//! are invoked as CLI subprocesses with pre-flight checks.

pub mod command;
pub mod error;
pub mod narrate;
pub mod normalize;
pub mod probe;
pub mod reel;
pub mod sniff;

pub use command::{check_edge_tts, check_ffmpeg, check_ffprobe, FfmpegCommand, FfmpegRunner};
pub use error::{MediaError, MediaResult};
pub use narrate::{synthesize, NarrationRequest, DEFAULT_VOICE};
pub use normalize::{normalize_post_image, normalize_square};
pub use probe::{get_duration, probe_media, MediaInfo};
pub use reel::compose_reel;
pub use sniff::{sniff_kind, validate_video};
