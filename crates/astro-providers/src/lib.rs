//! Text-to-video providers and the cascade that tries them in order.
//!
//! Each provider implements [`VideoProvider`]; the [`VideoCascade`] walks
//! them sequentially and hands back the first clip that passes signature
//! validation. Exhausting the cascade is not an error, so callers can
//! always fall back to an image-only post.

pub mod config;
pub mod error;
pub mod luma;
pub mod pollinations;
pub mod replicate;
pub mod video;

pub use config::ProviderConfig;
pub use error::{ProviderError, ProviderResult};
pub use luma::LumaVideo;
pub use pollinations::{FetchedImage, PollinationsImage, PollinationsVideo};
pub use replicate::ReplicateVideo;
pub use video::{PollStatus, Submission, VideoCascade, VideoProvider, VideoRequest};
