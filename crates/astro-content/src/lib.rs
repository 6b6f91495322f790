//! Content generation for the Astroboli daily post.
//!
//! Talks to Gemini for the daily brief, then turns whatever text comes back
//! into a validated [`astro_models::ContentDraft`]. Extraction is built as a
//! chain of pure stages so every model output shape seen in production has a
//! deterministic landing spot.

pub mod error;
pub mod extract;
pub mod gemini;
pub mod prompt;
pub mod sanitize;

pub use error::{ContentError, ContentResult};
pub use extract::extract_draft;
pub use gemini::GeminiClient;
pub use prompt::build_daily_prompt;
pub use sanitize::build_narration_script;
