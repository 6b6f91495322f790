//! Shared data models for the Astroboli pipeline.
//!
//! This crate provides the types passed between pipeline stages:
//! - Content drafts and their validation rules
//! - Raw and canonical media payloads
//! - Reel composition parameters
//! - Brand constants

pub mod branding;
pub mod draft;
pub mod media;
pub mod render;

// Re-export common types
pub use draft::{ContentDraft, DraftError};
pub use media::{CanonicalImage, MediaKind, RawMedia};
pub use render::RenderJob;
