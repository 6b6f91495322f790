//! Astroboli daily post bot.
//!
//! This crate provides:
//! - Env-driven configuration and credential checks
//! - The single-run pipeline orchestrator
//! - The Instagram Graph delivery boundary
//! - Exit-code mapping for cron supervision

pub mod config;
pub mod delivery;
pub mod error;
pub mod pipeline;

pub use config::{BotConfig, RunOptions};
pub use delivery::InstagramPublisher;
pub use error::{BotError, BotResult};
pub use pipeline::{run, RunReport};
