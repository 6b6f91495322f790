//! Bot configuration.

use std::path::PathBuf;

use astro_media::DEFAULT_VOICE;
use astro_providers::ProviderConfig;

use crate::error::{BotError, BotResult};

const DEFAULT_WORK_DIR: &str = "/tmp/astroboli";

/// Bot configuration, read once from the environment at startup.
#[derive(Debug, Clone)]
pub struct BotConfig {
    /// Gemini API key for the daily brief
    pub gemini_api_key: Option<String>,
    /// Instagram Graph access token
    pub ig_access_token: Option<String>,
    /// Instagram business account id
    pub ig_user_id: Option<String>,
    /// Video provider credentials and poll schedule
    pub providers: ProviderConfig,
    /// Root directory for artifacts and per-run scratch space
    pub work_dir: PathBuf,
    /// Narration voice passed to edge-tts
    pub voice: String,
    /// Keep per-run scratch directories instead of deleting them
    pub keep_work: bool,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            gemini_api_key: None,
            ig_access_token: None,
            ig_user_id: None,
            providers: ProviderConfig::default(),
            work_dir: PathBuf::from(DEFAULT_WORK_DIR),
            voice: DEFAULT_VOICE.to_string(),
            keep_work: false,
        }
    }
}

impl BotConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self {
            gemini_api_key: non_empty_env("GEMINI_API_KEY"),
            ig_access_token: non_empty_env("IG_ACCESS_TOKEN"),
            ig_user_id: non_empty_env("IG_USER_ID"),
            providers: ProviderConfig::from_env(),
            work_dir: std::env::var("ASTRO_WORK_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_WORK_DIR)),
            voice: non_empty_env("ASTRO_VOICE").unwrap_or_else(|| DEFAULT_VOICE.to_string()),
            keep_work: std::env::var("ASTRO_KEEP_WORK")
                .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
                .unwrap_or(false),
        }
    }

    /// Fail fast when a credential this run will need is absent.
    ///
    /// Gemini is required unless the brief is mocked; the Instagram pair is
    /// required only when the run will actually deliver.
    pub fn require_credentials(&self, options: &RunOptions) -> BotResult<()> {
        if !options.mock && self.gemini_api_key.is_none() {
            return Err(BotError::MissingCredentials("GEMINI_API_KEY".to_string()));
        }
        if !options.dry_run {
            if self.ig_access_token.is_none() {
                return Err(BotError::MissingCredentials("IG_ACCESS_TOKEN".to_string()));
            }
            if self.ig_user_id.is_none() {
                return Err(BotError::MissingCredentials("IG_USER_ID".to_string()));
            }
        }
        Ok(())
    }
}

/// Per-invocation switches, set from the command line.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    /// Build every artifact but skip delivery
    pub dry_run: bool,
    /// Use the canned brief instead of calling Gemini
    pub mock: bool,
    /// Skip video generation and reel composition
    pub no_reel: bool,
}

fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
