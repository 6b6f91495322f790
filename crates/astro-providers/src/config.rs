//! Provider credentials and poll scheduling.

use std::time::Duration;

/// Seconds between generation status polls.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);

/// Poll budget per provider. 60 attempts at 5s is five minutes.
pub const DEFAULT_POLL_ATTEMPTS: u32 = 60;

/// Credentials read once at startup and passed in explicitly.
///
/// A provider joins the cascade only when its credential is present;
/// blank values count as absent. Pollinations needs no credential and is
/// always enrolled last.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub replicate_token: Option<String>,
    pub luma_key: Option<String>,
    pub poll_interval: Duration,
    pub poll_attempts: u32,
}

impl ProviderConfig {
    pub fn from_env() -> Self {
        Self {
            replicate_token: non_empty_env("REPLICATE_API_TOKEN"),
            luma_key: non_empty_env("LUMA_API_KEY"),
            ..Self::default()
        }
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            replicate_token: None,
            luma_key: None,
            poll_interval: DEFAULT_POLL_INTERVAL,
            poll_attempts: DEFAULT_POLL_ATTEMPTS,
        }
    }
}

fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
