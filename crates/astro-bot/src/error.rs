//! Bot error types and exit-code mapping.

use thiserror::Error;

use astro_content::ContentError;
use astro_media::MediaError;
use astro_models::DraftError;
use astro_providers::ProviderError;

pub type BotResult<T> = Result<T, BotError>;

#[derive(Debug, Error)]
pub enum BotError {
    #[error("missing credential: {0}")]
    MissingCredentials(String),

    #[error("content error: {0}")]
    Content(#[from] ContentError),

    #[error("draft rejected: {0}")]
    Draft(#[from] DraftError),

    #[error("media error: {0}")]
    Media(#[from] MediaError),

    #[error("provider error: {0}")]
    Provider(#[from] ProviderError),

    #[error("delivery failed: {0}")]
    Delivery(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl BotError {
    pub fn delivery(message: impl Into<String>) -> Self {
        Self::Delivery(message.into())
    }

    /// Process exit code for the cron supervisor.
    ///
    /// 0 success, 1 generic failure, 2 missing credentials, 3 hashtag count
    /// violation, 4 missing brand tag.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::MissingCredentials(_) => 2,
            Self::Draft(DraftError::HashtagCount(_)) => 3,
            Self::Draft(DraftError::MissingBrandTag) => 4,
            _ => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_code_mapping() {
        assert_eq!(
            BotError::MissingCredentials("GEMINI_API_KEY".to_string()).exit_code(),
            2
        );
        assert_eq!(BotError::from(DraftError::HashtagCount(3)).exit_code(), 3);
        assert_eq!(BotError::from(DraftError::MissingBrandTag).exit_code(), 4);
        assert_eq!(BotError::from(ContentError::EmptyModelOutput).exit_code(), 1);
        assert_eq!(BotError::delivery("graph 400").exit_code(), 1);
    }

    #[test]
    fn test_other_draft_errors_stay_generic() {
        assert_eq!(
            BotError::from(DraftError::UnprefixedTag("stars".to_string())).exit_code(),
            1
        );
        assert_eq!(BotError::from(DraftError::MissingBrandMention).exit_code(), 1);
    }
}
