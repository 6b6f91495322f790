//! Content draft produced by extraction and consumed by the publisher.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::branding::{BRAND_MENTION, BRAND_TAG, HASHTAG_COUNT, PROMPT_MAX_CHARS};

/// Validation failures for a finished draft.
///
/// `HashtagCount` and `MissingBrandTag` map to dedicated process exit codes
/// so scheduled runs can tell them apart in monitoring.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DraftError {
    #[error("expected exactly 5 hashtags, found {0}")]
    HashtagCount(usize),

    #[error("hashtag {0:?} is missing the # prefix")]
    UnprefixedTag(String),

    #[error("duplicate hashtag {0:?}")]
    DuplicateTag(String),

    #[error("brand tag #AstroboliAI is missing")]
    MissingBrandTag,

    #[error("caption does not mention the brand")]
    MissingBrandMention,

    #[error("image prompt is {0} characters, limit is 2000")]
    PromptTooLong(usize),

    #[error("image prompt contains a line break")]
    PromptLineBreak,
}

/// A fully post-processed daily brief.
///
/// Invariants are established by the extraction pipeline and can be
/// re-checked with [`ContentDraft::validate`]; the draft is never mutated
/// after construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentDraft {
    /// Scene description for image and video generation. Single line,
    /// free of code fences and call-to-action phrases.
    pub image_prompt: String,

    /// Caption body, always carrying a brand mention.
    pub caption: String,

    /// Exactly [`HASHTAG_COUNT`] unique `#`-prefixed tags including the
    /// brand tag.
    pub hashtags: Vec<String>,

    /// Accessibility description for the published image.
    pub alt_text: String,
}

impl ContentDraft {
    /// Re-check every invariant the extraction pipeline is supposed to
    /// establish.
    pub fn validate(&self) -> Result<(), DraftError> {
        if self.hashtags.len() != HASHTAG_COUNT {
            return Err(DraftError::HashtagCount(self.hashtags.len()));
        }
        let mut seen: Vec<String> = Vec::with_capacity(self.hashtags.len());
        for tag in &self.hashtags {
            if !tag.starts_with('#') {
                return Err(DraftError::UnprefixedTag(tag.clone()));
            }
            let folded = tag.to_lowercase();
            if seen.contains(&folded) {
                return Err(DraftError::DuplicateTag(tag.clone()));
            }
            seen.push(folded);
        }
        if !self
            .hashtags
            .iter()
            .any(|t| t.eq_ignore_ascii_case(BRAND_TAG))
        {
            return Err(DraftError::MissingBrandTag);
        }
        if !self.caption.to_lowercase().contains(BRAND_MENTION) {
            return Err(DraftError::MissingBrandMention);
        }
        let prompt_chars = self.image_prompt.chars().count();
        if prompt_chars > PROMPT_MAX_CHARS {
            return Err(DraftError::PromptTooLong(prompt_chars));
        }
        if self.image_prompt.contains('\n') {
            return Err(DraftError::PromptLineBreak);
        }
        Ok(())
    }

    /// Caption plus hashtag line, the exact text attached to a post.
    pub fn full_caption(&self) -> String {
        format!("{}\n\n{}", self.caption, self.hashtags.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_draft() -> ContentDraft {
        ContentDraft {
            image_prompt: "A golden zodiac wheel floating in a nebula".to_string(),
            caption: "Today the stars align for you. Astroboli sees it all.".to_string(),
            hashtags: vec![
                "#AstroboliAI".to_string(),
                "#astrology".to_string(),
                "#horoscope".to_string(),
                "#zodiac".to_string(),
                "#numerology".to_string(),
            ],
            alt_text: "A golden zodiac wheel floating in a nebula".to_string(),
        }
    }

    #[test]
    fn test_valid_draft_passes() {
        assert_eq!(valid_draft().validate(), Ok(()));
    }

    #[test]
    fn test_wrong_hashtag_count() {
        let mut draft = valid_draft();
        draft.hashtags.pop();
        assert_eq!(draft.validate(), Err(DraftError::HashtagCount(4)));
    }

    #[test]
    fn test_unprefixed_tag() {
        let mut draft = valid_draft();
        draft.hashtags[2] = "horoscope".to_string();
        assert_eq!(
            draft.validate(),
            Err(DraftError::UnprefixedTag("horoscope".to_string()))
        );
    }

    #[test]
    fn test_duplicate_tag_case_insensitive() {
        let mut draft = valid_draft();
        draft.hashtags[4] = "#Astrology".to_string();
        assert_eq!(
            draft.validate(),
            Err(DraftError::DuplicateTag("#Astrology".to_string()))
        );
    }

    #[test]
    fn test_missing_brand_tag() {
        let mut draft = valid_draft();
        draft.hashtags[0] = "#tarot".to_string();
        assert_eq!(draft.validate(), Err(DraftError::MissingBrandTag));
    }

    #[test]
    fn test_brand_tag_any_case_accepted() {
        let mut draft = valid_draft();
        draft.hashtags[0] = "#astroboliai".to_string();
        assert_eq!(draft.validate(), Ok(()));
    }

    #[test]
    fn test_caption_without_brand_mention() {
        let mut draft = valid_draft();
        draft.caption = "Today the stars align for you.".to_string();
        assert_eq!(draft.validate(), Err(DraftError::MissingBrandMention));
    }

    #[test]
    fn test_prompt_with_line_break() {
        let mut draft = valid_draft();
        draft.image_prompt = "line one\nline two".to_string();
        assert_eq!(draft.validate(), Err(DraftError::PromptLineBreak));
    }

    #[test]
    fn test_prompt_too_long() {
        let mut draft = valid_draft();
        draft.image_prompt = "x".repeat(PROMPT_MAX_CHARS + 1);
        assert_eq!(
            draft.validate(),
            Err(DraftError::PromptTooLong(PROMPT_MAX_CHARS + 1))
        );
    }

    #[test]
    fn test_full_caption_joins_hashtags() {
        let draft = valid_draft();
        let full = draft.full_caption();
        assert!(full.starts_with(&draft.caption));
        assert!(full.ends_with("#AstroboliAI #astrology #horoscope #zodiac #numerology"));
    }
}
