//! Staged extraction of a content draft from raw model output.
//!
//! Model output arrives in one of several shapes depending on which model
//! answered and how closely it followed the contract: clean JSON, JSON
//! wrapped in prose or code fences, the legacy marker format, or free text.
//! Stages are tried in order and the first one that yields fields wins;
//! post-processing applies the same brand rules regardless of the stage.

use serde::Deserialize;

use astro_models::branding::RAW_FALLBACK_CHARS;
use astro_models::ContentDraft;

use crate::error::{ContentError, ContentResult};
use crate::sanitize::{ensure_brand_caption, normalize_hashtags, scrub_image_prompt};

/// Raw JSON payload shape. Hashtags arrive as an array or as a single
/// delimited string depending on the model.
#[derive(Debug, Deserialize)]
struct DraftPayload {
    image_prompt: String,
    caption: String,
    hashtags: HashtagsField,
    alt_text: String,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum HashtagsField {
    List(Vec<String>),
    Joined(String),
}

impl HashtagsField {
    fn into_tags(self) -> Vec<String> {
        match self {
            HashtagsField::List(tags) => tags,
            HashtagsField::Joined(s) => split_tags(&s),
        }
    }
}

/// Pre-normalization field values produced by a single stage.
#[derive(Debug)]
struct DraftFields {
    image_prompt: String,
    caption: String,
    hashtags: Vec<String>,
    alt_text: Option<String>,
}

impl From<DraftPayload> for DraftFields {
    fn from(p: DraftPayload) -> Self {
        Self {
            image_prompt: p.image_prompt,
            caption: p.caption,
            hashtags: p.hashtags.into_tags(),
            alt_text: Some(p.alt_text),
        }
    }
}

/// Turn raw model output into a publishable draft.
///
/// Fails only when the output is empty; any other shape degrades through
/// the stages down to the raw-text fallback.
pub fn extract_draft(text: &str) -> ContentResult<ContentDraft> {
    let stages: &[fn(&str) -> Option<DraftFields>] =
        &[parse_whole, parse_embedded, parse_legacy, raw_fallback];

    for stage in stages {
        if let Some(fields) = stage(text) {
            return Ok(finish(fields));
        }
    }

    Err(ContentError::EmptyModelOutput)
}

/// Apply brand rules to stage output and assemble the final draft.
fn finish(fields: DraftFields) -> ContentDraft {
    let image_prompt = scrub_image_prompt(&fields.image_prompt);
    let caption = ensure_brand_caption(&fields.caption);
    let hashtags = normalize_hashtags(fields.hashtags);
    let alt_text = fields.alt_text.unwrap_or_else(|| image_prompt.clone());

    ContentDraft {
        image_prompt,
        caption,
        hashtags,
        alt_text,
    }
}

/// Stage 1: the whole trimmed text is one JSON object.
fn parse_whole(text: &str) -> Option<DraftFields> {
    serde_json::from_str::<DraftPayload>(text.trim())
        .ok()
        .map(DraftFields::from)
}

/// Stage 2: a JSON object is embedded in surrounding prose or fences.
fn parse_embedded(text: &str) -> Option<DraftFields> {
    if let Some(fields) = parse_substring(text) {
        return Some(fields);
    }
    // Fence lines can trap stray braces in the substring; drop them and
    // look once more.
    parse_substring(&strip_fence_lines(text))
}

fn parse_substring(text: &str) -> Option<DraftFields> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end <= start {
        return None;
    }
    serde_json::from_str::<DraftPayload>(&text[start..=end])
        .ok()
        .map(DraftFields::from)
}

fn strip_fence_lines(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for line in text.lines() {
        if line.trim_start().starts_with("```") {
            continue;
        }
        out.push_str(line);
        out.push('\n');
    }
    out
}

/// Stage 3: legacy marker format (`IMAGE_PROMPT:` / `CAPTION:` /
/// `HASHTAGS:`), markers required in that order.
fn parse_legacy(text: &str) -> Option<DraftFields> {
    let ip = text.find("IMAGE_PROMPT:")?;
    let cp = text[ip..].find("CAPTION:").map(|i| i + ip)?;
    let hp = text[cp..].find("HASHTAGS:").map(|i| i + cp)?;

    let image_prompt = text[ip + "IMAGE_PROMPT:".len()..cp].trim().to_string();
    let caption = text[cp + "CAPTION:".len()..hp].trim().to_string();
    let hashtags = split_tags(text[hp + "HASHTAGS:".len()..].trim());

    if image_prompt.is_empty() || caption.is_empty() {
        return None;
    }

    Some(DraftFields {
        image_prompt,
        caption,
        hashtags,
        alt_text: None,
    })
}

/// Stage 4: salvage leading raw text as both prompt and caption. Hashtags
/// are left empty here so normalization fills in the defaults.
fn raw_fallback(text: &str) -> Option<DraftFields> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    let snippet: String = trimmed.chars().take(RAW_FALLBACK_CHARS).collect();

    Some(DraftFields {
        image_prompt: snippet.clone(),
        caption: snippet,
        hashtags: Vec::new(),
        alt_text: None,
    })
}

/// Split a joined hashtag string on whitespace and commas.
pub(crate) fn split_tags(s: &str) -> Vec<String> {
    s.split(|c: char| c.is_whitespace() || c == ',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}
