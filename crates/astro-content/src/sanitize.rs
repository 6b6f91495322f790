//! Post-processing that turns extraction output into publishable fields.

use astro_models::branding::{
    BRAND_MENTION, BRAND_TAG, CAPTION_CTA, CTA_MARKERS, DEFAULT_HASHTAGS, HASHTAG_COUNT,
    NARRATION_OUTRO, PROMPT_MAX_CHARS,
};

/// Normalize a hashtag list to exactly [`HASHTAG_COUNT`] unique tags with
/// the brand tag present.
///
/// Order is stable: prefix and dedupe in input order, truncate, prepend the
/// brand tag if absent, pad from the default pool. Padding walks the pool
/// in its fixed order and skips anything already present.
pub fn normalize_hashtags(raw: Vec<String>) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    let mut seen: Vec<String> = Vec::new();

    for tag in raw {
        let tag = tag.trim();
        if tag.is_empty() || tag == "#" {
            continue;
        }
        let tag = if tag.starts_with('#') {
            tag.to_string()
        } else {
            format!("#{}", tag)
        };
        let folded = tag.to_lowercase();
        if seen.contains(&folded) {
            continue;
        }
        seen.push(folded);
        tags.push(tag);
    }
    tags.truncate(HASHTAG_COUNT);

    if !tags.iter().any(|t| t.eq_ignore_ascii_case(BRAND_TAG)) {
        tags.insert(0, BRAND_TAG.to_string());
        tags.truncate(HASHTAG_COUNT);
    }

    for candidate in DEFAULT_HASHTAGS {
        if tags.len() >= HASHTAG_COUNT {
            break;
        }
        if tags.iter().any(|t| t.eq_ignore_ascii_case(candidate)) {
            continue;
        }
        tags.push(candidate.to_string());
    }

    tags
}

/// Scrub a generated image prompt down to a single clean line.
///
/// Drops code fences, folds newlines into spaces, cuts at the first
/// call-to-action marker, collapses whitespace, and caps the length.
pub fn scrub_image_prompt(raw: &str) -> String {
    let mut prompt = raw.replace("```json", " ").replace("```", " ");
    prompt = prompt.replace(['\n', '\r'], " ");

    // Markers are ASCII, so byte offsets in the folded copy line up with
    // the original.
    let folded: String = prompt.chars().map(|c| c.to_ascii_lowercase()).collect();
    if let Some(idx) = CTA_MARKERS.iter().filter_map(|m| folded.find(m)).min() {
        prompt.truncate(idx);
    }

    let mut cleaned = prompt.split_whitespace().collect::<Vec<_>>().join(" ");
    if cleaned.chars().count() > PROMPT_MAX_CHARS {
        cleaned = cleaned.chars().take(PROMPT_MAX_CHARS).collect();
        cleaned = cleaned.trim_end().to_string();
    }
    cleaned
}

/// Append the canonical call to action when the caption never mentions the
/// brand.
pub fn ensure_brand_caption(raw: &str) -> String {
    let caption = raw.trim().to_string();
    if caption.to_lowercase().contains(BRAND_MENTION) {
        caption
    } else {
        format!("{}\n\n{}", caption, CAPTION_CTA)
    }
}

/// Reduce a caption to speakable text and close with the brand outro.
///
/// Hashtags, URLs, and pictographic characters trip the synthesizer, so
/// they are dropped token by token.
pub fn build_narration_script(caption: &str) -> String {
    let mut words: Vec<String> = Vec::new();

    for token in caption.split_whitespace() {
        if token.starts_with('#')
            || token.starts_with("http://")
            || token.starts_with("https://")
            || token.starts_with("www.")
        {
            continue;
        }
        let cleaned: String = token
            .chars()
            .filter(|c| c.is_alphanumeric() || c.is_ascii_punctuation() || *c == '’')
            .collect();
        if !cleaned.is_empty() {
            words.push(cleaned);
        }
    }

    let mut spoken = words.join(" ");
    if spoken.is_empty() {
        return NARRATION_OUTRO.to_string();
    }
    if !spoken.ends_with(['.', '!', '?']) {
        spoken.push('.');
    }
    format!("{} {}", spoken, NARRATION_OUTRO)
}
