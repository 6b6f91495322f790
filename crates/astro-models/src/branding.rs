//! Brand constants applied to captions, hashtags, and prompts.

/// Display name of the brand.
pub const BRAND_NAME: &str = "Astroboli";

/// Hashtag that must appear in every published tag set.
pub const BRAND_TAG: &str = "#AstroboliAI";

/// Case-insensitive needle that satisfies the caption brand-mention rule.
pub const BRAND_MENTION: &str = "astroboli";

/// Exact number of hashtags attached to every post.
pub const HASHTAG_COUNT: usize = 5;

/// Pool used to pad short hashtag lists, in padding order.
pub const DEFAULT_HASHTAGS: &[&str] = &[
    "#astrology",
    "#horoscope",
    "#zodiac",
    "#numerology",
    "#dailyhoroscope",
    "#cosmicenergy",
    "#spiritualjourney",
];

/// Suffix appended to captions that never mention the brand.
pub const CAPTION_CTA: &str = "✨ Visit astroboli.com for your full reading ✨";

/// Lowercase markers that cut a generated image prompt at a call to action.
pub const CTA_MARKERS: &[&str] = &[
    "visit http",
    "visit www",
    "visit astroboli",
    "link in bio",
    "follow us",
    "click the link",
];

/// Spoken outro closing every narration track.
pub const NARRATION_OUTRO: &str = "Visit astroboli dot com for your complete reading.";

/// Upper bound on image prompt length after scrubbing, in characters.
pub const PROMPT_MAX_CHARS: usize = 2000;

/// Characters of raw model output salvaged by the last extraction stage.
pub const RAW_FALLBACK_CHARS: usize = 300;
