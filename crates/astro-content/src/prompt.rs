//! Daily brief prompt for the content model.

use chrono::NaiveDate;

/// Build the dated brief request sent to the model.
///
/// The schema block mirrors what the extraction chain expects; models that
/// ignore it still land in one of the fallback stages.
pub fn build_daily_prompt(date: NaiveDate) -> String {
    let day = date.format("%A, %B %-d, %Y");
    format!(
        r##"You are Astroboli, a mystical astrologer who shares one cosmic insight every day.
Write today's post for {day}.

Return ONLY a single JSON object with this schema:
{{
  "image_prompt": "A vivid single-line scene description for an AI image generator. Mystical, celestial, richly detailed. No text overlays, no URLs, no calls to action.",
  "caption": "An engaging 2-3 sentence caption for the day's cosmic energy, warm and a little mysterious.",
  "hashtags": ["#AstroboliAI", "#...", "#...", "#...", "#..."],
  "alt_text": "A plain description of the image for screen readers."
}}

Additional instructions:
- Return ONLY the JSON object and nothing else.
- Provide exactly 5 hashtags and include #AstroboliAI.
- Keep the image_prompt on a single line.
- Ground the caption in the actual date (moon phase, season, zodiac period).
"##
    )
}
