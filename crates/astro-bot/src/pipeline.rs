//! Single-run pipeline orchestration.
//!
//! One invocation produces one artifact set. The brief, the draft, and the
//! canonical image are fatal when they fail; everything downstream of the
//! image (narration, clip generation, reel composition) degrades with a
//! warning so the post still goes out.

use std::path::{Path, PathBuf};

use chrono::{NaiveDate, Utc};
use tracing::{info, warn};
use uuid::Uuid;

use astro_content::{build_daily_prompt, build_narration_script, extract_draft, GeminiClient};
use astro_media::narrate::{self, NarrationRequest};
use astro_media::normalize_post_image;
use astro_media::reel::compose_reel;
use astro_models::{ContentDraft, RenderJob};
use astro_providers::{PollinationsImage, VideoCascade, VideoRequest};

use crate::config::{BotConfig, RunOptions};
use crate::delivery::InstagramPublisher;
use crate::error::{BotError, BotResult};

/// Canned brief used by `--mock` runs, shaped like a real model reply.
const MOCK_MODEL_TEXT: &str = r##"{
  "image_prompt": "A mystical celestial observatory under a swirling aurora, ornate brass telescope pointed at a glowing zodiac wheel in the night sky, deep purples and golds, intricate detail",
  "caption": "The stars lean close tonight. Mercury steadies, and what felt scattered begins to settle. Visit astroboli.com for your full reading.",
  "hashtags": ["#AstroboliAI", "#astrology", "#zodiac", "#horoscope", "#cosmicenergy"],
  "alt_text": "Illustration of a celestial observatory beneath an aurora with a glowing zodiac wheel"
}"##;

/// Clip length asked of video providers, in whole seconds.
const CLIP_REQUEST_SECS: u32 = 8;

/// What one run produced.
#[derive(Debug)]
pub struct RunReport {
    pub draft: ContentDraft,
    pub image_path: PathBuf,
    pub reel_path: Option<PathBuf>,
    pub narration_secs: Option<f64>,
    pub posted: bool,
}

/// Run the whole pipeline once.
///
/// Final artifacts land in `config.work_dir`; per-run scratch files go into
/// a uuid-named subdirectory that is deleted afterwards unless the run is a
/// dry run or `keep_work` is set.
pub async fn run(config: &BotConfig, options: RunOptions) -> BotResult<RunReport> {
    config.require_credentials(&options)?;

    let scratch_dir = prepare_scratch_dir(config)?;
    info!("Scratch dir: {}", scratch_dir.display());

    let result = run_stages(config, options, &scratch_dir).await;

    if options.dry_run || config.keep_work {
        info!("Keeping scratch dir {}", scratch_dir.display());
    } else if let Err(e) = tokio::fs::remove_dir_all(&scratch_dir).await {
        warn!("Failed to clean scratch dir {}: {}", scratch_dir.display(), e);
    }

    result
}

async fn run_stages(
    config: &BotConfig,
    options: RunOptions,
    scratch_dir: &Path,
) -> BotResult<RunReport> {
    let today = Utc::now().date_naive();

    // 1. Daily brief.
    let brief = fetch_brief(config, options, today).await?;

    // 2. Draft extraction and validation.
    let draft = extract_draft(&brief)?;
    draft.validate()?;
    info!(
        "Draft ready: caption {} chars, {} hashtags",
        draft.caption.chars().count(),
        draft.hashtags.len()
    );

    // 3. Canonical post image.
    let images = PollinationsImage::new();
    let fetched = images.fetch_image(&draft.image_prompt).await?;
    let canonical = normalize_post_image(&fetched.bytes)?;
    let image_path = config.work_dir.join(format!("astroboli_{}.jpg", today));
    tokio::fs::write(&image_path, &canonical.bytes).await?;
    info!(
        "Canonical image ({}x{}) written to {}",
        canonical.width,
        canonical.height,
        image_path.display()
    );

    // 4. Narration, best effort.
    let narration = synthesize_narration(config, &draft, scratch_dir).await;
    let narration_secs = narration.as_ref().map(|(_, secs)| *secs);

    // 5. Reel, best effort.
    let reel_path = if options.no_reel {
        info!("Reel generation disabled for this run");
        None
    } else {
        compose_reel_stage(config, &draft, narration, scratch_dir, today).await
    };

    // 6. Delivery.
    let posted = if options.dry_run {
        info!("Dry run, skipping delivery");
        false
    } else {
        deliver(config, &draft, &fetched.url).await?;
        true
    };

    Ok(RunReport {
        draft,
        image_path,
        reel_path,
        narration_secs,
        posted,
    })
}

async fn fetch_brief(
    config: &BotConfig,
    options: RunOptions,
    today: NaiveDate,
) -> BotResult<String> {
    if options.mock {
        info!("Using the canned brief");
        return Ok(MOCK_MODEL_TEXT.to_string());
    }

    let api_key = config
        .gemini_api_key
        .as_deref()
        .ok_or_else(|| BotError::MissingCredentials("GEMINI_API_KEY".to_string()))?;

    let client = GeminiClient::new(api_key);
    let prompt = build_daily_prompt(today);
    Ok(client.generate(&prompt).await?)
}

async fn synthesize_narration(
    config: &BotConfig,
    draft: &ContentDraft,
    scratch_dir: &Path,
) -> Option<(Vec<u8>, f64)> {
    let script = build_narration_script(&draft.caption);
    let output = scratch_dir.join("narration.mp3");
    let request = NarrationRequest::new(script).with_voice(&config.voice);

    let secs = match narrate::synthesize(&request, &output).await {
        Ok(secs) => secs,
        Err(e) => {
            warn!("Narration synthesis failed, reel will be silent: {}", e);
            return None;
        }
    };

    match tokio::fs::read(&output).await {
        Ok(bytes) => {
            info!("Narration ready: {:.1}s", secs);
            Some((bytes, secs))
        }
        Err(e) => {
            warn!("Narration file unreadable: {}", e);
            None
        }
    }
}

async fn compose_reel_stage(
    config: &BotConfig,
    draft: &ContentDraft,
    narration: Option<(Vec<u8>, f64)>,
    scratch_dir: &Path,
    today: NaiveDate,
) -> Option<PathBuf> {
    let cascade = VideoCascade::from_config(&config.providers);
    let request = VideoRequest::new(draft.image_prompt.clone(), CLIP_REQUEST_SECS);

    let video = match cascade.generate(&request).await {
        Some(video) => video,
        None => {
            warn!("No provider produced a clip, posting image only");
            return None;
        }
    };

    let job = RenderJob::new(video, narration);
    let output = config.work_dir.join(format!("astroboli_{}.mp4", today));

    match compose_reel(job, scratch_dir, &output).await {
        Ok(path) => {
            info!("Reel written to {}", path.display());
            Some(path)
        }
        Err(e) => {
            warn!("Reel composition failed, posting image only: {}", e);
            None
        }
    }
}

async fn deliver(config: &BotConfig, draft: &ContentDraft, image_url: &str) -> BotResult<()> {
    let token = config
        .ig_access_token
        .as_deref()
        .ok_or_else(|| BotError::MissingCredentials("IG_ACCESS_TOKEN".to_string()))?;
    let user = config
        .ig_user_id
        .as_deref()
        .ok_or_else(|| BotError::MissingCredentials("IG_USER_ID".to_string()))?;

    let publisher = InstagramPublisher::new(token, user);
    let media_id = publisher
        .publish_image(image_url, &draft.full_caption())
        .await?;
    info!("Posted to Instagram as media {}", media_id);
    Ok(())
}

fn prepare_scratch_dir(config: &BotConfig) -> BotResult<PathBuf> {
    let scratch_dir = config.work_dir.join(Uuid::new_v4().to_string());
    std::fs::create_dir_all(&scratch_dir)?;
    Ok(scratch_dir)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scratch_dir_is_unique_per_run() {
        let root = tempfile::tempdir().unwrap();
        let config = BotConfig {
            work_dir: root.path().to_path_buf(),
            ..BotConfig::default()
        };

        let first = prepare_scratch_dir(&config).unwrap();
        let second = prepare_scratch_dir(&config).unwrap();

        assert!(first.is_dir());
        assert!(second.is_dir());
        assert_ne!(first, second);
        assert!(first.starts_with(root.path()));
    }

    #[test]
    fn test_mock_brief_survives_extraction_and_validation() {
        let draft = extract_draft(MOCK_MODEL_TEXT).unwrap();
        draft.validate().unwrap();

        assert_eq!(draft.hashtags.len(), 5);
        assert!(draft
            .hashtags
            .iter()
            .any(|t| t.eq_ignore_ascii_case("#AstroboliAI")));
        assert!(draft.caption.to_lowercase().contains("astroboli"));
        assert!(!draft.alt_text.is_empty());
    }

    #[tokio::test]
    async fn test_missing_gemini_key_fails_before_any_work() {
        let config = BotConfig {
            work_dir: PathBuf::from("/nonexistent/astroboli-test"),
            ..BotConfig::default()
        };
        let options = RunOptions {
            dry_run: true,
            mock: false,
            no_reel: true,
        };

        let err = run(&config, options).await.unwrap_err();
        assert_eq!(err.exit_code(), 2);
        // Credential checks run before the work dir is created.
        assert!(!config.work_dir.exists());
    }
}
