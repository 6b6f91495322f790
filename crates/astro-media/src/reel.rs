//! Vertical reel composition.
//!
//! Renders the final 1080x1920 artifact from a provider clip and optional
//! narration: loop or trim the clip to the target length, fill the vertical
//! frame, and replace whatever audio the clip shipped with.

use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

use astro_models::render::{RenderJob, REEL_HEIGHT, REEL_WIDTH};

use crate::command::{FfmpegCommand, FfmpegRunner};
use crate::error::{MediaError, MediaResult};
use crate::probe;

/// Timeout for the final render, in seconds.
const RENDER_TIMEOUT_SECS: u64 = 300;

/// Render the reel described by `job` into `output`.
///
/// Staged files land in `work_dir`, which the caller owns and cleans up.
pub async fn compose_reel(job: RenderJob, work_dir: &Path, output: &Path) -> MediaResult<PathBuf> {
    let source_path = work_dir.join("source_clip.mp4");
    fs::write(&source_path, &job.video.bytes).await?;

    let narration_path = match &job.narration {
        Some(bytes) => {
            let path = work_dir.join("narration.mp3");
            fs::write(&path, bytes).await?;
            Some(path)
        }
        None => None,
    };

    let source_secs = probe::get_duration(&source_path).await?;
    if source_secs <= 0.0 {
        return Err(MediaError::InvalidVideo(
            "source clip has zero duration".to_string(),
        ));
    }

    let target_secs = job.target_secs;
    let loops = loop_count(source_secs, target_secs);
    debug!(
        "Composing reel: source {:.2}s, target {:.2}s, {} pass(es)",
        source_secs, target_secs, loops
    );

    let mut cmd = FfmpegCommand::new(&source_path, output);
    if loops > 1 {
        // -stream_loop n plays the input n+1 times total
        cmd = cmd.stream_loop(loops - 1);
    }

    cmd = match &narration_path {
        Some(narration) => cmd
            .extra_input(narration)
            .output_args(["-map", "0:v:0", "-map", "1:a:0"])
            .audio_codec("aac")
            .audio_bitrate("128k"),
        None => cmd.output_arg("-an"),
    };

    cmd = cmd
        .duration(target_secs)
        .video_filter(vertical_fill_filter())
        .video_codec("libx264")
        .preset("medium")
        .crf(23)
        .output_args(["-pix_fmt", "yuv420p"])
        .output_args(["-r", "30"])
        .output_args(["-movflags", "+faststart"]);

    FfmpegRunner::new()
        .with_timeout(RENDER_TIMEOUT_SECS)
        .run(&cmd)
        .await?;

    info!("Composed {:.2}s reel at {}", target_secs, output.display());
    Ok(output.to_path_buf())
}

/// Number of times the source must play to cover the target length.
fn loop_count(source_secs: f64, target_secs: f64) -> u32 {
    if source_secs <= 0.0 {
        return 1;
    }
    (target_secs / source_secs).ceil() as u32
}

/// Scale-and-crop filter that fills the vertical frame.
fn vertical_fill_filter() -> String {
    format!(
        "scale={w}:{h}:force_original_aspect_ratio=increase,crop={w}:{h}",
        w = REEL_WIDTH,
        h = REEL_HEIGHT
    )
}
