//! Narration synthesis through the edge-tts CLI.
//!
//! Same shape as the FFmpeg wrapper: pre-flight the binary, spawn, wait
//! with a timeout, surface stderr on failure.

use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, info};

use crate::error::{MediaError, MediaResult};
use crate::probe::probe_media;

/// Default narration voice.
pub const DEFAULT_VOICE: &str = "en-US-AvaMultilingualNeural";

/// Default speaking rate adjustment.
pub const DEFAULT_RATE: &str = "-5%";

/// Default pitch adjustment.
pub const DEFAULT_PITCH: &str = "+0Hz";

/// Timeout for a single synthesis call, in seconds.
const SYNTHESIS_TIMEOUT_SECS: u64 = 120;

/// Parameters for one synthesis call.
#[derive(Debug, Clone)]
pub struct NarrationRequest {
    pub script: String,
    pub voice: String,
    pub rate: String,
    pub pitch: String,
}

impl NarrationRequest {
    /// Request with the production voice settings.
    pub fn new(script: impl Into<String>) -> Self {
        Self {
            script: script.into(),
            voice: DEFAULT_VOICE.to_string(),
            rate: DEFAULT_RATE.to_string(),
            pitch: DEFAULT_PITCH.to_string(),
        }
    }

    pub fn with_voice(mut self, voice: impl Into<String>) -> Self {
        self.voice = voice.into();
        self
    }

    // Rate and pitch values start with - or +, so they must stay glued to
    // their flags or argparse reads them as options.
    fn build_args(&self, output: &Path) -> Vec<String> {
        vec![
            "--voice".to_string(),
            self.voice.clone(),
            format!("--rate={}", self.rate),
            format!("--pitch={}", self.pitch),
            "--text".to_string(),
            self.script.clone(),
            "--write-media".to_string(),
            output.to_string_lossy().to_string(),
        ]
    }
}

/// Synthesize narration audio to `output`, returning its duration in
/// seconds.
pub async fn synthesize(request: &NarrationRequest, output: &Path) -> MediaResult<f64> {
    // Check edge-tts exists
    which::which("edge-tts").map_err(|_| MediaError::EdgeTtsNotFound)?;

    if request.script.trim().is_empty() {
        return Err(MediaError::narration_failed("empty narration script"));
    }

    let args = request.build_args(output);
    debug!("Running edge-tts with voice {}", request.voice);

    let result = tokio::time::timeout(
        std::time::Duration::from_secs(SYNTHESIS_TIMEOUT_SECS),
        Command::new("edge-tts")
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output(),
    )
    .await;

    let run = match result {
        Ok(r) => r?,
        Err(_) => return Err(MediaError::Timeout(SYNTHESIS_TIMEOUT_SECS)),
    };

    if !run.status.success() {
        return Err(MediaError::narration_failed(format!(
            "edge-tts exited with {}: {}",
            run.status,
            String::from_utf8_lossy(&run.stderr)
        )));
    }

    if !output.exists() {
        return Err(MediaError::narration_failed(
            "edge-tts produced no output file",
        ));
    }

    let duration = probe_media(output).await?.duration;
    if duration <= 0.0 {
        return Err(MediaError::narration_failed("narration has zero duration"));
    }

    info!(
        "Synthesized {:.2}s narration to {}",
        duration,
        output.display()
    );
    Ok(duration)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_args_keeps_adjustments_inline() {
        let req = NarrationRequest::new("Hello stars.");
        let args = req.build_args(Path::new("/tmp/narration.mp3"));

        assert!(args.contains(&"--rate=-5%".to_string()));
        assert!(args.contains(&"--pitch=+0Hz".to_string()));
        let voice_idx = args.iter().position(|a| a == "--voice").unwrap();
        assert_eq!(args[voice_idx + 1], DEFAULT_VOICE);
        assert_eq!(args.last().unwrap(), "/tmp/narration.mp3");
    }

    #[test]
    fn test_with_voice_overrides_default() {
        let req = NarrationRequest::new("text").with_voice("en-GB-SoniaNeural");
        assert_eq!(req.voice, "en-GB-SoniaNeural");
        assert_eq!(req.rate, DEFAULT_RATE);
    }
}
