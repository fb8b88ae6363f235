//! JSON-configurable end-to-end job: load source → render → mux audio → upload.
//!
//! Loading the source and rendering are fatal. Audio mux, upload and local cleanup are not: their
//! failures land in [`JobReport::step_failures`] and the video that was already written stays.

use std::io::Read;
use std::path::{Path, PathBuf};

use crate::assets::{self, MediaSource};
use crate::foundation::core::{Canvas, Fps};
use crate::foundation::error::{ReelError, ReelResult};
use crate::programs::AnimationKind;
use crate::publish::{self, UploadConfig};
use crate::raster::background::BackgroundSpec;
use crate::render::{self, RenderOptions};

/// One render request.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RenderJob {
    /// Source still, local path or URL.
    pub image: MediaSource,
    /// Program to run.
    #[serde(default)]
    pub animation: AnimationKind,
    /// Output MP4 path.
    pub out: PathBuf,
    /// Whole frames per second; the program default when absent.
    #[serde(default)]
    pub fps: Option<u32>,
    /// Audio track to mux in after rendering.
    #[serde(default)]
    pub audio: Option<MediaSource>,
    /// Background override.
    #[serde(default)]
    pub background: Option<BackgroundSpec>,
    /// Output size override, default 1080×1920.
    #[serde(default)]
    pub canvas: Option<Canvas>,
    /// Particle RNG seed.
    #[serde(default)]
    pub seed: Option<u64>,
    /// Write the cinematic copy where the program has one.
    #[serde(default = "default_true")]
    pub cinematic: bool,
    /// Read the reported duration back from the written file.
    #[serde(default)]
    pub probe_duration: bool,
    /// Upload destination.
    #[serde(default)]
    pub upload: Option<UploadConfig>,
    /// Keep the local MP4 after a successful upload.
    #[serde(default)]
    pub keep_local: bool,
}

fn default_true() -> bool {
    true
}

impl RenderJob {
    /// Job with every optional field at its default.
    pub fn new(image: MediaSource, animation: AnimationKind, out: impl Into<PathBuf>) -> Self {
        Self {
            image,
            animation,
            out: out.into(),
            fps: None,
            audio: None,
            background: None,
            canvas: None,
            seed: None,
            cinematic: true,
            probe_duration: false,
            upload: None,
            keep_local: false,
        }
    }

    /// Read and validate a job file.
    pub fn from_path(path: &Path) -> ReelResult<Self> {
        use anyhow::Context as _;
        let file = std::fs::File::open(path)
            .with_context(|| format!("open job file '{}'", path.display()))?;
        Self::from_reader(file)
    }

    /// Parse and validate a job from JSON.
    pub fn from_reader(reader: impl Read) -> ReelResult<Self> {
        let job: Self = serde_json::from_reader(reader)
            .map_err(|e| ReelError::serde(format!("job json: {e}")))?;
        job.validate()?;
        Ok(job)
    }

    /// Check field combinations serde cannot.
    pub fn validate(&self) -> ReelResult<()> {
        if self.out.as_os_str().is_empty() {
            return Err(ReelError::validation("job 'out' must not be empty"));
        }
        if self.fps == Some(0) {
            return Err(ReelError::validation("job 'fps' must be > 0"));
        }
        if let Some(canvas) = self.canvas {
            canvas.validate()?;
        }
        if let Some(up) = &self.upload
            && (up.endpoint.trim().is_empty() || up.upload_preset.trim().is_empty())
        {
            return Err(ReelError::validation(
                "job 'upload' needs a non-empty endpoint and upload_preset",
            ));
        }
        Ok(())
    }

    /// Render options this job maps to.
    pub fn render_options(&self) -> ReelResult<RenderOptions> {
        Ok(RenderOptions {
            fps: self.fps.map(Fps::whole).transpose()?,
            canvas: self.canvas.unwrap_or_default(),
            background: self.background.clone(),
            seed: self.seed,
            cinematic: self.cinematic,
            probe_duration: self.probe_duration,
        })
    }
}

/// Summary of a finished job, printed as JSON by the CLI.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct JobReport {
    /// Program that ran.
    pub animation: AnimationKind,
    /// Reported playback length.
    pub duration_seconds: f64,
    /// Frames encoded into the primary video.
    pub frames_written: u64,
    /// Whether the audio track made it into the video.
    pub audio_attached: bool,
    /// Public URL, when uploaded.
    pub video_url: Option<String>,
    /// Cinematic copy, when written.
    pub cinematic_path: Option<PathBuf>,
    /// Local video, unless it was removed after upload.
    pub output: Option<PathBuf>,
    /// Non-fatal failures as `step: message`.
    pub step_failures: Vec<String>,
}

/// Run `job` end to end.
#[tracing::instrument(skip(job), fields(animation = %job.animation, out = %job.out.display()))]
pub fn run_job(job: &RenderJob) -> ReelResult<JobReport> {
    job.validate()?;
    let opts = job.render_options()?;
    let source = assets::load_image(&job.image)?;
    let outcome = render::render(job.animation, &source, &job.out, &opts)?;

    let mut report = JobReport {
        animation: outcome.kind,
        duration_seconds: outcome.duration_secs,
        frames_written: outcome.frame_count,
        audio_attached: false,
        video_url: None,
        cinematic_path: outcome.cinematic_path,
        output: Some(job.out.clone()),
        step_failures: outcome.step_failures,
    };

    if let Some(audio) = &job.audio {
        match crate::media::audio::mux_audio(&job.out, audio) {
            Ok(()) => report.audio_attached = true,
            Err(e) => {
                tracing::warn!(error = %e, "audio mux failed, keeping the silent video");
                report.step_failures.push(format!("audio: {e}"));
            }
        }
    }

    if let Some(cfg) = &job.upload {
        match publish::upload(&job.out, cfg) {
            Ok(url) => {
                report.video_url = Some(url);
                if !job.keep_local {
                    match std::fs::remove_file(&job.out) {
                        Ok(()) => report.output = None,
                        Err(e) => {
                            tracing::warn!(error = %e, "could not remove local video after upload");
                            report.step_failures.push(format!("cleanup: {e}"));
                        }
                    }
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "upload failed, keeping the local video");
                report.step_failures.push(format!("upload: {e}"));
            }
        }
    }

    tracing::info!(
        frames = report.frames_written,
        failures = report.step_failures.len(),
        "job finished"
    );
    Ok(report)
}

#[cfg(test)]
#[path = "../tests/unit/job.rs"]
mod tests;
