use std::path::{Path, PathBuf};

use image::RgbImage;

use crate::encode::ffmpeg::{FfmpegSink, FfmpegSinkOpts};
use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::FrameIndex;
use crate::foundation::error::{ReelError, ReelResult};
use crate::programs::CinematicFade;

/// Path of the cinematic copy written next to `out`: `<stem>_cinematic.mp4`.
pub fn cinematic_path(out: &Path) -> PathBuf {
    let stem = out
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_owned());
    out.with_file_name(format!("{stem}_cinematic.mp4"))
}

/// ffmpeg filter graph fading in from black at the start and out to black at the end of a
/// `total_secs`-long clip. The fade-out never starts before zero.
pub fn fade_filter(fade: CinematicFade, total_secs: f64) -> String {
    let out_start = (total_secs - fade.fade_out_secs).max(0.0);
    format!(
        "fade=t=in:st=0:d={},fade=t=out:st={}:d={}",
        fmt_secs(fade.fade_in_secs),
        fmt_secs(out_start),
        fmt_secs(fade.fade_out_secs)
    )
}

fn fmt_secs(v: f64) -> String {
    let s = format!("{v:.3}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s.is_empty() {
        "0".to_owned()
    } else {
        s.to_owned()
    }
}

/// Secondary sink encoding the same frames with a fade-in/fade-out.
///
/// Runs in parallel with the primary encoder. The fade-out start is derived from
/// [`SinkConfig::frame_count`], so no frame is buffered. Every failure surfaces as
/// [`ReelError::External`].
pub struct CinematicSink {
    out_path: PathBuf,
    fade: CinematicFade,
    inner: Option<FfmpegSink>,
}

impl CinematicSink {
    /// Create a sink writing to `out_path`.
    pub fn new(out_path: impl Into<PathBuf>, fade: CinematicFade) -> Self {
        Self {
            out_path: out_path.into(),
            fade,
            inner: None,
        }
    }

    /// Destination path.
    pub fn out_path(&self) -> &Path {
        &self.out_path
    }

    fn inner(&mut self) -> ReelResult<&mut FfmpegSink> {
        self.inner
            .as_mut()
            .ok_or_else(|| ReelError::external("cinematic sink not started"))
    }
}

fn external(e: ReelError) -> ReelError {
    match e {
        ReelError::External(_) => e,
        other => ReelError::external(format!("cinematic pass failed: {other}")),
    }
}

impl FrameSink for CinematicSink {
    fn begin(&mut self, cfg: SinkConfig) -> ReelResult<()> {
        if cfg.frame_count == 0 {
            return Err(ReelError::external("cinematic pass has no frames"));
        }
        let total_secs = cfg.fps.frames_to_secs(cfg.frame_count);
        let opts = FfmpegSinkOpts::new(&self.out_path)
            .with_video_filter(fade_filter(self.fade, total_secs));
        let mut sink = FfmpegSink::new(opts);
        sink.begin(cfg).map_err(external)?;
        self.inner = Some(sink);
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &RgbImage) -> ReelResult<()> {
        self.inner()?.push_frame(idx, frame).map_err(external)
    }

    fn end(&mut self) -> ReelResult<()> {
        let mut sink = self
            .inner
            .take()
            .ok_or_else(|| ReelError::external("cinematic sink not started"))?;
        sink.end().map_err(external)?;
        tracing::info!(out = %self.out_path.display(), "cinematic copy written");
        Ok(())
    }

    fn abort(&mut self) {
        if let Some(mut sink) = self.inner.take() {
            sink.abort();
        }
    }
}
