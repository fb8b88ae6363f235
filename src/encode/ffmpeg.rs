use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Child, ChildStdin, Command, Stdio};
use std::thread::JoinHandle;

use image::RgbImage;

use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::{Canvas, Fps, FrameIndex};
use crate::foundation::error::{ReelError, ReelResult};

/// Options for [`FfmpegSink`] MP4 output.
#[derive(Clone, Debug)]
pub struct FfmpegSinkOpts {
    /// Output MP4 file path.
    pub out_path: PathBuf,
    /// Overwrite output file if it already exists.
    pub overwrite: bool,
    /// Optional `-vf` filter graph applied while encoding.
    pub video_filter: Option<String>,
    /// Encoder executable, resolved through `PATH` unless it has a directory part.
    pub program: PathBuf,
}

impl FfmpegSinkOpts {
    /// Create options for outputting an MP4 to `out_path`.
    pub fn new(out_path: impl Into<PathBuf>) -> Self {
        Self {
            out_path: out_path.into(),
            overwrite: true,
            video_filter: None,
            program: PathBuf::from("ffmpeg"),
        }
    }

    /// Attach a `-vf` filter graph.
    pub fn with_video_filter(mut self, filter: impl Into<String>) -> Self {
        self.video_filter = Some(filter.into());
        self
    }

    /// Use a specific encoder executable instead of `ffmpeg` from `PATH`.
    pub fn with_program(mut self, program: impl Into<PathBuf>) -> Self {
        self.program = program.into();
        self
    }
}

/// Sink that spawns the system `ffmpeg` and streams raw RGB frames to its stdin.
///
/// Output is H.264 / yuv420p with `+faststart`, playable in browsers as written. If the sink is
/// dropped or aborted before `end`, the child is killed and the partial file removed. A failed
/// `end` also removes whatever ffmpeg managed to write.
pub struct FfmpegSink {
    opts: FfmpegSinkOpts,

    child: Option<Child>,
    stdin: Option<ChildStdin>,
    stderr_drain: Option<JoinHandle<std::io::Result<Vec<u8>>>>,

    cfg: Option<SinkConfig>,
    frame_len: usize,
    last_idx: Option<FrameIndex>,
}

impl FfmpegSink {
    /// Create a new sink that streams into `ffmpeg`.
    pub fn new(opts: FfmpegSinkOpts) -> Self {
        Self {
            opts,
            child: None,
            stdin: None,
            stderr_drain: None,
            cfg: None,
            frame_len: 0,
            last_idx: None,
        }
    }

    /// Destination path.
    pub fn out_path(&self) -> &Path {
        &self.opts.out_path
    }

    fn join_stderr(&mut self) -> Vec<u8> {
        match self.stderr_drain.take().map(JoinHandle::join) {
            Some(Ok(Ok(bytes))) => bytes,
            _ => Vec::new(),
        }
    }

    fn remove_partial_output(&self) {
        if !self.opts.out_path.exists() {
            return;
        }
        if let Err(e) = std::fs::remove_file(&self.opts.out_path) {
            tracing::warn!(
                out = %self.opts.out_path.display(),
                error = %e,
                "failed to remove partial output"
            );
        }
    }
}

impl FrameSink for FfmpegSink {
    fn begin(&mut self, cfg: SinkConfig) -> ReelResult<()> {
        if cfg.fps.num == 0 || cfg.fps.den == 0 {
            return Err(ReelError::validation("fps must be non-zero"));
        }
        Canvas::new(cfg.width, cfg.height)?;

        ensure_parent_dir(&self.opts.out_path)?;
        if !self.opts.overwrite && self.opts.out_path.exists() {
            return Err(ReelError::validation(format!(
                "output file '{}' already exists",
                self.opts.out_path.display()
            )));
        }

        if !tool_on_path(&self.opts.program) {
            return Err(ReelError::encode(format!(
                "ffmpeg is required for MP4 encoding, but '{}' could not be run",
                self.opts.program.display()
            )));
        }

        let mut cmd = Command::new(&self.opts.program);
        cmd.stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped());

        if self.opts.overwrite {
            cmd.arg("-y");
        } else {
            cmd.arg("-n");
        }

        cmd.args([
            "-loglevel",
            "error",
            "-f",
            "rawvideo",
            "-pix_fmt",
            "rgb24",
            "-s",
            &format!("{}x{}", cfg.width, cfg.height),
        ]);
        push_input_fps(&mut cmd, cfg.fps);
        cmd.args(["-i", "pipe:0", "-an"]);
        if let Some(filter) = self.opts.video_filter.as_deref() {
            cmd.args(["-vf", filter]);
        }
        // Output: h264 + yuv420p for broad compatibility.
        cmd.args([
            "-c:v",
            "libx264",
            "-pix_fmt",
            "yuv420p",
            "-movflags",
            "+faststart",
        ]);
        cmd.arg(&self.opts.out_path);

        let mut child = cmd.spawn().map_err(|e| {
            ReelError::encode(format!(
                "failed to spawn ffmpeg (is it installed and on PATH?): {e}"
            ))
        })?;

        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| ReelError::encode("failed to open ffmpeg stdin (unexpected)"))?;
        let mut stderr = child
            .stderr
            .take()
            .ok_or_else(|| ReelError::encode("failed to open ffmpeg stderr (unexpected)"))?;
        let stderr_drain = std::thread::spawn(move || {
            let mut stderr_bytes = Vec::new();
            stderr.read_to_end(&mut stderr_bytes)?;
            Ok(stderr_bytes)
        });

        tracing::debug!(
            out = %self.opts.out_path.display(),
            width = cfg.width,
            height = cfg.height,
            fps = cfg.fps.as_f64(),
            "ffmpeg encoder started"
        );
        self.frame_len = cfg.width as usize * cfg.height as usize * 3;
        self.child = Some(child);
        self.stdin = Some(stdin);
        self.stderr_drain = Some(stderr_drain);
        self.cfg = Some(cfg);
        self.last_idx = None;
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &RgbImage) -> ReelResult<()> {
        let cfg = self
            .cfg
            .as_ref()
            .ok_or_else(|| ReelError::encode("ffmpeg sink not started"))?;
        if let Some(last) = self.last_idx
            && idx.0 <= last.0
        {
            return Err(ReelError::encode(
                "ffmpeg sink received out-of-order frame index",
            ));
        }
        self.last_idx = Some(idx);

        if frame.width() != cfg.width || frame.height() != cfg.height {
            return Err(ReelError::validation(format!(
                "frame size mismatch: got {}x{}, expected {}x{}",
                frame.width(),
                frame.height(),
                cfg.width,
                cfg.height
            )));
        }
        let data = frame.as_raw();
        if data.len() != self.frame_len {
            return Err(ReelError::validation(
                "frame data size mismatch with width*height*3",
            ));
        }

        let Some(stdin) = self.stdin.as_mut() else {
            return Err(ReelError::encode("ffmpeg sink is already finalized"));
        };

        use std::io::Write as _;
        stdin.write_all(data).map_err(|e| {
            ReelError::encode(format!("failed to write frame to ffmpeg stdin: {e}"))
        })?;
        Ok(())
    }

    fn end(&mut self) -> ReelResult<()> {
        drop(self.stdin.take());
        let mut child = self
            .child
            .take()
            .ok_or_else(|| ReelError::encode("ffmpeg sink not started"))?;

        let waited = child.wait();
        let stderr_bytes = self.join_stderr();
        self.cfg = None;

        let status = match waited {
            Ok(status) => status,
            Err(e) => {
                self.remove_partial_output();
                return Err(ReelError::encode(format!(
                    "failed to wait for ffmpeg to finish: {e}"
                )));
            }
        };
        if !status.success() {
            self.remove_partial_output();
            let stderr = String::from_utf8_lossy(&stderr_bytes);
            return Err(ReelError::encode(format!(
                "ffmpeg exited with status {}: {}",
                status,
                stderr.trim()
            )));
        }
        Ok(())
    }

    fn abort(&mut self) {
        drop(self.stdin.take());
        let Some(mut child) = self.child.take() else {
            return;
        };
        let _ = child.kill();
        let _ = child.wait();
        self.join_stderr();
        self.cfg = None;
        self.remove_partial_output();
        tracing::debug!(out = %self.opts.out_path.display(), "ffmpeg encoder aborted");
    }
}

impl Drop for FfmpegSink {
    fn drop(&mut self) {
        if self.child.is_some() {
            self.abort();
        }
    }
}

fn push_input_fps(cmd: &mut Command, fps: Fps) {
    // For rawvideo input, `-r` goes before `-i`. Rational rates are passed as `num/den`.
    cmd.args(["-r", &format!("{}/{}", fps.num, fps.den)]);
}

/// Ensure the parent directory of `path` exists.
pub fn ensure_parent_dir(path: &Path) -> ReelResult<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        use anyhow::Context as _;
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory '{}'", parent.display()))?;
    }
    Ok(())
}

/// Return `true` when `ffmpeg` can be invoked from `PATH`.
pub fn is_ffmpeg_on_path() -> bool {
    tool_on_path("ffmpeg")
}

/// Return `true` when `ffprobe` can be invoked from `PATH`.
pub fn is_ffprobe_on_path() -> bool {
    tool_on_path("ffprobe")
}

fn tool_on_path(tool: impl AsRef<std::ffi::OsStr>) -> bool {
    Command::new(tool)
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

#[cfg(test)]
#[path = "../../tests/unit/encode/ffmpeg.rs"]
mod tests;
