use std::path::Path;
use std::process::Command;

use crate::foundation::error::{ReelError, ReelResult};

/// Container and first video stream facts read back by `ffprobe`.
#[derive(Clone, Debug, PartialEq)]
pub struct VideoInfo {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// `r_frame_rate` as `(num, den)`.
    pub fps: (u32, u32),
    /// Container duration in seconds.
    pub duration_secs: f64,
    /// Frame count from the stream header, when the container records it.
    pub frame_count: Option<u64>,
    /// Whether any audio stream is present.
    pub has_audio: bool,
}

#[derive(serde::Deserialize)]
struct ProbeStream {
    codec_type: Option<String>,
    width: Option<u32>,
    height: Option<u32>,
    r_frame_rate: Option<String>,
    nb_frames: Option<String>,
}

#[derive(serde::Deserialize)]
struct ProbeFormat {
    duration: Option<String>,
}

#[derive(serde::Deserialize)]
struct ProbeOut {
    #[serde(default)]
    streams: Vec<ProbeStream>,
    format: Option<ProbeFormat>,
}

/// Read stream and container metadata of the video at `path`.
pub fn probe_video(path: &Path) -> ReelResult<VideoInfo> {
    let parsed = run_ffprobe(path, &["-show_streams", "-show_format"])?;
    let video = parsed
        .streams
        .iter()
        .find(|s| s.codec_type.as_deref() == Some("video"))
        .ok_or_else(|| ReelError::external("no video stream found"))?;
    let width = video
        .width
        .ok_or_else(|| ReelError::external("missing video width from ffprobe"))?;
    let height = video
        .height
        .ok_or_else(|| ReelError::external("missing video height from ffprobe"))?;
    let fps = parse_ff_ratio(video.r_frame_rate.as_deref().unwrap_or("0/1"))
        .ok_or_else(|| ReelError::external("invalid video r_frame_rate"))?;

    Ok(VideoInfo {
        width,
        height,
        fps,
        duration_secs: format_duration(&parsed).unwrap_or(0.0),
        frame_count: video.nb_frames.as_deref().and_then(|s| s.parse().ok()),
        has_audio: parsed
            .streams
            .iter()
            .any(|s| s.codec_type.as_deref() == Some("audio")),
    })
}

/// How long the file at `path` plays, from the container's `format.duration`.
pub fn probe_duration(path: &Path) -> ReelResult<f64> {
    let parsed = run_ffprobe(path, &["-show_format"])?;
    format_duration(&parsed).ok_or_else(|| {
        ReelError::external(format!(
            "ffprobe reported no duration for '{}'",
            path.display()
        ))
    })
}

fn run_ffprobe(path: &Path, sections: &[&str]) -> ReelResult<ProbeOut> {
    let out = Command::new("ffprobe")
        .args(["-v", "error", "-print_format", "json"])
        .args(sections)
        .arg(path)
        .output()
        .map_err(|e| ReelError::external(format!("failed to run ffprobe: {e}")))?;
    if !out.status.success() {
        return Err(ReelError::external(format!(
            "ffprobe failed for '{}': {}",
            path.display(),
            String::from_utf8_lossy(&out.stderr).trim()
        )));
    }
    parse_probe_json(&out.stdout)
}

fn parse_probe_json(bytes: &[u8]) -> ReelResult<ProbeOut> {
    serde_json::from_slice(bytes)
        .map_err(|e| ReelError::external(format!("ffprobe json parse failed: {e}")))
}

fn format_duration(parsed: &ProbeOut) -> Option<f64> {
    parsed
        .format
        .as_ref()
        .and_then(|f| f.duration.as_deref())
        .and_then(|s| s.parse::<f64>().ok())
        .filter(|d| d.is_finite() && *d >= 0.0)
}

/// Parse an ffmpeg `num/den` ratio such as `30000/1001`.
pub(crate) fn parse_ff_ratio(s: &str) -> Option<(u32, u32)> {
    let (num, den) = s.split_once('/')?;
    let num = num.trim().parse::<u32>().ok()?;
    let den = den.trim().parse::<u32>().ok()?;
    if den == 0 {
        return None;
    }
    Some((num, den))
}

#[cfg(test)]
#[path = "../../tests/unit/media/probe.rs"]
mod tests;
