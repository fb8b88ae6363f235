use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::assets::MediaSource;
use crate::assets::fetch;
use crate::foundation::error::{ReelError, ReelResult};

/// Download timeout for remote audio tracks.
const AUDIO_FETCH_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(60);

/// Mux the first audio stream of `audio` into `video`, replacing `video` in place.
///
/// The video stream is copied and audio re-encoded to AAC; the result is cut to the shorter of the
/// two. On failure `video` is left untouched and every scratch file is removed.
#[tracing::instrument(skip(video, audio), fields(video = %video.display(), audio = %audio))]
pub fn mux_audio(video: &Path, audio: &MediaSource) -> ReelResult<()> {
    if !video.is_file() {
        return Err(ReelError::external(format!(
            "audio mux: video '{}' does not exist",
            video.display()
        )));
    }

    let downloaded;
    let audio_path = match audio {
        MediaSource::Path(p) => {
            if !p.is_file() {
                return Err(ReelError::external(format!(
                    "audio mux: audio '{}' does not exist",
                    p.display()
                )));
            }
            p.as_path()
        }
        MediaSource::Url(url) => {
            let bytes = fetch::get_bytes(url, AUDIO_FETCH_TIMEOUT)
                .map_err(|e| ReelError::external(format!("audio mux: {e}")))?;
            downloaded = ScratchFile(sibling(video, "_audio_src"));
            std::fs::write(&downloaded.0, bytes).map_err(|e| {
                ReelError::external(format!(
                    "audio mux: write '{}': {e}",
                    downloaded.0.display()
                ))
            })?;
            downloaded.0.as_path()
        }
    };

    let muxed = ScratchFile(sibling(video, "_audio.mp4"));
    run_mux(video, audio_path, &muxed.0)?;
    std::fs::rename(&muxed.0, video).map_err(|e| {
        ReelError::external(format!(
            "audio mux: replace '{}': {e}",
            video.display()
        ))
    })?;
    tracing::info!("audio attached");
    Ok(())
}

fn run_mux(video: &Path, audio: &Path, out: &Path) -> ReelResult<()> {
    let output = Command::new("ffmpeg")
        .args(["-y", "-loglevel", "error", "-i"])
        .arg(video)
        .arg("-i")
        .arg(audio)
        .args([
            "-map", "0:v:0", "-map", "1:a:0", "-c:v", "copy", "-c:a", "aac", "-shortest",
        ])
        .arg(out)
        .stdin(Stdio::null())
        .output()
        .map_err(|e| ReelError::external(format!("audio mux: failed to run ffmpeg: {e}")))?;
    if !output.status.success() {
        return Err(ReelError::external(format!(
            "audio mux: ffmpeg exited with status {}: {}",
            output.status,
            String::from_utf8_lossy(&output.stderr).trim()
        )));
    }
    Ok(())
}

/// `<dir>/<stem><suffix>` next to `path`.
fn sibling(path: &Path, suffix: &str) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!("{stem}{suffix}"))
}

/// Removed on drop if it still exists.
struct ScratchFile(PathBuf);

impl Drop for ScratchFile {
    fn drop(&mut self) {
        if self.0.exists() {
            let _ = std::fs::remove_file(&self.0);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/media/audio.rs"]
mod tests;
