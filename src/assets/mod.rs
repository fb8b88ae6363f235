//! Source acquisition: the "give me a bitmap" and "give me bytes" collaborators.
//!
//! Every failure here surfaces as [`ReelError::InputUnavailable`], which aborts a render before
//! any frame is written.

/// Image decoding.
pub mod decode;
/// Blocking HTTP retrieval.
pub mod fetch;

use std::fmt;
use std::path::{Path, PathBuf};

use image::RgbImage;

use crate::foundation::error::{ReelError, ReelResult};

/// Where an input lives: a local file or an `http(s)://` URL.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(from = "String", into = "String")]
pub enum MediaSource {
    /// Local filesystem path.
    Path(PathBuf),
    /// Remote URL fetched with a blocking GET.
    Url(String),
}

impl MediaSource {
    /// Classify `s` by its scheme prefix.
    pub fn parse(s: &str) -> Self {
        let lower = s.trim_start().to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            Self::Url(s.trim().to_owned())
        } else {
            Self::Path(PathBuf::from(s))
        }
    }

    /// `true` for remote sources.
    pub fn is_remote(&self) -> bool {
        matches!(self, Self::Url(_))
    }

    /// Read the raw bytes behind this source.
    pub fn read_bytes(&self) -> ReelResult<Vec<u8>> {
        match self {
            Self::Path(p) => read_file(p),
            Self::Url(url) => fetch::get_bytes(url, fetch::DEFAULT_TIMEOUT),
        }
    }
}

impl From<String> for MediaSource {
    fn from(s: String) -> Self {
        Self::parse(&s)
    }
}

impl From<MediaSource> for String {
    fn from(src: MediaSource) -> Self {
        src.to_string()
    }
}

impl From<&Path> for MediaSource {
    fn from(p: &Path) -> Self {
        Self::Path(p.to_path_buf())
    }
}

impl fmt::Display for MediaSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Path(p) => write!(f, "{}", p.display()),
            Self::Url(u) => f.write_str(u),
        }
    }
}

/// Load and decode an image from `source` into packed RGB8.
#[tracing::instrument(level = "debug", fields(source = %source))]
pub fn load_image(source: &MediaSource) -> ReelResult<RgbImage> {
    let bytes = source.read_bytes()?;
    decode::decode_image(&bytes).map_err(|e| match e {
        ReelError::InputUnavailable(msg) => {
            ReelError::input_unavailable(format!("{source}: {msg}"))
        }
        other => other,
    })
}

fn read_file(path: &Path) -> ReelResult<Vec<u8>> {
    std::fs::read(path).map_err(|e| {
        ReelError::input_unavailable(format!("read '{}': {e}", path.display()))
    })
}

#[cfg(test)]
#[path = "../../tests/unit/assets/mod.rs"]
mod tests;
