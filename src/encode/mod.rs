//! Encoding sinks.
//!
//! Sinks consume rendered frames in frame order and are driven by [`crate::render`].

/// Secondary fade-in/fade-out copy encoded alongside the primary output.
pub mod cinematic;
/// `ffmpeg`-based sinks (MP4 output via system `ffmpeg`).
pub mod ffmpeg;
/// Generic frame sink trait and built-in sinks.
pub mod sink;
