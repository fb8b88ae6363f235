//! Post-encode collaborators that shell out to the ffmpeg tool suite.
//!
//! Both steps run after the primary video exists. Their failures are [`ReelError::External`]
//! and never undo the video.
//!
//! [`ReelError::External`]: crate::ReelError::External

/// Audio track muxing.
pub mod audio;
/// `ffprobe` metadata reads.
pub mod probe;
