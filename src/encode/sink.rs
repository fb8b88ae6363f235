use image::RgbImage;

use crate::foundation::core::{Fps, FrameIndex};
use crate::foundation::error::ReelResult;

/// Configuration provided to a [`FrameSink`] before the first frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SinkConfig {
    /// Output width in pixels.
    pub width: u32,
    /// Output height in pixels.
    pub height: u32,
    /// Output frames-per-second.
    pub fps: Fps,
    /// Number of frames that will be pushed.
    pub frame_count: u64,
}

/// Sink contract for consuming rendered frames in frame order.
///
/// Ordering contract: `push_frame` is called in strictly increasing `FrameIndex` order, starting
/// at 0. Exactly one of `end` or `abort` follows a successful `begin`.
pub trait FrameSink: Send {
    /// Called once before any frames are pushed.
    fn begin(&mut self, cfg: SinkConfig) -> ReelResult<()>;
    /// Push one frame in strictly increasing order.
    fn push_frame(&mut self, idx: FrameIndex, frame: &RgbImage) -> ReelResult<()>;
    /// Called once after the last frame is pushed.
    fn end(&mut self) -> ReelResult<()>;
    /// Called instead of `end` when the render fails. Must release every held resource.
    fn abort(&mut self) {}
}

/// In-memory sink that retains every frame, for tests and single-frame previews.
#[derive(Debug, Default)]
pub struct InMemorySink {
    cfg: Option<SinkConfig>,
    frames: Vec<(FrameIndex, RgbImage)>,
}

impl InMemorySink {
    /// Create a new in-memory sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the sink configuration captured in `begin`, if any.
    pub fn config(&self) -> Option<SinkConfig> {
        self.cfg
    }

    /// Borrow the captured frames.
    pub fn frames(&self) -> &[(FrameIndex, RgbImage)] {
        &self.frames
    }

    /// Take ownership of the captured frames.
    pub fn into_frames(self) -> Vec<(FrameIndex, RgbImage)> {
        self.frames
    }
}

impl FrameSink for InMemorySink {
    fn begin(&mut self, cfg: SinkConfig) -> ReelResult<()> {
        self.cfg = Some(cfg);
        self.frames.clear();
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &RgbImage) -> ReelResult<()> {
        self.frames.push((idx, frame.clone()));
        Ok(())
    }

    fn end(&mut self) -> ReelResult<()> {
        Ok(())
    }

    fn abort(&mut self) {
        self.frames.clear();
    }
}

/// Sink that only counts frames and keeps the first one.
///
/// Lets full-length renders run in tests without holding every frame.
#[derive(Debug, Default)]
pub struct FrameCounter {
    cfg: Option<SinkConfig>,
    count: u64,
    first: Option<RgbImage>,
    ended: bool,
}

impl FrameCounter {
    /// Create an empty counter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Frames pushed since `begin`.
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Frame 0, if it was pushed.
    pub fn first_frame(&self) -> Option<&RgbImage> {
        self.first.as_ref()
    }

    /// Configuration captured in `begin`.
    pub fn config(&self) -> Option<SinkConfig> {
        self.cfg
    }

    /// `true` once `end` ran.
    pub fn ended(&self) -> bool {
        self.ended
    }
}

impl FrameSink for FrameCounter {
    fn begin(&mut self, cfg: SinkConfig) -> ReelResult<()> {
        *self = Self {
            cfg: Some(cfg),
            ..Self::default()
        };
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &RgbImage) -> ReelResult<()> {
        if idx.0 == 0 {
            self.first = Some(frame.clone());
        }
        self.count += 1;
        Ok(())
    }

    fn end(&mut self) -> ReelResult<()> {
        self.ended = true;
        Ok(())
    }
}
