use crate::foundation::error::{ReelError, ReelResult};

pub use kurbo::{Affine, Point, Vec2};

/// 8-bit RGB color, channel order R, G, B.
pub type Rgb8 = [u8; 3];

/// Opaque white.
pub const WHITE: Rgb8 = [255, 255, 255];
/// Opaque black.
pub const BLACK: Rgb8 = [0, 0, 0];

/// Float slack absorbed when mapping seconds onto frame boundaries.
pub(crate) const TIME_EPSILON: f64 = 1e-9;

/// Zero-based output frame index.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(pub u64);

/// Output frame rate as a rational `num / den`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Fps {
    /// Numerator (frames).
    pub num: u32,
    /// Denominator (seconds), must be > 0.
    pub den: u32,
}

impl Fps {
    /// Build a validated rational frame rate.
    pub fn new(num: u32, den: u32) -> ReelResult<Self> {
        if den == 0 {
            return Err(ReelError::validation("Fps den must be > 0"));
        }
        if num == 0 {
            return Err(ReelError::validation("Fps num must be > 0"));
        }
        Ok(Self { num, den })
    }

    /// Build an integer frame rate (`fps/1`).
    pub fn whole(fps: u32) -> ReelResult<Self> {
        Self::new(fps, 1)
    }

    /// Frames per second as a float.
    pub fn as_f64(self) -> f64 {
        f64::from(self.num) / f64::from(self.den)
    }

    /// Seconds covered by one frame.
    pub fn frame_duration_secs(self) -> f64 {
        f64::from(self.den) / f64::from(self.num)
    }

    /// Wall-clock time of frame `frames` (`frames / fps`).
    pub fn frames_to_secs(self, frames: u64) -> f64 {
        (frames as f64) * self.frame_duration_secs()
    }

    /// `floor(secs * fps)`, tolerant of float error just below an exact product.
    pub fn secs_to_frames_floor(self, secs: f64) -> u64 {
        (secs * self.as_f64() + TIME_EPSILON).floor().max(0.0) as u64
    }
}

/// Output frame dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// 1080×1920 portrait, the resolution every program renders at by default.
    pub const PORTRAIT: Canvas = Canvas {
        width: 1080,
        height: 1920,
    };

    /// Build a validated canvas. Dimensions must be non-zero and even (yuv420p output).
    pub fn new(width: u32, height: u32) -> ReelResult<Self> {
        let canvas = Self { width, height };
        canvas.validate()?;
        Ok(canvas)
    }

    /// Check the invariants required by the encoder.
    pub fn validate(self) -> ReelResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(ReelError::validation("canvas width/height must be non-zero"));
        }
        if !self.width.is_multiple_of(2) || !self.height.is_multiple_of(2) {
            return Err(ReelError::validation(
                "canvas width/height must be even (required for yuv420p mp4 output)",
            ));
        }
        Ok(())
    }

    /// Scale one dimension by a fraction of the canvas width, truncating toward zero.
    pub fn frac_w(self, f: f64) -> u32 {
        (f64::from(self.width) * f) as u32
    }

    /// Scale one dimension by a fraction of the canvas height, truncating toward zero.
    pub fn frac_h(self, f: f64) -> u32 {
        (f64::from(self.height) * f) as u32
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self::PORTRAIT
    }
}
