//! The seven animation programs and their registry.
//!
//! A program is a phase table plus a per-phase state function (`state`) and a compositor
//! (`draw`). The engine in [`crate::render`] owns the frame loop; programs never see the sink.

/// Cartoon-stylized still over the gradient.
pub mod cartoon;
/// Collage of bordered thumbnails into a spin and slide-out.
pub mod collage_spin;
/// Centred reveal, zoom, slide-in and animated hold.
pub mod reveal_slide;
/// Full-screen swing, slide-in and diagonal swing.
pub mod swing;
/// Zoom/blur pulses with a cinematic copy.
pub mod ultra_zoom_blur;
/// Zoom, slides and a blurred fade to black with a cinematic copy.
pub mod zoom_effect;
/// Delayed zoom-pan, roll-out and sparkle particles.
pub mod zoom_roll;

use std::fmt;
use std::str::FromStr;

use image::RgbImage;

use crate::animation::state::FrameState;
use crate::animation::timeline::{FrameCursor, Timeline};
use crate::foundation::core::{Canvas, Fps};
use crate::foundation::error::{ReelError, ReelResult};
use crate::raster::background::BackgroundSpec;
use crate::raster::fit;

/// Everything fixed for the duration of one render, handed to [`Program::prepare`].
#[derive(Clone, Copy, Debug)]
pub struct Setup<'a> {
    /// Output frame size.
    pub canvas: Canvas,
    /// Output frame rate.
    pub fps: Fps,
    /// Immutable background template; every frame starts as a copy of it.
    pub background: &'a RgbImage,
    /// Seed for programs that draw random numbers. `None` uses OS entropy.
    pub seed: Option<u64>,
}

/// One animation variant expressed against the shared timeline and raster primitives.
pub trait Program: Sized {
    /// Phase tag selecting the parameter formula.
    type Phase: Copy + fmt::Debug + PartialEq;

    /// Registry entry this program implements.
    const KIND: AnimationKind;

    /// Derive the immutable bitmaps this program composites from.
    fn prepare(source: &RgbImage, setup: &Setup<'_>) -> ReelResult<Self>;

    /// Fixed phase table.
    fn timeline(&self) -> &Timeline<Self::Phase>;

    /// Number of frames emitted at `fps`.
    fn frame_count(&self, fps: Fps) -> u64 {
        self.timeline().total_frames(fps)
    }

    /// Closed-form parameters for the frame at `cursor`.
    fn state(&self, cursor: &FrameCursor<Self::Phase>) -> FrameState;

    /// Composite one frame. `frame` arrives as a fresh copy of the background.
    fn draw(
        &mut self,
        cursor: &FrameCursor<Self::Phase>,
        state: &FrameState,
        frame: &mut RgbImage,
    ) -> ReelResult<()>;
}

/// Fade lengths of the secondary "cinematic" copy some programs emit.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CinematicFade {
    /// Fade-in from black at the start, in seconds.
    pub fade_in_secs: f64,
    /// Fade-out to black at the end, in seconds.
    pub fade_out_secs: f64,
}

/// Public names of the seven programs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize)]
pub enum AnimationKind {
    /// Collage → blur-fade → spin → pause → slide-out.
    ///
    /// Draws over the default gradient. For a photo backdrop pass
    /// `BackgroundSpec::Image` (`{"image": "<path or url>"}` in a job).
    #[default]
    #[serde(rename = "reveal_vertical_zoomout")]
    CollageSpin,
    /// Wait → zoom-pan → roll-out, with particles.
    #[serde(rename = "zoomin_zoomout_fadein2")]
    ZoomRoll,
    /// Reveal → zoom → slide → hold.
    #[serde(rename = "center_reveal_slide3")]
    RevealSlide,
    /// Swing → slide-in → diagonal swing.
    #[serde(rename = "swing_r_swing_d4")]
    Swing,
    /// Static cartoon composite.
    #[serde(rename = "image_to_cartoon5")]
    Cartoon,
    /// Zoom-in → slide → zoom-out → slide → blur-fade.
    #[serde(rename = "zoomout_with_effect6")]
    ZoomEffect,
    /// Alternating zoom and blur pulses.
    #[serde(rename = "ultra_zoom_blur7")]
    UltraZoomBlur,
}

impl AnimationKind {
    /// Every program, in registry order.
    pub const ALL: [AnimationKind; 7] = [
        Self::CollageSpin,
        Self::ZoomRoll,
        Self::RevealSlide,
        Self::Swing,
        Self::Cartoon,
        Self::ZoomEffect,
        Self::UltraZoomBlur,
    ];

    /// Registry name.
    pub fn name(self) -> &'static str {
        match self {
            Self::CollageSpin => "reveal_vertical_zoomout",
            Self::ZoomRoll => "zoomin_zoomout_fadein2",
            Self::RevealSlide => "center_reveal_slide3",
            Self::Swing => "swing_r_swing_d4",
            Self::Cartoon => "image_to_cartoon5",
            Self::ZoomEffect => "zoomout_with_effect6",
            Self::UltraZoomBlur => "ultra_zoom_blur7",
        }
    }

    /// Frame rate used when the caller does not pick one.
    pub fn default_fps(self) -> u32 {
        match self {
            Self::CollageSpin | Self::ZoomRoll => 24,
            _ => 30,
        }
    }

    /// Background used when the caller does not pick one.
    pub fn default_background(self) -> BackgroundSpec {
        match self {
            Self::ZoomRoll => BackgroundSpec::black(),
            _ => BackgroundSpec::default_gradient(),
        }
    }

    /// Fades of the secondary copy, for the programs that produce one.
    pub fn cinematic(self) -> Option<CinematicFade> {
        match self {
            Self::ZoomEffect => Some(CinematicFade {
                fade_in_secs: 1.0,
                fade_out_secs: 1.0,
            }),
            Self::UltraZoomBlur => Some(CinematicFade {
                fade_in_secs: 0.8,
                fade_out_secs: 1.0,
            }),
            _ => None,
        }
    }

    /// One-line description for listings.
    pub fn summary(self) -> &'static str {
        match self {
            Self::CollageSpin => "collage slide-in, blur-fade, 360° spin, slide-out",
            Self::ZoomRoll => "delayed zoom-pan, 180° roll-out, sparkle particles",
            Self::RevealSlide => "centre reveal, zoom, slide-in, animated hold",
            Self::Swing => "full-screen swing, slide-in, diagonal swing",
            Self::Cartoon => "cartoon-stylized still over gradient",
            Self::ZoomEffect => "zoom, slides, blur fade-out (+ cinematic copy)",
            Self::UltraZoomBlur => "zoom/blur pulses (+ cinematic copy)",
        }
    }
}

impl fmt::Display for AnimationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AnimationKind {
    type Err = ReelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|k| k.name() == s)
            .ok_or_else(|| {
                ReelError::validation(format!(
                    "unknown animation '{s}' (expected one of: {})",
                    Self::ALL.map(|k| k.name()).join(", ")
                ))
            })
    }
}

/// Top-left coordinate that centres a span of `inner` pixels in `outer` (floor division).
pub(crate) fn centred(outer: u32, inner: u32) -> i32 {
    (i64::from(outer) / 2 - i64::from(inner) / 2) as i32
}

/// [`fit::resize_exact`] to the canvas, failing when either side is empty.
pub(crate) fn fill_canvas(source: &RgbImage, canvas: Canvas) -> ReelResult<RgbImage> {
    fit::resize_exact(source, canvas.width, canvas.height)
        .ok_or_else(|| ReelError::input_unavailable("source image has no pixels"))
}

/// [`fit::cover`] to the canvas, failing when either side is empty.
pub(crate) fn cover_canvas(source: &RgbImage, canvas: Canvas) -> ReelResult<RgbImage> {
    fit::cover(source, canvas.width, canvas.height)
        .ok_or_else(|| ReelError::input_unavailable("source image has no pixels"))
}

/// Resize by `scale` and paste centred with an extra `offset`. Nothing is drawn when the scaled
/// image collapses to zero pixels.
pub(crate) fn paste_scaled_centred(
    frame: &mut RgbImage,
    img: &RgbImage,
    scale: f64,
    offset: (i32, i32),
) -> bool {
    let Some(scaled) = fit::resize_by(img, scale) else {
        return false;
    };
    let x = centred(frame.width(), scaled.width()) + offset.0;
    let y = centred(frame.height(), scaled.height()) + offset.1;
    crate::raster::paste::paste(frame, &scaled, x, y)
}

#[cfg(test)]
#[path = "../../tests/unit/programs/mod.rs"]
mod tests;
