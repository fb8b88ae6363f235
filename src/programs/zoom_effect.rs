use image::RgbImage;

use crate::animation::state::FrameState;
use crate::animation::timeline::{FrameCursor, Timeline};
use crate::foundation::core::{BLACK, Fps};
use crate::foundation::error::ReelResult;
use crate::foundation::math::trunc_px;
use crate::programs::{AnimationKind, Program, Setup, fill_canvas};
use crate::raster::blend::{crossfade, fade_to_black};
use crate::raster::blur::{gaussian_blur, odd_kernel};
use crate::raster::warp::{BorderMode, translate, zoom};

/// Weight of the source image in the fixed composite.
pub(crate) const IMAGE_WEIGHT: f64 = 0.7;
/// Shortest render this program produces, in seconds.
const MIN_DURATION_SECS: f64 = 5.0;

/// Phases of [`ZoomEffect`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Zoom 1 → 1.3.
    ZoomIn,
    /// Shift right by up to 120 % of the width.
    SlideRight,
    /// Zoom 1.3 → 1.
    ZoomOut,
    /// Shift left by up to 120 % of the width.
    SlideLeft,
    /// Zoom 1 → 1.2 while blurring (kernel 3 → 28) and fading to black.
    BlurFade,
}

/// Zoom, slides and a blurred fade-out over a fixed image/background composite, 7.8 s.
///
/// Progress is linear in every phase.
pub struct ZoomEffect {
    timeline: Timeline<Phase>,
    composite: RgbImage,
}

impl Program for ZoomEffect {
    type Phase = Phase;
    const KIND: AnimationKind = AnimationKind::ZoomEffect;

    fn prepare(source: &RgbImage, setup: &Setup<'_>) -> ReelResult<Self> {
        let resized = fill_canvas(source, setup.canvas)?;
        let composite = crossfade(setup.background, &resized, IMAGE_WEIGHT)?;
        let timeline = Timeline::new([
            (Phase::ZoomIn, 3.0),
            (Phase::SlideRight, 0.3),
            (Phase::ZoomOut, 3.0),
            (Phase::SlideLeft, 0.5),
            (Phase::BlurFade, 1.0),
        ])?;
        Ok(Self {
            timeline,
            composite,
        })
    }

    fn timeline(&self) -> &Timeline<Phase> {
        &self.timeline
    }

    fn frame_count(&self, fps: Fps) -> u64 {
        fps.secs_to_frames_floor(MIN_DURATION_SECS)
            .max(self.timeline.total_frames(fps))
    }

    fn state(&self, cursor: &FrameCursor<Phase>) -> FrameState {
        let p = cursor.progress();
        let shift = trunc_px(p * f64::from(self.composite.width()) * 1.2);
        match cursor.kind() {
            Phase::ZoomIn => FrameState {
                eased: p,
                scale: 1.0 + 0.3 * p,
                ..FrameState::default()
            },
            Phase::SlideRight => FrameState {
                eased: p,
                offset: (shift, 0),
                ..FrameState::default()
            },
            Phase::ZoomOut => FrameState {
                eased: p,
                scale: 1.3 - 0.3 * p,
                ..FrameState::default()
            },
            Phase::SlideLeft => FrameState {
                eased: p,
                offset: (-shift, 0),
                ..FrameState::default()
            },
            Phase::BlurFade => FrameState {
                eased: p,
                scale: 1.0 + 0.2 * p,
                blur_kernel: Some(odd_kernel(i64::from(trunc_px(3.0 + 25.0 * p)).max(3))),
                alpha: 1.0 - p,
                ..FrameState::default()
            },
        }
    }

    fn draw(
        &mut self,
        _cursor: &FrameCursor<Phase>,
        state: &FrameState,
        frame: &mut RgbImage,
    ) -> ReelResult<()> {
        let out = zoom_blur_fade(&self.composite, state)?;
        frame.copy_from_slice(&out);
        Ok(())
    }
}

/// Apply a state's zoom or shift, then its blur and fade, to a full-canvas composite.
///
/// Uncovered pixels are black.
pub(crate) fn zoom_blur_fade(composite: &RgbImage, state: &FrameState) -> ReelResult<RgbImage> {
    let black = BorderMode::Constant(BLACK);
    let mut out = if state.offset != (0, 0) {
        translate(composite, state.offset.0, state.offset.1, black)?
    } else if state.scale != 1.0 {
        zoom(composite, state.scale, black)?
    } else {
        composite.clone()
    };
    if let Some(k) = state.blur_kernel {
        out = gaussian_blur(&out, k)?;
    }
    if state.alpha < 1.0 {
        fade_to_black(&mut out, state.alpha);
    }
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/programs/zoom_effect.rs"]
mod tests;
