use image::RgbImage;

use crate::animation::state::FrameState;
use crate::animation::timeline::{FrameCursor, Timeline};
use crate::foundation::error::ReelResult;
use crate::foundation::math::trunc_px;
use crate::programs::zoom_effect::{IMAGE_WEIGHT, zoom_blur_fade};
use crate::programs::{AnimationKind, Program, Setup, fill_canvas};
use crate::raster::blend::crossfade;
use crate::raster::blur::odd_kernel;

const ZOOM_SECS: f64 = 3.0;
const BLUR_SECS: f64 = 0.8;

/// Phases of [`UltraZoomBlur`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Zoom 1 → 1.3.
    Zoom,
    /// Zoom 1.3 → 2.8 with a growing blur (kernel 5 → 30) and a partial fade.
    Blur,
}

/// Four zoom pulses separated by three blur bursts, 14.4 s.
pub struct UltraZoomBlur {
    timeline: Timeline<Phase>,
    composite: RgbImage,
}

impl Program for UltraZoomBlur {
    type Phase = Phase;
    const KIND: AnimationKind = AnimationKind::UltraZoomBlur;

    fn prepare(source: &RgbImage, setup: &Setup<'_>) -> ReelResult<Self> {
        let resized = fill_canvas(source, setup.canvas)?;
        let composite = crossfade(setup.background, &resized, IMAGE_WEIGHT)?;
        let mut phases = vec![(Phase::Zoom, ZOOM_SECS)];
        for _ in 0..3 {
            phases.push((Phase::Blur, BLUR_SECS));
            phases.push((Phase::Zoom, ZOOM_SECS));
        }
        Ok(Self {
            timeline: Timeline::new(phases)?,
            composite,
        })
    }

    fn timeline(&self) -> &Timeline<Phase> {
        &self.timeline
    }

    fn state(&self, cursor: &FrameCursor<Phase>) -> FrameState {
        let p = cursor.progress();
        match cursor.kind() {
            Phase::Zoom => FrameState {
                eased: p,
                scale: 1.0 + 0.3 * p,
                ..FrameState::default()
            },
            Phase::Blur => FrameState {
                eased: p,
                scale: 1.3 + 1.5 * p,
                blur_kernel: Some(odd_kernel(i64::from(trunc_px(5.0 + 25.0 * p)).max(3))),
                alpha: 1.0 - 0.8 * p,
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

#[cfg(test)]
#[path = "../../tests/unit/programs/ultra_zoom_blur.rs"]
mod tests;
