use image::RgbImage;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::animation::ease::smootherstep;
use crate::animation::particles::{ParticleConfig, ParticleField};
use crate::animation::state::FrameState;
use crate::animation::timeline::{FrameCursor, Timeline};
use crate::foundation::core::{Canvas, WHITE};
use crate::foundation::error::{ReelError, ReelResult};
use crate::foundation::math::{clamp01, lerp, trunc_px};
use crate::programs::{AnimationKind, Program, Setup};
use crate::raster::blend::fade_to_black;
use crate::raster::paste::paste;
use crate::raster::warp::{BorderMode, transform};

/// Zoom at the start of the pan, relative to the cover scale.
const ZOOM_START: f64 = 1.15;
/// Pan runs from `(-80, 40)` to `(80, -40)` pixels.
const PAN: (f64, f64) = (80.0, 40.0);
/// Global fade-in/out length.
const FADE_SECS: f64 = 0.5;

/// Phases of [`ZoomRoll`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Background only, particles frozen.
    Wait,
    /// Quintic zoom from 1.15× to 1× cover scale with a diagonal pan.
    ZoomSlide,
    /// 180° roll while shrinking to 10 % and panning back to centre.
    RollOut,
}

/// Delayed zoom-pan and roll-out with a sparkle overlay, 10 s.
///
/// The only program with state carried between frames: the particle field.
pub struct ZoomRoll {
    timeline: Timeline<Phase>,
    canvas: Canvas,
    source: RgbImage,
    cover_scale: f64,
    particles: ParticleField<StdRng>,
}

impl Program for ZoomRoll {
    type Phase = Phase;
    const KIND: AnimationKind = AnimationKind::ZoomRoll;

    fn prepare(source: &RgbImage, setup: &Setup<'_>) -> ReelResult<Self> {
        let (ow, oh) = source.dimensions();
        if ow == 0 || oh == 0 {
            return Err(ReelError::input_unavailable("source image has no pixels"));
        }
        let canvas = setup.canvas;
        let cover_scale = (f64::from(canvas.width) / f64::from(ow))
            .max(f64::from(canvas.height) / f64::from(oh));
        let rng = match setup.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let timeline = Timeline::new([
            (Phase::Wait, 2.0),
            (Phase::ZoomSlide, 5.0),
            (Phase::RollOut, 3.0),
        ])?;
        Ok(Self {
            timeline,
            canvas,
            source: source.clone(),
            cover_scale,
            particles: ParticleField::new(
                ParticleConfig::default(),
                canvas.width,
                canvas.height,
                rng,
            ),
        })
    }

    fn timeline(&self) -> &Timeline<Phase> {
        &self.timeline
    }

    fn state(&self, cursor: &FrameCursor<Phase>) -> FrameState {
        let alpha = global_fade(cursor.frame.0, cursor.total_frames, cursor.fps.as_f64());
        let e = smootherstep(cursor.progress());
        match cursor.kind() {
            Phase::Wait => FrameState {
                alpha,
                ..FrameState::hidden()
            },
            Phase::ZoomSlide => FrameState {
                eased: e,
                scale: lerp(ZOOM_START * self.cover_scale, self.cover_scale, e),
                offset: (
                    trunc_px(lerp(-PAN.0, PAN.0, e)),
                    trunc_px(lerp(PAN.1, -PAN.1, e)),
                ),
                alpha,
                ..FrameState::default()
            },
            Phase::RollOut => FrameState {
                eased: e,
                angle_deg: 180.0 * e,
                scale: self.cover_scale * (1.0 - 0.9 * e),
                offset: (trunc_px(PAN.0 * (1.0 - e)), trunc_px(-PAN.1 * (1.0 - e))),
                alpha,
                ..FrameState::default()
            },
        }
    }

    fn draw(
        &mut self,
        cursor: &FrameCursor<Phase>,
        state: &FrameState,
        frame: &mut RgbImage,
    ) -> ReelResult<()> {
        if state.visible {
            let (ow, oh) = self.source.dimensions();
            let sw = (f64::from(ow) * state.scale) as u32;
            let sh = (f64::from(oh) * state.scale) as u32;
            if sw > 0 && sh > 0 {
                let warped = transform(
                    &self.source,
                    state.angle_deg,
                    state.scale,
                    (sw, sh),
                    BorderMode::Constant(WHITE),
                )?;
                let x = (i64::from(self.canvas.width) - i64::from(sw)).div_euclid(2) as i32;
                let y = (i64::from(self.canvas.height) - i64::from(sh)).div_euclid(2) as i32;
                paste(frame, &warped, x + state.offset.0, y + state.offset.1);
            }
        }
        if cursor.kind() != Phase::Wait {
            self.particles.advance(cursor.fps.frame_duration_secs());
            self.particles.draw(frame);
            self.particles.replenish();
        }
        if state.alpha < 1.0 {
            fade_to_black(frame, state.alpha);
        }
        Ok(())
    }
}

impl ZoomRoll {
    /// Live particle count.
    pub fn particle_count(&self) -> usize {
        self.particles.len()
    }
}

/// Linear fade over the first and last `0.5 s` worth of whole frames.
pub fn global_fade(frame: u64, total: u64, fps: f64) -> f64 {
    let fade = (fps * FADE_SECS) as u64;
    if fade == 0 {
        return 1.0;
    }
    let a = if frame < fade {
        frame as f64 / fade as f64
    } else if frame > total.saturating_sub(fade) {
        total.saturating_sub(frame) as f64 / fade as f64
    } else {
        1.0
    };
    clamp01(a)
}

#[cfg(test)]
#[path = "../../tests/unit/programs/zoom_roll.rs"]
mod tests;
