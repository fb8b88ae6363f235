use std::f64::consts::TAU;

use image::RgbImage;

use crate::animation::ease::smoothstep;
use crate::animation::state::FrameState;
use crate::animation::timeline::{Boundary, FrameCursor, Timeline};
use crate::foundation::core::WHITE;
use crate::foundation::error::ReelResult;
use crate::foundation::math::trunc_px;
use crate::programs::{AnimationKind, Program, Setup, centred, cover_canvas};
use crate::raster::fit::add_border;
use crate::raster::paste::paste;
use crate::raster::warp::{BorderMode, transform};

const FRAME_BORDER: u32 = 10;

/// Phases of [`Swing`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Cover-fitted image rocks ±5° with a small sway.
    Swing,
    /// Bordered copy slides in from the right while rocking ±6°.
    SlideIn,
    /// Bordered copy swings diagonally ±10°.
    Diagonal,
}

/// Swing → slide-in → diagonal swing, 10 s.
pub struct Swing {
    timeline: Timeline<Phase>,
    full: RgbImage,
    bordered: RgbImage,
    origin: (i32, i32),
}

impl Program for Swing {
    type Phase = Phase;
    const KIND: AnimationKind = AnimationKind::Swing;

    fn prepare(source: &RgbImage, setup: &Setup<'_>) -> ReelResult<Self> {
        let full = cover_canvas(source, setup.canvas)?;
        let bordered = add_border(&full, FRAME_BORDER, WHITE);
        let origin = (
            centred(setup.canvas.width, bordered.width()),
            centred(setup.canvas.height, bordered.height()),
        );
        let timeline = Timeline::new([
            (Phase::Swing, 4.0),
            (Phase::SlideIn, 1.0),
            (Phase::Diagonal, 5.0),
        ])?
        .with_boundary(Boundary::PreviousPhase);
        Ok(Self {
            timeline,
            full,
            bordered,
            origin,
        })
    }

    fn timeline(&self) -> &Timeline<Phase> {
        &self.timeline
    }

    fn state(&self, cursor: &FrameCursor<Phase>) -> FrameState {
        let local = cursor.local_secs();
        match cursor.kind() {
            Phase::Swing => {
                let s = (cursor.progress() * TAU).sin();
                FrameState {
                    angle_deg: 5.0 * s,
                    offset: (trunc_px(20.0 * s), trunc_px(10.0 * s)),
                    ..FrameState::default()
                }
            }
            Phase::SlideIn => {
                // Phase clock runs at half speed: the slide only reaches its midpoint.
                let p = local / 2.0;
                let e = smoothstep(p);
                let s = (p * TAU).sin();
                let travel = f64::from(self.full.width() / 2 + self.bordered.width());
                FrameState {
                    eased: e,
                    angle_deg: 6.0 * s,
                    offset: (trunc_px((1.0 - e) * travel), trunc_px(50.0 * s)),
                    ..FrameState::default()
                }
            }
            Phase::Diagonal => {
                // Clock starts two seconds late, so the first two seconds swing backwards.
                let s = ((local - 2.0) / 3.0 * TAU).sin();
                FrameState {
                    angle_deg: 10.0 * s,
                    offset: (trunc_px(40.0 * s), trunc_px(40.0 * s)),
                    ..FrameState::default()
                }
            }
        }
    }

    fn draw(
        &mut self,
        cursor: &FrameCursor<Phase>,
        state: &FrameState,
        frame: &mut RgbImage,
    ) -> ReelResult<()> {
        let fill = BorderMode::Constant(WHITE);
        match cursor.kind() {
            Phase::Swing => {
                let rotated = transform(&self.full, state.angle_deg, 1.0, frame.dimensions(), fill)?;
                paste(frame, &rotated, state.offset.0, state.offset.1);
            }
            Phase::SlideIn | Phase::Diagonal => {
                let rotated =
                    transform(&self.bordered, state.angle_deg, 1.0, self.bordered.dimensions(), fill)?;
                paste(
                    frame,
                    &rotated,
                    self.origin.0 + state.offset.0,
                    self.origin.1 + state.offset.1,
                );
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/programs/swing.rs"]
mod tests;
