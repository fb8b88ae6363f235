use std::f64::consts::PI;

use image::RgbImage;

use crate::animation::ease::smoothstep;
use crate::animation::state::FrameState;
use crate::animation::timeline::{Boundary, FrameCursor, Timeline};
use crate::foundation::error::ReelResult;
use crate::foundation::math::trunc_px;
use crate::programs::{AnimationKind, Program, Setup, centred, fill_canvas, paste_scaled_centred};
use crate::raster::paste::{paste, paste_window};

/// Phases of [`RevealSlide`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// A centred window grows from nothing to the full image.
    Reveal,
    /// Scale 1 → 1.4 about the centre.
    Zoom,
    /// Full-size image slides in from the left edge.
    Slide,
    /// Scale breathes around 1.2 with a horizontal sway.
    Hold,
}

/// Reveal → zoom → slide → hold, 9 s.
pub struct RevealSlide {
    timeline: Timeline<Phase>,
    image: RgbImage,
    origin: (i32, i32),
}

impl Program for RevealSlide {
    type Phase = Phase;
    const KIND: AnimationKind = AnimationKind::RevealSlide;

    fn prepare(source: &RgbImage, setup: &Setup<'_>) -> ReelResult<Self> {
        let image = fill_canvas(source, setup.canvas)?;
        let origin = (
            centred(setup.canvas.width, image.width()),
            centred(setup.canvas.height, image.height()),
        );
        let timeline = Timeline::new([
            (Phase::Reveal, 1.3),
            (Phase::Zoom, 1.7),
            (Phase::Slide, 2.0),
            (Phase::Hold, 4.0),
        ])?
        .with_boundary(Boundary::PreviousPhase);
        Ok(Self {
            timeline,
            image,
            origin,
        })
    }

    fn timeline(&self) -> &Timeline<Phase> {
        &self.timeline
    }

    fn state(&self, cursor: &FrameCursor<Phase>) -> FrameState {
        let e = smoothstep(cursor.progress());
        match cursor.kind() {
            Phase::Reveal => FrameState {
                eased: e,
                reveal: Some(e),
                ..FrameState::default()
            },
            Phase::Zoom => FrameState {
                eased: e,
                scale: 1.0 + 0.4 * e,
                ..FrameState::default()
            },
            Phase::Slide => FrameState {
                eased: e,
                offset: (-trunc_px((1.0 - e) * f64::from(self.image.width())), 0),
                ..FrameState::default()
            },
            Phase::Hold => {
                let h = cursor.local_secs();
                FrameState {
                    eased: e,
                    scale: 1.2 + 0.02 * (h * PI * 1.2).sin(),
                    offset: (trunc_px(15.0 * (h * PI * 0.8).sin()), 0),
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
        let (ox, oy) = self.origin;
        match cursor.kind() {
            Phase::Reveal => {
                let (sx, sy, w, h) = reveal_window(
                    self.image.width(),
                    self.image.height(),
                    state.reveal.unwrap_or(0.0),
                );
                paste_window(frame, &self.image, (sx, sy, w, h), ox + sx as i32, oy + sy as i32);
            }
            Phase::Slide => {
                paste(frame, &self.image, ox + state.offset.0, oy);
            }
            Phase::Zoom | Phase::Hold => {
                paste_scaled_centred(frame, &self.image, state.scale, state.offset);
            }
        }
        Ok(())
    }
}

/// Centred sub-rectangle `(x, y, w, h)` of a `width`×`height` image open to fraction `open`.
pub fn reveal_window(width: u32, height: u32, open: f64) -> (u32, u32, u32, u32) {
    let (cx, cy) = (width / 2, height / 2);
    let hw = ((f64::from(cx) * open) as u32).min(cx);
    let hh = ((f64::from(cy) * open) as u32).min(cy);
    (cx - hw, cy - hh, 2 * hw, 2 * hh)
}

#[cfg(test)]
#[path = "../../tests/unit/programs/reveal_slide.rs"]
mod tests;
