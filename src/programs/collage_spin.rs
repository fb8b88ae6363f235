use image::RgbImage;

use crate::animation::ease::smoothstep;
use crate::animation::state::FrameState;
use crate::animation::timeline::{FrameCursor, Timeline};
use crate::foundation::core::{Canvas, WHITE};
use crate::foundation::error::{ReelError, ReelResult};
use crate::foundation::math::trunc_px;
use crate::programs::{AnimationKind, Program, Setup, centred};
use crate::raster::blend::fade_to_black;
use crate::raster::blur::{gaussian_blur_sigma, kernel_for_sigma};
use crate::raster::fit::{add_border, resize_exact};
use crate::raster::paste::{paste, paste_blend};
use crate::raster::warp::{BorderMode, transform};

/// Thumbnail anchors as fractions of the canvas.
const ANCHORS: [(f64, f64); 4] = [(0.08, 0.30), (0.38, 0.10), (0.20, 0.70), (0.38, 0.50)];
/// Thumbnails slide into place during the first part of the collage.
const SLIDE_IN_SECS: f64 = 0.9;
const THUMB_ALPHA: f64 = 0.85;

/// Phases of [`CollageSpin`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Four jittering thumbnails, sliding in over the first 0.9 s.
    Collage,
    /// Collage blurs (sigma 1 → 16) and fades to black.
    BlurFade,
    /// Large framed copy spins once clockwise.
    Spin,
    /// Large copy rests at the centre.
    Pause,
    /// Large copy slides right and fades out.
    SlideOut,
    /// Background only.
    Rest,
}

/// Collage → blur-fade → spin → pause → slide-out, 10 s.
pub struct CollageSpin {
    timeline: Timeline<Phase>,
    canvas: Canvas,
    thumb: RgbImage,
    framed: RgbImage,
    anchors: [(i32, i32); 4],
}

impl Program for CollageSpin {
    type Phase = Phase;
    const KIND: AnimationKind = AnimationKind::CollageSpin;

    fn prepare(source: &RgbImage, setup: &Setup<'_>) -> ReelResult<Self> {
        let canvas = setup.canvas;
        let empty = || ReelError::input_unavailable("source image has no pixels");
        let thumb = resize_exact(source, canvas.frac_w(0.40), canvas.frac_h(0.30)).ok_or_else(empty)?;
        let framed = resize_exact(source, canvas.frac_w(0.58), canvas.frac_h(0.68)).ok_or_else(empty)?;
        let anchors = ANCHORS.map(|(fx, fy)| (canvas.frac_w(fx) as i32, canvas.frac_h(fy) as i32));
        let timeline = Timeline::new([
            (Phase::Collage, 4.0),
            (Phase::BlurFade, 0.9),
            (Phase::Spin, 1.5),
            (Phase::Pause, 1.5),
            (Phase::SlideOut, 1.0),
            (Phase::Rest, 1.1),
        ])?;
        Ok(Self {
            timeline,
            canvas,
            thumb: add_border(&thumb, 8, WHITE),
            framed: add_border(&framed, 10, WHITE),
            anchors,
        })
    }

    fn timeline(&self) -> &Timeline<Phase> {
        &self.timeline
    }

    fn state(&self, cursor: &FrameCursor<Phase>) -> FrameState {
        let p = cursor.progress();
        match cursor.kind() {
            Phase::Collage => FrameState {
                eased: smoothstep((cursor.time_secs / SLIDE_IN_SECS).min(1.0)),
                alpha: THUMB_ALPHA,
                ..FrameState::default()
            },
            Phase::BlurFade => {
                let e = smoothstep(p);
                FrameState {
                    eased: e,
                    blur_kernel: Some(kernel_for_sigma(blur_sigma(p))),
                    alpha: 1.0 - e,
                    ..FrameState::default()
                }
            }
            Phase::Spin => {
                let e = smoothstep(p);
                FrameState {
                    eased: e,
                    angle_deg: -360.0 * e,
                    ..FrameState::default()
                }
            }
            Phase::Pause => FrameState::default(),
            Phase::SlideOut => {
                let e = smoothstep(p);
                FrameState {
                    eased: e,
                    offset: (trunc_px(e * f64::from(self.canvas.width) * 0.5), 0),
                    alpha: 1.0 - e,
                    ..FrameState::default()
                }
            }
            Phase::Rest => FrameState::hidden(),
        }
    }

    fn draw(
        &mut self,
        cursor: &FrameCursor<Phase>,
        state: &FrameState,
        frame: &mut RgbImage,
    ) -> ReelResult<()> {
        if !state.visible {
            return Ok(());
        }
        let cx = centred(self.canvas.width, self.framed.width());
        let cy = centred(self.canvas.height, self.framed.height());
        match cursor.kind() {
            Phase::Collage => self.draw_collage(frame, cursor.time_secs, state.eased),
            Phase::BlurFade => {
                // The collage keeps its settled layout while it dissolves.
                self.draw_collage(frame, cursor.time_secs, 1.0);
                let blurred = gaussian_blur_sigma(frame, blur_sigma(cursor.progress()))?;
                frame.copy_from_slice(&blurred);
                fade_to_black(frame, state.alpha);
            }
            Phase::Spin => {
                let spun = transform(
                    &self.framed,
                    state.angle_deg,
                    1.0,
                    self.framed.dimensions(),
                    BorderMode::Reflect,
                )?;
                paste(frame, &spun, cx, cy);
            }
            Phase::Pause => {
                paste(frame, &self.framed, cx, cy);
            }
            Phase::SlideOut => {
                paste_blend(frame, &self.framed, cx + state.offset.0, cy, state.alpha);
            }
            Phase::Rest => {}
        }
        Ok(())
    }
}

impl CollageSpin {
    /// Top-left corners of the four thumbnails at time `t` with slide-in progress `e`.
    pub fn thumbnail_positions(&self, t: f64, e: f64) -> [(i32, i32); 4] {
        let (w, h) = (f64::from(self.canvas.width), f64::from(self.canvas.height));
        let mut out = self.anchors;
        for (i, pos) in out.iter_mut().enumerate() {
            let fi = i as f64;
            pos.0 += trunc_px(3.0 * (t * 1.5 + fi * 0.5).sin());
            pos.1 += trunc_px(2.0 * (t * 1.2 + fi * 0.7).cos());
            let rest = 1.0 - e;
            match i {
                0 => pos.1 += trunc_px(rest * h * 0.25),
                2 => pos.1 -= trunc_px(rest * h * 0.25),
                _ => pos.0 += trunc_px(rest * w * 0.4),
            }
        }
        out
    }

    fn draw_collage(&self, frame: &mut RgbImage, t: f64, e: f64) {
        for (x, y) in self.thumbnail_positions(t, e) {
            paste_blend(frame, &self.thumb, x, y, THUMB_ALPHA);
        }
    }
}

/// Gaussian sigma of the blur-fade at progress `p`: 1 → 16 in whole steps.
fn blur_sigma(p: f64) -> f64 {
    f64::from(trunc_px(1.0 + p * 15.0).max(1))
}

#[cfg(test)]
#[path = "../../tests/unit/programs/collage_spin.rs"]
mod tests;
