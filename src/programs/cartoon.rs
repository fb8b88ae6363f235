use image::RgbImage;

use crate::animation::state::FrameState;
use crate::animation::timeline::{FrameCursor, Timeline};
use crate::foundation::error::ReelResult;
use crate::programs::{AnimationKind, Program, Setup, fill_canvas};
use crate::raster::blend::crossfade;
use crate::stylize::{CartoonStylizer, Stylizer};

/// Weight of the stylized image over the background.
const CARTOON_WEIGHT: f64 = 0.7;

/// Phases of [`Cartoon`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// The composite is shown unchanged.
    Hold,
}

/// Static cartoon composite, 4 s.
///
/// The composite never changes, so it is built once and copied into every frame.
pub struct Cartoon {
    timeline: Timeline<Phase>,
    composite: RgbImage,
}

impl Cartoon {
    /// Build with an explicit stylizer. A failing stylizer degrades to the plain image.
    pub fn with_stylizer(
        source: &RgbImage,
        setup: &Setup<'_>,
        stylizer: &dyn Stylizer,
    ) -> ReelResult<Self> {
        let resized = fill_canvas(source, setup.canvas)?;
        let styled = match stylizer.stylize(&resized) {
            Ok(img) if img.dimensions() == resized.dimensions() => img,
            Ok(img) => {
                tracing::warn!(
                    got = ?img.dimensions(),
                    "stylizer changed the image size, using the unstylized image"
                );
                resized
            }
            Err(e) => {
                tracing::warn!(error = %e, "stylization failed, using the unstylized image");
                resized
            }
        };
        let composite = crossfade(setup.background, &styled, CARTOON_WEIGHT)?;
        Ok(Self {
            timeline: Timeline::new([(Phase::Hold, 4.0)])?,
            composite,
        })
    }
}

impl Program for Cartoon {
    type Phase = Phase;
    const KIND: AnimationKind = AnimationKind::Cartoon;

    fn prepare(source: &RgbImage, setup: &Setup<'_>) -> ReelResult<Self> {
        Self::with_stylizer(source, setup, &CartoonStylizer::default())
    }

    fn timeline(&self) -> &Timeline<Phase> {
        &self.timeline
    }

    fn state(&self, _cursor: &FrameCursor<Phase>) -> FrameState {
        FrameState {
            alpha: CARTOON_WEIGHT,
            ..FrameState::default()
        }
    }

    fn draw(
        &mut self,
        _cursor: &FrameCursor<Phase>,
        _state: &FrameState,
        frame: &mut RgbImage,
    ) -> ReelResult<()> {
        frame.copy_from_slice(&self.composite);
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/programs/cartoon.rs"]
mod tests;
