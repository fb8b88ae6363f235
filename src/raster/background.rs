use image::{Rgb, RgbImage};

use crate::assets::{self, MediaSource};
use crate::foundation::core::{BLACK, Canvas, Rgb8};
use crate::foundation::error::{ReelError, ReelResult};
use crate::foundation::math::sat_u8;
use crate::raster::fit;

/// Rose, the top of the default gradient.
pub const DEFAULT_TOP: Rgb8 = [255, 0, 128];
/// Pink, the bottom of the default gradient.
pub const DEFAULT_BOTTOM: Rgb8 = [255, 192, 203];

/// How the base canvas of every frame is produced.
///
/// JSON forms: `{"gradient": {"top": [r,g,b], "bottom": [r,g,b]}}`, `{"solid": [r,g,b]}`,
/// `{"image": "path-or-url"}`.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackgroundSpec {
    /// Top-to-bottom linear colour ramp.
    Gradient {
        /// Colour of row 0.
        top: Rgb8,
        /// Colour approached by the last row.
        bottom: Rgb8,
    },
    /// One flat colour.
    Solid(Rgb8),
    /// A fetched bitmap, cover-fitted to the canvas.
    Image(MediaSource),
}

impl BackgroundSpec {
    /// The rose → pink gradient used by most programs.
    pub fn default_gradient() -> Self {
        Self::Gradient {
            top: DEFAULT_TOP,
            bottom: DEFAULT_BOTTOM,
        }
    }

    /// Flat black.
    pub fn black() -> Self {
        Self::Solid(BLACK)
    }

    /// Produce the immutable background template for `canvas`.
    ///
    /// Image backgrounds that cannot be obtained fail with [`ReelError::InputUnavailable`].
    pub fn render(&self, canvas: Canvas) -> ReelResult<RgbImage> {
        canvas.validate()?;
        match self {
            Self::Gradient { top, bottom } => {
                Ok(vertical_gradient(canvas.width, canvas.height, *top, *bottom))
            }
            Self::Solid(c) => Ok(RgbImage::from_pixel(canvas.width, canvas.height, Rgb(*c))),
            Self::Image(src) => {
                let img = assets::load_image(src)?;
                fit::cover(&img, canvas.width, canvas.height).ok_or_else(|| {
                    ReelError::input_unavailable(format!("background '{src}' has no pixels"))
                })
            }
        }
    }
}

impl Default for BackgroundSpec {
    fn default() -> Self {
        Self::default_gradient()
    }
}

/// Row `y` gets `top * (1 - y/h) + bottom * (y/h)`, truncated toward zero.
pub fn vertical_gradient(width: u32, height: u32, top: Rgb8, bottom: Rgb8) -> RgbImage {
    let mut img = RgbImage::new(width, height);
    if height == 0 {
        return img;
    }
    for (y, row) in img.enumerate_rows_mut() {
        let a = f64::from(y) / f64::from(height);
        let mut c = [0u8; 3];
        for (ch, (t, b)) in c.iter_mut().zip(top.iter().zip(bottom.iter())) {
            *ch = sat_u8((1.0 - a) * f64::from(*t) + a * f64::from(*b));
        }
        for (_, _, px) in row {
            *px = Rgb(c);
        }
    }
    img
}
