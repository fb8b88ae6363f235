use image::RgbImage;

use crate::foundation::core::{Affine, Point, Rgb8, Vec2};
use crate::foundation::error::{ReelError, ReelResult};

/// How pixels that map from outside the source are filled.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BorderMode {
    /// Fill with a fixed color.
    Constant(Rgb8),
    /// Mirror the source across its edges (`fedcba|abcdef|fedcba`).
    Reflect,
}

/// Forward matrix rotating by `angle_deg` (counter-clockwise on screen) and scaling by `scale`
/// around `center`, matching the classic `getRotationMatrix2D` convention.
pub fn rotation_matrix(center: Point, angle_deg: f64, scale: f64) -> Affine {
    let c = center.to_vec2();
    Affine::translate(c)
        * Affine::rotate(-angle_deg.to_radians())
        * Affine::scale(scale)
        * Affine::translate(-c)
}

/// Rotate and scale `src` about its centre in one resampling pass.
///
/// The source centre lands on the centre of the `out_w`×`out_h` output, so an output larger than
/// `src * scale` leaves a `border` margin and a smaller one crops.
pub fn transform(
    src: &RgbImage,
    angle_deg: f64,
    scale: f64,
    (out_w, out_h): (u32, u32),
    border: BorderMode,
) -> ReelResult<RgbImage> {
    if !scale.is_finite() || scale <= 0.0 {
        return Err(ReelError::validation(format!(
            "transform scale must be positive and finite, got {scale}"
        )));
    }
    let src_c = Vec2::new(f64::from(src.width() / 2), f64::from(src.height() / 2));
    let out_c = Vec2::new(f64::from(out_w / 2), f64::from(out_h / 2));
    let forward =
        Affine::translate(out_c - src_c) * rotation_matrix(src_c.to_point(), angle_deg, scale);
    warp_affine(src, forward, (out_w, out_h), border)
}

/// Scale `src` about its centre by `factor`, keeping the output size.
pub fn zoom(src: &RgbImage, factor: f64, border: BorderMode) -> ReelResult<RgbImage> {
    transform(src, 0.0, factor, src.dimensions(), border)
}

/// Shift `src` by `(dx, dy)` pixels, keeping the output size.
pub fn translate(src: &RgbImage, dx: i32, dy: i32, border: BorderMode) -> ReelResult<RgbImage> {
    let forward = Affine::translate((f64::from(dx), f64::from(dy)));
    warp_affine(src, forward, src.dimensions(), border)
}

/// Resample `src` through the forward mapping `forward` into an `out_w`×`out_h` image.
///
/// Each output pixel pulls from `forward⁻¹ · (x, y)` with bilinear filtering.
pub fn warp_affine(
    src: &RgbImage,
    forward: Affine,
    (out_w, out_h): (u32, u32),
    border: BorderMode,
) -> ReelResult<RgbImage> {
    if forward.determinant().abs() < f64::EPSILON {
        return Err(ReelError::validation("warp matrix is not invertible"));
    }
    let mut out = RgbImage::new(out_w, out_h);
    if src.width() == 0 || src.height() == 0 {
        if let BorderMode::Constant(c) = border {
            for px in out.pixels_mut() {
                px.0 = c;
            }
        }
        return Ok(out);
    }

    let [a, b, c, d, e, f] = forward.inverse().as_coeffs();
    let sampler = Sampler {
        data: src.as_raw(),
        width: i64::from(src.width()),
        height: i64::from(src.height()),
        border,
    };
    let stride = out_w as usize * 3;
    let dst: &mut [u8] = &mut out;
    for y in 0..out_h as usize {
        let yf = y as f64;
        let row = &mut dst[y * stride..(y + 1) * stride];
        for (x, px) in row.chunks_exact_mut(3).enumerate() {
            let xf = x as f64;
            let sx = a * xf + c * yf + e;
            let sy = b * xf + d * yf + f;
            px.copy_from_slice(&sampler.bilinear(sx, sy));
        }
    }
    Ok(out)
}

struct Sampler<'a> {
    data: &'a [u8],
    width: i64,
    height: i64,
    border: BorderMode,
}

impl Sampler<'_> {
    fn fetch(&self, x: i64, y: i64) -> [f64; 3] {
        let (x, y) = if (0..self.width).contains(&x) && (0..self.height).contains(&y) {
            (x, y)
        } else {
            match self.border {
                BorderMode::Constant(c) => {
                    return [f64::from(c[0]), f64::from(c[1]), f64::from(c[2])];
                }
                BorderMode::Reflect => (reflect(x, self.width), reflect(y, self.height)),
            }
        };
        let i = ((y * self.width + x) * 3) as usize;
        [
            f64::from(self.data[i]),
            f64::from(self.data[i + 1]),
            f64::from(self.data[i + 2]),
        ]
    }

    fn bilinear(&self, sx: f64, sy: f64) -> [u8; 3] {
        let x0f = sx.floor();
        let y0f = sy.floor();
        let fx = sx - x0f;
        let fy = sy - y0f;
        let (x0, y0) = (x0f as i64, y0f as i64);

        let p00 = self.fetch(x0, y0);
        let p10 = self.fetch(x0 + 1, y0);
        let p01 = self.fetch(x0, y0 + 1);
        let p11 = self.fetch(x0 + 1, y0 + 1);

        let mut out = [0u8; 3];
        for ch in 0..3 {
            let top = p00[ch] + (p10[ch] - p00[ch]) * fx;
            let bottom = p01[ch] + (p11[ch] - p01[ch]) * fx;
            out[ch] = (top + (bottom - top) * fy).round().clamp(0.0, 255.0) as u8;
        }
        out
    }
}

fn reflect(i: i64, n: i64) -> i64 {
    if n == 1 {
        return 0;
    }
    let period = 2 * n;
    let m = i.rem_euclid(period);
    if m >= n { period - 1 - m } else { m }
}

#[cfg(test)]
#[path = "../../tests/unit/raster/warp.rs"]
mod tests;
