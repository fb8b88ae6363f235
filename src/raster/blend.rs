use image::RgbImage;

use crate::foundation::error::{ReelError, ReelResult};
use crate::foundation::math::{clamp01, mul_div255_u16};

fn weight_q8(t: f64) -> u16 {
    (clamp01(t) * 255.0).round() as u16
}

/// In-place crossfade of packed RGB bytes: `dst * (1 - t) + src * t`.
pub(crate) fn crossfade_px(dst: &mut [u8], src: &[u8], t: f64) {
    let tt = weight_q8(t);
    if tt == 0 {
        return;
    }
    if tt == 255 {
        dst.copy_from_slice(src);
        return;
    }
    let it = 255 - tt;
    for (d, &s) in dst.iter_mut().zip(src) {
        let v = mul_div255_u16(u16::from(*d), it) + mul_div255_u16(u16::from(s), tt);
        *d = v.min(255) as u8;
    }
}

/// Weighted blend of two equally sized images, `a * (1 - t) + b * t`.
pub fn crossfade(a: &RgbImage, b: &RgbImage, t: f64) -> ReelResult<RgbImage> {
    if a.dimensions() != b.dimensions() {
        return Err(ReelError::validation(format!(
            "crossfade expects equal sizes, got {:?} and {:?}",
            a.dimensions(),
            b.dimensions()
        )));
    }
    let mut out = a.clone();
    crossfade_px(&mut out, b, t);
    Ok(out)
}

/// Scale every channel by `alpha` (clamped to `[0, 1]`), i.e. blend toward black.
pub fn fade_to_black(img: &mut RgbImage, alpha: f64) {
    let a = weight_q8(alpha);
    if a == 255 {
        return;
    }
    for v in img.iter_mut() {
        *v = mul_div255_u16(u16::from(*v), a) as u8;
    }
}
