use image::RgbImage;

use crate::foundation::core::Rgb8;
use crate::raster::blend::crossfade_px;

/// Blend a filled circle of `radius` centred at `(cx, cy)` into `frame` with opacity `alpha`.
///
/// Pixels outside the frame are skipped.
pub fn fill_circle_blend(frame: &mut RgbImage, cx: i32, cy: i32, radius: u32, color: Rgb8, alpha: f64) {
    let r = i64::from(radius);
    let (w, h) = (i64::from(frame.width()), i64::from(frame.height()));
    let (cx, cy) = (i64::from(cx), i64::from(cy));
    let stride = w as usize * 3;
    let dst: &mut [u8] = frame;
    for dy in -r..=r {
        let y = cy + dy;
        if !(0..h).contains(&y) {
            continue;
        }
        for dx in -r..=r {
            let x = cx + dx;
            if dx * dx + dy * dy > r * r || !(0..w).contains(&x) {
                continue;
            }
            let i = y as usize * stride + x as usize * 3;
            crossfade_px(&mut dst[i..i + 3], &color, alpha);
        }
    }
}
