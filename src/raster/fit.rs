use image::RgbImage;
use image::imageops::{self, FilterType};

use crate::foundation::core::Rgb8;

/// Resize to exactly `w`×`h` with bilinear filtering. `None` when either side is zero.
pub fn resize_exact(src: &RgbImage, w: u32, h: u32) -> Option<RgbImage> {
    if w == 0 || h == 0 || src.width() == 0 || src.height() == 0 {
        return None;
    }
    if src.dimensions() == (w, h) {
        return Some(src.clone());
    }
    Some(imageops::resize(src, w, h, FilterType::Triangle))
}

/// Resize by `scale` (each side truncated toward zero). `None` when the result is empty.
pub fn resize_by(src: &RgbImage, scale: f64) -> Option<RgbImage> {
    let w = (f64::from(src.width()) * scale) as u32;
    let h = (f64::from(src.height()) * scale) as u32;
    resize_exact(src, w, h)
}

/// Scale to fully cover `w`×`h`, preserving aspect ratio, then centre-crop to exactly `w`×`h`.
pub fn cover(src: &RgbImage, w: u32, h: u32) -> Option<RgbImage> {
    if w == 0 || h == 0 || src.width() == 0 || src.height() == 0 {
        return None;
    }
    let scale = (f64::from(w) / f64::from(src.width())).max(f64::from(h) / f64::from(src.height()));
    let new_w = ((f64::from(src.width()) * scale) as u32).max(w);
    let new_h = ((f64::from(src.height()) * scale) as u32).max(h);
    let resized = resize_exact(src, new_w, new_h)?;
    let x = (new_w - w) / 2;
    let y = (new_h - h) / 2;
    Some(imageops::crop_imm(&resized, x, y, w, h).to_image())
}

/// Surround `src` with a `width`-pixel solid border.
pub fn add_border(src: &RgbImage, width: u32, color: Rgb8) -> RgbImage {
    if width == 0 {
        return src.clone();
    }
    let mut out = RgbImage::from_pixel(
        src.width() + 2 * width,
        src.height() + 2 * width,
        image::Rgb(color),
    );
    imageops::replace(&mut out, src, i64::from(width), i64::from(width));
    out
}
