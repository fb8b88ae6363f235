use image::RgbImage;

use crate::raster::blend::crossfade_px;

/// Overlapping region of a source image placed on a canvas, in both coordinate spaces.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Overlap {
    /// Left edge on the canvas.
    pub dst_x: u32,
    /// Top edge on the canvas.
    pub dst_y: u32,
    /// Left edge in the source image.
    pub src_x: u32,
    /// Top edge in the source image.
    pub src_y: u32,
    /// Width of the shared region.
    pub width: u32,
    /// Height of the shared region.
    pub height: u32,
}

/// Intersect a `src_w`×`src_h` image placed at `(x, y)` with a `dst_w`×`dst_h` canvas.
///
/// Returns `None` when nothing overlaps (including zero-sized images).
pub fn overlap(dst_w: u32, dst_h: u32, src_w: u32, src_h: u32, x: i32, y: i32) -> Option<Overlap> {
    let (x, y) = (i64::from(x), i64::from(y));
    let x1 = x.max(0);
    let y1 = y.max(0);
    let x2 = (x + i64::from(src_w)).min(i64::from(dst_w));
    let y2 = (y + i64::from(src_h)).min(i64::from(dst_h));
    if x1 >= x2 || y1 >= y2 {
        return None;
    }
    Some(Overlap {
        dst_x: x1 as u32,
        dst_y: y1 as u32,
        src_x: (x1 - x) as u32,
        src_y: (y1 - y) as u32,
        width: (x2 - x1) as u32,
        height: (y2 - y1) as u32,
    })
}

/// Copy `image` onto `canvas` with its top-left corner at `(x, y)`, clipped to the canvas.
///
/// Returns `false` (and leaves the canvas untouched) when the image lies fully outside.
pub fn paste(canvas: &mut RgbImage, image: &RgbImage, x: i32, y: i32) -> bool {
    let Some(o) = overlap(
        canvas.width(),
        canvas.height(),
        image.width(),
        image.height(),
        x,
        y,
    ) else {
        return false;
    };

    let dst_stride = canvas.width() as usize * 3;
    let src_stride = image.width() as usize * 3;
    let row_len = o.width as usize * 3;
    let src: &[u8] = image;
    let dst: &mut [u8] = canvas;
    for row in 0..o.height as usize {
        let s = (o.src_y as usize + row) * src_stride + o.src_x as usize * 3;
        let d = (o.dst_y as usize + row) * dst_stride + o.dst_x as usize * 3;
        dst[d..d + row_len].copy_from_slice(&src[s..s + row_len]);
    }
    true
}

/// Blend `image` over `canvas` at `(x, y)`: `canvas * (1 - alpha) + image * alpha`, clipped.
///
/// `alpha` is clamped to `[0, 1]`. Returns `false` when nothing overlaps.
pub fn paste_blend(canvas: &mut RgbImage, image: &RgbImage, x: i32, y: i32, alpha: f64) -> bool {
    let Some(o) = overlap(
        canvas.width(),
        canvas.height(),
        image.width(),
        image.height(),
        x,
        y,
    ) else {
        return false;
    };

    let dst_stride = canvas.width() as usize * 3;
    let src_stride = image.width() as usize * 3;
    let row_len = o.width as usize * 3;
    let src: &[u8] = image;
    let dst: &mut [u8] = canvas;
    for row in 0..o.height as usize {
        let s = (o.src_y as usize + row) * src_stride + o.src_x as usize * 3;
        let d = (o.dst_y as usize + row) * dst_stride + o.dst_x as usize * 3;
        crossfade_px(&mut dst[d..d + row_len], &src[s..s + row_len], alpha);
    }
    true
}

/// Copy the `w`×`h` window of `image` starting at `(sx, sy)` onto `canvas` at `(x, y)`.
///
/// A window with zero width or height draws nothing and returns `false`.
pub fn paste_window(
    canvas: &mut RgbImage,
    image: &RgbImage,
    (sx, sy, w, h): (u32, u32, u32, u32),
    x: i32,
    y: i32,
) -> bool {
    if w == 0 || h == 0 || sx >= image.width() || sy >= image.height() {
        return false;
    }
    let w = w.min(image.width() - sx);
    let h = h.min(image.height() - sy);
    let window = image::imageops::crop_imm(image, sx, sy, w, h).to_image();
    paste(canvas, &window, x, y)
}

#[cfg(test)]
#[path = "../../tests/unit/raster/paste.rs"]
mod tests;
