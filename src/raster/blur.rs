use image::RgbImage;

use crate::foundation::error::{ReelError, ReelResult};

/// Force a blur strength into a usable kernel size: at least 1 and always odd.
pub fn odd_kernel(strength: i64) -> u32 {
    let k = strength.clamp(1, i64::from(u32::MAX - 1)) as u32;
    if k.is_multiple_of(2) { k + 1 } else { k }
}

/// Gaussian sigma implied by a kernel size when none is given explicitly.
pub fn sigma_for_kernel(ksize: u32) -> f64 {
    0.3 * ((f64::from(ksize) - 1.0) * 0.5 - 1.0) + 0.8
}

/// Kernel size covering ±3 sigma for 8-bit images.
pub fn kernel_for_sigma(sigma: f64) -> u32 {
    odd_kernel((sigma * 6.0 + 1.0).round() as i64)
}

/// Blur with an odd `ksize`×`ksize` Gaussian, sigma derived from the size.
pub fn gaussian_blur(src: &RgbImage, ksize: u32) -> ReelResult<RgbImage> {
    let ksize = odd_kernel(i64::from(ksize));
    blur_with(src, ksize / 2, sigma_for_kernel(ksize))
}

/// Blur with an explicit sigma, kernel size derived from it.
pub fn gaussian_blur_sigma(src: &RgbImage, sigma: f64) -> ReelResult<RgbImage> {
    if !sigma.is_finite() || sigma <= 0.0 {
        return Err(ReelError::validation("blur sigma must be > 0"));
    }
    blur_with(src, kernel_for_sigma(sigma) / 2, sigma)
}

fn blur_with(src: &RgbImage, radius: u32, sigma: f64) -> ReelResult<RgbImage> {
    let (w, h) = src.dimensions();
    let data = blur_rgb8(src.as_raw(), w, h, radius, sigma)?;
    RgbImage::from_raw(w, h, data)
        .ok_or_else(|| ReelError::validation("blur output buffer size mismatch"))
}

/// Separable Gaussian blur over packed RGB8 with clamped edges.
pub fn blur_rgb8(src: &[u8], width: u32, height: u32, radius: u32, sigma: f64) -> ReelResult<Vec<u8>> {
    let expected_len = (width as usize)
        .checked_mul(height as usize)
        .and_then(|v| v.checked_mul(3))
        .ok_or_else(|| ReelError::validation("blur buffer size overflow"))?;
    if src.len() != expected_len {
        return Err(ReelError::validation(
            "blur_rgb8 expects src matching width*height*3",
        ));
    }
    if radius == 0 || width == 0 || height == 0 {
        return Ok(src.to_vec());
    }

    let kernel = gaussian_kernel_q16(radius, sigma)?;
    let mut tmp = vec![0u8; expected_len];
    let mut out = vec![0u8; expected_len];

    horizontal_pass(src, &mut tmp, width, height, &kernel);
    vertical_pass(&tmp, &mut out, width, height, &kernel);
    Ok(out)
}

fn gaussian_kernel_q16(radius: u32, sigma: f64) -> ReelResult<Vec<u32>> {
    if radius == 0 {
        return Ok(vec![1 << 16]);
    }
    if !sigma.is_finite() || sigma <= 0.0 {
        return Err(ReelError::validation("blur sigma must be > 0"));
    }

    let r = radius as i32;
    let mut weights_f = Vec::<f64>::with_capacity((2 * r + 1) as usize);
    let mut sum = 0.0f64;
    let denom = 2.0 * sigma * sigma;
    for i in -r..=r {
        let x = f64::from(i);
        let w = (-x * x / denom).exp();
        weights_f.push(w);
        sum += w;
    }

    let mut weights = Vec::<u32>::with_capacity(weights_f.len());
    let mut acc: i64 = 0;
    for &wf in &weights_f {
        let q = ((wf / sum) * 65536.0).round() as i64;
        let q = q.clamp(0, 65536);
        weights.push(q as u32);
        acc += q;
    }
    // Push rounding drift into the centre tap so the kernel sums to exactly 1.0 in Q16.
    let delta = 65536 - acc;
    if delta != 0 {
        let mid = weights.len() / 2;
        weights[mid] = (i64::from(weights[mid]) + delta).clamp(0, 65536) as u32;
    }

    Ok(weights)
}

fn horizontal_pass(src: &[u8], dst: &mut [u8], width: u32, height: u32, k: &[u32]) {
    let radius = (k.len() / 2) as i64;
    let w = i64::from(width);
    for y in 0..i64::from(height) {
        for x in 0..w {
            let mut acc = [0u64; 3];
            for (ki, &kw) in k.iter().enumerate() {
                let sx = (x + ki as i64 - radius).clamp(0, w - 1);
                let idx = ((y * w + sx) as usize) * 3;
                for c in 0..3 {
                    acc[c] += u64::from(kw) * u64::from(src[idx + c]);
                }
            }
            let out_idx = ((y * w + x) as usize) * 3;
            for c in 0..3 {
                dst[out_idx + c] = q16_to_u8(acc[c]);
            }
        }
    }
}

fn vertical_pass(src: &[u8], dst: &mut [u8], width: u32, height: u32, k: &[u32]) {
    let radius = (k.len() / 2) as i64;
    let w = i64::from(width);
    let h = i64::from(height);
    for y in 0..h {
        for x in 0..w {
            let mut acc = [0u64; 3];
            for (ki, &kw) in k.iter().enumerate() {
                let sy = (y + ki as i64 - radius).clamp(0, h - 1);
                let idx = ((sy * w + x) as usize) * 3;
                for c in 0..3 {
                    acc[c] += u64::from(kw) * u64::from(src[idx + c]);
                }
            }
            let out_idx = ((y * w + x) as usize) * 3;
            for c in 0..3 {
                dst[out_idx + c] = q16_to_u8(acc[c]);
            }
        }
    }
}

fn q16_to_u8(acc: u64) -> u8 {
    let v = (acc + 32768) >> 16;
    v.min(255) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/raster/blur.rs"]
mod tests;
