//! Cartoon stylization: edge mask over a colour-quantized, bilateral-smoothed copy.

use image::{GrayImage, Luma, Rgb, RgbImage};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::foundation::error::{ReelError, ReelResult};

/// An image-to-image filter applied once before the frame loop.
pub trait Stylizer {
    /// Produce the stylized bitmap. The output has the input's dimensions.
    fn stylize(&self, img: &RgbImage) -> ReelResult<RgbImage>;
}

/// Parameters of the cartoon filter chain.
#[derive(Clone, Debug, PartialEq)]
pub struct CartoonStylizer {
    /// Median aperture applied to the grey image before edge detection (odd).
    pub median_ksize: u32,
    /// Adaptive-threshold neighbourhood (odd).
    pub threshold_block: u32,
    /// Constant subtracted from the neighbourhood mean.
    pub threshold_c: i32,
    /// Number of colour clusters.
    pub clusters: usize,
    /// Upper bound on k-means refinement rounds.
    pub max_iterations: u32,
    /// Stop once no centre moves farther than this (in 8-bit units).
    pub epsilon: f64,
    /// Only every n-th pixel trains the clusters; all pixels are assigned.
    pub sample_stride: usize,
    /// Seed for initial cluster centres.
    pub seed: u64,
    /// Bilateral neighbourhood diameter.
    pub bilateral_diameter: u32,
    /// Bilateral range sigma.
    pub sigma_color: f64,
    /// Bilateral spatial sigma.
    pub sigma_space: f64,
}

impl Default for CartoonStylizer {
    fn default() -> Self {
        Self {
            median_ksize: 7,
            threshold_block: 9,
            threshold_c: 10,
            clusters: 8,
            max_iterations: 20,
            epsilon: 1.0,
            sample_stride: 7,
            seed: 0x5eed_ca47,
            bilateral_diameter: 9,
            sigma_color: 200.0,
            sigma_space: 200.0,
        }
    }
}

impl Stylizer for CartoonStylizer {
    #[tracing::instrument(skip(self, img), fields(w = img.width(), h = img.height()))]
    fn stylize(&self, img: &RgbImage) -> ReelResult<RgbImage> {
        if img.width() == 0 || img.height() == 0 {
            return Err(ReelError::external("cannot stylize an empty image"));
        }
        if self.clusters == 0 {
            return Err(ReelError::validation("cartoon clusters must be >= 1"));
        }
        let grey = median_blur(&to_grey(img), self.median_ksize);
        let edges = adaptive_mean_threshold(&grey, self.threshold_block, self.threshold_c);
        let quantized = self.quantize(img);
        let mut smooth = bilateral(
            &quantized,
            self.bilateral_diameter,
            self.sigma_color,
            self.sigma_space,
        );
        for (px, e) in smooth.pixels_mut().zip(edges.pixels()) {
            if e.0[0] == 0 {
                *px = Rgb([0, 0, 0]);
            }
        }
        Ok(smooth)
    }
}

impl CartoonStylizer {
    fn quantize(&self, img: &RgbImage) -> RgbImage {
        let pixels: Vec<[f64; 3]> = img
            .pixels()
            .map(|p| p.0.map(f64::from))
            .collect();
        let samples: Vec<[f64; 3]> = pixels
            .iter()
            .step_by(self.sample_stride.max(1))
            .copied()
            .collect();
        let centres = kmeans(
            &samples,
            self.clusters,
            self.max_iterations,
            self.epsilon,
            &mut StdRng::seed_from_u64(self.seed),
        );
        let palette: Vec<[u8; 3]> = centres
            .iter()
            .map(|c| c.map(|v| v.round().clamp(0.0, 255.0) as u8))
            .collect();

        let mut out = RgbImage::new(img.width(), img.height());
        for (dst, src) in out.pixels_mut().zip(&pixels) {
            *dst = Rgb(palette[nearest(&centres, src)]);
        }
        out
    }
}

fn to_grey(img: &RgbImage) -> GrayImage {
    let mut out = GrayImage::new(img.width(), img.height());
    for (g, p) in out.pixels_mut().zip(img.pixels()) {
        let [r, gr, b] = p.0.map(f64::from);
        *g = Luma([(0.299 * r + 0.587 * gr + 0.114 * b).round().min(255.0) as u8]);
    }
    out
}

fn clamp_coord(v: i64, n: u32) -> u32 {
    v.clamp(0, i64::from(n) - 1) as u32
}

/// Median over a `ksize`×`ksize` window with replicated edges.
pub(crate) fn median_blur(src: &GrayImage, ksize: u32) -> GrayImage {
    let r = i64::from(ksize.max(1) / 2);
    let (w, h) = src.dimensions();
    let mut window = Vec::with_capacity(((2 * r + 1) * (2 * r + 1)) as usize);
    GrayImage::from_fn(w, h, |x, y| {
        window.clear();
        for dy in -r..=r {
            let sy = clamp_coord(i64::from(y) + dy, h);
            for dx in -r..=r {
                let sx = clamp_coord(i64::from(x) + dx, w);
                window.push(src.get_pixel(sx, sy).0[0]);
            }
        }
        let mid = window.len() / 2;
        let (_, m, _) = window.select_nth_unstable(mid);
        Luma([*m])
    })
}

/// 255 where a pixel exceeds its `block`×`block` mean minus `c`, else 0.
pub(crate) fn adaptive_mean_threshold(src: &GrayImage, block: u32, c: i32) -> GrayImage {
    let (w, h) = src.dimensions();
    let r = i64::from(block.max(1) / 2);
    let area = ((2 * r + 1) * (2 * r + 1)) as f64;
    GrayImage::from_fn(w, h, |x, y| {
        let mut sum = 0u32;
        for dy in -r..=r {
            let sy = clamp_coord(i64::from(y) + dy, h);
            for dx in -r..=r {
                sum += u32::from(src.get_pixel(clamp_coord(i64::from(x) + dx, w), sy).0[0]);
            }
        }
        let mean = (f64::from(sum) / area).round() as i32;
        let v = i32::from(src.get_pixel(x, y).0[0]);
        Luma([if v > mean - c { 255 } else { 0 }])
    })
}

fn dist2(a: &[f64; 3], b: &[f64; 3]) -> f64 {
    a.iter().zip(b).map(|(x, y)| (x - y) * (x - y)).sum()
}

fn nearest(centres: &[[f64; 3]], p: &[f64; 3]) -> usize {
    let mut best = 0;
    let mut best_d = f64::INFINITY;
    for (i, c) in centres.iter().enumerate() {
        let d = dist2(c, p);
        if d < best_d {
            best = i;
            best_d = d;
        }
    }
    best
}

/// Lloyd's k-means with random initial centres drawn from `samples`.
pub(crate) fn kmeans<R: Rng>(
    samples: &[[f64; 3]],
    k: usize,
    max_iterations: u32,
    epsilon: f64,
    rng: &mut R,
) -> Vec<[f64; 3]> {
    if samples.is_empty() {
        return vec![[0.0; 3]; k];
    }
    let mut centres: Vec<[f64; 3]> = (0..k)
        .map(|_| samples[rng.random_range(0..samples.len())])
        .collect();

    for _ in 0..max_iterations {
        let mut sums = vec![[0.0f64; 3]; k];
        let mut counts = vec![0usize; k];
        for s in samples {
            let i = nearest(&centres, s);
            counts[i] += 1;
            for (acc, v) in sums[i].iter_mut().zip(s) {
                *acc += v;
            }
        }
        let mut moved = 0.0f64;
        for i in 0..k {
            let next = if counts[i] == 0 {
                // Empty cluster: reseed from a random sample.
                samples[rng.random_range(0..samples.len())]
            } else {
                sums[i].map(|v| v / counts[i] as f64)
            };
            moved = moved.max(dist2(&centres[i], &next).sqrt());
            centres[i] = next;
        }
        if moved <= epsilon {
            break;
        }
    }
    centres
}

/// Edge-preserving smoothing over a circular `diameter` neighbourhood with replicated edges.
pub(crate) fn bilateral(src: &RgbImage, diameter: u32, sigma_color: f64, sigma_space: f64) -> RgbImage {
    let r = i64::from(diameter.max(1) / 2);
    let (w, h) = src.dimensions();

    let color_coeff = -0.5 / (sigma_color * sigma_color);
    let color_w: Vec<f64> = (0..=255 * 3)
        .map(|d| (f64::from(d) * f64::from(d) * color_coeff).exp())
        .collect();
    let space_coeff = -0.5 / (sigma_space * sigma_space);
    let mut offsets = Vec::new();
    for dy in -r..=r {
        for dx in -r..=r {
            let d2 = (dx * dx + dy * dy) as f64;
            if d2.sqrt() <= r as f64 {
                offsets.push((dx, dy, (d2 * space_coeff).exp()));
            }
        }
    }

    RgbImage::from_fn(w, h, |x, y| {
        let centre = src.get_pixel(x, y).0;
        let mut acc = [0.0f64; 3];
        let mut wsum = 0.0;
        for &(dx, dy, sw) in &offsets {
            let p = src
                .get_pixel(clamp_coord(i64::from(x) + dx, w), clamp_coord(i64::from(y) + dy, h))
                .0;
            let diff: usize = p
                .iter()
                .zip(&centre)
                .map(|(a, b)| usize::from(a.abs_diff(*b)))
                .sum();
            let wgt = sw * color_w[diff];
            for (a, v) in acc.iter_mut().zip(&p) {
                *a += wgt * f64::from(*v);
            }
            wsum += wgt;
        }
        Rgb(acc.map(|a| (a / wsum).round().clamp(0.0, 255.0) as u8))
    })
}

#[cfg(test)]
#[path = "../tests/unit/stylize.rs"]
mod tests;
