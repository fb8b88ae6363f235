use super::*;
use image::Rgb;

#[test]
fn kernel_is_always_odd_and_positive() {
    for s in -3..=64 {
        let k = odd_kernel(s);
        assert!(k >= 1);
        assert_eq!(k % 2, 1, "strength {s} gave even kernel {k}");
    }
    assert_eq!(odd_kernel(4), 5);
    assert_eq!(odd_kernel(5), 5);
    assert_eq!(odd_kernel(0), 1);
}

#[test]
fn sigma_helpers_agree_with_common_defaults() {
    assert!((sigma_for_kernel(3) - 0.8).abs() < 1e-12);
    assert!((sigma_for_kernel(7) - 1.4).abs() < 1e-12);
    assert_eq!(kernel_for_sigma(1.0), 7);
    assert_eq!(kernel_for_sigma(16.0) % 2, 1);
}

#[test]
fn kernel_of_one_is_identity() {
    let src = RgbImage::from_fn(5, 4, |x, y| Rgb([(x * 40) as u8, (y * 50) as u8, 9]));
    let out = gaussian_blur(&src, 1).unwrap();
    assert_eq!(out, src);
}

#[test]
fn even_kernel_requests_are_rounded_up() {
    let src = RgbImage::from_fn(9, 9, |x, _| Rgb([(x * 25) as u8, 0, 0]));
    assert_eq!(
        gaussian_blur(&src, 4).unwrap(),
        gaussian_blur(&src, 5).unwrap()
    );
}

#[test]
fn constant_image_is_unchanged() {
    let src = RgbImage::from_pixel(6, 5, Rgb([10, 20, 30]));
    let out = gaussian_blur(&src, 7).unwrap();
    assert_eq!(out, src);
    let out = gaussian_blur_sigma(&src, 3.0).unwrap();
    assert_eq!(out, src);
}

#[test]
fn spreads_energy_from_single_pixel() {
    let mut src = RgbImage::new(7, 7);
    src.put_pixel(3, 3, Rgb([255, 255, 255]));
    let out = gaussian_blur(&src, 5).unwrap();

    let lit = out.pixels().filter(|p| p.0[0] != 0).count();
    assert!(lit > 1);
    let sum: u32 = out.pixels().map(|p| u32::from(p.0[0])).sum();
    assert!((sum as i32 - 255).abs() <= 12);
}

#[test]
fn rejects_bad_sigma() {
    let src = RgbImage::new(2, 2);
    assert!(gaussian_blur_sigma(&src, 0.0).is_err());
    assert!(gaussian_blur_sigma(&src, f64::NAN).is_err());
}
