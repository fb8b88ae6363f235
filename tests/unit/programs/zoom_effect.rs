use super::*;
use crate::foundation::core::{Canvas, FrameIndex};
use image::Rgb;

fn setup_with(bg: &RgbImage) -> Setup<'_> {
    Setup {
        canvas: Canvas::new(bg.width(), bg.height()).unwrap(),
        fps: Fps::whole(30).unwrap(),
        background: bg,
        seed: None,
    }
}

#[test]
fn runs_past_its_five_second_minimum() {
    let bg = RgbImage::new(20, 30);
    let p = ZoomEffect::prepare(&RgbImage::from_pixel(4, 4, Rgb([9, 9, 9])), &setup_with(&bg)).unwrap();
    assert_eq!(p.frame_count(Fps::whole(30).unwrap()), 234);
    assert_eq!(p.frame_count(Fps::whole(24).unwrap()), 187);
}

#[test]
fn phase_frame_ranges_at_thirty_fps() {
    let bg = RgbImage::new(20, 30);
    let p = ZoomEffect::prepare(&RgbImage::from_pixel(4, 4, Rgb([9, 9, 9])), &setup_with(&bg)).unwrap();
    let fps = Fps::whole(30).unwrap();
    let kind = |f| p.timeline().cursor(FrameIndex(f), fps, 234).kind();
    assert_eq!(kind(89), Phase::ZoomIn);
    assert_eq!(kind(90), Phase::SlideRight);
    assert_eq!(kind(99), Phase::ZoomOut);
    assert_eq!(kind(189), Phase::SlideLeft);
    assert_eq!(kind(204), Phase::BlurFade);
    assert_eq!(kind(233), Phase::BlurFade);
}

#[test]
fn blur_fade_kernel_is_odd_and_alpha_falls_to_black() {
    let bg = RgbImage::new(20, 30);
    let p = ZoomEffect::prepare(&RgbImage::from_pixel(4, 4, Rgb([9, 9, 9])), &setup_with(&bg)).unwrap();
    let fps = Fps::whole(30).unwrap();

    let first = p.state(&p.timeline().cursor(FrameIndex(204), fps, 234));
    assert_eq!(first.blur_kernel, Some(3));
    assert!((first.alpha - 1.0).abs() < 1e-9);

    let last = p.state(&p.timeline().cursor(FrameIndex(233), fps, 234));
    let k = last.blur_kernel.unwrap();
    assert_eq!(k % 2, 1);
    assert!(k >= 27);
    assert!(last.alpha < 0.05);
}

#[test]
fn composite_is_seventy_percent_image() {
    let bg = RgbImage::from_pixel(20, 30, Rgb([0, 0, 0]));
    let p = ZoomEffect::prepare(&RgbImage::from_pixel(4, 4, Rgb([255, 255, 255])), &setup_with(&bg)).unwrap();
    let px = p.composite.get_pixel(10, 15).0;
    assert_eq!(px, [179, 179, 179]);
}

#[test]
fn slide_state_shifts_composite_and_exposes_black() {
    let composite = RgbImage::from_pixel(10, 4, Rgb([200, 200, 200]));
    let state = FrameState {
        offset: (3, 0),
        ..FrameState::default()
    };
    let out = zoom_blur_fade(&composite, &state).unwrap();
    assert_eq!(out.get_pixel(0, 1).0, [0, 0, 0]);
    assert_eq!(out.get_pixel(2, 1).0, [0, 0, 0]);
    assert_eq!(out.get_pixel(5, 1).0, [200, 200, 200]);
}

#[test]
fn zero_alpha_is_black() {
    let composite = RgbImage::from_pixel(6, 6, Rgb([120, 50, 30]));
    let state = FrameState {
        alpha: 0.0,
        ..FrameState::default()
    };
    let out = zoom_blur_fade(&composite, &state).unwrap();
    assert!(out.pixels().all(|p| p.0 == [0, 0, 0]));
}
