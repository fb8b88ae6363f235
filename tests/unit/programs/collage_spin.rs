use super::*;
use crate::foundation::core::{Fps, FrameIndex};
use image::Rgb;

fn fixture(bg: &RgbImage) -> CollageSpin {
    let setup = Setup {
        canvas: Canvas::new(bg.width(), bg.height()).unwrap(),
        fps: Fps::whole(24).unwrap(),
        background: bg,
        seed: None,
    };
    CollageSpin::prepare(&RgbImage::from_pixel(30, 30, Rgb([0, 0, 255])), &setup).unwrap()
}

#[test]
fn ten_seconds_at_twenty_four_fps() {
    let bg = RgbImage::new(100, 200);
    let p = fixture(&bg);
    assert_eq!(p.frame_count(Fps::whole(24).unwrap()), 240);
    let c = p.canvas;
    assert_eq!(p.thumb.dimensions(), (c.frac_w(0.40) + 16, c.frac_h(0.30) + 16));
    assert_eq!(p.framed.dimensions(), (c.frac_w(0.58) + 20, c.frac_h(0.68) + 20));
}

#[test]
fn thumbnails_settle_on_their_anchors() {
    let bg = RgbImage::new(100, 200);
    let p = fixture(&bg);
    let settled = p.thumbnail_positions(2.0, 1.0);
    for (pos, anchor) in settled.iter().zip(p.anchors) {
        assert!((pos.0 - anchor.0).abs() <= 3);
        assert!((pos.1 - anchor.1).abs() <= 2);
    }
}

#[test]
fn thumbnails_start_displaced() {
    let bg = RgbImage::new(100, 200);
    let p = fixture(&bg);
    let start = p.thumbnail_positions(0.0, 0.0);
    // 25 % of the height down / up, 40 % of the width right.
    assert_eq!(start[0].1, p.anchors[0].1 + 2 + 50);
    assert!(start[2].1 < p.anchors[2].1 - 40);
    assert!(start[1].0 >= p.anchors[1].0 + 40);
    assert!(start[3].0 >= p.anchors[3].0 + 40);
}

#[test]
fn spin_turns_clockwise_through_a_full_revolution() {
    let bg = RgbImage::new(100, 200);
    let p = fixture(&bg);
    let fps = Fps::whole(24).unwrap();
    // Spin covers 4.9 s .. 6.4 s.
    let mid = p.state(&p.timeline().cursor(FrameIndex(136), fps, 240));
    assert_eq!(p.timeline().cursor(FrameIndex(136), fps, 240).kind(), Phase::Spin);
    assert!(mid.angle_deg < 0.0 && mid.angle_deg > -360.0);
    let pause = p.timeline().cursor(FrameIndex(154), fps, 240);
    assert_eq!(pause.kind(), Phase::Pause);
    assert_eq!(p.state(&pause).angle_deg, 0.0);
}

#[test]
fn slide_out_fades_and_rest_is_background_only() {
    let bg = RgbImage::from_pixel(100, 200, Rgb([1, 2, 3]));
    let mut p = fixture(&bg);
    let fps = Fps::whole(24).unwrap();

    let slide = p.timeline().cursor(FrameIndex(200), fps, 240);
    assert_eq!(slide.kind(), Phase::SlideOut);
    let st = p.state(&slide);
    assert!(st.alpha > 0.0 && st.alpha < 1.0);
    assert!(st.offset.0 > 0 && st.offset.0 <= 50);

    let rest = p.timeline().cursor(FrameIndex(230), fps, 240);
    assert_eq!(rest.kind(), Phase::Rest);
    let st = p.state(&rest);
    assert!(!st.visible);
    let mut frame = bg.clone();
    p.draw(&rest, &st, &mut frame).unwrap();
    assert_eq!(frame, bg);
}

#[test]
fn blur_fade_darkens_toward_black() {
    let bg = RgbImage::from_pixel(100, 200, Rgb([200, 200, 200]));
    let mut p = fixture(&bg);
    let fps = Fps::whole(24).unwrap();
    let late = p.timeline().cursor(FrameIndex(116), fps, 240);
    assert_eq!(late.kind(), Phase::BlurFade);
    let st = p.state(&late);
    assert_eq!(st.blur_kernel.map(|k| k % 2), Some(1));
    let mut frame = bg.clone();
    p.draw(&late, &st, &mut frame).unwrap();
    let mean: u64 = frame.iter().map(|&v| u64::from(v)).sum::<u64>() / frame.len() as u64;
    assert!(mean < 20, "mean {mean}");
}
