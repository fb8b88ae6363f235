use super::*;
use crate::foundation::core::{Canvas, Fps, FrameIndex};
use image::Rgb;

fn program() -> Swing {
    let bg = RgbImage::new(40, 60);
    let setup = Setup {
        canvas: Canvas::new(40, 60).unwrap(),
        fps: Fps::whole(30).unwrap(),
        background: &bg,
        seed: None,
    };
    Swing::prepare(&RgbImage::from_pixel(20, 20, Rgb([0, 0, 255])), &setup).unwrap()
}

#[test]
fn ten_seconds_at_thirty_fps() {
    let p = program();
    assert_eq!(p.frame_count(Fps::whole(30).unwrap()), 300);
    assert_eq!(p.bordered.dimensions(), (60, 80));
    assert_eq!(p.origin, (-10, -10));
}

#[test]
fn swing_boundaries_belong_to_the_ending_phase() {
    let p = program();
    let fps = Fps::whole(30).unwrap();
    assert_eq!(p.timeline().cursor(FrameIndex(120), fps, 300).kind(), Phase::Swing);
    assert_eq!(p.timeline().cursor(FrameIndex(121), fps, 300).kind(), Phase::SlideIn);
    assert_eq!(p.timeline().cursor(FrameIndex(150), fps, 300).kind(), Phase::SlideIn);
    assert_eq!(p.timeline().cursor(FrameIndex(151), fps, 300).kind(), Phase::Diagonal);
}

#[test]
fn slide_in_starts_fully_off_canvas_to_the_right() {
    let p = program();
    let fps = Fps::whole(30).unwrap();
    let c = p.timeline().cursor(FrameIndex(121), fps, 300);
    let st = p.state(&c);
    // 1/30 s into the phase, smoothstep(1/60) is tiny: nearly the full travel remains.
    assert!(st.offset.0 >= 78 && st.offset.0 <= 80, "{:?}", st.offset);
}

#[test]
fn swing_starts_level_and_centred() {
    let p = program();
    let c = p.timeline().cursor(FrameIndex(0), Fps::whole(30).unwrap(), 300);
    let st = p.state(&c);
    assert_eq!(st.angle_deg, 0.0);
    assert_eq!(st.offset, (0, 0));
}
