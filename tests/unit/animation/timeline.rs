use super::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Ab {
    A,
    B,
}

fn ab() -> Timeline<Ab> {
    Timeline::new([(Ab::A, 2.0), (Ab::B, 3.0)]).unwrap()
}

#[test]
fn resolves_inside_first_phase() {
    let fps = Fps::whole(10).unwrap();
    let c = ab().cursor(FrameIndex(19), fps, 50);
    assert_eq!(c.kind(), Ab::A);
    assert!((c.progress() - 0.95).abs() < 1e-9);
}

#[test]
fn exact_boundary_hands_over_to_next_phase() {
    let fps = Fps::whole(10).unwrap();
    let c = ab().cursor(FrameIndex(20), fps, 50);
    assert_eq!(c.kind(), Ab::B);
    assert_eq!(c.phase.index, 1);
    assert!(c.progress().abs() < 1e-9);
}

#[test]
fn last_frame_progress_is_clamped() {
    let fps = Fps::whole(10).unwrap();
    let c = ab().cursor(FrameIndex(49), fps, 50);
    assert_eq!(c.kind(), Ab::B);
    assert!(c.progress() <= 1.0);
    assert!((c.local_secs() - 2.9).abs() < 1e-9);
}

#[test]
fn times_past_the_end_clamp_to_last_phase() {
    let p = ab().resolve(7.5);
    assert_eq!(p.kind, Ab::B);
    assert_eq!(p.progress, 1.0);
}

#[test]
fn previous_phase_boundary_keeps_exact_end_in_earlier_phase() {
    let tl = ab().with_boundary(Boundary::PreviousPhase);
    let p = tl.resolve(2.0);
    assert_eq!(p.kind, Ab::A);
    assert_eq!(p.progress, 1.0);
    assert_eq!(tl.resolve(2.0001).kind, Ab::B);
}

#[test]
fn float_sums_do_not_double_count_a_frame() {
    // 99 / 30 and 3.0 + 0.3 differ in the last ulp.
    let tl = Timeline::new([(0u8, 3.0), (1, 0.3), (2, 3.0)]).unwrap();
    let fps = Fps::whole(30).unwrap();
    assert_eq!(tl.cursor(FrameIndex(98), fps, 189).kind(), 1);
    assert_eq!(tl.cursor(FrameIndex(99), fps, 189).kind(), 2);
    assert!(tl.cursor(FrameIndex(99), fps, 189).progress().abs() < 1e-9);
}

#[test]
fn phases_cover_the_whole_duration() {
    let tl = Timeline::new([(0u8, 1.3), (1, 1.7), (2, 2.0), (3, 4.0)]).unwrap();
    let fps = Fps::whole(30).unwrap();
    let total = tl.total_frames(fps);
    assert_eq!(total, 270);

    let mut last_index = 0;
    for f in 0..total {
        let c = tl.cursor(FrameIndex(f), fps, total);
        assert!(c.phase.index >= last_index, "phase index went backwards");
        assert!((0.0..=1.0).contains(&c.progress()));
        last_index = c.phase.index;
    }
    assert_eq!(last_index, 3);
}

#[test]
fn rejects_degenerate_tables() {
    assert!(Timeline::<u8>::new([]).is_err());
    assert!(Timeline::new([(0u8, 0.0)]).is_err());
    assert!(Timeline::new([(0u8, -1.0)]).is_err());
    assert!(Timeline::new([(0u8, f64::NAN)]).is_err());
    assert!(Timeline::new([(0u8, f64::INFINITY)]).is_err());
}
