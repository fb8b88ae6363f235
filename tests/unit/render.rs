use super::*;
use crate::encode::sink::{FrameCounter, InMemorySink};

fn small() -> RenderOptions {
    RenderOptions {
        canvas: Canvas::new(36, 64).unwrap(),
        seed: Some(7),
        ..RenderOptions::default()
    }
}

fn red(w: u32, h: u32) -> RgbImage {
    RgbImage::from_pixel(w, h, image::Rgb([255, 0, 0]))
}

/// Fails on `fail_at` (or at `end` with `fail_end`) and remembers whether it was aborted.
#[derive(Default)]
struct Flaky {
    fail_at: Option<u64>,
    fail_end: bool,
    pushed: u64,
    ended: bool,
    aborted: bool,
}

impl FrameSink for Flaky {
    fn begin(&mut self, _cfg: SinkConfig) -> ReelResult<()> {
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, _frame: &RgbImage) -> ReelResult<()> {
        if self.fail_at == Some(idx.0) {
            return Err(ReelError::encode("disk full"));
        }
        self.pushed += 1;
        Ok(())
    }

    fn end(&mut self) -> ReelResult<()> {
        if self.fail_end {
            return Err(ReelError::encode("ffmpeg exited with status 1"));
        }
        self.ended = true;
        Ok(())
    }

    fn abort(&mut self) {
        self.aborted = true;
    }
}

#[test]
fn default_options_use_program_fps_and_background() {
    let opts = RenderOptions::default();
    assert_eq!(opts.fps_for(AnimationKind::ZoomRoll).unwrap().num, 24);
    assert_eq!(opts.fps_for(AnimationKind::Swing).unwrap().num, 30);
    assert_eq!(
        opts.background_for(AnimationKind::ZoomRoll),
        BackgroundSpec::black()
    );
    assert_eq!(
        opts.background_for(AnimationKind::CollageSpin),
        BackgroundSpec::default_gradient()
    );
    let photo = BackgroundSpec::Image(crate::assets::MediaSource::parse("bg.jpg"));
    let with_photo = RenderOptions {
        background: Some(photo.clone()),
        ..RenderOptions::default()
    };
    assert_eq!(with_photo.background_for(AnimationKind::CollageSpin), photo);
    assert!(opts.cinematic);
    assert!(!opts.probe_duration);
}

#[test]
fn counts_frames_and_reports_duration() {
    let mut counter = FrameCounter::new();
    let out = render_to_sink(AnimationKind::Cartoon, &red(50, 50), &small(), &mut counter, None)
        .unwrap();
    assert_eq!(out.frame_count, 120);
    assert_eq!(counter.count(), 120);
    assert!(counter.ended());
    assert!((out.duration_secs - 4.0).abs() < 1e-9);
    assert!(out.step_failures.is_empty());
    let cfg = counter.config().unwrap();
    assert_eq!((cfg.width, cfg.height, cfg.frame_count), (36, 64, 120));
}

#[test]
fn fps_override_changes_frame_count() {
    let opts = RenderOptions {
        fps: Some(Fps::whole(10).unwrap()),
        ..small()
    };
    let mut counter = FrameCounter::new();
    let out =
        render_to_sink(AnimationKind::Swing, &red(40, 40), &opts, &mut counter, None).unwrap();
    assert_eq!(out.frame_count, 100);
    assert_eq!(out.fps, Fps::whole(10).unwrap());
}

#[test]
fn secondary_receives_the_same_frames() {
    let mut primary = FrameCounter::new();
    let mut retained = InMemorySink::new();
    let out = render_to_sink(
        AnimationKind::Cartoon,
        &red(20, 20),
        &small(),
        &mut primary,
        Some(&mut retained),
    )
    .unwrap();
    assert_eq!(retained.frames().len() as u64, out.frame_count);
    assert_eq!(Some(&retained.frames()[0].1), primary.first_frame());
}

#[test]
fn secondary_failure_is_recorded_not_fatal() {
    let mut primary = FrameCounter::new();
    let mut secondary = Flaky {
        fail_at: Some(3),
        ..Flaky::default()
    };
    let out = render_to_sink(
        AnimationKind::Cartoon,
        &red(20, 20),
        &small(),
        &mut primary,
        Some(&mut secondary),
    )
    .unwrap();
    assert_eq!(primary.count(), 120);
    assert_eq!(secondary.pushed, 3);
    assert!(secondary.aborted);
    assert_eq!(out.step_failures.len(), 1);
}

#[test]
fn primary_failure_aborts_every_sink() {
    let mut primary = Flaky {
        fail_at: Some(5),
        ..Flaky::default()
    };
    let mut retained = InMemorySink::new();
    let err = render_to_sink(
        AnimationKind::Cartoon,
        &red(20, 20),
        &small(),
        &mut primary,
        Some(&mut retained),
    )
    .unwrap_err();
    assert!(matches!(err, ReelError::Encode(_)));
    assert!(primary.aborted);
    assert!(retained.frames().is_empty());
}

#[test]
fn primary_failure_at_finish_aborts_every_sink() {
    let mut primary = Flaky {
        fail_end: true,
        ..Flaky::default()
    };
    let mut secondary = Flaky::default();
    let err = render_to_sink(
        AnimationKind::Cartoon,
        &red(20, 20),
        &small(),
        &mut primary,
        Some(&mut secondary),
    )
    .unwrap_err();
    assert!(matches!(err, ReelError::Encode(_)));
    assert_eq!(primary.pushed, 120);
    assert!(primary.aborted);
    assert!(secondary.aborted);
    assert!(!secondary.ended);
}

#[test]
fn missing_background_image_fails_before_any_frame() {
    let opts = RenderOptions {
        background: Some(BackgroundSpec::Image(crate::assets::MediaSource::Path(
            "/definitely/not/here.png".into(),
        ))),
        ..small()
    };
    let mut counter = FrameCounter::new();
    let err = render_to_sink(
        AnimationKind::CollageSpin,
        &red(20, 20),
        &opts,
        &mut counter,
        None,
    )
    .unwrap_err();
    assert!(matches!(err, ReelError::InputUnavailable(_)));
    assert!(counter.config().is_none());
}

#[test]
fn odd_canvas_is_rejected() {
    let opts = RenderOptions {
        canvas: Canvas {
            width: 35,
            height: 64,
        },
        ..small()
    };
    let err = render_to_sink(
        AnimationKind::Cartoon,
        &red(20, 20),
        &opts,
        &mut FrameCounter::new(),
        None,
    )
    .unwrap_err();
    assert!(matches!(err, ReelError::Validation(_)));
}

#[test]
fn too_low_fps_produces_no_frames_and_fails() {
    let opts = RenderOptions {
        fps: Some(Fps::new(1, 10).unwrap()),
        ..small()
    };
    let err = render_to_sink(
        AnimationKind::Cartoon,
        &red(20, 20),
        &opts,
        &mut FrameCounter::new(),
        None,
    )
    .unwrap_err();
    assert!(matches!(err, ReelError::Validation(_)));
}

#[test]
fn first_reveal_frame_is_the_background() {
    let opts = small();
    let frame = render_frame(
        AnimationKind::RevealSlide,
        &red(500, 500),
        &opts,
        FrameIndex(0),
    )
    .unwrap();
    let bg = BackgroundSpec::default_gradient()
        .render(opts.canvas)
        .unwrap();
    assert_eq!(frame, bg);
}

#[test]
fn render_frame_past_the_end_is_rejected() {
    let err = render_frame(
        AnimationKind::Cartoon,
        &red(20, 20),
        &small(),
        FrameIndex(120),
    )
    .unwrap_err();
    assert!(matches!(err, ReelError::Validation(_)));
}

#[test]
fn seeded_particle_frames_are_reproducible() {
    let a = render_frame(AnimationKind::ZoomRoll, &red(30, 30), &small(), FrameIndex(60)).unwrap();
    let b = render_frame(AnimationKind::ZoomRoll, &red(30, 30), &small(), FrameIndex(60)).unwrap();
    assert_eq!(a, b);
}
