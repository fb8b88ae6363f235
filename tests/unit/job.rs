use super::*;

#[test]
fn minimal_job_takes_defaults() {
    let job = RenderJob::from_reader(&br#"{"image": "in.png", "out": "out/reel.mp4"}"#[..]).unwrap();
    assert_eq!(
        job,
        RenderJob::new(
            MediaSource::parse("in.png"),
            AnimationKind::CollageSpin,
            "out/reel.mp4"
        )
    );
    let opts = job.render_options().unwrap();
    assert_eq!(opts.fps, None);
    assert_eq!(opts.canvas, Canvas::PORTRAIT);
    assert!(opts.cinematic);
}

#[test]
fn full_job_parses() {
    let json = br#"{
        "image": "https://img.example/face.jpg",
        "animation": "zoomin_zoomout_fadein2",
        "out": "reel.mp4",
        "fps": 25,
        "audio": "song.mp3",
        "background": {"solid": [0, 0, 0]},
        "canvas": {"width": 540, "height": 960},
        "seed": 42,
        "cinematic": false,
        "upload": {"endpoint": "https://store.example/upload", "upload_preset": "reels"},
        "keep_local": true
    }"#;
    let job = RenderJob::from_reader(&json[..]).unwrap();
    assert!(job.image.is_remote());
    assert_eq!(job.animation, AnimationKind::ZoomRoll);
    assert_eq!(job.audio, Some(MediaSource::parse("song.mp3")));
    assert_eq!(job.background, Some(BackgroundSpec::Solid([0, 0, 0])));
    assert!(job.keep_local);

    let opts = job.render_options().unwrap();
    assert_eq!(opts.fps, Some(Fps::whole(25).unwrap()));
    assert_eq!(opts.canvas, Canvas::new(540, 960).unwrap());
    assert_eq!(opts.seed, Some(42));
    assert!(!opts.cinematic);
}

#[test]
fn unknown_fields_and_names_are_serde_errors() {
    let err = RenderJob::from_reader(&br#"{"image": "a.png", "out": "b.mp4", "colour": 1}"#[..])
        .unwrap_err();
    assert!(matches!(err, ReelError::Serde(_)));
    let err =
        RenderJob::from_reader(&br#"{"image": "a.png", "out": "b.mp4", "animation": "nope"}"#[..])
            .unwrap_err();
    assert!(matches!(err, ReelError::Serde(_)));
}

#[test]
fn invalid_values_are_validation_errors() {
    for json in [
        &br#"{"image": "a.png", "out": "b.mp4", "fps": 0}"#[..],
        &br#"{"image": "a.png", "out": ""}"#[..],
        &br#"{"image": "a.png", "out": "b.mp4", "canvas": {"width": 3, "height": 4}}"#[..],
        &br#"{"image": "a.png", "out": "b.mp4", "upload": {"endpoint": " ", "upload_preset": "p"}}"#[..],
    ] {
        let err = RenderJob::from_reader(json).unwrap_err();
        assert!(matches!(err, ReelError::Validation(_)), "{err}");
    }
}

#[test]
fn missing_job_file_is_reported() {
    let err = RenderJob::from_path(Path::new("/definitely/not/job.json")).unwrap_err();
    assert!(matches!(err, ReelError::Other(_)));
}

#[test]
fn unavailable_source_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let job = RenderJob::new(
        MediaSource::Path(dir.path().join("missing.png")),
        AnimationKind::Cartoon,
        dir.path().join("out.mp4"),
    );
    let err = run_job(&job).unwrap_err();
    assert!(matches!(err, ReelError::InputUnavailable(_)));
    assert!(!dir.path().join("out.mp4").exists());
}

#[test]
fn report_serializes_with_registry_name() {
    let report = JobReport {
        animation: AnimationKind::Swing,
        duration_seconds: 10.0,
        frames_written: 300,
        audio_attached: false,
        video_url: None,
        cinematic_path: None,
        output: Some(PathBuf::from("reel.mp4")),
        step_failures: vec!["audio: missing".to_owned()],
    };
    let v = serde_json::to_value(&report).unwrap();
    assert_eq!(v["animation"], "swing_r_swing_d4");
    assert_eq!(v["frames_written"], 300);
    assert_eq!(v["output"], "reel.mp4");
    assert!(v["video_url"].is_null());
}
