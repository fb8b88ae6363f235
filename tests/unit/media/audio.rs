use super::*;

#[test]
fn scratch_paths_sit_beside_the_video() {
    assert_eq!(
        sibling(Path::new("/out/reel.mp4"), "_audio.mp4"),
        PathBuf::from("/out/reel_audio.mp4")
    );
}

#[test]
fn missing_video_is_an_external_failure() {
    let dir = tempfile::tempdir().unwrap();
    let err = mux_audio(
        &dir.path().join("none.mp4"),
        &MediaSource::parse("track.mp3"),
    )
    .unwrap_err();
    assert!(matches!(err, ReelError::External(_)));
}

#[test]
fn missing_audio_leaves_the_video_alone() {
    let dir = tempfile::tempdir().unwrap();
    let video = dir.path().join("v.mp4");
    std::fs::write(&video, b"not really a video").unwrap();
    let err = mux_audio(&video, &MediaSource::Path(dir.path().join("none.mp3"))).unwrap_err();
    assert!(!err.is_fatal());
    assert_eq!(std::fs::read(&video).unwrap(), b"not really a video");
}

#[test]
fn failed_mux_removes_scratch_output() {
    if !crate::encode::ffmpeg::is_ffmpeg_on_path() {
        return;
    }
    let dir = tempfile::tempdir().unwrap();
    let video = dir.path().join("v.mp4");
    let audio = dir.path().join("a.mp3");
    std::fs::write(&video, b"garbage").unwrap();
    std::fs::write(&audio, b"garbage").unwrap();
    let err = mux_audio(&video, &MediaSource::Path(audio)).unwrap_err();
    assert!(matches!(err, ReelError::External(_)));
    assert!(!dir.path().join("v_audio.mp4").exists());
    assert_eq!(std::fs::read(&video).unwrap(), b"garbage");
}
