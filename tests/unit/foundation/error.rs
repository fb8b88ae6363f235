use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        ReelError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        ReelError::input_unavailable("x")
            .to_string()
            .contains("input unavailable:")
    );
    assert!(ReelError::encode("x").to_string().contains("encode error:"));
    assert!(
        ReelError::external("x")
            .to_string()
            .contains("external step failed:")
    );
    assert!(
        ReelError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = ReelError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn only_external_steps_are_non_fatal() {
    assert!(!ReelError::external("upload").is_fatal());
    assert!(ReelError::encode("pipe").is_fatal());
    assert!(ReelError::input_unavailable("bg").is_fatal());
}
