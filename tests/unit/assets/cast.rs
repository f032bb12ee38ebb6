use super::*;

#[test]
fn header_duration_wins() {
    let doc = r#"{"version": 1, "duration": 12.5, "stdout": [[1.0, "a"], [3.0, "b"]]}"#;
    assert_eq!(recording_duration_secs(doc), 12.5);
}

#[test]
fn v1_falls_back_to_last_stdout_event() {
    let doc = r#"{"version": 1, "stdout": [[0.5, "a"], [7.25, "b"]]}"#;
    assert_eq!(recording_duration_secs(doc), 7.25);
}

#[test]
fn v2_event_stream_uses_last_line() {
    let doc = "{\"version\": 2, \"width\": 80, \"height\": 24}\n[0.1, \"o\", \"$ \"]\n[4.5, \"o\", \"ls\\r\\n\"]\n\n";
    assert_eq!(recording_duration_secs(doc), 4.5);
}

#[test]
fn unusable_documents_are_zero_length() {
    assert_eq!(recording_duration_secs(""), 0.0);
    assert_eq!(recording_duration_secs("{\"version\": 2}"), 0.0);
    assert_eq!(recording_duration_secs("{\"version\": 2}\nnot json\n"), 0.0);
}

#[test]
fn probe_reads_relative_to_root() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir_all(dir.path().join("casts")).unwrap();
    std::fs::write(
        dir.path().join("casts/demo.cast"),
        "{\"version\": 2}\n[2.0, \"o\", \"x\"]\n",
    )
    .unwrap();

    let probe = AsciicastProbe::new(dir.path());
    assert_eq!(probe.duration_secs("/casts/demo.cast").unwrap(), 2.0);
    assert!(matches!(
        probe.duration_secs("casts/missing.cast"),
        Err(ScenecastError::Asset(_))
    ));
    assert!(probe.duration_secs("../etc/passwd").is_err());
}
