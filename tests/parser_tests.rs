use dhat_lens::aggregator::resolve_owner;
use dhat_lens::parser::{extract_phase_and_name, load_profiles, parse_profile, ProgramPoint, Profile};
use dhat_lens::utils::config::OwnerRules;
use dhat_lens::utils::error::ParseError;
use serde_json::{json, Value};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn write_snapshot(dir: &Path, file_name: &str, doc: &Value) -> PathBuf {
    let path = dir.join(file_name);
    fs::write(&path, serde_json::to_string(doc).unwrap()).unwrap();
    path
}

fn pp(tb: u64, gb: u64, eb: u64, mb: u64, fs: &[usize]) -> Value {
    let gbk = u64::from(gb > 0);
    let ebk = u64::from(eb > 0);
    json!({
        "tb": tb, "tbk": 1,
        "gb": gb, "gbk": gbk,
        "eb": eb, "ebk": ebk,
        "mb": mb, "fs": fs
    })
}

fn simple_snapshot() -> Value {
    json!({
        "dhatFileVersion": 2,
        "mode": "rust-heap",
        "pps": [pp(100, 50, 0, 50, &[0, 1])],
        "ftbl": ["[root]", "0x1: epub_stream::foo (f.rs:5)"]
    })
}

#[test]
fn test_alice_render_scenario() {
    let dir = TempDir::new().unwrap();
    let path = write_snapshot(
        dir.path(),
        "dhat-render-alice.json",
        &json!({
            "pps": [{"tb": 100, "tbk": 1, "gb": 50, "gbk": 1, "eb": 0, "ebk": 0, "mb": 50, "fs": [0, 3]}],
            "ftbl": ["0x0: root (r.c:1)", "-", "-", "0x1: epub_stream::foo (f.c:5)"]
        }),
    );

    let profile = parse_profile(&path).unwrap();
    assert_eq!(profile.phase, "render");
    assert_eq!(profile.name, "alice");
    assert_eq!(profile.total_bytes, 100);
    assert_eq!(profile.peak_bytes, 50);
    assert_eq!(profile.end_bytes, 0);
    assert_eq!(profile.program_points.len(), 1);
    assert_eq!(profile.frame_table.len(), 4);
    assert_eq!(
        resolve_owner(
            &profile.program_points[0],
            &profile.frame_table,
            &OwnerRules::default()
        ),
        "epub_stream::foo"
    );
}

#[test]
fn test_totals_are_sums_of_program_points() {
    let dir = TempDir::new().unwrap();
    let path = write_snapshot(
        dir.path(),
        "dhat-full-bob.json",
        &json!({
            "pps": [
                {"tb": 10, "tbk": 2, "gb": 4, "gbk": 1, "eb": 1, "ebk": 1, "mb": 8, "fs": [0]},
                {"tb": 300, "tbk": 7, "gb": 0, "gbk": 0, "eb": 0, "ebk": 0, "mb": 64, "fs": [0]},
                {"tb": 5, "tbk": 1, "gb": 5, "gbk": 1, "eb": 5, "ebk": 1, "mb": 5, "fs": [0]}
            ],
            "ftbl": ["[root]"]
        }),
    );

    let p = parse_profile(&path).unwrap();
    assert_eq!(p.total_bytes, p.program_points.iter().map(|pp| pp.tb).sum::<u64>());
    assert_eq!(p.total_bytes, 315);
    assert_eq!(p.total_blocks, 10);
    assert_eq!(p.peak_bytes, 9);
    assert_eq!(p.peak_blocks, 2);
    assert_eq!(p.end_bytes, 6);
    assert_eq!(p.end_blocks, 2);
}

#[test]
fn test_missing_program_points_is_an_error() {
    let dir = TempDir::new().unwrap();
    let path = write_snapshot(dir.path(), "dhat-render-x.json", &json!({"ftbl": []}));

    let err = parse_profile(&path).unwrap_err();
    assert!(matches!(err, ParseError::Json { .. }));
    assert!(err.to_string().contains("pps"));
}

#[test]
fn test_missing_frame_table_is_an_error() {
    let dir = TempDir::new().unwrap();
    let path = write_snapshot(dir.path(), "dhat-render-x.json", &json!({"pps": []}));

    let err = parse_profile(&path).unwrap_err();
    assert!(err.to_string().contains("ftbl"));
}

#[test]
fn test_missing_program_point_field_is_an_error() {
    let dir = TempDir::new().unwrap();
    let path = write_snapshot(
        dir.path(),
        "dhat-render-x.json",
        &json!({"pps": [{"tb": 1, "fs": [0]}], "ftbl": ["[root]"]}),
    );

    assert!(matches!(
        parse_profile(&path),
        Err(ParseError::Json { .. })
    ));
}

#[test]
fn test_frame_index_out_of_range() {
    let dir = TempDir::new().unwrap();
    let path = write_snapshot(
        dir.path(),
        "dhat-render-x.json",
        &json!({"pps": [pp(1, 0, 0, 1, &[0, 9])], "ftbl": ["[root]"]}),
    );

    match parse_profile(&path) {
        Err(ParseError::FrameOutOfRange { frame, len, .. }) => {
            assert_eq!(frame, 9);
            assert_eq!(len, 1);
        }
        other => panic!("expected FrameOutOfRange, got {:?}", other),
    }
}

#[test]
fn test_not_json() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("dhat-render-x.json");
    fs::write(&path, "not json").unwrap();

    assert!(matches!(
        parse_profile(&path),
        Err(ParseError::Json { .. })
    ));
}

#[test]
fn test_missing_file() {
    assert!(matches!(
        parse_profile("/no/such/dhat-render-x.json"),
        Err(ParseError::Io { .. })
    ));
}

#[test]
fn test_phase_extraction_is_deterministic() {
    for stem in ["dhat-session_once-pg84", "dhat-render-a-b", "dhat-weird"] {
        assert_eq!(extract_phase_and_name(stem), extract_phase_and_name(stem));
    }
    assert_eq!(extract_phase_and_name("dhat-session_once-pg84").0, "session_once");
}

#[test]
fn test_load_profiles_skips_aggregates_and_sorts() {
    let dir = TempDir::new().unwrap();
    let doc = simple_snapshot();
    write_snapshot(dir.path(), "dhat-render-zeta.json", &doc);
    write_snapshot(dir.path(), "dhat-render-alpha.json", &doc);
    write_snapshot(dir.path(), "dhat-render.json", &doc);
    write_snapshot(dir.path(), "dhat-open-alpha.json", &doc);
    write_snapshot(dir.path(), "other-render-alpha.json", &doc);
    fs::write(dir.path().join("dhat-render-notes.txt"), "ignored").unwrap();

    let profiles = load_profiles(dir.path(), None).unwrap();
    let names: Vec<(String, String)> = profiles
        .iter()
        .map(|p| (p.phase.clone(), p.name.clone()))
        .collect();

    assert_eq!(
        names,
        vec![
            ("open".to_string(), "alpha".to_string()),
            ("render".to_string(), "alpha".to_string()),
            ("render".to_string(), "zeta".to_string()),
        ]
    );
}

#[test]
fn test_load_profiles_phase_filter() {
    let dir = TempDir::new().unwrap();
    let doc = simple_snapshot();
    write_snapshot(dir.path(), "dhat-session-pg84.json", &doc);
    write_snapshot(dir.path(), "dhat-session_once-pg84.json", &doc);
    write_snapshot(dir.path(), "dhat-render-pg84.json", &doc);

    let session = load_profiles(dir.path(), Some("session")).unwrap();
    assert_eq!(session.len(), 1);
    assert_eq!(session[0].phase, "session");

    let once = load_profiles(dir.path(), Some("session_once")).unwrap();
    assert_eq!(once.len(), 1);
    assert_eq!(once[0].name, "pg84");

    assert!(load_profiles(dir.path(), Some("cover")).unwrap().is_empty());
}

#[test]
fn test_load_profiles_missing_directory_is_empty() {
    let dir = TempDir::new().unwrap();
    let profiles = load_profiles(dir.path().join("missing"), None).unwrap();
    assert!(profiles.is_empty());
}

#[test]
fn test_load_profiles_propagates_parse_errors() {
    let dir = TempDir::new().unwrap();
    write_snapshot(dir.path(), "dhat-render-good.json", &simple_snapshot());
    fs::write(dir.path().join("dhat-render-bad.json"), "{").unwrap();

    assert!(load_profiles(dir.path(), None).is_err());
}

#[test]
fn test_totals_overflow_is_an_error() {
    let dir = TempDir::new().unwrap();
    let path = write_snapshot(
        dir.path(),
        "dhat-render-huge.json",
        &json!({
            "pps": [pp(u64::MAX, 0, 0, 1, &[0]), pp(1, 0, 0, 1, &[0])],
            "ftbl": ["[root]"]
        }),
    );

    match parse_profile(&path) {
        Err(ParseError::TotalsOverflow { field, .. }) => assert_eq!(field, "tb"),
        other => panic!("expected TotalsOverflow, got {:?}", other),
    }
}

#[test]
fn test_profile_totals_saturate() {
    let point = |tb: u64| ProgramPoint {
        tb,
        tbk: 1,
        gb: 0,
        gbk: 0,
        eb: 0,
        ebk: 0,
        mb: 0,
        fs: vec![0],
    };

    let profile = Profile::new(
        PathBuf::from("dhat-render-huge.json"),
        "render".to_string(),
        "huge".to_string(),
        vec![point(u64::MAX), point(1)],
        vec!["[root]".to_string()],
    );
    assert_eq!(profile.total_bytes, u64::MAX);
    assert_eq!(profile.total_blocks, 2);
}
