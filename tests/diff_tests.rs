//! Snapshot comparison tests

use dhat_lens::diff::{compare_profiles, delta, render_compare, FunctionDelta};
use dhat_lens::parser::{ProgramPoint, Profile};
use dhat_lens::utils::config::{DisplayRules, OwnerRules};
use pretty_assertions::assert_eq;
use std::path::PathBuf;

fn point(tb: u64, gb: u64, eb: u64, fs: Vec<usize>) -> ProgramPoint {
    ProgramPoint {
        tb,
        tbk: 1,
        gb,
        gbk: u64::from(gb > 0),
        eb,
        ebk: u64::from(eb > 0),
        mb: gb.max(1),
        fs,
    }
}

fn profile(file: &str, pps: Vec<ProgramPoint>) -> Profile {
    Profile::new(
        PathBuf::from(file),
        "render".to_string(),
        "book".to_string(),
        pps,
        vec![
            "[root]".to_string(),
            "0x1: epub_stream::zip::inflate (z.rs:1)".to_string(),
            "0x2: epub_stream::css::parse (c.rs:2)".to_string(),
            "0x3: epub_stream::layout::wrap (w.rs:3)".to_string(),
        ],
    )
}

fn baseline() -> Profile {
    profile(
        "dhat-render-before.json",
        vec![
            point(4000, 100, 0, vec![0, 1]),
            point(900, 50, 10, vec![0, 2]),
        ],
    )
}

fn target() -> Profile {
    profile(
        "dhat-render-after.json",
        vec![
            point(1000, 100, 0, vec![0, 1]),
            point(900, 80, 0, vec![0, 2]),
            point(2500, 0, 0, vec![0, 3]),
        ],
    )
}

fn changes(functions: &[FunctionDelta]) -> Vec<(String, i64)> {
    functions
        .iter()
        .map(|f| (f.function.clone(), f.change))
        .collect()
}

#[test]
fn test_scalar_deltas() {
    let report = compare_profiles(&baseline(), &target(), &OwnerRules::default());

    assert_eq!(report.totals.total_bytes.baseline, 4900);
    assert_eq!(report.totals.total_bytes.target, 4400);
    assert_eq!(report.totals.total_bytes.change, -500);
    assert_eq!(report.totals.peak_bytes.change, 30);
    assert_eq!(report.totals.end_bytes.change, -10);
    assert_eq!(report.totals.total_blocks.change, 1);
    assert_eq!(report.baseline.file, "dhat-render-before.json");
    assert_eq!(report.target.file, "dhat-render-after.json");
    assert!(report.warning.is_none());
}

#[test]
fn test_function_deltas_union_and_order() {
    let report = compare_profiles(&baseline(), &target(), &OwnerRules::default());

    assert_eq!(
        changes(&report.functions),
        vec![
            ("epub_stream::zip::inflate".to_string(), -3000),
            ("epub_stream::layout::wrap".to_string(), 2500),
            ("epub_stream::css::parse".to_string(), 0),
        ]
    );

    let wrap = &report.functions[1];
    assert_eq!(wrap.baseline_bytes, 0);
    assert_eq!(wrap.target_bytes, 2500);
}

#[test]
fn test_compare_is_antisymmetric() {
    let rules = OwnerRules::default();
    let forward = compare_profiles(&baseline(), &target(), &rules);
    let backward = compare_profiles(&target(), &baseline(), &rules);

    assert_eq!(
        forward.totals.total_bytes.change,
        -backward.totals.total_bytes.change
    );
    assert_eq!(
        forward.totals.peak_bytes.change,
        -backward.totals.peak_bytes.change
    );

    let mut negated: Vec<(String, i64)> = changes(&backward.functions)
        .into_iter()
        .map(|(name, change)| (name, -change))
        .collect();
    negated.sort();
    let mut forward_changes = changes(&forward.functions);
    forward_changes.sort();
    assert_eq!(forward_changes, negated);
}

#[test]
fn test_identical_snapshots_warn() {
    let report = compare_profiles(&baseline(), &baseline(), &OwnerRules::default());

    assert!(report.totals.is_unchanged());
    assert!(report.functions.iter().all(|f| f.change == 0));
    assert_eq!(
        report.warning.as_deref(),
        Some("Baseline and target snapshots are identical")
    );
}

#[test]
fn test_render_compare() {
    let report = compare_profiles(&baseline(), &target(), &OwnerRules::default());
    let text = render_compare(&report, 2, &DisplayRules::default());

    assert!(text.contains("A: dhat-render-before.json"));
    assert!(text.contains("B: dhat-render-after.json"));
    assert!(text.contains("Top 2 changed functions:"));
    assert!(text.contains("-2.9 KB"));
    assert!(text.contains("+2.4 KB"));
    // only the top two owners are listed
    assert!(!text.contains("css::parse"));
}

#[test]
fn test_delta_beyond_i64_keeps_sign() {
    let big = i64::MAX as u64 + 10;

    assert_eq!(delta(0, big).change, i64::MAX);
    assert_eq!(delta(big, 0).change, i64::MIN);
    assert_eq!(delta(big, big + 5).change, 5);
    assert_eq!(delta(u64::MAX, 0).change, i64::MIN);
}
