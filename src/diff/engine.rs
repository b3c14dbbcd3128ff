//! Core diff engine implementation.
//! Compares two parsed snapshots and attributes byte changes to owners.

use super::schema::{CompareReport, Delta, FunctionDelta, ScalarDeltas, SnapshotMetadata};
use crate::aggregator::owner_bytes;
use crate::parser::schema::Profile;
use crate::utils::config::{OwnerRules, SCHEMA_VERSION};
use chrono::Utc;
use log::debug;
use std::collections::BTreeSet;

/// Compare a baseline snapshot against a target snapshot
///
/// Owners are resolved per program point exactly as in aggregation. The
/// function list covers the union of owners in both snapshots, ordered by
/// absolute change descending, then by name.
///
/// # Example
/// ```ignore
/// let a = parse_profile("dhat-render-before.json")?;
/// let b = parse_profile("dhat-render-after.json")?;
/// let report = compare_profiles(&a, &b, &OwnerRules::default());
/// ```
pub fn compare_profiles(baseline: &Profile, target: &Profile, rules: &OwnerRules) -> CompareReport {
    let totals = ScalarDeltas {
        total_bytes: delta(baseline.total_bytes, target.total_bytes),
        peak_bytes: delta(baseline.peak_bytes, target.peak_bytes),
        end_bytes: delta(baseline.end_bytes, target.end_bytes),
        total_blocks: delta(baseline.total_blocks, target.total_blocks),
        peak_blocks: delta(baseline.peak_blocks, target.peak_blocks),
        end_blocks: delta(baseline.end_blocks, target.end_blocks),
    };

    let functions = function_deltas(baseline, target, rules);
    debug!("Compared {} owners", functions.len());

    let unchanged = totals.is_unchanged() && functions.iter().all(|f| f.change == 0);

    CompareReport {
        schema_version: SCHEMA_VERSION.to_string(),
        generated_at: Utc::now().to_rfc3339(),
        baseline: metadata(baseline),
        target: metadata(target),
        totals,
        functions,
        warning: unchanged.then(|| "Baseline and target snapshots are identical".to_string()),
    }
}

/// Per-owner byte deltas over the union of owners
pub fn function_deltas(
    baseline: &Profile,
    target: &Profile,
    rules: &OwnerRules,
) -> Vec<FunctionDelta> {
    let before = owner_bytes(baseline, rules);
    let after = owner_bytes(target, rules);

    let owners: BTreeSet<&String> = before.keys().chain(after.keys()).collect();

    let mut deltas: Vec<FunctionDelta> = owners
        .into_iter()
        .map(|function| {
            let baseline_bytes = before.get(function).copied().unwrap_or(0);
            let target_bytes = after.get(function).copied().unwrap_or(0);
            FunctionDelta {
                function: function.clone(),
                baseline_bytes,
                target_bytes,
                change: signed_change(baseline_bytes, target_bytes),
            }
        })
        .collect();

    deltas.sort_by(|a, b| {
        b.change
            .unsigned_abs()
            .cmp(&a.change.unsigned_abs())
            .then_with(|| a.function.cmp(&b.function))
    });
    deltas
}

/// Delta between two scalar values
pub fn delta(baseline: u64, target: u64) -> Delta {
    Delta {
        baseline,
        target,
        change: signed_change(baseline, target),
    }
}

/// `target - baseline`, clamped to the i64 range
fn signed_change(baseline: u64, target: u64) -> i64 {
    let change = i128::from(target) - i128::from(baseline);
    i64::try_from(change).unwrap_or(if change < 0 { i64::MIN } else { i64::MAX })
}

fn metadata(profile: &Profile) -> SnapshotMetadata {
    SnapshotMetadata {
        file: profile.file_name(),
        phase: profile.phase.clone(),
        name: profile.name.clone(),
    }
}
