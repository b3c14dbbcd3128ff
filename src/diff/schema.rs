//! Schema definitions for snapshot comparisons.

use serde::Serialize;

/// Complete comparison of a baseline snapshot against a target snapshot
#[derive(Debug, Clone, Serialize)]
pub struct CompareReport {
    /// Schema version for the export format
    pub schema_version: String,

    /// Timestamp when the comparison was generated
    pub generated_at: String,

    pub baseline: SnapshotMetadata,
    pub target: SnapshotMetadata,

    pub totals: ScalarDeltas,

    /// Per-owner byte deltas, largest absolute change first
    pub functions: Vec<FunctionDelta>,

    /// Set when nothing differs between the two snapshots
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

/// Identity of one compared snapshot
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SnapshotMetadata {
    pub file: String,
    pub phase: String,
    pub name: String,
}

/// Whole-snapshot deltas
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ScalarDeltas {
    pub total_bytes: Delta,
    pub peak_bytes: Delta,
    pub end_bytes: Delta,
    pub total_blocks: Delta,
    pub peak_blocks: Delta,
    pub end_blocks: Delta,
}

impl ScalarDeltas {
    /// True when no scalar moved
    pub fn is_unchanged(&self) -> bool {
        [
            self.total_bytes,
            self.peak_bytes,
            self.end_bytes,
            self.total_blocks,
            self.peak_blocks,
            self.end_blocks,
        ]
        .iter()
        .all(|d| d.change == 0)
    }
}

/// Baseline and target value with their difference
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Delta {
    pub baseline: u64,
    pub target: u64,

    /// target - baseline (can be negative)
    pub change: i64,
}

/// Allocation volume change for one owning function
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FunctionDelta {
    pub function: String,
    pub baseline_bytes: u64,
    pub target_bytes: u64,
    pub change: i64,
}
