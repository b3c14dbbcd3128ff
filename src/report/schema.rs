//! Structured results of the report views.
//!
//! These are what the renderers print and what `--json` serializes.

use crate::aggregator::SiteStats;
use serde::Serialize;

/// One subject's totals in the summary table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryRow {
    pub phase: String,
    pub name: String,
    pub total_bytes: u64,
    pub peak_bytes: u64,
    pub total_blocks: u64,
    pub end_bytes: u64,
}

/// An owner with its aggregated statistics
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OwnerRow {
    pub function: String,
    #[serde(flatten)]
    pub stats: SiteStats,
}

/// An owner's share of the summed peak heap
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeakRow {
    pub function: String,
    pub peak_bytes: u64,
    /// Percentage of the summed peak across the profile set
    pub percent: f64,
}

/// Views computed for the profiles of a single phase
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PhaseSection {
    pub phase: String,
    pub subjects: usize,
    pub total_peak_bytes: u64,
    pub hotspots: Vec<OwnerRow>,
    pub churn: Vec<OwnerRow>,
    pub peak: Vec<PeakRow>,
}

/// Outcome of a budget comparison for one profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum BudgetStatus {
    Pass,
    Over,
}

impl BudgetStatus {
    pub fn label(self) -> &'static str {
        match self {
            BudgetStatus::Pass => "PASS",
            BudgetStatus::Over => "OVER",
        }
    }
}

/// Budget comparison for one profile
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetRow {
    pub phase: String,
    pub name: String,
    pub peak_bytes: u64,
    /// Peak as a percentage of the target (0 when the target is 0)
    pub percent_of_target: f64,
    pub status: BudgetStatus,
}

/// Overall result of a budget check
///
/// A budget failure is an expected outcome, not an error: callers map
/// `OverBudget` to a nonzero exit status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetVerdict {
    WithinBudget,
    OverBudget,
}

/// Budget comparison for a set of profiles
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetReport {
    pub target_bytes: u64,
    pub rows: Vec<BudgetRow>,
    pub verdict: BudgetVerdict,
}

/// Everything the `report` command prints
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    /// Schema version for compatibility checking
    pub schema_version: String,

    /// Timestamp when the report was generated
    pub generated_at: String,

    /// Directory the snapshots were loaded from
    pub directory: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub phase_filter: Option<String>,

    /// Rows shown per ranked view
    pub top_n: usize,

    pub summary: Vec<SummaryRow>,
    pub phases: Vec<PhaseSection>,
    pub budget: BudgetReport,
}
