use crate::utils::config::{
    DEFAULT_BUDGET_TARGET, DEFAULT_COMPARE_TOP_N, DEFAULT_PROFILE_DIR, DEFAULT_TOP_N,
};
use std::path::PathBuf;

/// Arguments shared by summary, hotspots, churn and peak
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct ViewArgs {
    /// Directory holding `dhat-*.json` snapshots
    pub dir: PathBuf,

    /// Only load profiles from this phase
    pub phase: Option<String>,

    /// Number of ranked rows to show
    pub top_n: usize,
}

impl Default for ViewArgs {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(DEFAULT_PROFILE_DIR),
            phase: None,
            top_n: DEFAULT_TOP_N,
        }
    }
}

/// Arguments for the budget command
#[derive(Debug, Clone)]
pub struct BudgetArgs {
    pub dir: PathBuf,
    pub phase: Option<String>,

    /// Peak heap target, e.g. `512KB`
    pub target: String,
}

impl Default for BudgetArgs {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(DEFAULT_PROFILE_DIR),
            phase: None,
            target: DEFAULT_BUDGET_TARGET.to_string(),
        }
    }
}

/// Arguments for the compare command
#[derive(Debug, Clone)]
pub struct CompareArgs {
    /// Baseline snapshot file
    pub baseline: PathBuf,

    /// Target snapshot file
    pub target: PathBuf,

    /// Number of changed functions to show
    pub top_n: usize,

    /// Also write the comparison as JSON
    pub json: Option<PathBuf>,
}

impl Default for CompareArgs {
    fn default() -> Self {
        Self {
            baseline: PathBuf::new(),
            target: PathBuf::new(),
            top_n: DEFAULT_COMPARE_TOP_N,
            json: None,
        }
    }
}

/// Arguments for the combined report
#[derive(Debug, Clone)]
pub struct ReportArgs {
    pub dir: PathBuf,
    pub phase: Option<String>,
    pub target: String,
    pub top_n: usize,

    /// Also write the report as JSON
    pub json: Option<PathBuf>,
}

impl Default for ReportArgs {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(DEFAULT_PROFILE_DIR),
            phase: None,
            target: DEFAULT_BUDGET_TARGET.to_string(),
            top_n: DEFAULT_TOP_N,
            json: None,
        }
    }
}
