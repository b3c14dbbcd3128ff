//! Report views over parsed profiles.
//!
//! Each view is split into a pure computation (`views`) that returns typed
//! rows (`schema`) and a renderer (`render`) that turns them into text.

pub mod render;
pub mod schema;
pub mod views;

use crate::parser::schema::Profile;
use crate::utils::config::{AnalyzerConfig, SCHEMA_VERSION};
use chrono::Utc;
use std::path::Path;

pub use render::{
    render_budget, render_churn, render_hotspots, render_peak, render_phase_section,
    render_report, render_summary, NO_PROFILES,
};
pub use schema::{
    AnalysisReport, BudgetReport, BudgetRow, BudgetStatus, BudgetVerdict, OwnerRow, PeakRow,
    PhaseSection, SummaryRow,
};
pub use views::{
    check_budget, churn, hotspots, is_churn, peak_breakdown, phase_section, phases,
    profiles_in_phase, summary_rows, total_peak,
};

/// Build the combined report for a loaded profile set
///
/// **Public** - used by the `report` command and for JSON export
pub fn build_report(
    profiles: &[Profile],
    directory: &Path,
    phase_filter: Option<&str>,
    target: u64,
    top_n: usize,
    config: &AnalyzerConfig,
) -> AnalysisReport {
    let phases = phases(profiles)
        .into_iter()
        .map(|phase| {
            let members = profiles_in_phase(profiles, &phase);
            phase_section(&phase, &members, &config.owner, top_n)
        })
        .collect();

    AnalysisReport {
        schema_version: SCHEMA_VERSION.to_string(),
        generated_at: Utc::now().to_rfc3339(),
        directory: directory.display().to_string(),
        phase_filter: phase_filter.map(str::to_string),
        top_n,
        summary: summary_rows(profiles),
        phases,
        budget: check_budget(profiles, target),
    }
}
