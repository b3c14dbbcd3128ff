//! Report command implementation.
//!
//! The report command:
//! 1. Loads the profile directory
//! 2. Prints the per-subject summary
//! 3. Prints hotspots, churn and peak for each phase
//! 4. Prints the budget check
//! 5. Optionally writes everything as JSON

use super::models::ReportArgs;
use crate::output::write_report;
use crate::parser::load_profiles;
use crate::report::{build_report, render_report, BudgetVerdict};
use crate::utils::config::AnalyzerConfig;
use crate::utils::size::parse_size;
use anyhow::{Context, Result};
use log::info;
use std::io::Write;
use std::time::Instant;

/// Execute the report command
///
/// Like `budget`, returns the verdict so an over-budget subject maps to a
/// nonzero exit status without being treated as a tool failure.
pub fn execute_report(
    args: &ReportArgs,
    config: &AnalyzerConfig,
    out: &mut impl Write,
) -> Result<BudgetVerdict> {
    let start_time = Instant::now();
    let target = parse_size(&args.target)
        .with_context(|| format!("Invalid budget target '{}'", args.target))?;

    let profiles = load_profiles(&args.dir, args.phase.as_deref())
        .with_context(|| format!("Failed to load profiles from {}", args.dir.display()))?;

    let report = build_report(
        &profiles,
        &args.dir,
        args.phase.as_deref(),
        target,
        args.top_n,
        config,
    );
    write!(out, "{}", render_report(&report, &config.display))?;

    if let Some(path) = &args.json {
        write_report(&report, path).context("Failed to write report JSON")?;
    }

    info!(
        "Report over {} profiles completed in {:.2}s",
        profiles.len(),
        start_time.elapsed().as_secs_f64()
    );

    Ok(report.budget.verdict)
}
