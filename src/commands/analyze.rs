//! Directory views: summary, hotspots, churn and peak.
//!
//! Each command loads the profile directory, computes its view and writes
//! the rendered table to `out`.

use super::models::ViewArgs;
use crate::aggregator::aggregate_sites;
use crate::parser::{load_profiles, Profile};
use crate::report::{
    churn, hotspots, peak_breakdown, render_churn, render_hotspots, render_peak, render_summary,
    summary_rows, total_peak, NO_PROFILES,
};
use crate::utils::config::AnalyzerConfig;
use anyhow::{Context, Result};
use std::io::Write;

/// Per-subject totals table, grouped by phase
pub fn execute_summary(args: &ViewArgs, out: &mut impl Write) -> Result<()> {
    let Some(profiles) = load(args, out)? else {
        return Ok(());
    };
    write!(out, "{}", render_summary(&summary_rows(&profiles)))?;
    Ok(())
}

/// Top owners by total bytes allocated
pub fn execute_hotspots(
    args: &ViewArgs,
    config: &AnalyzerConfig,
    out: &mut impl Write,
) -> Result<()> {
    let Some(profiles) = load(args, out)? else {
        return Ok(());
    };

    let sites = aggregate_sites(&profiles, &config.owner);
    let rows = hotspots(&sites, args.top_n);
    write!(
        out,
        "{}",
        render_hotspots(
            first_phase(&profiles),
            profiles.len(),
            &rows,
            args.top_n,
            &config.display
        )
    )?;
    Ok(())
}

/// Owners allocating a lot but never holding much at once
pub fn execute_churn(args: &ViewArgs, config: &AnalyzerConfig, out: &mut impl Write) -> Result<()> {
    let Some(profiles) = load(args, out)? else {
        return Ok(());
    };

    let sites = aggregate_sites(&profiles, &config.owner);
    let rows = churn(&sites, args.top_n);
    write!(
        out,
        "{}",
        render_churn(first_phase(&profiles), &rows, &config.display)
    )?;
    Ok(())
}

/// Owners ranked by their share of the summed peak heap
pub fn execute_peak(args: &ViewArgs, config: &AnalyzerConfig, out: &mut impl Write) -> Result<()> {
    let Some(profiles) = load(args, out)? else {
        return Ok(());
    };

    let sites = aggregate_sites(&profiles, &config.owner);
    let peak = total_peak(&profiles);
    let rows = peak_breakdown(&sites, peak, args.top_n);
    write!(
        out,
        "{}",
        render_peak(first_phase(&profiles), peak, &rows, &config.display)
    )?;
    Ok(())
}

/// Load the directory, printing the empty notice when nothing matched
///
/// **Private** - shared by the view commands
fn load(args: &ViewArgs, out: &mut impl Write) -> Result<Option<Vec<Profile>>> {
    let profiles = load_profiles(&args.dir, args.phase.as_deref())
        .with_context(|| format!("Failed to load profiles from {}", args.dir.display()))?;

    if profiles.is_empty() {
        writeln!(out, "{}", NO_PROFILES)?;
        return Ok(None);
    }
    Ok(Some(profiles))
}

/// Headers name the phase of the first loaded profile
fn first_phase(profiles: &[Profile]) -> &str {
    profiles.first().map(|p| p.phase.as_str()).unwrap_or_default()
}
