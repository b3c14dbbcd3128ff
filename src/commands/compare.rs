//! Compare command implementation.
//! Re-parses two snapshot files and reports what changed between them.

use super::models::CompareArgs;
use crate::diff::{compare_profiles, render_compare, CompareReport};
use crate::output::write_report;
use crate::parser::parse_profile;
use crate::utils::config::AnalyzerConfig;
use anyhow::{Context, Result};
use std::io::Write;

/// Execute the compare command
///
/// The two files are parsed directly: no directory scan, no phase filter,
/// and phase-level aggregate files are accepted.
pub fn execute_compare(
    args: &CompareArgs,
    config: &AnalyzerConfig,
    out: &mut impl Write,
) -> Result<CompareReport> {
    let baseline = parse_profile(&args.baseline).context("Failed to read baseline snapshot")?;
    let target = parse_profile(&args.target).context("Failed to read target snapshot")?;

    let report = compare_profiles(&baseline, &target, &config.owner);
    write!(out, "{}", render_compare(&report, args.top_n, &config.display))?;

    if let Some(path) = &args.json {
        write_report(&report, path).context("Failed to write comparison JSON")?;
    }

    Ok(report)
}
