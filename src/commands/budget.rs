//! Budget command implementation.
//! Checks every subject's peak heap against a target size.

use super::models::BudgetArgs;
use crate::parser::load_profiles;
use crate::report::{check_budget, render_budget, BudgetVerdict, NO_PROFILES};
use crate::utils::size::parse_size;
use anyhow::{Context, Result};
use log::debug;
use std::io::Write;

/// Execute the budget command
///
/// Returns the verdict rather than an error when a subject is over
/// target, so the caller can tell a budget failure from a tool failure.
/// An empty profile set is within budget.
pub fn execute_budget(args: &BudgetArgs, out: &mut impl Write) -> Result<BudgetVerdict> {
    let target = parse_size(&args.target)
        .with_context(|| format!("Invalid budget target '{}'", args.target))?;
    debug!("Budget target: {} bytes", target);

    let profiles = load_profiles(&args.dir, args.phase.as_deref())
        .with_context(|| format!("Failed to load profiles from {}", args.dir.display()))?;

    if profiles.is_empty() {
        writeln!(out, "{}", NO_PROFILES)?;
        return Ok(BudgetVerdict::WithinBudget);
    }

    let report = check_budget(&profiles, target);
    write!(out, "{}", render_budget(&report))?;

    Ok(report.verdict)
}
