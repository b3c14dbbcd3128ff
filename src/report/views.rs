//! Ranked views over aggregated site statistics.
//!
//! Pure functions: no I/O, no printing. Ties are broken by owner name so
//! repeated runs print identical tables.

use super::schema::{
    BudgetReport, BudgetRow, BudgetStatus, BudgetVerdict, OwnerRow, PeakRow, PhaseSection,
    SummaryRow,
};
use crate::aggregator::{aggregate_sites, SiteMap, SiteStats};
use crate::parser::schema::Profile;
use crate::utils::config::{OwnerRules, CHURN_MAX_PEAK_BYTES, CHURN_MIN_TOTAL_BYTES};
use std::collections::BTreeSet;

/// Distinct phases in sorted order
pub fn phases(profiles: &[Profile]) -> Vec<String> {
    profiles
        .iter()
        .map(|p| p.phase.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Profiles belonging to one phase, in load order
pub fn profiles_in_phase<'a>(profiles: &'a [Profile], phase: &str) -> Vec<&'a Profile> {
    profiles.iter().filter(|p| p.phase == phase).collect()
}

/// Per-subject totals grouped by phase
pub fn summary_rows(profiles: &[Profile]) -> Vec<SummaryRow> {
    phases(profiles)
        .into_iter()
        .flat_map(|phase| {
            profiles
                .iter()
                .filter(move |p| p.phase == phase)
                .map(|p| SummaryRow {
                    phase: p.phase.clone(),
                    name: p.name.clone(),
                    total_bytes: p.total_bytes,
                    peak_bytes: p.peak_bytes,
                    total_blocks: p.total_blocks,
                    end_bytes: p.end_bytes,
                })
        })
        .collect()
}

/// Owners ranked by a key, descending, name ascending on ties
fn ranked_by<F>(sites: &SiteMap, key: F) -> Vec<OwnerRow>
where
    F: Fn(&SiteStats) -> u64,
{
    let mut rows: Vec<OwnerRow> = sites
        .iter()
        .map(|(function, stats)| OwnerRow {
            function: function.clone(),
            stats: *stats,
        })
        .collect();
    rows.sort_by(|a, b| {
        key(&b.stats)
            .cmp(&key(&a.stats))
            .then_with(|| a.function.cmp(&b.function))
    });
    rows
}

/// Top `n` owners by total bytes allocated
pub fn hotspots(sites: &SiteMap, n: usize) -> Vec<OwnerRow> {
    let mut rows = ranked_by(sites, |s| s.total_bytes);
    rows.truncate(n);
    rows
}

/// High volume, negligible concurrent footprint
pub fn is_churn(stats: &SiteStats) -> bool {
    stats.total_bytes > CHURN_MIN_TOTAL_BYTES && stats.peak_max < CHURN_MAX_PEAK_BYTES
}

/// Top `n` short-lived allocation owners by total bytes
pub fn churn(sites: &SiteMap, n: usize) -> Vec<OwnerRow> {
    ranked_by(sites, |s| s.total_bytes)
        .into_iter()
        .filter(|row| is_churn(&row.stats))
        .take(n)
        .collect()
}

/// Top `n` owners by share of the summed peak heap
///
/// Owners with nothing alive at the peak are left out.
pub fn peak_breakdown(sites: &SiteMap, total_peak: u64, n: usize) -> Vec<PeakRow> {
    ranked_by(sites, |s| s.peak_bytes)
        .into_iter()
        .filter(|row| row.stats.peak_bytes > 0)
        .take(n)
        .map(|row| PeakRow {
            percent: percentage(row.stats.peak_bytes, total_peak),
            peak_bytes: row.stats.peak_bytes,
            function: row.function,
        })
        .collect()
}

/// Sum of `peak_bytes` across profiles, saturating
pub fn total_peak<'a>(profiles: impl IntoIterator<Item = &'a Profile>) -> u64 {
    profiles
        .into_iter()
        .fold(0u64, |acc, p| acc.saturating_add(p.peak_bytes))
}

/// Compare each profile's peak against a target; equal counts as a pass
pub fn check_budget(profiles: &[Profile], target: u64) -> BudgetReport {
    let rows: Vec<BudgetRow> = phases(profiles)
        .into_iter()
        .flat_map(|phase| {
            profiles
                .iter()
                .filter(move |p| p.phase == phase)
                .map(move |p| BudgetRow {
                    phase: p.phase.clone(),
                    name: p.name.clone(),
                    peak_bytes: p.peak_bytes,
                    percent_of_target: percentage(p.peak_bytes, target),
                    status: if p.peak_bytes <= target {
                        BudgetStatus::Pass
                    } else {
                        BudgetStatus::Over
                    },
                })
        })
        .collect();

    let verdict = if rows.iter().any(|r| r.status == BudgetStatus::Over) {
        BudgetVerdict::OverBudget
    } else {
        BudgetVerdict::WithinBudget
    };

    BudgetReport {
        target_bytes: target,
        rows,
        verdict,
    }
}

/// Hotspots, churn and peak for the profiles of one phase
pub fn phase_section(
    phase: &str,
    profiles: &[&Profile],
    rules: &OwnerRules,
    n: usize,
) -> PhaseSection {
    let sites = aggregate_sites(profiles.iter().copied(), rules);
    let total_peak_bytes = total_peak(profiles.iter().copied());

    PhaseSection {
        phase: phase.to_string(),
        subjects: profiles.len(),
        total_peak_bytes,
        hotspots: hotspots(&sites, n),
        churn: churn(&sites, n),
        peak: peak_breakdown(&sites, total_peak_bytes, n),
    }
}

/// Safe percentage (0 when the denominator is 0)
pub fn percentage(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        0.0
    } else {
        (part as f64 / whole as f64) * 100.0
    }
}
