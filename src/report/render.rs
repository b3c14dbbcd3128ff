//! Terminal rendering of the report views.

use super::schema::{
    AnalysisReport, BudgetReport, BudgetStatus, BudgetVerdict, OwnerRow, PeakRow, PhaseSection,
    SummaryRow,
};
use crate::utils::config::DisplayRules;
use crate::utils::format::{fmt_bytes, fmt_count, shorten_fn};
use colored::*;

/// Printed by every view when nothing matched
pub const NO_PROFILES: &str = "No profiles found.";

const FUNCTION_WIDTH: usize = 63;

/// Per-subject totals, one table per phase
pub fn render_summary(rows: &[SummaryRow]) -> String {
    let mut out = String::new();
    let mut current: Option<&str> = None;

    for row in rows {
        if current != Some(row.phase.as_str()) {
            current = Some(row.phase.as_str());
            out.push_str(&format!("\n{}\n", "=".repeat(80)));
            out.push_str(&format!("  Phase: {}\n", row.phase));
            out.push_str(&format!("{}\n", "=".repeat(80)));
            out.push_str(&format!(
                "  {:<40} {:>12} {:>12} {:>10} {:>10}\n",
                "Book", "Total Alloc", "Peak Heap", "Blocks", "Leaked"
            ));
            out.push_str(&format!("  {}\n", "-".repeat(76)));
        }

        let leaked = if row.end_bytes > 0 {
            fmt_bytes(row.end_bytes)
        } else {
            "0".to_string()
        };
        out.push_str(&format!(
            "  {:<40} {:>12} {:>12} {:>10} {:>10}\n",
            row.name,
            fmt_bytes(row.total_bytes),
            fmt_bytes(row.peak_bytes),
            fmt_count(row.total_blocks),
            leaked
        ));
    }

    out
}

/// Top allocation sites by total bytes
pub fn render_hotspots(
    phase: &str,
    subjects: usize,
    rows: &[OwnerRow],
    n: usize,
    display: &DisplayRules,
) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "\nTop {} allocation hotspots (phase={}, {} books)\n",
        n, phase, subjects
    ));
    out.push_str(&format!("{}\n", "─".repeat(110)));
    out.push_str(&format!(
        "  {:<65} {:>12} {:>10} {:>10}\n",
        "Function", "Total", "Peak", "Blocks"
    ));
    out.push_str(&format!("  {}\n", "─".repeat(99)));

    for row in rows {
        out.push_str(&format!(
            "  {:<65} {:>12} {:>10} {:>10}\n",
            short_name(&row.function, display),
            fmt_bytes(row.stats.total_bytes),
            fmt_bytes(row.stats.peak_bytes),
            fmt_count(row.stats.total_blocks)
        ));
    }
    out
}

/// High-churn owners: large totals, tiny concurrent footprint
pub fn render_churn(phase: &str, rows: &[OwnerRow], display: &DisplayRules) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "\nShort-lived allocations (phase={}): high churn, near-zero peak\n",
        phase
    ));
    out.push_str("These alloc+free rapidly. On embedded, each hit costs allocator overhead.\n");
    out.push_str(&format!("{}\n", "─".repeat(110)));
    out.push_str(&format!(
        "  {:<65} {:>12} {:>10} {:>10}\n",
        "Function", "Total", "Blocks", "MaxPeak"
    ));
    out.push_str(&format!("  {}\n", "─".repeat(99)));

    for row in rows {
        out.push_str(&format!(
            "  {:<65} {:>12} {:>10} {:>10}\n",
            short_name(&row.function, display),
            fmt_bytes(row.stats.total_bytes),
            fmt_count(row.stats.total_blocks),
            fmt_bytes(row.stats.peak_max)
        ));
    }
    out
}

/// What is alive at the moment of maximum heap usage
pub fn render_peak(
    phase: &str,
    total_peak: u64,
    rows: &[PeakRow],
    display: &DisplayRules,
) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "\nPeak heap breakdown (phase={}, total={})\n",
        phase,
        fmt_bytes(total_peak)
    ));
    out.push_str("What's alive at the moment of maximum heap usage.\n");
    out.push_str(&format!("{}\n", "─".repeat(100)));
    out.push_str(&format!(
        "  {:<65} {:>12} {:>10}\n",
        "Function", "At Peak", "% of Peak"
    ));
    out.push_str(&format!("  {}\n", "─".repeat(89)));

    for row in rows {
        out.push_str(&format!(
            "  {:<65} {:>12} {:>9.1}%\n",
            short_name(&row.function, display),
            fmt_bytes(row.peak_bytes),
            row.percent
        ));
    }
    out
}

/// Hotspots, churn and peak for one phase
pub fn render_phase_section(section: &PhaseSection, n: usize, display: &DisplayRules) -> String {
    let mut out = String::new();
    out.push_str(&render_hotspots(
        &section.phase,
        section.subjects,
        &section.hotspots,
        n,
        display,
    ));
    out.push('\n');
    out.push_str(&render_churn(&section.phase, &section.churn, display));
    out.push('\n');
    out.push_str(&render_peak(
        &section.phase,
        section.total_peak_bytes,
        &section.peak,
        display,
    ));
    out
}

/// Pass/fail table against the peak-heap target
pub fn render_budget(report: &BudgetReport) -> String {
    let mut out = String::new();
    let target = fmt_bytes(report.target_bytes);

    out.push_str(&format!("\nBudget check: target = {}\n", target));
    out.push_str(&format!("{}\n", "─".repeat(80)));

    let mut current: Option<&str> = None;
    for row in &report.rows {
        if current != Some(row.phase.as_str()) {
            current = Some(row.phase.as_str());
            out.push_str(&format!("\n  Phase: {}\n", row.phase));
        }

        let (marker, status) = match row.status {
            BudgetStatus::Pass => ("  ", row.status.label().green()),
            BudgetStatus::Over => (">>", row.status.label().red().bold()),
        };
        out.push_str(&format!(
            "  {} {:<40} {:>10} ({:5.1}%)  [{}]\n",
            marker,
            row.name,
            fmt_bytes(row.peak_bytes),
            row.percent_of_target,
            status
        ));
    }

    out.push('\n');
    let verdict = match report.verdict {
        BudgetVerdict::WithinBudget => {
            format!("OK: All profiles within {} budget.", target).green()
        }
        BudgetVerdict::OverBudget => {
            format!("FAIL: Some profiles exceed {} budget.", target)
                .red()
                .bold()
        }
    };
    out.push_str(&verdict.to_string());
    out.push('\n');
    out
}

/// Combined report: summary, per-phase views, budget
pub fn render_report(report: &AnalysisReport, display: &DisplayRules) -> String {
    if report.summary.is_empty() {
        return format!("{}\n", NO_PROFILES);
    }

    let mut out = render_summary(&report.summary);
    for section in &report.phases {
        out.push('\n');
        out.push_str(&render_phase_section(section, report.top_n, display));
    }
    out.push('\n');
    out.push_str(&render_budget(&report.budget));
    out
}

fn short_name(function: &str, display: &DisplayRules) -> String {
    shorten_fn(function, display, display.max_width.min(FUNCTION_WIDTH))
}
