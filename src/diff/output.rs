//! Terminal output rendering for snapshot comparisons.

use super::schema::{CompareReport, Delta};
use crate::utils::config::DisplayRules;
use crate::utils::format::{fmt_bytes, fmt_count, fmt_signed_bytes, fmt_signed_count, shorten_fn};

const FUNCTION_WIDTH: usize = 53;

/// Render a human-readable comparison, showing the top `n` changed owners
pub fn render_compare(report: &CompareReport, n: usize, display: &DisplayRules) -> String {
    let mut out = String::new();

    out.push_str("\nComparing:\n");
    out.push_str(&format!("  A: {}\n", report.baseline.file));
    out.push_str(&format!("  B: {}\n", report.target.file));
    out.push_str(&format!("{}\n", "─".repeat(60)));
    out.push_str(&format!(
        "  {:<25} {:>14} {:>14} {:>14}\n",
        "Metric", "A", "B", "Delta"
    ));
    out.push_str(&format!("  {}\n", "─".repeat(50)));

    out.push_str(&bytes_row("Total allocated", &report.totals.total_bytes));
    out.push_str(&bytes_row("Peak heap", &report.totals.peak_bytes));
    out.push_str(&bytes_row("Leaked at end", &report.totals.end_bytes));
    let blocks = &report.totals.total_blocks;
    out.push_str(&format!(
        "  {:<25} {:>14} {:>14} {:>14}\n",
        "Total blocks",
        fmt_count(blocks.baseline),
        fmt_count(blocks.target),
        fmt_signed_count(blocks.change)
    ));

    out.push_str(&format!("\n  Top {} changed functions:\n", n));
    out.push_str(&format!(
        "  {:<55} {:>10} {:>10} {:>12}\n",
        "Function", "A", "B", "Delta"
    ));
    out.push_str(&format!("  {}\n", "─".repeat(89)));

    let width = display.max_width.min(FUNCTION_WIDTH);
    for f in report.functions.iter().take(n) {
        out.push_str(&format!(
            "  {:<55} {:>10} {:>10} {:>12}\n",
            shorten_fn(&f.function, display, width),
            fmt_bytes(f.baseline_bytes),
            fmt_bytes(f.target_bytes),
            fmt_signed_bytes(f.change)
        ));
    }

    if let Some(warning) = &report.warning {
        out.push_str(&format!("\n  Note: {}\n", warning));
    }

    out
}

fn bytes_row(label: &str, delta: &Delta) -> String {
    format!(
        "  {:<25} {:>14} {:>14} {:>14}\n",
        label,
        fmt_bytes(delta.baseline),
        fmt_bytes(delta.target),
        fmt_signed_bytes(delta.change)
    )
}
