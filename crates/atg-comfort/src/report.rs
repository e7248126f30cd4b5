//! Console report rendering for batch runs.
//!
//! Plain-text output: a fixed-width monthly KPI table followed by the
//! closing summary lines. Rendering is separated from printing so the
//! report can be unit-tested as a string.

use std::path::Path;

use comfort_core::formatting::{format_hours, format_temperature};
use comfort_core::models::MonthlySummaryRow;
use comfort_data::analysis::AnalysisResult;

/// Render the per-month KPI table as fixed-width text.
pub fn render_monthly_table(rows: &[MonthlySummaryRow]) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{:<9}{:>9}{:>10}{:>13}{:>10}{:>10}{:>14}{:>11}{:>10}\n",
        "Month",
        "Hours",
        "Comfort",
        "Discomfort",
        "Too warm",
        "Too cold",
        "Unclassified",
        "Mean Top",
        "Comfort%",
    ));

    for row in rows {
        out.push_str(&format!(
            "{:<9}{:>9}{:>10}{:>13}{:>10}{:>10}{:>14}{:>11}{:>9.1}%\n",
            row.month.label(),
            format_hours(row.total_hours),
            format_hours(row.comfort_hours),
            format_hours(row.discomfort_hours),
            format_hours(row.too_warm_hours),
            format_hours(row.too_cold_hours),
            format_hours(row.unclassified_hours),
            format_temperature(row.mean_t_op),
            row.comfort_pct,
        ));
    }

    out
}

/// Render the closing summary lines.
pub fn render_summary(result: &AnalysisResult, output_dir: &Path) -> String {
    let totals = &result.totals;
    let mut out = String::new();

    out.push_str("ATG comfort analysis complete\n");
    out.push_str(&format!(
        "Total hours: {}\n",
        format_hours(totals.total_hours)
    ));
    out.push_str(&format!(
        "Comfort hours: {}\n",
        format_hours(totals.comfort_hours)
    ));
    out.push_str(&format!(
        "Comfort percentage: {:.1}%\n",
        totals.comfort_pct
    ));
    if totals.unclassified_hours > 0 {
        out.push_str(&format!(
            "Unclassified hours (no running mean): {}\n",
            format_hours(totals.unclassified_hours)
        ));
    }
    out.push_str(&format!(
        "Outputs written to: {}\n",
        output_dir.display()
    ));

    out
}
