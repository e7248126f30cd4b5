//! Top-level analysis pipeline.
//!
//! Orchestrates CSV loading, running-mean classification and monthly
//! aggregation, returning an [`AnalysisResult`] ready for the output
//! writers and the console report.

use std::path::Path;
use std::time::Instant;

use tracing::info;

use comfort_core::classifier::classify_hours;
use comfort_core::error::Result;
use comfort_core::models::{AtgConfig, ClassifiedRecord, MonthlySummaryRow, SummaryTotals};

use crate::aggregator::ComfortAggregator;
use crate::reader::{load_hourly_records, ColumnMap};

// ── Public types ──────────────────────────────────────────────────────────────

/// Metadata produced alongside the analysis result.
#[derive(Debug, Clone)]
pub struct AnalysisMetadata {
    /// ISO-8601 timestamp when this result was generated.
    pub generated_at: String,
    /// Number of hourly rows that entered the pipeline after cleaning.
    pub rows_loaded: usize,
    /// Number of months in the summary table.
    pub months_summarized: usize,
    /// Wall-clock seconds spent loading the CSV.
    pub load_time_seconds: f64,
    /// Wall-clock seconds spent on classification and aggregation.
    pub classify_time_seconds: f64,
}

/// The complete output of [`analyze_comfort`].
#[derive(Debug, Clone)]
pub struct AnalysisResult {
    /// Per-hour classification table, aligned with the cleaned input.
    pub hourly: Vec<ClassifiedRecord>,
    /// Monthly KPI table, chronological.
    pub monthly: Vec<MonthlySummaryRow>,
    /// Whole-series summary scalars for the console report.
    pub totals: SummaryTotals,
    /// Metadata about this analysis run.
    pub metadata: AnalysisMetadata,
}

// ── Public function ───────────────────────────────────────────────────────────

/// Run the full comfort analysis pipeline.
///
/// 1. Load and normalize hourly records from `csv_path`.
/// 2. Compute the outdoor running mean and classify every hour.
/// 3. Reduce the classified table into monthly KPIs and overall totals.
///
/// An empty (but well-formed) input produces empty tables and a comfort
/// percentage of 0 rather than an error.
pub fn analyze_comfort(
    csv_path: &Path,
    columns: &ColumnMap,
    config: &AtgConfig,
) -> Result<AnalysisResult> {
    let load_start = Instant::now();
    let records = load_hourly_records(csv_path, columns)?;
    let load_time = load_start.elapsed().as_secs_f64();

    let classify_start = Instant::now();
    let hourly = classify_hours(&records, config);
    let monthly = ComfortAggregator::monthly_summary(&hourly);
    let totals = ComfortAggregator::overall_totals(&hourly);
    let classify_time = classify_start.elapsed().as_secs_f64();

    info!(
        "Classified {} hours into {} monthly rows ({} unclassified)",
        hourly.len(),
        monthly.len(),
        totals.unclassified_hours
    );

    let metadata = AnalysisMetadata {
        generated_at: chrono::Local::now().to_rfc3339(),
        rows_loaded: records.len(),
        months_summarized: monthly.len(),
        load_time_seconds: load_time,
        classify_time_seconds: classify_time,
    };

    Ok(AnalysisResult {
        hourly,
        monthly,
        totals,
        metadata,
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────
