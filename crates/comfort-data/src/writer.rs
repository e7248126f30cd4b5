//! CSV writers for the hourly and monthly result tables.
//!
//! Output schemas match the two result artifacts of the analysis run:
//! `comfort_hourly_results.csv` and `comfort_monthly_summary.csv`.
//! Undefined optional values serialize as empty fields.

use std::path::Path;

use comfort_core::error::Result;
use comfort_core::models::{ClassifiedRecord, MonthlySummaryRow};

/// Timestamp formatting used in the hourly output file.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Write the per-hour classification table to `path`.
pub fn write_hourly_results(path: &Path, hourly: &[ClassifiedRecord]) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;
    wtr.write_record([
        "timestamp",
        "t_op",
        "t_out",
        "trm",
        "t_comfort",
        "limit_low",
        "limit_high",
        "state",
        "comfort_hour",
        "discomfort_hour",
    ])?;

    for rec in hourly {
        wtr.write_record([
            rec.timestamp.format(TIMESTAMP_FORMAT).to_string(),
            rec.t_op.to_string(),
            rec.t_out.to_string(),
            opt_field(rec.trm),
            opt_field(rec.t_comfort),
            opt_field(rec.limit_low),
            opt_field(rec.limit_high),
            rec.state.map(|s| s.as_str()).unwrap_or("").to_string(),
            rec.comfort_hour().to_string(),
            rec.discomfort_hour().to_string(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Write the monthly KPI table to `path`.
pub fn write_monthly_summary(path: &Path, monthly: &[MonthlySummaryRow]) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;
    wtr.write_record([
        "month",
        "total_hours",
        "comfort_hours",
        "discomfort_hours",
        "too_warm_hours",
        "too_cold_hours",
        "unclassified_hours",
        "mean_t_op",
        "comfort_pct",
    ])?;

    for row in monthly {
        wtr.write_record([
            row.month.label(),
            row.total_hours.to_string(),
            row.comfort_hours.to_string(),
            row.discomfort_hours.to_string(),
            row.too_warm_hours.to_string(),
            row.too_cold_hours.to_string(),
            row.unclassified_hours.to_string(),
            row.mean_t_op.to_string(),
            row.comfort_pct.to_string(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// An optional float as a CSV field; absent values become empty fields.
fn opt_field(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use comfort_core::models::{ComfortState, MonthKey};
    use tempfile::TempDir;

    fn sample_hour(state: Option<ComfortState>) -> ClassifiedRecord {
        ClassifiedRecord {
            timestamp: NaiveDate::from_ymd_opt(2024, 6, 2)
                .unwrap()
                .and_hms_opt(12, 0, 0)
                .unwrap(),
            t_op: 21.5,
            t_out: 10.0,
            trm: state.map(|_| 10.0),
            t_comfort: state.map(|_| 22.1),
            limit_low: state.map(|_| 19.1),
            limit_high: state.map(|_| 25.1),
            state,
        }
    }

    fn read_rows(path: &Path) -> (csv::StringRecord, Vec<csv::StringRecord>) {
        let mut rdr = csv::Reader::from_path(path).unwrap();
        let headers = rdr.headers().unwrap().clone();
        let rows = rdr.records().map(|r| r.unwrap()).collect();
        (headers, rows)
    }

    // ── write_hourly_results ──────────────────────────────────────────────────

    #[test]
    fn test_hourly_roundtrip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("hourly.csv");
        let hourly = vec![sample_hour(Some(ComfortState::Comfortable))];

        write_hourly_results(&path, &hourly).unwrap();
        let (headers, rows) = read_rows(&path);

        assert_eq!(headers.get(0), Some("timestamp"));
        assert_eq!(headers.get(7), Some("state"));
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get(0), Some("2024-06-02 12:00:00"));
        assert_eq!(rows[0].get(7), Some("comfortable"));
        assert_eq!(rows[0].get(8), Some("1"));
        assert_eq!(rows[0].get(9), Some("0"));
    }

    #[test]
    fn test_hourly_unclassified_fields_are_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("hourly.csv");
        let hourly = vec![sample_hour(None)];

        write_hourly_results(&path, &hourly).unwrap();
        let (_, rows) = read_rows(&path);

        // trm, t_comfort, limits and state are all empty; both indicator
        // columns are 0.
        for i in 3..=7 {
            assert_eq!(rows[0].get(i), Some(""));
        }
        assert_eq!(rows[0].get(8), Some("0"));
        assert_eq!(rows[0].get(9), Some("0"));
    }

    #[test]
    fn test_hourly_empty_table_writes_header_only() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("hourly.csv");

        write_hourly_results(&path, &[]).unwrap();
        let (headers, rows) = read_rows(&path);

        assert_eq!(headers.len(), 10);
        assert!(rows.is_empty());
    }

    // ── write_monthly_summary ─────────────────────────────────────────────────

    #[test]
    fn test_monthly_roundtrip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("monthly.csv");
        let monthly = vec![MonthlySummaryRow {
            month: MonthKey { year: 2024, month: 6 },
            total_hours: 24,
            comfort_hours: 18,
            discomfort_hours: 6,
            too_warm_hours: 4,
            too_cold_hours: 2,
            unclassified_hours: 24,
            mean_t_op: 21.25,
            comfort_pct: 75.0,
        }];

        write_monthly_summary(&path, &monthly).unwrap();
        let (headers, rows) = read_rows(&path);

        assert_eq!(headers.get(0), Some("month"));
        assert_eq!(rows[0].get(0), Some("2024-06"));
        assert_eq!(rows[0].get(1), Some("24"));
        assert_eq!(rows[0].get(6), Some("24"));
        assert_eq!(rows[0].get(7), Some("21.25"));
        assert_eq!(rows[0].get(8), Some("75"));
    }

    #[test]
    fn test_monthly_empty_table_writes_header_only() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("monthly.csv");

        write_monthly_summary(&path, &[]).unwrap();
        let (headers, rows) = read_rows(&path);

        assert_eq!(headers.len(), 9);
        assert!(rows.is_empty());
    }
}
