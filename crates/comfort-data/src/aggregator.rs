//! Monthly KPI aggregation over classified hours.

use std::collections::BTreeMap;

use comfort_core::formatting::percentage;
use comfort_core::models::{
    ClassifiedRecord, ComfortState, MonthKey, MonthlySummaryRow, SummaryTotals,
};

// ── MonthAccumulator ──────────────────────────────────────────────────────────

/// Running counts for one calendar month.
#[derive(Debug, Clone, Default)]
struct MonthAccumulator {
    comfort_hours: u32,
    too_warm_hours: u32,
    too_cold_hours: u32,
    unclassified_hours: u32,
    t_op_sum: f64,
    hours_present: u32,
}

impl MonthAccumulator {
    /// Add a single hour's classification to the running counts.
    fn add(&mut self, rec: &ClassifiedRecord) {
        self.hours_present += 1;
        self.t_op_sum += rec.t_op;
        match rec.state {
            Some(ComfortState::Comfortable) => self.comfort_hours += 1,
            Some(ComfortState::TooWarm) => self.too_warm_hours += 1,
            Some(ComfortState::TooCold) => self.too_cold_hours += 1,
            None => self.unclassified_hours += 1,
        }
    }

    /// Finish the month. `hours_present` is always > 0 here because an
    /// accumulator only exists once at least one hour was added.
    fn into_row(self, month: MonthKey) -> MonthlySummaryRow {
        let discomfort_hours = self.too_warm_hours + self.too_cold_hours;
        let total_hours = self.comfort_hours + discomfort_hours;
        MonthlySummaryRow {
            month,
            total_hours,
            comfort_hours: self.comfort_hours,
            discomfort_hours,
            too_warm_hours: self.too_warm_hours,
            too_cold_hours: self.too_cold_hours,
            unclassified_hours: self.unclassified_hours,
            mean_t_op: self.t_op_sum / f64::from(self.hours_present),
            comfort_pct: percentage(f64::from(self.comfort_hours), f64::from(total_hours)),
        }
    }
}

// ── ComfortAggregator ─────────────────────────────────────────────────────────

/// Stateless helper that reduces classified hours into KPI tables.
pub struct ComfortAggregator;

impl ComfortAggregator {
    /// One [`MonthlySummaryRow`] per calendar month present in the input,
    /// in chronological order. Months with no input hours are omitted.
    ///
    /// `total_hours` counts classified hours only; hours without a running
    /// mean are flagged in `unclassified_hours` and excluded from the
    /// comfort counts. `mean_t_op` averages all hours present.
    pub fn monthly_summary(hourly: &[ClassifiedRecord]) -> Vec<MonthlySummaryRow> {
        // BTreeMap keyed by (year, month) keeps months chronological.
        let mut map: BTreeMap<MonthKey, MonthAccumulator> = BTreeMap::new();
        for rec in hourly {
            map.entry(rec.month_key()).or_default().add(rec);
        }

        map.into_iter()
            .map(|(month, acc)| acc.into_row(month))
            .collect()
    }

    /// Whole-series summary scalars for the console report.
    pub fn overall_totals(hourly: &[ClassifiedRecord]) -> SummaryTotals {
        let comfort_hours: u32 = hourly.iter().map(ClassifiedRecord::comfort_hour).sum();
        let discomfort_hours: u32 = hourly.iter().map(ClassifiedRecord::discomfort_hour).sum();
        let total_hours = comfort_hours + discomfort_hours;
        let unclassified_hours = hourly.len() as u32 - total_hours;

        SummaryTotals {
            total_hours,
            comfort_hours,
            unclassified_hours,
            comfort_pct: percentage(f64::from(comfort_hours), f64::from(total_hours)),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};

    fn ts(y: i32, mo: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    fn hour(y: i32, mo: u32, d: u32, h: u32, t_op: f64, state: Option<ComfortState>) -> ClassifiedRecord {
        ClassifiedRecord {
            timestamp: ts(y, mo, d, h),
            t_op,
            t_out: 10.0,
            trm: state.map(|_| 10.0),
            t_comfort: state.map(|_| 22.1),
            limit_low: state.map(|_| 19.1),
            limit_high: state.map(|_| 25.1),
            state,
        }
    }

    // ── monthly_summary ───────────────────────────────────────────────────────

    #[test]
    fn test_groups_by_calendar_month() {
        let hourly = vec![
            hour(2024, 1, 15, 8, 21.0, Some(ComfortState::Comfortable)),
            hour(2024, 1, 15, 20, 21.0, Some(ComfortState::Comfortable)),
            hour(2024, 2, 1, 10, 21.0, Some(ComfortState::Comfortable)),
        ];
        let rows = ComfortAggregator::monthly_summary(&hourly);

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].month.label(), "2024-01");
        assert_eq!(rows[0].total_hours, 2);
        assert_eq!(rows[1].month.label(), "2024-02");
        assert_eq!(rows[1].total_hours, 1);
    }

    #[test]
    fn test_months_are_chronological_across_years() {
        let hourly = vec![
            hour(2024, 1, 1, 0, 21.0, Some(ComfortState::Comfortable)),
            hour(2023, 12, 31, 23, 21.0, Some(ComfortState::Comfortable)),
        ];
        let rows = ComfortAggregator::monthly_summary(&hourly);

        let labels: Vec<String> = rows.iter().map(|r| r.month.label()).collect();
        assert_eq!(labels, vec!["2023-12", "2024-01"]);
    }

    #[test]
    fn test_aggregation_invariants() {
        let hourly = vec![
            hour(2024, 7, 1, 0, 21.0, Some(ComfortState::Comfortable)),
            hour(2024, 7, 1, 1, 28.0, Some(ComfortState::TooWarm)),
            hour(2024, 7, 1, 2, 29.0, Some(ComfortState::TooWarm)),
            hour(2024, 7, 1, 3, 15.0, Some(ComfortState::TooCold)),
            hour(2024, 7, 1, 4, 20.0, None),
        ];
        let rows = ComfortAggregator::monthly_summary(&hourly);

        assert_eq!(rows.len(), 1);
        let row = &rows[0];
        assert_eq!(row.comfort_hours + row.discomfort_hours, row.total_hours);
        assert_eq!(row.too_warm_hours + row.too_cold_hours, row.discomfort_hours);
        assert_eq!(row.total_hours, 4);
        assert_eq!(row.too_warm_hours, 2);
        assert_eq!(row.too_cold_hours, 1);
        assert_eq!(row.unclassified_hours, 1);
    }

    #[test]
    fn test_single_too_cold_hour_counts_once() {
        let hourly = vec![hour(2024, 3, 10, 6, 15.0, Some(ComfortState::TooCold))];
        let rows = ComfortAggregator::monthly_summary(&hourly);

        assert_eq!(rows[0].too_cold_hours, 1);
        assert_eq!(rows[0].too_warm_hours, 0);
        assert_eq!(rows[0].comfort_hours, 0);
        assert_eq!(rows[0].discomfort_hours, 1);
    }

    #[test]
    fn test_mean_t_op_covers_all_hours_present() {
        // The unclassified hour still contributes to the temperature mean.
        let hourly = vec![
            hour(2024, 7, 1, 0, 20.0, Some(ComfortState::Comfortable)),
            hour(2024, 7, 1, 1, 24.0, None),
        ];
        let rows = ComfortAggregator::monthly_summary(&hourly);
        assert!((rows[0].mean_t_op - 22.0).abs() < 1e-9);
    }

    #[test]
    fn test_comfort_pct() {
        let hourly = vec![
            hour(2024, 7, 1, 0, 21.0, Some(ComfortState::Comfortable)),
            hour(2024, 7, 1, 1, 21.0, Some(ComfortState::Comfortable)),
            hour(2024, 7, 1, 2, 21.0, Some(ComfortState::Comfortable)),
            hour(2024, 7, 1, 3, 28.0, Some(ComfortState::TooWarm)),
        ];
        let rows = ComfortAggregator::monthly_summary(&hourly);
        assert!((rows[0].comfort_pct - 75.0).abs() < 1e-9);
    }

    #[test]
    fn test_fully_unclassified_month_has_zero_total_and_pct() {
        // A month consisting only of running-mean-undefined hours still
        // yields a row; the percentage guard keeps it at 0.
        let hourly = vec![
            hour(2024, 7, 1, 0, 21.0, None),
            hour(2024, 7, 1, 1, 22.0, None),
        ];
        let rows = ComfortAggregator::monthly_summary(&hourly);

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].total_hours, 0);
        assert_eq!(rows[0].unclassified_hours, 2);
        assert_eq!(rows[0].comfort_pct, 0.0);
    }

    #[test]
    fn test_empty_input_yields_no_rows() {
        assert!(ComfortAggregator::monthly_summary(&[]).is_empty());
    }

    // ── overall_totals ────────────────────────────────────────────────────────

    #[test]
    fn test_overall_totals() {
        let hourly = vec![
            hour(2024, 7, 1, 0, 21.0, Some(ComfortState::Comfortable)),
            hour(2024, 7, 1, 1, 28.0, Some(ComfortState::TooWarm)),
            hour(2024, 7, 1, 2, 20.0, None),
        ];
        let totals = ComfortAggregator::overall_totals(&hourly);

        assert_eq!(totals.total_hours, 2);
        assert_eq!(totals.comfort_hours, 1);
        assert_eq!(totals.unclassified_hours, 1);
        assert!((totals.comfort_pct - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_overall_totals_empty_reports_zero_pct() {
        let totals = ComfortAggregator::overall_totals(&[]);
        assert_eq!(totals.total_hours, 0);
        assert_eq!(totals.comfort_hours, 0);
        assert_eq!(totals.comfort_pct, 0.0);
    }
}
