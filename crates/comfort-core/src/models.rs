use chrono::{Datelike, NaiveDateTime};

/// One hour of normalized simulation input.
///
/// The ingestion layer guarantees that records are sorted ascending by
/// timestamp with duplicates removed, and that both temperatures are
/// present. Timestamps are naive: month boundaries and calendar days are
/// taken exactly as written, with no timezone conversion.
#[derive(Debug, Clone, PartialEq)]
pub struct HourlyRecord {
    /// Hour timestamp (naive local time).
    pub timestamp: NaiveDateTime,
    /// Operative (indoor) temperature in °C.
    pub t_op: f64,
    /// Outdoor temperature in °C.
    pub t_out: f64,
}

/// Comfort classification outcome for a single hour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComfortState {
    /// Operative temperature within the comfort band (bounds inclusive).
    Comfortable,
    /// Operative temperature strictly below the lower comfort limit.
    TooCold,
    /// Operative temperature strictly above the upper comfort limit.
    TooWarm,
}

impl ComfortState {
    /// Canonical lowercase label used in CSV output and reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            ComfortState::Comfortable => "comfortable",
            ComfortState::TooCold => "too_cold",
            ComfortState::TooWarm => "too_warm",
        }
    }
}

/// An [`HourlyRecord`] extended with the derived comfort band and state.
///
/// All derived fields are `None` for hours before the first defined
/// running-mean value. Such hours carry no classification and are
/// excluded from KPI counts (flagged as `unclassified_hours` in the
/// monthly summary).
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifiedRecord {
    /// Hour timestamp (naive local time).
    pub timestamp: NaiveDateTime,
    /// Operative (indoor) temperature in °C.
    pub t_op: f64,
    /// Outdoor temperature in °C.
    pub t_out: f64,
    /// Smoothed outdoor running-mean temperature in °C.
    pub trm: Option<f64>,
    /// Adaptive comfort target temperature in °C.
    pub t_comfort: Option<f64>,
    /// Lower comfort limit (`t_comfort - deadband`).
    pub limit_low: Option<f64>,
    /// Upper comfort limit (`t_comfort + deadband`).
    pub limit_high: Option<f64>,
    /// Classification outcome; `None` when `trm` is undefined.
    pub state: Option<ComfortState>,
}

impl ClassifiedRecord {
    /// Whether this hour carries a classification.
    pub fn is_classified(&self) -> bool {
        self.state.is_some()
    }

    /// 1 when the hour is classified comfortable, else 0.
    ///
    /// For classified hours `comfort_hour() + discomfort_hour() == 1`;
    /// unclassified hours contribute 0 to both.
    pub fn comfort_hour(&self) -> u32 {
        matches!(self.state, Some(ComfortState::Comfortable)) as u32
    }

    /// 1 when the hour is classified too cold or too warm, else 0.
    pub fn discomfort_hour(&self) -> u32 {
        matches!(
            self.state,
            Some(ComfortState::TooCold) | Some(ComfortState::TooWarm)
        ) as u32
    }

    /// Calendar month this hour belongs to.
    pub fn month_key(&self) -> MonthKey {
        MonthKey::from_datetime(self.timestamp)
    }
}

/// Explicit `(year, month)` grouping key.
///
/// Ordering is chronological, so a `BTreeMap<MonthKey, _>` iterates months
/// in calendar order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthKey {
    pub year: i32,
    /// 1-based calendar month.
    pub month: u32,
}

impl MonthKey {
    /// Extract the month key from a naive timestamp.
    pub fn from_datetime(ts: NaiveDateTime) -> Self {
        Self {
            year: ts.year(),
            month: ts.month(),
        }
    }

    /// Month label in `"%Y-%m"` form, e.g. `"2024-07"`.
    pub fn label(&self) -> String {
        format!("{:04}-{:02}", self.year, self.month)
    }
}

/// One row of the monthly KPI table.
///
/// `total_hours` counts classified hours only, so
/// `comfort_hours + discomfort_hours == total_hours` and
/// `too_warm_hours + too_cold_hours == discomfort_hours` hold exactly.
/// Hours without a running mean are reported in `unclassified_hours`.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlySummaryRow {
    /// Calendar month covered by this row.
    pub month: MonthKey,
    /// Number of classified hours in the month.
    pub total_hours: u32,
    /// Hours classified comfortable.
    pub comfort_hours: u32,
    /// Hours classified too cold or too warm.
    pub discomfort_hours: u32,
    /// Hours classified too warm.
    pub too_warm_hours: u32,
    /// Hours classified too cold.
    pub too_cold_hours: u32,
    /// Hours present in the month that carry no classification.
    pub unclassified_hours: u32,
    /// Mean operative temperature over all hours present in the month.
    pub mean_t_op: f64,
    /// `100 * comfort_hours / total_hours`, 0 when `total_hours` is 0.
    pub comfort_pct: f64,
}

/// Summary scalars for the console report.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SummaryTotals {
    /// Classified hours across the whole series.
    pub total_hours: u32,
    /// Hours classified comfortable across the whole series.
    pub comfort_hours: u32,
    /// Hours without a classification across the whole series.
    pub unclassified_hours: u32,
    /// `100 * comfort_hours / total_hours`, 0 when `total_hours` is 0.
    pub comfort_pct: f64,
}

/// Constants for the adaptive comfort model.
///
/// The comfort target is the linear model
/// `t_comfort = comfort_slope * trm + comfort_intercept`, and the comfort
/// band is `t_comfort ± deadband`. `alpha` is the one-day decay factor of
/// the outdoor running mean: higher `alpha` means outdoor history persists
/// longer.
///
/// Values are taken as supplied. `alpha` outside `(0, 1)` or a negative
/// `deadband` produce well-defined arithmetic but domain-nonsensical
/// results; keeping them in range is the caller's responsibility.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AtgConfig {
    /// Running-mean decay factor.
    pub alpha: f64,
    /// Slope of the adaptive comfort line.
    pub comfort_slope: f64,
    /// Intercept of the adaptive comfort line in °C.
    pub comfort_intercept: f64,
    /// Half-width of the comfort band in °C.
    pub deadband: f64,
}

impl Default for AtgConfig {
    fn default() -> Self {
        Self {
            alpha: 0.8,
            comfort_slope: 0.33,
            comfort_intercept: 18.8,
            deadband: 3.0,
        }
    }
}
