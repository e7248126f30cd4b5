//! Exponentially weighted outdoor running-mean estimation.
//!
//! Derives the daily running-mean outdoor temperature (Trm) that drives
//! the adaptive comfort model, and broadcasts it back onto the hourly
//! index of the input series.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use tracing::debug;

use crate::models::HourlyRecord;

/// Compute the hourly running-mean outdoor temperature series.
///
/// The result is aligned 1:1 with `records`:
///
/// 1. `t_out` is averaged per calendar day over the contiguous day range
///    of the input; days without observations stay absent, not zero.
/// 2. The daily series is shifted forward one day, so day D sees only
///    days strictly before D.
/// 3. An adjusted exponentially weighted mean with one-step decay `alpha`
///    is applied:
///    `Trm_D = (T_{D-1} + α·T_{D-2} + α²·T_{D-3} + …) / (1 + α + α² + …)`,
///    normalized by the weights actually present so the first known day
///    is not damped.
/// 4. Each day's value is forward-filled onto its hours.
///
/// Hours before the first defined daily value have no running mean and
/// yield `None`.
pub fn running_mean_outdoor(records: &[HourlyRecord], alpha: f64) -> Vec<Option<f64>> {
    if records.is_empty() {
        return Vec::new();
    }

    let (days, shifted) = shifted_daily_means(records);
    let trm_daily = adjusted_ewm(&shifted, alpha);

    // Forward-fill per day, then look each hour's date up.
    let mut filled: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    let mut last: Option<f64> = None;
    for (day, trm) in days.iter().zip(trm_daily) {
        if trm.is_some() {
            last = trm;
        }
        if let Some(value) = last {
            filled.insert(*day, value);
        }
    }

    debug!(
        "running mean defined for {} of {} calendar days",
        filled.len(),
        days.len()
    );

    records
        .iter()
        .map(|rec| filled.get(&rec.timestamp.date()).copied())
        .collect()
}

/// Daily mean outdoor temperature over the contiguous calendar-day range
/// of the input, shifted forward by one day.
///
/// Returns the day range and the shifted series (index 0 is the first
/// calendar day, whose shifted value is always absent).
fn shifted_daily_means(records: &[HourlyRecord]) -> (Vec<NaiveDate>, Vec<Option<f64>>) {
    let mut sums: BTreeMap<NaiveDate, (f64, u32)> = BTreeMap::new();
    for rec in records {
        let entry = sums.entry(rec.timestamp.date()).or_insert((0.0, 0));
        entry.0 += rec.t_out;
        entry.1 += 1;
    }

    let (Some(&first), Some(&last)) = (sums.keys().next(), sums.keys().next_back()) else {
        return (Vec::new(), Vec::new());
    };
    let days: Vec<NaiveDate> = first.iter_days().take_while(|day| *day <= last).collect();

    let shifted: Vec<Option<f64>> = std::iter::once(None)
        .chain(
            days.iter()
                .map(|day| sums.get(day).map(|(sum, n)| sum / f64::from(*n))),
        )
        .take(days.len())
        .collect();

    (days, shifted)
}

/// Adjusted exponentially weighted mean over an optional series.
///
/// The most recent observation carries weight 1 and every step back
/// multiplies the weight by `alpha`. Absent positions contribute no
/// observation but still decay the weights, so a gap widens the geometric
/// distance while the ratio carries the previous value forward. Output is
/// absent until the first observation has been seen.
fn adjusted_ewm(values: &[Option<f64>], alpha: f64) -> Vec<Option<f64>> {
    let mut num = 0.0;
    let mut den = 0.0;
    values
        .iter()
        .map(|value| {
            num *= alpha;
            den *= alpha;
            if let Some(x) = value {
                num += x;
                den += 1.0;
            }
            (den > 0.0).then_some(num / den)
        })
        .collect()
}
