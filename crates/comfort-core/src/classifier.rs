//! Per-hour adaptive comfort classification.
//!
//! Stateless and row-independent: each hour is judged against the comfort
//! band derived from its running-mean outdoor temperature, with no state
//! carried across rows.

use crate::models::{AtgConfig, ClassifiedRecord, ComfortState, HourlyRecord};
use crate::running_mean::running_mean_outdoor;

/// Comfort band derived from a known running-mean temperature.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComfortBand {
    /// Comfort target temperature in °C.
    pub t_comfort: f64,
    /// Lower limit (`t_comfort - deadband`).
    pub limit_low: f64,
    /// Upper limit (`t_comfort + deadband`).
    pub limit_high: f64,
}

/// Compute the comfort band for a running-mean temperature.
pub fn comfort_band(trm: f64, config: &AtgConfig) -> ComfortBand {
    let t_comfort = config.comfort_slope * trm + config.comfort_intercept;
    ComfortBand {
        t_comfort,
        limit_low: t_comfort - config.deadband,
        limit_high: t_comfort + config.deadband,
    }
}

/// Classify one operative temperature against a comfort band.
///
/// Only strict inequality triggers discomfort: an hour exactly on either
/// limit is comfortable.
pub fn classify_hour(t_op: f64, band: &ComfortBand) -> ComfortState {
    if t_op < band.limit_low {
        ComfortState::TooCold
    } else if t_op > band.limit_high {
        ComfortState::TooWarm
    } else {
        ComfortState::Comfortable
    }
}

/// Classify every hour of a normalized series.
///
/// Computes the outdoor running mean and applies the band classification
/// per row. Hours without a running mean keep every derived field absent
/// and stay unclassified.
pub fn classify_hours(records: &[HourlyRecord], config: &AtgConfig) -> Vec<ClassifiedRecord> {
    let trm_series = running_mean_outdoor(records, config.alpha);

    records
        .iter()
        .zip(trm_series)
        .map(|(rec, trm)| {
            let band = trm.map(|t| comfort_band(t, config));
            ClassifiedRecord {
                timestamp: rec.timestamp,
                t_op: rec.t_op,
                t_out: rec.t_out,
                trm,
                t_comfort: band.map(|b| b.t_comfort),
                limit_low: band.map(|b| b.limit_low),
                limit_high: band.map(|b| b.limit_high),
                state: band.map(|b| classify_hour(rec.t_op, &b)),
            }
        })
        .collect()
}
