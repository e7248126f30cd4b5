//! CSV ingestion of hourly simulation data.
//!
//! Loads a raw simulation export, normalizes it to [`HourlyRecord`]s and
//! enforces the preconditions the core relies on: required columns
//! present, rows sorted ascending by timestamp, duplicates removed, rows
//! with unparseable values dropped.

use std::fs::File;
use std::path::Path;

use chrono::NaiveDateTime;
use csv::StringRecord;
use tracing::debug;

use comfort_core::error::{ComfortError, Result};
use comfort_core::models::HourlyRecord;

// ── Public API ────────────────────────────────────────────────────────────────

/// Names of the three required input columns.
#[derive(Debug, Clone)]
pub struct ColumnMap {
    /// Timestamp column name.
    pub timestamp: String,
    /// Operative/indoor temperature column name.
    pub operative: String,
    /// Outdoor temperature column name.
    pub outdoor: String,
}

impl Default for ColumnMap {
    fn default() -> Self {
        Self {
            timestamp: "timestamp".to_string(),
            operative: "t_op".to_string(),
            outdoor: "t_out".to_string(),
        }
    }
}

/// Load and normalize hourly records from a CSV file.
///
/// Fails fast with [`ComfortError::MissingColumns`] naming every absent
/// required column. Rows whose timestamp or temperatures cannot be parsed
/// are dropped silently (counted at debug level). The result is sorted
/// ascending by timestamp with duplicate timestamps removed (first
/// occurrence wins).
pub fn load_hourly_records(path: &Path, columns: &ColumnMap) -> Result<Vec<HourlyRecord>> {
    let file = File::open(path).map_err(|source| ComfortError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    let mut rdr = csv::Reader::from_reader(file);
    let headers = rdr.headers()?.clone();
    let indices = ColumnIndices::resolve(&headers, columns)?;

    let mut records: Vec<HourlyRecord> = Vec::new();
    let mut rows_read = 0u64;
    let mut rows_dropped = 0u64;

    for result in rdr.records() {
        let record = match result {
            Ok(r) => r,
            Err(e) => {
                debug!("Skipping malformed CSV record in {}: {}", path.display(), e);
                rows_dropped += 1;
                continue;
            }
        };
        rows_read += 1;

        match parse_row(&record, &indices) {
            Some(rec) => records.push(rec),
            None => rows_dropped += 1,
        }
    }

    // Stable sort, then keep the first occurrence of each timestamp.
    records.sort_by_key(|r| r.timestamp);
    records.dedup_by_key(|r| r.timestamp);

    debug!(
        "File {}: {} rows read, {} dropped, {} kept",
        path.display(),
        rows_read,
        rows_dropped,
        records.len()
    );

    Ok(records)
}

/// Parse a timestamp string as a naive datetime.
///
/// Accepts the common ISO-like patterns found in simulation exports, with
/// `T` or space separators, optional fractional seconds, and an optional
/// seconds field. Returns `None` for anything else.
pub fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return None;
    }

    const FORMATS: &[&str] = &[
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
    ];

    FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok())
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// Resolved positions of the required columns in the header row.
struct ColumnIndices {
    timestamp: usize,
    operative: usize,
    outdoor: usize,
}

impl ColumnIndices {
    /// Look up each required column by name, collecting every missing one
    /// into a single error.
    fn resolve(headers: &StringRecord, columns: &ColumnMap) -> Result<Self> {
        let position = |name: &str| headers.iter().position(|h| h == name);

        let timestamp = position(&columns.timestamp);
        let operative = position(&columns.operative);
        let outdoor = position(&columns.outdoor);

        let missing: Vec<String> = [
            (&columns.timestamp, timestamp),
            (&columns.operative, operative),
            (&columns.outdoor, outdoor),
        ]
        .iter()
        .filter(|(_, idx)| idx.is_none())
        .map(|(name, _)| (*name).clone())
        .collect();

        if !missing.is_empty() {
            return Err(ComfortError::MissingColumns(missing));
        }

        Ok(Self {
            timestamp: timestamp.unwrap_or_default(),
            operative: operative.unwrap_or_default(),
            outdoor: outdoor.unwrap_or_default(),
        })
    }
}

/// Map one CSV record to an [`HourlyRecord`], returning `None` when any
/// required field fails to parse.
fn parse_row(record: &StringRecord, indices: &ColumnIndices) -> Option<HourlyRecord> {
    let timestamp = parse_timestamp(record.get(indices.timestamp)?)?;
    let t_op: f64 = record.get(indices.operative)?.trim().parse().ok()?;
    let t_out: f64 = record.get(indices.outdoor)?.trim().parse().ok()?;

    Some(HourlyRecord {
        timestamp,
        t_op,
        t_out,
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────
