use clap::{CommandFactory, Parser};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::models::AtgConfig;

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// ATG-style thermal comfort analysis from hourly simulation CSV data
#[derive(Parser, Debug, Clone)]
#[command(
    name = "atg-comfort",
    about = "ATG-style thermal comfort analysis from hourly simulation CSV data",
    version
)]
pub struct Settings {
    /// Path to the input CSV file
    pub csv: PathBuf,

    /// Timestamp column name
    #[arg(long, default_value = "timestamp")]
    pub timestamp_col: String,

    /// Operative/indoor temperature column name
    #[arg(long, default_value = "t_op")]
    pub operative_col: String,

    /// Outdoor temperature column name
    #[arg(long, default_value = "t_out")]
    pub outdoor_col: String,

    /// Running mean alpha factor
    #[arg(long, default_value = "0.8")]
    pub alpha: f64,

    /// Adaptive comfort slope
    #[arg(long, default_value = "0.33")]
    pub comfort_slope: f64,

    /// Adaptive comfort intercept [°C]
    #[arg(long, default_value = "18.8")]
    pub comfort_intercept: f64,

    /// Comfort deadband ± [°C]
    #[arg(long, default_value = "3.0")]
    pub deadband: f64,

    /// Output folder for CSV results
    #[arg(long, default_value = "results")]
    pub output_dir: PathBuf,

    /// Logging level
    #[arg(long, default_value = "INFO", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR", "CRITICAL"])]
    pub log_level: String,

    /// Log file path
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Clear saved configuration
    #[arg(long)]
    pub clear: bool,
}

// ── LastUsedParams ─────────────────────────────────────────────────────────────

/// Persisted last-used parameters saved to `~/.atg-comfort/last_used.json`.
///
/// Only the input-shape parameters (column names, output folder) are
/// persisted. The comfort constants are model knobs that must be stated
/// per run and are never loaded from here.
#[derive(Debug, Serialize, Deserialize, Default, Clone)]
pub struct LastUsedParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp_col: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operative_col: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outdoor_col: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<PathBuf>,
}

impl LastUsedParams {
    /// Return the default path to the persisted config file.
    /// Uses `~/.atg-comfort/last_used.json`.
    pub fn config_path() -> PathBuf {
        Self::config_path_in(&dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
    }

    /// Return the config path rooted at `base_dir` (used for testing).
    pub fn config_path_in(base_dir: &std::path::Path) -> PathBuf {
        base_dir.join(".atg-comfort").join("last_used.json")
    }

    /// Load persisted params from the default path.
    /// Returns `Default` when the file is absent or cannot be parsed.
    pub fn load() -> Self {
        Self::load_from(&Self::config_path())
    }

    /// Load persisted params from an explicit path.
    pub fn load_from(path: &std::path::Path) -> Self {
        let Ok(content) = std::fs::read_to_string(path) else {
            return Self::default();
        };
        serde_json::from_str(&content).unwrap_or_default()
    }

    /// Atomically write params to the default path, creating parent
    /// directories if needed.
    pub fn save(&self) -> Result<(), std::io::Error> {
        self.save_to(&Self::config_path())
    }

    /// Atomically write params to an explicit path.
    pub fn save_to(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;

        // Write to a temp file then rename for atomicity.
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, &json)?;
        std::fs::rename(&tmp, path)?;

        Ok(())
    }

    /// Delete the default config file if it exists.
    pub fn clear() -> Result<(), std::io::Error> {
        Self::clear_at(&Self::config_path())
    }

    /// Delete the config file at an explicit path if it exists.
    pub fn clear_at(path: &std::path::Path) -> Result<(), std::io::Error> {
        if path.exists() {
            std::fs::remove_file(path)?;
        }
        Ok(())
    }
}

// ── Settings impl ──────────────────────────────────────────────────────────────

impl Settings {
    /// Parse CLI arguments, merge with last-used params where no explicit
    /// CLI value was provided, and persist the result.
    pub fn load_with_last_used() -> Self {
        Self::load_with_last_used_impl(
            std::env::args_os().collect(),
            &LastUsedParams::config_path(),
        )
    }

    /// Full implementation – accepts args and an explicit config path so
    /// that tests can redirect to a temporary directory.
    pub fn load_with_last_used_impl(
        args: Vec<std::ffi::OsString>,
        config_path: &std::path::Path,
    ) -> Self {
        // Build raw ArgMatches so we can query ValueSource.
        let matches = Settings::command().get_matches_from(args.clone());

        // Parse into the typed struct using the same args.
        let mut settings = Settings::parse_from(args);

        if settings.clear {
            let _ = LastUsedParams::clear_at(config_path);
            return Self::apply_debug_flag(settings);
        }

        let last = LastUsedParams::load_from(config_path);

        // Merge last-used values for fields that were NOT explicitly set on
        // the command line (CLI always wins). The comfort constants are
        // never loaded from last-used.
        // NOTE: clap stores the arg id using the *field name* (underscores),
        // not the long-flag spelling (hyphens).
        if !is_arg_explicitly_set(&matches, "timestamp_col") {
            if let Some(v) = last.timestamp_col {
                settings.timestamp_col = v;
            }
        }
        if !is_arg_explicitly_set(&matches, "operative_col") {
            if let Some(v) = last.operative_col {
                settings.operative_col = v;
            }
        }
        if !is_arg_explicitly_set(&matches, "outdoor_col") {
            if let Some(v) = last.outdoor_col {
                settings.outdoor_col = v;
            }
        }
        if !is_arg_explicitly_set(&matches, "output_dir") {
            if let Some(v) = last.output_dir {
                settings.output_dir = v;
            }
        }

        settings = Self::apply_debug_flag(settings);

        // Persist current settings for next run.
        let params = LastUsedParams::from(&settings);
        let _ = params.save_to(config_path);

        settings
    }

    /// The comfort-model constants carried by these settings.
    pub fn comfort_config(&self) -> AtgConfig {
        AtgConfig {
            alpha: self.alpha,
            comfort_slope: self.comfort_slope,
            comfort_intercept: self.comfort_intercept,
            deadband: self.deadband,
        }
    }

    /// `--debug` overrides the log level.
    fn apply_debug_flag(mut settings: Settings) -> Settings {
        if settings.debug {
            settings.log_level = "DEBUG".to_string();
        }
        settings
    }
}

// ── Conversion ─────────────────────────────────────────────────────────────────

impl From<&Settings> for LastUsedParams {
    fn from(s: &Settings) -> Self {
        LastUsedParams {
            timestamp_col: Some(s.timestamp_col.clone()),
            operative_col: Some(s.operative_col.clone()),
            outdoor_col: Some(s.outdoor_col.clone()),
            output_dir: Some(s.output_dir.clone()),
        }
    }
}

// ── Helper: check if an arg was explicitly set on the command line ─────────────

/// Returns `true` when `name` was supplied explicitly on the command line
/// (not via default value or environment variable).
fn is_arg_explicitly_set(matches: &clap::ArgMatches, name: &str) -> bool {
    matches.value_source(name) == Some(clap::parser::ValueSource::CommandLine)
}

// ── Tests ──────────────────────────────────────────────────────────────────────
