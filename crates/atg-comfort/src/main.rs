mod bootstrap;
mod report;

use anyhow::Result;
use comfort_core::settings::Settings;
use comfort_data::analysis::analyze_comfort;
use comfort_data::reader::ColumnMap;
use comfort_data::writer::{write_hourly_results, write_monthly_summary};

fn main() -> Result<()> {
    let settings = Settings::load_with_last_used();

    bootstrap::ensure_output_dir(&settings.output_dir)?;
    bootstrap::setup_logging(&settings.log_level, settings.log_file.as_ref())?;

    tracing::info!("ATG comfort analysis v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        "Input: {}, alpha: {}, slope: {}, intercept: {}, deadband: {}",
        settings.csv.display(),
        settings.alpha,
        settings.comfort_slope,
        settings.comfort_intercept,
        settings.deadband
    );

    let columns = ColumnMap {
        timestamp: settings.timestamp_col.clone(),
        operative: settings.operative_col.clone(),
        outdoor: settings.outdoor_col.clone(),
    };
    let config = settings.comfort_config();

    let result = analyze_comfort(&settings.csv, &columns, &config)?;

    tracing::debug!(
        "Load {:.3}s, classify {:.3}s",
        result.metadata.load_time_seconds,
        result.metadata.classify_time_seconds
    );

    write_hourly_results(
        &settings.output_dir.join("comfort_hourly_results.csv"),
        &result.hourly,
    )?;
    write_monthly_summary(
        &settings.output_dir.join("comfort_monthly_summary.csv"),
        &result.monthly,
    )?;

    if !result.monthly.is_empty() {
        print!("{}", report::render_monthly_table(&result.monthly));
        println!();
    }
    print!("{}", report::render_summary(&result, &settings.output_dir));

    Ok(())
}
