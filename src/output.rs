//! Output formatting and persistence for trip statistics.
//!
//! Supports pretty-printing, JSON serialization, and CSV append of
//! one-row run summaries.

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;

use crate::city::City;
use crate::filter::Filters;
use crate::stats::Report;
use csv::WriterBuilder;
use std::fs::OpenOptions;
use std::path::Path;

/// Logs a report using Rust's debug pretty-print format.
pub fn print_pretty(report: &Report) {
    debug!("{:#?}", report);
}

/// Writes a report to stdout as pretty-printed JSON.
pub fn print_json(report: &Report) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(report)?);
    Ok(())
}

/// A flattened one-row summary of a single run, suitable for appending to
/// a results CSV. Optional statistics serialize as empty cells when the
/// source lacked the backing column.
#[derive(Debug, Default, Serialize)]
pub struct RunSummary {
    pub timestamp: DateTime<Utc>,
    pub city: String,
    pub month_filter: String,
    pub day_filter: String,
    pub trip_count: usize,
    pub popular_month: u32,
    pub popular_day: String,
    pub popular_hour: u32,
    pub popular_start_station: String,
    pub popular_end_station: String,
    pub popular_route: String,
    pub total_duration_secs: i64,
    pub mean_duration_secs: i64,
    pub top_user_type: String,
    pub top_gender: Option<String>,
    pub earliest_birth_year: Option<u16>,
    pub latest_birth_year: Option<u16>,
    pub common_birth_year: Option<u16>,
}

impl RunSummary {
    pub fn new(city: City, filters: Filters, report: &Report, trip_count: usize) -> Self {
        let birth_years = report.users.birth_years.as_available();

        RunSummary {
            timestamp: Utc::now(),
            city: city.display_name().to_string(),
            month_filter: filters.month_label().to_string(),
            day_filter: filters.day_label().to_string(),
            trip_count,
            popular_month: report.time.popular_month,
            popular_day: report.time.popular_day.clone(),
            popular_hour: report.time.popular_hour,
            popular_start_station: report.stations.popular_start_station.clone(),
            popular_end_station: report.stations.popular_end_station.clone(),
            popular_route: report.stations.popular_route.clone(),
            total_duration_secs: report.durations.total_secs,
            mean_duration_secs: report.durations.mean_secs,
            top_user_type: report
                .users
                .user_types
                .first()
                .map(|c| c.value.clone())
                .unwrap_or_default(),
            top_gender: report
                .users
                .genders
                .as_available()
                .and_then(|g| g.first())
                .map(|c| c.value.clone()),
            earliest_birth_year: birth_years.map(|b| b.earliest),
            latest_birth_year: birth_years.map(|b| b.latest),
            common_birth_year: birth_years.map(|b| b.most_common),
        }
    }
}

/// Appends a [`RunSummary`] record as a row to a CSV file.
///
/// Creates the file with headers if it does not already exist.
pub fn append_record(path: &str, summary: &RunSummary) -> Result<()> {
    let file_exists = Path::new(path).exists();
    debug!(path, file_exists, "Appending CSV record");

    let file = OpenOptions::new().append(true).create(true).open(path)?;

    let mut writer = WriterBuilder::new()
        .has_headers(!file_exists) // IMPORTANT when appending
        .from_writer(file);

    writer.serialize(summary)?;
    writer.flush()?;

    Ok(())
}
