//! CLI entry point for the bikeshare explorer tool.
//!
//! Provides an interactive exploration session and a one-shot stats
//! subcommand with optional CSV summary persistence.

mod session;

use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;
use bikeshare_explorer::city::City;
use bikeshare_explorer::filter::{self, Filters, Month};
use bikeshare_explorer::output::{RunSummary, append_record, print_json, print_pretty};
use bikeshare_explorer::records;
use bikeshare_explorer::stats;
use chrono::Weekday;
use clap::{Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "bikeshare_explorer")]
#[command(about = "A tool to explore US bikeshare trip data", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Explore a city interactively with filter prompts and record paging
    Explore {
        /// Directory containing the city CSV files
        #[arg(short, long, default_value = ".")]
        data_dir: PathBuf,
    },
    /// Compute statistics for one city and print or persist the report
    Stats {
        /// City to analyze
        #[arg(value_enum)]
        city: City,

        /// Month to filter by (the data covers january through june)
        #[arg(short, long, value_enum)]
        month: Option<Month>,

        /// Day of the week to filter by
        #[arg(short, long, value_parser = parse_day_arg)]
        day: Option<Weekday>,

        /// Directory containing the city CSV files
        #[arg(long, default_value = ".")]
        data_dir: PathBuf,

        /// CSV file to append a one-row run summary to
        #[arg(short, long)]
        output: Option<String>,

        /// Print the full report as JSON instead of a formatted summary
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}

fn parse_day_arg(value: &str) -> Result<Weekday, String> {
    filter::parse_day(value)
        .ok_or_else(|| format!("{value:?} is not a day of the week (monday through sunday)"))
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path = std::env::var("LOG_FILE_PATH")
        .unwrap_or_else(|_| "logs/bikeshare_explorer.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("bikeshare_explorer.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse().unwrap()));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse().unwrap()));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Explore { data_dir } => {
            session::run(&data_dir).await?;
        }
        Commands::Stats {
            city,
            month,
            day,
            data_dir,
            output,
            json,
        } => {
            run_stats(
                city,
                Filters { month, day },
                &data_dir,
                output.as_deref(),
                json,
            )
            .await?;
        }
    }

    Ok(())
}

/// Loads, filters, and aggregates one city, then prints and optionally
/// persists the report.
#[tracing::instrument(skip_all, fields(city = city.display_name()))]
async fn run_stats(
    city: City,
    filters: Filters,
    data_dir: &Path,
    output: Option<&str>,
    json: bool,
) -> Result<()> {
    let set = records::load_city(data_dir, city)?;
    let filtered = Arc::new(filter::apply(&set, filters));

    info!(
        loaded = set.len(),
        filtered = filtered.len(),
        month = filters.month_label(),
        day = filters.day_label(),
        "Trips filtered"
    );

    let report = match stats::compute_all(Arc::clone(&filtered)).await {
        Ok(report) => report,
        Err(err) => {
            error!(error = %err, "Aggregation produced no result");
            return Err(err.into());
        }
    };

    print_pretty(&report);

    if json {
        print_json(&report)?;
    } else {
        session::print_report(&report);
    }

    if let Some(path) = output {
        let summary = RunSummary::new(city, filters, &report, filtered.len());
        append_record(path, &summary)?;
        info!(path, "Run summary appended");
    }

    Ok(())
}
