//! CLI entry point for the bike-share insights tool.
//!
//! Loads the daily and hourly rental logs, restricts the daily log to a date
//! range, and prints or exports the aggregated dashboard views.

use anyhow::Result;
use bikeshare_insights::{
    fetch::BasicClient,
    filter::DateRange,
    output::{print_json, print_pretty, write_json, write_tables},
    records::RecordStore,
    report::DashboardReport,
};
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use std::ffi::OsStr;
use std::path::Path;
use tracing::info;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "bikeshare_insights")]
#[command(about = "Aggregate bike-share rental logs into dashboard views", long_about = None)]
struct Cli {
    /// Daily rental log: path, .csv.gz path or URL
    #[arg(long, global = true, env = "BIKESHARE_DAY_SOURCE", default_value = "day.csv")]
    day: String,

    /// Hourly rental log: path, .csv.gz path or URL
    #[arg(long, global = true, env = "BIKESHARE_HOUR_SOURCE", default_value = "hour.csv")]
    hour: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Pretty,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Build every dashboard view for a date range
    Report {
        /// First day to include (YYYY-MM-DD), defaults to the earliest record
        #[arg(long)]
        start: Option<NaiveDate>,

        /// Last day to include (YYYY-MM-DD), defaults to the latest record
        #[arg(long)]
        end: Option<NaiveDate>,

        /// Output format for stdout
        #[arg(short, long, value_enum, default_value_t = Format::Pretty)]
        format: Format,

        /// Also write the JSON report to this file
        #[arg(short, long)]
        output: Option<String>,

        /// Also export every table as CSV into this directory
        #[arg(long)]
        tables_dir: Option<String>,
    },
    /// Show the date range and size of the loaded logs
    Range,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path = std::env::var("LOG_FILE_PATH")
        .unwrap_or_else(|_| "logs/bikeshare_insights.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("bikeshare_insights.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    let client = BasicClient::new();
    let store = RecordStore::load(&client, &cli.day, &cli.hour).await?;

    match cli.command {
        Commands::Report {
            start,
            end,
            format,
            output,
            tables_dir,
        } => {
            let range = DateRange::resolve(&store, start, end)?;
            let report = DashboardReport::build(&store, range);

            match format {
                Format::Pretty => print_pretty(&report),
                Format::Json => print_json(&report)?,
            }
            if let Some(path) = output {
                write_json(&path, &report)?;
            }
            if let Some(dir) = tables_dir {
                write_tables(&dir, &report)?;
            }
        }
        Commands::Range => match store.date_bounds() {
            Some((first, last)) => {
                info!(
                    %first,
                    %last,
                    daily = store.daily().len(),
                    hourly = store.hourly().len(),
                    "Available range"
                );
                println!("{first} {last}");
            }
            None => info!("Daily log is empty"),
        },
    }

    Ok(())
}
