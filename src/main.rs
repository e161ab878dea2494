//! CLI entry point for the bugday aging calculator.
//!
//! Provides subcommands for processing a bug-tracker export into an
//! augmented table, inspecting how an export would parse, and deriving QA
//! ratios from manual effort figures.

use anyhow::Result;
use bugday::dates::DateOrder;
use bugday::metrics::aggregate::aggregate;
use bugday::metrics::ratios::compute_ratios;
use bugday::metrics::types::QaInputs;
use bugday::output::{print_json, write_augmented_csv};
use bugday::parser::{Schema, Table, read_table, resolve_schema};
use bugday::process::{ProcessOptions, ProcessOutcome, process_table};
use bugday::report;
use clap::{Parser, Subcommand};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "bugday")]
#[command(about = "A tool to compute business-day aging for bug tracker exports", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute day counts and write the augmented table
    Process {
        /// Path to the exported CSV file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// CSV file to write the augmented table to
        #[arg(short, long, default_value = "day_count_calculated.csv")]
        output: PathBuf,

        /// Token ordering for ambiguous dates; inferred from the data when omitted
        #[arg(long, value_enum)]
        date_order: Option<DateOrder>,

        /// Keep only rows whose Status is Done or Merge Request
        #[arg(long, default_value_t = false)]
        resolved_only: bool,

        /// Print the aggregate report as JSON instead of summary tables
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Show how an export would parse, without writing anything
    Inspect {
        /// Path to the exported CSV file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Token ordering for ambiguous dates; inferred from the data when omitted
        #[arg(long, value_enum)]
        date_order: Option<DateOrder>,
    },
    /// Compute QA ratios from an export and manual effort figures
    Ratios {
        /// Path to the exported CSV file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Page/story count the bugs were found against
        #[arg(long, default_value = "0")]
        pages: String,

        /// Development hours spent
        #[arg(long, default_value = "0")]
        dev_hours: String,

        /// Test hours spent
        #[arg(long, default_value = "0")]
        test_hours: String,

        /// Token ordering for ambiguous dates; inferred from the data when omitted
        #[arg(long, value_enum)]
        date_order: Option<DateOrder>,

        /// Keep only rows whose Status is Done or Merge Request
        #[arg(long, default_value_t = false)]
        resolved_only: bool,
    },
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/bugday.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("bugday.log"));

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

    match cli.command {
        Commands::Process {
            input,
            output,
            date_order,
            resolved_only,
            json,
        } => {
            let (table, schema, order) = load(&input, date_order)?;
            let outcome = run_pipeline(&table, &schema, order, resolved_only);

            // Everything is computed before the output file is touched, so
            // a failed run never leaves a partial table behind.
            let aggregate_report = aggregate(&outcome.records);
            write_augmented_csv(&output, &table, &outcome.records)?;
            info!(
                path = %output.display(),
                rows = outcome.records.len(),
                "Augmented table written"
            );

            if json {
                print_json(&aggregate_report, &outcome.stats)?;
            } else {
                print!("{}", report::render_summary(&aggregate_report, &outcome.stats));
            }
        }
        Commands::Inspect { input, date_order } => {
            let (table, schema, order) = load(&input, date_order)?;

            info!(
                created = schema.created,
                updated = schema.updated,
                severity_header = schema.severity_header(&table.headers),
                has_priority = schema.priority.is_some(),
                has_status = schema.status.is_some(),
                order = ?order,
                "Schema resolved"
            );

            let outcome = run_pipeline(&table, &schema, order, false);
            let aggregate_report = aggregate(&outcome.records);

            info!(
                total = outcome.stats.total_rows,
                processed = outcome.stats.processed,
                dropped = outcome.stats.dropped_dates,
                "Parse summary"
            );
            print!("{}", report::render_summary(&aggregate_report, &outcome.stats));
        }
        Commands::Ratios {
            input,
            pages,
            dev_hours,
            test_hours,
            date_order,
            resolved_only,
        } => {
            let inputs = QaInputs {
                pages: non_negative_int(&pages, "pages"),
                dev_hours: non_negative_float(&dev_hours, "dev-hours"),
                test_hours: non_negative_float(&test_hours, "test-hours"),
            };

            let (table, schema, order) = load(&input, date_order)?;
            let outcome = run_pipeline(&table, &schema, order, resolved_only);
            let aggregate_report = aggregate(&outcome.records);
            let ratios = compute_ratios(&aggregate_report, &inputs);

            print!("{}", report::render_summary(&aggregate_report, &outcome.stats));
            println!();
            print!("{}", report::render_ratios(&ratios));
        }
    }

    Ok(())
}

/// Loads the table, resolves the schema, and settles the date ordering,
/// either from the flag or inferred once from the date columns.
fn load(input: &Path, date_order: Option<DateOrder>) -> Result<(Table, Schema, DateOrder)> {
    let table = read_table(input)?;
    let schema = resolve_schema(&table.headers)?;

    let order = match date_order {
        Some(order) => order,
        None => {
            let order = DateOrder::infer(table.rows.iter().flat_map(|row| {
                [schema.created, schema.updated]
                    .into_iter()
                    .filter_map(|index| row.get(index))
            }));
            info!(order = ?order, "Date ordering inferred from data");
            order
        }
    };

    Ok((table, schema, order))
}

fn run_pipeline(
    table: &Table,
    schema: &Schema,
    order: DateOrder,
    resolved_only: bool,
) -> ProcessOutcome {
    let outcome = process_table(table, schema, order, &ProcessOptions { resolved_only });

    if outcome.stats.dropped_dates > 0 {
        warn!(
            dropped = outcome.stats.dropped_dates,
            "Rows with unreadable dates were removed"
        );
    }
    if outcome.stats.excluded_by_status > 0 {
        info!(
            excluded = outcome.stats.excluded_by_status,
            "Rows excluded by status filter"
        );
    }

    outcome
}

/// Manual-input validation: bad values fall back to zero with a warning
/// instead of aborting the run.
fn non_negative_int(raw: &str, field: &str) -> u64 {
    match raw.trim().parse::<u64>() {
        Ok(value) => value,
        Err(_) => {
            warn!(field, value = raw, "Invalid value, using 0");
            0
        }
    }
}

fn non_negative_float(raw: &str, field: &str) -> f64 {
    match raw.trim().parse::<f64>() {
        Ok(value) if value >= 0.0 && value.is_finite() => value,
        _ => {
            warn!(field, value = raw, "Invalid value, using 0");
            0.0
        }
    }
}
