//! Augmented CSV output and machine-readable report dump.

use anyhow::Result;
use csv::StringRecord;
use std::fs::File;
use std::path::Path;
use tracing::debug;

use crate::metrics::types::AggregateReport;
use crate::parser::Table;
use crate::process::BugRecord;
use crate::stats::RunStats;

pub const DAY_COUNT_COLUMN: &str = "Day count";
pub const HOURS_COUNT_COLUMN: &str = "Hours count";

/// Writes the surviving rows with `Day count` and `Hours count` appended.
///
/// Original columns and row order are preserved; pre-existing day/hour
/// columns in the input are replaced rather than duplicated. The csv
/// writer keeps cells UTF-8 and quotes as needed.
pub fn write_augmented_csv(path: &Path, table: &Table, records: &[BugRecord]) -> Result<()> {
    // Indices of stale derived columns carried over from a previous run
    let stale: Vec<usize> = table
        .headers
        .iter()
        .enumerate()
        .filter(|(_, header)| *header == DAY_COUNT_COLUMN || *header == HOURS_COUNT_COLUMN)
        .map(|(index, _)| index)
        .collect();

    let file = File::create(path)?;
    let mut writer = csv::Writer::from_writer(file);

    let mut header_row = keep_fields(&table.headers, &stale);
    header_row.push_field(DAY_COUNT_COLUMN);
    header_row.push_field(HOURS_COUNT_COLUMN);
    writer.write_record(&header_row)?;

    for record in records {
        let mut row = keep_fields(&record.row, &stale);
        row.push_field(&record.day_count.to_string());
        row.push_field(&record.hours_count.to_string());
        writer.write_record(&row)?;
    }

    writer.flush()?;
    debug!(path = %path.display(), rows = records.len(), "Augmented CSV written");
    Ok(())
}

fn keep_fields(record: &StringRecord, stale: &[usize]) -> StringRecord {
    if stale.is_empty() {
        return record.clone();
    }
    record
        .iter()
        .enumerate()
        .filter(|(index, _)| !stale.contains(index))
        .map(|(_, field)| field)
        .collect()
}

/// Prints the run statistics and aggregate report as pretty JSON to stdout.
pub fn print_json(report: &AggregateReport, stats: &RunStats) -> Result<()> {
    let payload = serde_json::json!({
        "stats": stats,
        "aggregates": report,
    });
    println!("{}", serde_json::to_string_pretty(&payload)?);
    Ok(())
}
