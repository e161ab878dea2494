//! Human-readable rendering of run results.
//!
//! Pure string builders over the report types; callers decide where the
//! text goes.

use std::fmt::Write;

use crate::metrics::ratios::format_value;
use crate::metrics::types::{AggregateReport, Bucket, Ratio};
use crate::stats::RunStats;

fn bucket_table(out: &mut String, label: &str, buckets: [&Bucket; 3]) {
    let _ = writeln!(out, "{:<28} {:>6} {:>6} {:>7}", label, "Bugs", "Days", "Hours");
    for bucket in buckets {
        let _ = writeln!(
            out,
            "{:<28} {:>6} {:>6} {:>7}",
            bucket.name, bucket.bug_count, bucket.day_count, bucket.hours_count
        );
    }
}

/// Renders the run statistics line and the severity/priority tables.
pub fn render_summary(report: &AggregateReport, stats: &RunStats) -> String {
    let mut out = String::new();

    let _ = writeln!(
        out,
        "Processed {} of {} rows ({} dropped for unreadable dates, {} excluded by status)",
        stats.processed, stats.total_rows, stats.dropped_dates, stats.excluded_by_status
    );
    let _ = writeln!(
        out,
        "Totals: {} bugs, {} days, {} hours",
        report.total_bugs, report.total_days, report.total_hours
    );

    let _ = writeln!(out);
    bucket_table(
        &mut out,
        "Severity",
        [
            &report.severity.major,
            &report.severity.minor,
            &report.severity.critical,
        ],
    );

    let _ = writeln!(out);
    bucket_table(
        &mut out,
        "Priority",
        [
            &report.priority.high,
            &report.priority.medium,
            &report.priority.low,
        ],
    );

    out
}

/// Renders the QA ratio table.
pub fn render_ratios(ratios: &[Ratio]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{:<28} {:>8}", "Ratio", "Value");
    for ratio in ratios {
        let _ = writeln!(out, "{:<28} {:>8}", ratio.name, format_value(ratio.value));
    }
    out
}
