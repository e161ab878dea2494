//! Severity and priority bucket aggregation.

use chrono::Utc;

use crate::metrics::types::{AggregateReport, Bucket, PriorityBuckets, SeverityBuckets};
use crate::process::BugRecord;

/// Partitions records into the fixed buckets and sums their counts.
///
/// A record lands in at most one severity bucket and at most one priority
/// bucket; unrecognized values land in neither. Totals cover every
/// processed record, bucketed or not.
pub fn aggregate(records: &[BugRecord]) -> AggregateReport {
    let mut severity = SeverityBuckets {
        major: Bucket::named("Major"),
        minor: Bucket::named("Minor"),
        critical: Bucket::named("Critical/Blocker"),
    };
    let mut priority = PriorityBuckets {
        high: Bucket::named("Highest/High"),
        medium: Bucket::named("Medium"),
        low: Bucket::named("Low/Lowest"),
    };

    let mut total_days = 0;
    let mut total_hours = 0;

    for record in records {
        total_days += record.day_count;
        total_hours += record.hours_count;

        match record.severity.as_deref() {
            Some("Major") => severity.major.add(record),
            Some("Minor") => severity.minor.add(record),
            Some("Critical") | Some("Blocker") => severity.critical.add(record),
            _ => {}
        }

        match record.priority.as_deref() {
            Some("Highest") | Some("High") => priority.high.add(record),
            Some("Medium") => priority.medium.add(record),
            Some("Low") | Some("Lowest") => priority.low.add(record),
            _ => {}
        }
    }

    AggregateReport {
        generated_at: Utc::now(),
        total_bugs: records.len(),
        total_days,
        total_hours,
        severity,
        priority,
    }
}
