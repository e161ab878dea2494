//! Data types used by the aggregation and ratio pipeline.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::process::BugRecord;

/// One named aggregation group over a categorical column.
#[derive(Debug, Clone, Serialize)]
pub struct Bucket {
    pub name: &'static str,
    pub bug_count: usize,
    pub day_count: i64,
    pub hours_count: i64,
}

impl Bucket {
    pub(crate) fn named(name: &'static str) -> Self {
        Bucket {
            name,
            bug_count: 0,
            day_count: 0,
            hours_count: 0,
        }
    }

    pub(crate) fn add(&mut self, record: &BugRecord) {
        self.bug_count += 1;
        self.day_count += record.day_count;
        self.hours_count += record.hours_count;
    }
}

/// The three fixed severity buckets.
#[derive(Debug, Serialize)]
pub struct SeverityBuckets {
    pub major: Bucket,
    pub minor: Bucket,
    pub critical: Bucket,
}

/// The three fixed priority buckets.
#[derive(Debug, Serialize)]
pub struct PriorityBuckets {
    pub high: Bucket,
    pub medium: Bucket,
    pub low: Bucket,
}

/// Complete aggregation result for one run, rebuilt from scratch each time.
#[derive(Debug, Serialize)]
pub struct AggregateReport {
    pub generated_at: DateTime<Utc>,
    pub total_bugs: usize,
    pub total_days: i64,
    pub total_hours: i64,
    pub severity: SeverityBuckets,
    pub priority: PriorityBuckets,
}

/// Manually entered QA effort figures for one run.
///
/// Always passed explicitly into the ratio computation; there is no
/// process-wide ratio state to reset between runs.
#[derive(Debug, Default, Clone, Serialize)]
pub struct QaInputs {
    pub pages: u64,
    pub dev_hours: f64,
    pub test_hours: f64,
}

/// A named QA ratio. `None` marks an undefined value (a zero operand),
/// which renders as `n/a` rather than a number.
#[derive(Debug, Serialize)]
pub struct Ratio {
    pub name: &'static str,
    pub value: Option<f64>,
}
