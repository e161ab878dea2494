//! Applies date normalization and the day-count rule to a validated table.
//!
//! Input rows are immutable; every derived value lands in a fresh
//! [`BugRecord`]. Rows that cannot be dated are dropped and counted, rows
//! rejected by the status filter are excluded and counted.

use chrono::NaiveDate;
use csv::StringRecord;

use crate::dates::{DateOrder, normalize};
use crate::daycount::{day_count, hours_count};
use crate::parser::{Schema, Table};
use crate::stats::RunStats;

/// Statuses that count as resolved work when the status filter is enabled.
pub const STATUS_ALLOW_LIST: &[&str] = &["Done", "Merge Request"];

#[derive(Debug, Default)]
pub struct ProcessOptions {
    /// Restrict the working set to rows whose status is in
    /// [`STATUS_ALLOW_LIST`].
    pub resolved_only: bool,
}

/// One surviving input row plus its derived fields.
pub struct BugRecord {
    /// Original cells, untouched.
    pub row: StringRecord,
    pub created: NaiveDate,
    pub updated: NaiveDate,
    pub severity: Option<String>,
    pub priority: Option<String>,
    pub status: Option<String>,
    pub day_count: i64,
    pub hours_count: i64,
}

pub struct ProcessOutcome {
    pub records: Vec<BugRecord>,
    pub stats: RunStats,
}

/// Runs every row through normalization, the optional status filter, and
/// the day-count rule, preserving input order.
pub fn process_table(
    table: &Table,
    schema: &Schema,
    order: DateOrder,
    options: &ProcessOptions,
) -> ProcessOutcome {
    let mut records = Vec::with_capacity(table.rows.len());
    let mut stats = RunStats::new(table.rows.len());

    for row in &table.rows {
        let cell = |index: Option<usize>| {
            index
                .and_then(|i| row.get(i))
                .map(str::trim)
                .filter(|value| !value.is_empty())
                .map(str::to_string)
        };

        let created = row.get(schema.created).and_then(|raw| normalize(raw, order));
        let updated = row.get(schema.updated).and_then(|raw| normalize(raw, order));
        let (Some(created), Some(updated)) = (created, updated) else {
            stats.dropped_dates += 1;
            continue;
        };

        let status = cell(schema.status);
        if options.resolved_only && schema.status.is_some() {
            let allowed = status
                .as_deref()
                .is_some_and(|value| STATUS_ALLOW_LIST.contains(&value));
            if !allowed {
                stats.excluded_by_status += 1;
                continue;
            }
        }

        let days = day_count(created, updated);
        records.push(BugRecord {
            row: row.clone(),
            created,
            updated,
            severity: cell(schema.severity),
            priority: cell(schema.priority),
            status,
            day_count: days,
            hours_count: hours_count(days),
        });
    }

    stats.processed = records.len();
    ProcessOutcome { records, stats }
}
