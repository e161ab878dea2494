//! Business-day counting between the created and updated dates of a record.
//!
//! Convention: weekdays (Mon-Fri, no holiday calendar) in the half-open
//! interval `[created, updated)`. A record created and updated on the same
//! calendar date counts as exactly one day of work.

use chrono::{Datelike, Duration, NaiveDate, Weekday};

/// Fixed working hours assumed per counted day.
pub const HOURS_PER_DAY: i64 = 8;

/// Weekdays in `[from, to)`. Returns 0 when `from >= to`.
pub fn business_days(from: NaiveDate, to: NaiveDate) -> i64 {
    if from >= to {
        return 0;
    }

    let full_weeks = (to - from).num_days() / 7;
    let mut count = full_weeks * 5;

    let mut day = from + Duration::days(full_weeks * 7);
    while day < to {
        if !matches!(day.weekday(), Weekday::Sat | Weekday::Sun) {
            count += 1;
        }
        day += Duration::days(1);
    }

    count
}

/// Day count for a record: exactly 1 when created and updated fall on the
/// same calendar date, otherwise the business days in `[created, updated)`,
/// never negative.
pub fn day_count(created: NaiveDate, updated: NaiveDate) -> i64 {
    if created == updated {
        return 1;
    }
    business_days(created, updated).max(0)
}

/// Derived effort in hours. Always computed from the day count, never
/// stored independently.
pub fn hours_count(day_count: i64) -> i64 {
    day_count * HOURS_PER_DAY
}
