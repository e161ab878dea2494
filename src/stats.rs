//! Row-level accounting for a single processing run.

use serde::Serialize;

/// Counts every row the run saw and what happened to it. Dropped and
/// excluded rows are only ever reported in aggregate, never itemized.
#[derive(Debug, Default, Serialize)]
pub struct RunStats {
    pub total_rows: usize,
    pub processed: usize,
    pub dropped_dates: usize,
    pub excluded_by_status: usize,
}

impl RunStats {
    pub fn new(total_rows: usize) -> Self {
        RunStats {
            total_rows,
            ..Default::default()
        }
    }

    pub fn pct(part: usize, total: usize) -> f64 {
        if total == 0 {
            0.0
        } else {
            (part as f64 / total as f64) * 100.0
        }
    }

    pub fn dropped_pct(&self) -> f64 {
        Self::pct(self.dropped_dates, self.total_rows)
    }

    pub fn processed_pct(&self) -> f64 {
        Self::pct(self.processed, self.total_rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pct_with_zero_total() {
        assert_eq!(RunStats::pct(10, 0), 0.0);
    }

    #[test]
    fn test_pct_normal_values() {
        assert_eq!(RunStats::pct(50, 100), 50.0);
        assert_eq!(RunStats::pct(1, 4), 25.0);
    }

    #[test]
    fn test_dropped_pct() {
        let stats = RunStats {
            total_rows: 8,
            processed: 6,
            dropped_dates: 2,
            excluded_by_status: 0,
        };
        assert_eq!(stats.dropped_pct(), 25.0);
        assert_eq!(stats.processed_pct(), 75.0);
    }
}
