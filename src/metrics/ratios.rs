//! Derived QA ratios over a finished aggregation.
//!
//! Every ratio treats a zero in any listed operand as "not applicable"
//! rather than producing 0.00 or dividing by zero.
//!
//! | Ratio | Formula |
//! |-------|---------|
//! | Defect Density (Critical) | critical bugs / pages |
//! | Defect Density (Total)    | total bugs / pages |
//! | MTFB - High/Medium/Low    | bucket hours / bucket bugs |
//! | Severity Ratio %          | bucket bugs / total bugs x 100 |
//! | Defect Rate               | total bugs / (dev + test hours) |
//! | Defect Detection Rate     | total bugs / test hours |

use crate::metrics::types::{AggregateReport, QaInputs, Ratio};

/// Divides, treating a zero in either operand as undefined.
fn ratio(numerator: f64, denominator: f64) -> Option<f64> {
    if numerator == 0.0 || denominator == 0.0 {
        None
    } else {
        Some(numerator / denominator)
    }
}

/// Computes the full ratio table from the aggregate totals and the manual
/// effort inputs for this run.
pub fn compute_ratios(report: &AggregateReport, inputs: &QaInputs) -> Vec<Ratio> {
    let pages = inputs.pages as f64;
    let total_bugs = report.total_bugs as f64;
    let critical = &report.severity.critical;
    let major = &report.severity.major;
    let high = &report.priority.high;
    let medium = &report.priority.medium;
    let low = &report.priority.low;

    // Defect Rate is undefined when either effort figure is missing, even
    // though their sum alone would divide fine.
    let defect_rate = if inputs.dev_hours == 0.0 || inputs.test_hours == 0.0 {
        None
    } else {
        ratio(total_bugs, inputs.dev_hours + inputs.test_hours)
    };

    vec![
        Ratio {
            name: "Defect Density (Critical)",
            value: ratio(critical.bug_count as f64, pages),
        },
        Ratio {
            name: "Defect Density (Total)",
            value: ratio(total_bugs, pages),
        },
        Ratio {
            name: "MTFB - High",
            value: ratio(high.hours_count as f64, high.bug_count as f64),
        },
        Ratio {
            name: "MTFB - Medium",
            value: ratio(medium.hours_count as f64, medium.bug_count as f64),
        },
        Ratio {
            name: "MTFB - Low",
            value: ratio(low.hours_count as f64, low.bug_count as f64),
        },
        Ratio {
            name: "Severity Ratio (Critical) %",
            value: ratio(critical.bug_count as f64, total_bugs).map(|v| v * 100.0),
        },
        Ratio {
            name: "Severity Ratio (Major) %",
            value: ratio(major.bug_count as f64, total_bugs).map(|v| v * 100.0),
        },
        Ratio {
            name: "Defect Rate",
            value: defect_rate,
        },
        Ratio {
            name: "Defect Detection Rate",
            value: ratio(total_bugs, inputs.test_hours),
        },
    ]
}

/// Renders a ratio value with two decimal places, or `n/a` when undefined.
pub fn format_value(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v:.2}"),
        None => "n/a".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::aggregate::aggregate;
    use crate::process::BugRecord;
    use chrono::NaiveDate;
    use csv::StringRecord;

    fn record(severity: Option<&str>, priority: Option<&str>, days: i64) -> BugRecord {
        let date = NaiveDate::from_ymd_opt(2025, 10, 10).unwrap();
        BugRecord {
            row: StringRecord::new(),
            created: date,
            updated: date,
            severity: severity.map(str::to_string),
            priority: priority.map(str::to_string),
            status: None,
            day_count: days,
            hours_count: days * 8,
        }
    }

    fn find(ratios: &[Ratio], name: &str) -> Option<f64> {
        ratios.iter().find(|r| r.name == name).unwrap().value
    }

    #[test]
    fn test_zero_pages_makes_density_undefined() {
        let report = aggregate(&[record(Some("Critical"), None, 2)]);
        let inputs = QaInputs {
            pages: 0,
            dev_hours: 10.0,
            test_hours: 5.0,
        };
        let ratios = compute_ratios(&report, &inputs);

        assert_eq!(find(&ratios, "Defect Density (Critical)"), None);
        assert_eq!(find(&ratios, "Defect Density (Total)"), None);
    }

    #[test]
    fn test_defect_rate_scenario() {
        // 3 bugs, dev 10h, test 5h: rate 3/15, detection 3/5
        let records = vec![
            record(Some("Major"), None, 1),
            record(Some("Minor"), None, 1),
            record(Some("Critical"), None, 1),
        ];
        let report = aggregate(&records);
        let inputs = QaInputs {
            pages: 0,
            dev_hours: 10.0,
            test_hours: 5.0,
        };
        let ratios = compute_ratios(&report, &inputs);

        let rate = find(&ratios, "Defect Rate").unwrap();
        assert!((rate - 0.2).abs() < 1e-9);
        assert_eq!(format_value(Some(rate)), "0.20");

        let detection = find(&ratios, "Defect Detection Rate").unwrap();
        assert!((detection - 0.6).abs() < 1e-9);
    }

    #[test]
    fn test_defect_rate_needs_both_effort_figures() {
        let report = aggregate(&[record(Some("Major"), None, 1)]);
        let inputs = QaInputs {
            pages: 4,
            dev_hours: 10.0,
            test_hours: 0.0,
        };
        let ratios = compute_ratios(&report, &inputs);

        assert_eq!(find(&ratios, "Defect Rate"), None);
        assert_eq!(find(&ratios, "Defect Detection Rate"), None);
    }

    #[test]
    fn test_mtfb_per_bucket() {
        let records = vec![
            record(None, Some("High"), 2),
            record(None, Some("High"), 4),
            record(None, Some("Medium"), 3),
        ];
        let report = aggregate(&records);
        let ratios = compute_ratios(&report, &QaInputs::default());

        // High: 48 hours over 2 bugs
        assert_eq!(find(&ratios, "MTFB - High"), Some(24.0));
        assert_eq!(find(&ratios, "MTFB - Medium"), Some(24.0));
        assert_eq!(find(&ratios, "MTFB - Low"), None);
    }

    #[test]
    fn test_severity_ratio_percent() {
        let records = vec![
            record(Some("Critical"), None, 1),
            record(Some("Major"), None, 1),
            record(Some("Major"), None, 1),
            record(Some("Minor"), None, 1),
        ];
        let report = aggregate(&records);
        let ratios = compute_ratios(&report, &QaInputs::default());

        assert_eq!(find(&ratios, "Severity Ratio (Critical) %"), Some(25.0));
        assert_eq!(find(&ratios, "Severity Ratio (Major) %"), Some(50.0));
    }

    #[test]
    fn test_no_bugs_leaves_everything_undefined() {
        let report = aggregate(&[]);
        let inputs = QaInputs {
            pages: 10,
            dev_hours: 10.0,
            test_hours: 5.0,
        };
        for ratio in compute_ratios(&report, &inputs) {
            assert_eq!(ratio.value, None, "{} should be undefined", ratio.name);
        }
    }

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(Some(0.2)), "0.20");
        assert_eq!(format_value(Some(33.333)), "33.33");
        assert_eq!(format_value(None), "n/a");
    }
}
