use std::path::Path;

use bugday::dates::DateOrder;
use bugday::metrics::aggregate::aggregate;
use bugday::metrics::ratios::{compute_ratios, format_value};
use bugday::metrics::types::QaInputs;
use bugday::output::write_augmented_csv;
use bugday::parser::{read_table, resolve_schema};
use bugday::process::{ProcessOptions, process_table};

#[test]
fn test_full_pipeline() {
    let table = read_table(Path::new("tests/fixtures/sample_bugs.csv")).expect("fixture loads");
    let schema = resolve_schema(&table.headers).expect("schema resolves");

    let order = DateOrder::infer(
        table
            .rows
            .iter()
            .flat_map(|row| [row.get(schema.created), row.get(schema.updated)])
            .flatten(),
    );
    // BUG-3's 13-10-2025 settles the ordering
    assert_eq!(order, DateOrder::DayFirst);

    let outcome = process_table(&table, &schema, order, &ProcessOptions::default());
    assert_eq!(outcome.stats.total_rows, 5);
    assert_eq!(outcome.stats.dropped_dates, 1);
    assert_eq!(outcome.stats.processed, 4);

    let days: Vec<i64> = outcome.records.iter().map(|r| r.day_count).collect();
    assert_eq!(days, vec![1, 4, 4, 1]);
    for record in &outcome.records {
        assert_eq!(record.hours_count, record.day_count * 8);
    }

    let report = aggregate(&outcome.records);
    assert_eq!(report.total_bugs, 4);
    assert_eq!(report.severity.major.bug_count, 1);
    assert_eq!(report.severity.major.day_count, 1);
    assert_eq!(report.severity.minor.bug_count, 1);
    assert_eq!(report.severity.critical.bug_count, 2);
    assert_eq!(report.priority.high.bug_count, 3);
    assert_eq!(report.priority.medium.bug_count, 1);
    assert_eq!(report.priority.low.bug_count, 0);
}

#[test]
fn test_full_pipeline_with_status_filter() {
    let table = read_table(Path::new("tests/fixtures/sample_bugs.csv")).expect("fixture loads");
    let schema = resolve_schema(&table.headers).expect("schema resolves");

    let outcome = process_table(
        &table,
        &schema,
        DateOrder::DayFirst,
        &ProcessOptions { resolved_only: true },
    );

    // BUG-4 falls to the date filter first; only BUG-5 is excluded by status
    assert_eq!(outcome.stats.dropped_dates, 1);
    assert_eq!(outcome.stats.excluded_by_status, 1);
    assert_eq!(outcome.records.len(), 3);
}

#[test]
fn test_augmented_output_round_trip() {
    let table = read_table(Path::new("tests/fixtures/sample_bugs.csv")).expect("fixture loads");
    let schema = resolve_schema(&table.headers).expect("schema resolves");
    let outcome = process_table(&table, &schema, DateOrder::DayFirst, &ProcessOptions::default());

    let path = std::env::temp_dir().join("bugday_integration_output.csv");
    let _ = std::fs::remove_file(&path);
    write_augmented_csv(&path, &table, &outcome.records).expect("output written");

    let written = read_table(&path).expect("output re-loads");
    assert_eq!(written.rows.len(), 4);

    let headers: Vec<&str> = written.headers.iter().collect();
    assert_eq!(headers.last(), Some(&"Hours count"));
    assert_eq!(headers[headers.len() - 2], "Day count");

    // Row order matches the input, minus the dropped row
    let keys: Vec<&str> = written.rows.iter().filter_map(|r| r.get(0)).collect();
    assert_eq!(keys, vec!["BUG-1", "BUG-2", "BUG-3", "BUG-5"]);

    std::fs::remove_file(&path).unwrap();
}

#[test]
fn test_ratio_table_from_fixture() {
    let table = read_table(Path::new("tests/fixtures/sample_bugs.csv")).expect("fixture loads");
    let schema = resolve_schema(&table.headers).expect("schema resolves");
    let outcome = process_table(&table, &schema, DateOrder::DayFirst, &ProcessOptions::default());
    let report = aggregate(&outcome.records);

    // Scenario: no page count entered, effort figures present
    let inputs = QaInputs {
        pages: 0,
        dev_hours: 10.0,
        test_hours: 5.0,
    };
    let ratios = compute_ratios(&report, &inputs);

    let density_total = ratios
        .iter()
        .find(|r| r.name == "Defect Density (Total)")
        .unwrap();
    assert_eq!(format_value(density_total.value), "n/a");

    let defect_rate = ratios.iter().find(|r| r.name == "Defect Rate").unwrap();
    // 4 bugs over 15 hours
    assert_eq!(format_value(defect_rate.value), "0.27");
}
