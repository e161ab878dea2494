//! Tabular input loading and schema resolution for tracker exports.

use anyhow::{Context, Result, bail};
use csv::StringRecord;
use std::fs::File;
use std::path::Path;
use tracing::debug;

pub const CREATED_COLUMN: &str = "Created";
pub const UPDATED_COLUMN: &str = "Updated";
/// Accepted severity headers, checked in order. Jira ships severity as a
/// custom field in some export configurations.
pub const SEVERITY_ALIASES: &[&str] = &["Severity", "Custom field (Severity)"];
pub const PRIORITY_COLUMN: &str = "Priority";
pub const STATUS_COLUMN: &str = "Status";

/// A loaded export: header row plus raw data rows, untouched.
pub struct Table {
    pub headers: StringRecord,
    pub rows: Vec<StringRecord>,
}

/// Column positions resolved once against the header row.
#[derive(Debug, Clone)]
pub struct Schema {
    pub created: usize,
    pub updated: usize,
    pub severity: Option<usize>,
    pub priority: Option<usize>,
    pub status: Option<usize>,
}

impl Schema {
    /// Header name the severity column resolved to, if any.
    pub fn severity_header<'a>(&self, headers: &'a StringRecord) -> Option<&'a str> {
        self.severity.and_then(|i| headers.get(i))
    }
}

/// Reads a delimited UTF-8 export into memory.
///
/// Rows are kept as raw [`StringRecord`]s so the original cells survive
/// unchanged into the augmented output. Ragged rows are tolerated; cell
/// lookups past a short row simply come back empty.
pub fn read_table(path: &Path) -> Result<Table> {
    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(file);

    let headers = reader.headers()?.clone();
    let mut rows = Vec::new();
    for record in reader.records() {
        rows.push(record?);
    }

    debug!(path = %path.display(), rows = rows.len(), "Input table loaded");
    Ok(Table { headers, rows })
}

/// Resolves the required and optional columns against the header row.
///
/// # Errors
///
/// Fails when `Created` or `Updated` is missing; the error names every
/// missing column and nothing downstream runs.
pub fn resolve_schema(headers: &StringRecord) -> Result<Schema> {
    let find = |name: &str| headers.iter().position(|h| h.trim() == name);

    let created = find(CREATED_COLUMN);
    let updated = find(UPDATED_COLUMN);

    let (Some(created), Some(updated)) = (created, updated) else {
        let missing: Vec<&str> = [(created, CREATED_COLUMN), (updated, UPDATED_COLUMN)]
            .iter()
            .filter(|(found, _)| found.is_none())
            .map(|(_, name)| *name)
            .collect();
        bail!(
            "input must contain '{}' and '{}' columns (missing: {})",
            CREATED_COLUMN,
            UPDATED_COLUMN,
            missing.join(", ")
        );
    };

    let schema = Schema {
        created,
        updated,
        severity: SEVERITY_ALIASES.iter().find_map(|name| find(name)),
        priority: find(PRIORITY_COLUMN),
        status: find(STATUS_COLUMN),
    };
    debug!(?schema, "Schema resolved");
    Ok(schema)
}
