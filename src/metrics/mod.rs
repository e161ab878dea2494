//! Bucket aggregation and derived QA ratios.
//!
//! This module partitions processed records into fixed severity and
//! priority buckets, sums their day and hour counts, and combines the
//! totals with manually entered effort figures into the QA ratio table.

pub mod aggregate;
pub mod ratios;
pub mod types;
