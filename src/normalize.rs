//! Record normalization before export
//!
//! Records from one or more logs are put in timestamp order, repeated
//! timestamps are collapsed to their first occurrence, and the fixed column
//! correction for 13-measurement records is applied.

use crate::types::Record;
use tracing::debug;

/// Measurement count of the record layout whose last two columns are stored swapped
pub const SWAPPED_TAIL_MEASUREMENTS: usize = 13;

/// Sort by timestamp and keep the first record of each timestamp.
///
/// The sort is stable, so "first" means first in input order. Idempotent.
pub fn sort_and_dedup(mut records: Vec<Record>) -> Vec<Record> {
    records.sort_by_key(|r| r.timestamp);
    let before = records.len();
    records.dedup_by_key(|r| r.timestamp);
    if records.len() != before {
        debug!("Dropped {} duplicate timestamps", before - records.len());
    }
    records
}

/// Swap the last two measurements of a 13-measurement record; any other length is untouched
pub fn fix_column_order(record: &mut Record) {
    if record.measurements.len() == SWAPPED_TAIL_MEASUREMENTS {
        record
            .measurements
            .swap(SWAPPED_TAIL_MEASUREMENTS - 2, SWAPPED_TAIL_MEASUREMENTS - 1);
    }
}

/// Full normalization: sort, dedup, then column correction
pub fn normalize_records(records: Vec<Record>) -> Vec<Record> {
    let mut records = sort_and_dedup(records);
    records.iter_mut().for_each(fix_column_order);
    records
}
