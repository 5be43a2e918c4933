//! Inner join of region assignments with a day's phenomenon records.

use std::collections::{BTreeMap, BTreeSet};

use vigilance_map_forecast_models::PhenomenonRecord;
use vigilance_map_geography_models::RegionAssignment;

/// One assignment paired with one phenomenon record of its region.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JoinedRow<'a> {
    pub assignment: &'a RegionAssignment,
    pub record: &'a PhenomenonRecord,
}

/// Joins on region code.
///
/// Output follows assignment order, and record order within one
/// assignment. Assignments whose region has no record are dropped, as are
/// records for regions no point was assigned to.
#[must_use]
pub fn join<'a>(
    assignments: &'a [RegionAssignment],
    records: &'a [PhenomenonRecord],
) -> Vec<JoinedRow<'a>> {
    let mut by_region: BTreeMap<&str, Vec<&PhenomenonRecord>> = BTreeMap::new();
    for record in records {
        by_region
            .entry(record.region_id.as_str())
            .or_default()
            .push(record);
    }

    let mut rows = Vec::new();
    let mut dropped = 0usize;
    for assignment in assignments {
        match by_region.get(assignment.region_id.as_str()) {
            Some(matches) => rows.extend(matches.iter().map(|&record| JoinedRow {
                assignment,
                record,
            })),
            None => dropped += 1,
        }
    }

    let assigned: BTreeSet<&str> = assignments.iter().map(|a| a.region_id.as_str()).collect();
    let unused = by_region
        .keys()
        .filter(|region| !assigned.contains(*region))
        .count();
    log::debug!(
        "Joined {} rows; {dropped} points had no forecast entry, {unused} forecast regions had no points",
        rows.len()
    );

    rows
}
