//! One-hot encoding of joined rows into a [`DayTable`].
//!
//! A point arrives once per phenomenon record of its region. All of those
//! rows collapse into a single row whose indicators are the union of the
//! point's phenomena and whose color is the highest color among them.

use std::collections::BTreeMap;

use vigilance_map_forecast_models::{PHENOMENON_COUNT, SeverityColor};
use vigilance_map_geography_models::RegionAssignment;

use crate::join::JoinedRow;
use crate::{DayRow, DayTable};

struct PointSummary<'a> {
    assignment: &'a RegionAssignment,
    phenomena: [bool; PHENOMENON_COUNT],
    severity_color: SeverityColor,
}

/// Encodes joined rows for forecast day `day`.
///
/// Produces one row per (point, region), in first-occurrence order.
#[must_use]
pub fn encode(day: usize, joined: &[JoinedRow<'_>]) -> DayTable {
    let mut order = Vec::new();
    let mut summaries: BTreeMap<(usize, &str), PointSummary<'_>> = BTreeMap::new();

    for row in joined {
        let key = (row.assignment.point_id(), row.assignment.region_id.as_str());
        let summary = summaries.entry(key).or_insert_with(|| {
            order.push(key);
            PointSummary {
                assignment: row.assignment,
                phenomena: [false; PHENOMENON_COUNT],
                severity_color: row.record.severity_color,
            }
        });
        summary.phenomena[row.record.phenomenon.index()] = true;
        summary.severity_color = summary.severity_color.max(row.record.severity_color);
    }

    let rows = order
        .into_iter()
        .filter_map(|key| summaries.remove(&key))
        .map(|summary| DayRow {
            point: summary.assignment.point,
            region_id: summary.assignment.region_id.clone(),
            region_name: summary.assignment.region_name.clone(),
            phenomena: summary.phenomena,
            severity_color: summary.severity_color,
            risk_level: summary.severity_color.risk_level(),
        })
        .collect();

    DayTable { day, rows }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vigilance_map_forecast_models::{Phenomenon, PhenomenonRecord};
    use vigilance_map_geography_models::SamplePoint;

    fn assignment(id: usize, region: &str) -> RegionAssignment {
        RegionAssignment {
            point: SamplePoint {
                id,
                latitude: 43.6,
                longitude: 1.44,
            },
            region_id: region.to_string(),
            region_name: "Occitanie".to_string(),
        }
    }

    fn record(region: &str, phenomenon: Phenomenon, color: SeverityColor) -> PhenomenonRecord {
        PhenomenonRecord {
            region_id: region.to_string(),
            phenomenon,
            severity_color: color,
        }
    }

    fn joined<'a>(
        assignments: &'a [RegionAssignment],
        records: &'a [PhenomenonRecord],
    ) -> Vec<JoinedRow<'a>> {
        crate::join::join(assignments, records)
    }

    #[test]
    fn co_occurring_phenomena_share_one_row() {
        let assignments = vec![assignment(0, "76")];
        let records = vec![
            record("76", Phenomenon::Rain, SeverityColor::Red),
            record("76", Phenomenon::SnowOrIce, SeverityColor::Red),
        ];

        let table = encode(0, &joined(&assignments, &records));

        assert_eq!(table.rows.len(), 1);
        let row = &table.rows[0];
        for phenomenon in Phenomenon::all() {
            let expected = u8::from(matches!(
                phenomenon,
                Phenomenon::Rain | Phenomenon::SnowOrIce
            ));
            assert_eq!(row.indicator(*phenomenon), expected, "{phenomenon}");
        }
        assert_eq!(row.risk_level, 3);
    }

    #[test]
    fn repeated_time_windows_collapse() {
        let assignments = vec![assignment(0, "76"), assignment(1, "76")];
        let records = vec![
            record("76", Phenomenon::Thunderstorms, SeverityColor::Yellow),
            record("76", Phenomenon::Thunderstorms, SeverityColor::Yellow),
            record("76", Phenomenon::Thunderstorms, SeverityColor::Yellow),
        ];

        let table = encode(0, &joined(&assignments, &records));

        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0].point.id, 0);
        assert_eq!(table.rows[1].point.id, 1);
        assert!(table.rows.iter().all(|r| r.risk_level == 1));
    }

    #[test]
    fn differing_colors_collapse_to_highest() {
        let assignments = vec![assignment(0, "76")];
        let records = vec![
            record("76", Phenomenon::Wind, SeverityColor::Green),
            record("76", Phenomenon::Rain, SeverityColor::Orange),
            record("76", Phenomenon::Thunderstorms, SeverityColor::Yellow),
        ];

        let table = encode(0, &joined(&assignments, &records));

        assert_eq!(table.rows.len(), 1);
        let row = &table.rows[0];
        let active: Vec<Phenomenon> = row.active_phenomena().collect();
        assert_eq!(
            active,
            vec![Phenomenon::Wind, Phenomenon::Rain, Phenomenon::Thunderstorms]
        );
        assert_eq!(row.severity_color, SeverityColor::Orange);
        assert_eq!(row.risk_level, 2);
    }

    #[test]
    fn red_alert_reaches_top_risk_level() {
        let assignments = vec![assignment(0, "76")];
        let records = vec![
            record("76", Phenomenon::Floods, SeverityColor::Red),
            record("76", Phenomenon::Wind, SeverityColor::Yellow),
        ];
        let table = encode(0, &joined(&assignments, &records));
        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.rows[0].risk_level, 3);
    }

    #[test]
    fn unrated_maps_to_negative_risk() {
        let assignments = vec![assignment(0, "76")];
        let records = vec![record("76", Phenomenon::Wind, SeverityColor::Unrated)];
        let table = encode(0, &joined(&assignments, &records));
        assert_eq!(table.rows[0].risk_level, -1);
    }

    #[test]
    fn no_joined_rows_yield_empty_table() {
        let table = encode(2, &[]);
        assert_eq!(table.day, 2);
        assert!(table.is_empty());
    }

    #[test]
    fn encoding_is_idempotent() {
        let assignments = vec![assignment(0, "76"), assignment(1, "11")];
        let records = vec![
            record("11", Phenomenon::Floods, SeverityColor::Orange),
            record("76", Phenomenon::Rain, SeverityColor::Yellow),
            record("76", Phenomenon::Avalanches, SeverityColor::Yellow),
        ];
        let rows = joined(&assignments, &records);

        assert_eq!(encode(0, &rows), encode(0, &rows));
    }
}
