//! Builds one [`DayTable`] per forecast period.

use vigilance_map_forecast_models::payload::{ForecastPeriod, ForecastProduct, VigilanceDocument};
use vigilance_map_geography_models::RegionAssignment;

use crate::{DayTable, ForecastError, builder, encode, join};

/// Reads a vigilance document from raw JSON.
///
/// # Errors
///
/// Returns [`ForecastError::Json`] if the value does not have the
/// `product.periods[].timelaps.domain_ids` shape.
pub fn parse_document(value: serde_json::Value) -> Result<VigilanceDocument, ForecastError> {
    Ok(serde_json::from_value(value)?)
}

/// Flattens, joins and encodes a single period.
#[must_use]
pub fn build_day(
    day: usize,
    assignments: &[RegionAssignment],
    period: &ForecastPeriod,
) -> DayTable {
    let records = builder::build(period);
    let joined = join::join(assignments, &records);
    let table = encode::encode(day, &joined);

    log::info!(
        "{}: {} phenomenon records, {} rows over {} points",
        table.label(),
        records.len(),
        table.rows.len(),
        table.point_count()
    );

    table
}

/// One table per period, indexed by day offset (J0 first).
///
/// Periods are independent; a point can be present on one day and absent
/// on another when its region reported nothing that day.
#[must_use]
pub fn build_days(assignments: &[RegionAssignment], product: &ForecastProduct) -> Vec<DayTable> {
    product
        .periods
        .iter()
        .enumerate()
        .map(|(day, period)| build_day(day, assignments, period))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DayRow;
    use serde_json::json;
    use vigilance_map_forecast_models::Phenomenon;
    use vigilance_map_geography_models::SamplePoint;

    fn assignment(id: usize, region: &str) -> RegionAssignment {
        RegionAssignment {
            point: SamplePoint {
                id,
                latitude: 48.0,
                longitude: 2.0,
            },
            region_id: region.to_string(),
            region_name: format!("Region {region}"),
        }
    }

    fn document() -> VigilanceDocument {
        parse_document(json!({
            "product": {
                "periods": [
                    {
                        "echeance": "J",
                        "timelaps": {"domain_ids": [
                            {"domain_id": "A", "phenomenon_items": [
                                {"phenomenon_id": "2", "phenomenon_max_color_id": 3,
                                 "timelaps_items": [{"color_id": 3}, {"color_id": 2}]},
                                {"phenomenon_id": "5", "phenomenon_max_color_id": 3,
                                 "timelaps_items": [{"color_id": 3}]}
                            ]},
                            {"domain_id": "B", "phenomenon_items": [
                                {"phenomenon_id": "1", "phenomenon_max_color_id": 1,
                                 "timelaps_items": [{"color_id": 1}]}
                            ]}
                        ]}
                    },
                    {
                        "echeance": "J1",
                        "timelaps": {"domain_ids": [
                            {"domain_id": "B", "phenomenon_items": [
                                {"phenomenon_id": "1", "phenomenon_max_color_id": 2,
                                 "timelaps_items": [{"color_id": 2}]}
                            ]}
                        ]}
                    }
                ]
            }
        }))
        .unwrap()
    }

    #[test]
    fn one_table_per_period_in_order() {
        let assignments = vec![assignment(0, "A"), assignment(1, "B")];
        let days = build_days(&assignments, &document().product);

        assert_eq!(days.len(), 2);
        assert_eq!(days[0].label(), "J0");
        assert_eq!(days[1].label(), "J1");
    }

    #[test]
    fn region_missing_on_a_day_drops_its_points() {
        let assignments = vec![assignment(0, "A"), assignment(1, "B")];
        let days = build_days(&assignments, &document().product);

        assert_eq!(days[0].rows_for_point(0).count(), 1);
        assert_eq!(days[1].rows_for_point(0).count(), 0);
        assert_eq!(days[1].rows_for_point(1).count(), 1);
        assert_eq!(days[1].rows[0].risk_level, 1);
    }

    #[test]
    fn co_occurring_phenomena_end_to_end() {
        let assignments = vec![assignment(0, "A")];
        let days = build_days(&assignments, &document().product);

        let row = &days[0].rows[0];
        let active: Vec<Phenomenon> = row.active_phenomena().collect();
        assert_eq!(active, vec![Phenomenon::Rain, Phenomenon::SnowOrIce]);
        assert_eq!(row.risk_level, 2);
        assert_eq!(days[0].rows.len(), 1);
    }

    #[test]
    fn mixed_colors_give_one_row_per_point() {
        let document = parse_document(json!({"product": {"periods": [{
            "echeance": "J",
            "timelaps": {"domain_ids": [
                {"domain_id": "11", "phenomenon_items": [
                    {"phenomenon_id": 1, "phenomenon_max_color_id": 1, "timelaps_items": [{}]},
                    {"phenomenon_id": 2, "phenomenon_max_color_id": 4, "timelaps_items": [{}, {}]},
                    {"phenomenon_id": 3, "phenomenon_max_color_id": 3, "timelaps_items": [{}]}
                ]}
            ]}
        }]}}))
        .unwrap();
        let assignments = vec![assignment(0, "11"), assignment(1, "11")];

        let days = build_days(&assignments, &document.product);

        assert_eq!(days[0].rows.len(), 2);
        for point_id in 0..2 {
            let rows: Vec<&DayRow> = days[0].rows_for_point(point_id).collect();
            assert_eq!(rows.len(), 1);
            let active: Vec<Phenomenon> = rows[0].active_phenomena().collect();
            assert_eq!(
                active,
                vec![Phenomenon::Wind, Phenomenon::Rain, Phenomenon::Thunderstorms]
            );
            assert_eq!(rows[0].risk_level, 3);
        }
    }

    #[test]
    fn unassigned_forecast_regions_are_ignored() {
        let days = build_days(&[assignment(0, "Z")], &document().product);
        assert!(days.iter().all(DayTable::is_empty));
    }

    #[test]
    fn malformed_document_is_an_error() {
        assert!(parse_document(json!({"product": {"periods": "nope"}})).is_err());
        assert!(parse_document(json!({})).is_err());
    }
}
