//! Flattens one forecast period into [`PhenomenonRecord`]s.
//!
//! Each time window of a phenomenon yields its own record, but only the
//! region, phenomenon and max color survive, so a phenomenon spanning
//! several windows appears several times. Duplicates are collapsed by the
//! encoder.

use vigilance_map_forecast_models::payload::ForecastPeriod;
use vigilance_map_forecast_models::{Phenomenon, PhenomenonRecord, SeverityColor};

/// Builds the flat record list for one period, preserving multiplicity.
///
/// Phenomena with an id outside 1-9 or a color outside 0-4 are skipped
/// with a warning. Phenomena with no time windows produce no records.
#[must_use]
pub fn build(period: &ForecastPeriod) -> Vec<PhenomenonRecord> {
    let mut records = Vec::new();

    for domain in &period.timelaps.domain_ids {
        let region_id = domain.domain_id.to_string();

        for item in &domain.phenomenon_items {
            let phenomenon = match item
                .phenomenon_id
                .as_i64()
                .map(Phenomenon::from_id)
            {
                Some(Ok(p)) => p,
                Some(Err(e)) => {
                    log::warn!("Region {region_id}: {e}, skipping");
                    continue;
                }
                None => {
                    log::warn!(
                        "Region {region_id}: non-numeric phenomenon id '{}', skipping",
                        item.phenomenon_id
                    );
                    continue;
                }
            };

            let severity_color = match item
                .phenomenon_max_color_id
                .as_i64()
                .map(SeverityColor::from_value)
            {
                Some(Ok(c)) => c,
                Some(Err(e)) => {
                    log::warn!("Region {region_id}, {phenomenon}: {e}, skipping");
                    continue;
                }
                None => {
                    log::warn!(
                        "Region {region_id}, {phenomenon}: non-numeric color '{}', skipping",
                        item.phenomenon_max_color_id
                    );
                    continue;
                }
            };

            if item.timelaps_items.is_empty() {
                log::debug!("Region {region_id}, {phenomenon}: no time windows");
            }

            records.extend(item.timelaps_items.iter().map(|_| PhenomenonRecord {
                region_id: region_id.clone(),
                phenomenon,
                severity_color,
            }));
        }
    }

    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn period(domains: serde_json::Value) -> ForecastPeriod {
        serde_json::from_value(json!({
            "echeance": "J",
            "timelaps": { "domain_ids": domains }
        }))
        .unwrap()
    }

    fn window() -> serde_json::Value {
        json!({"begin_time": "2023-06-15T00:00:00Z", "end_time": "2023-06-16T00:00:00Z", "color_id": 1})
    }

    #[test]
    fn one_record_per_time_window() {
        let period = period(json!([{
            "domain_id": "84",
            "phenomenon_items": [
                {"phenomenon_id": "3", "phenomenon_max_color_id": 2, "timelaps_items": [window(), window(), window()]},
                {"phenomenon_id": 1, "phenomenon_max_color_id": 1, "timelaps_items": [window()]}
            ]
        }]));

        let records = build(&period);
        assert_eq!(records.len(), 4);
        assert!(records[..3].iter().all(|r| r.phenomenon == Phenomenon::Thunderstorms
            && r.severity_color == SeverityColor::Yellow
            && r.region_id == "84"));
        assert_eq!(records[3].phenomenon, Phenomenon::Wind);
    }

    #[test]
    fn numeric_domain_ids_are_stringified() {
        let period = period(json!([{
            "domain_id": 11,
            "phenomenon_items": [
                {"phenomenon_id": "2", "phenomenon_max_color_id": 0, "timelaps_items": [window()]}
            ]
        }]));
        assert_eq!(build(&period)[0].region_id, "11");
    }

    #[test]
    fn out_of_range_codes_are_skipped() {
        let period = period(json!([{
            "domain_id": "84",
            "phenomenon_items": [
                {"phenomenon_id": "12", "phenomenon_max_color_id": 1, "timelaps_items": [window()]},
                {"phenomenon_id": "4", "phenomenon_max_color_id": 5, "timelaps_items": [window()]},
                {"phenomenon_id": "x", "phenomenon_max_color_id": 1, "timelaps_items": [window()]},
                {"phenomenon_id": "5", "phenomenon_max_color_id": "3", "timelaps_items": [window()]}
            ]
        }]));

        let records = build(&period);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].phenomenon, Phenomenon::SnowOrIce);
        assert_eq!(records[0].severity_color, SeverityColor::Orange);
    }

    #[test]
    fn red_alerts_are_kept() {
        let period = period(json!([{
            "domain_id": "11",
            "phenomenon_items": [
                {"phenomenon_id": "3", "phenomenon_max_color_id": 4, "timelaps_items": [window()]}
            ]
        }]));

        let records = build(&period);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].severity_color, SeverityColor::Red);
        assert_eq!(records[0].severity_color.risk_level(), 3);
    }

    #[test]
    fn phenomenon_without_windows_yields_nothing() {
        let period = period(json!([{
            "domain_id": "84",
            "phenomenon_items": [
                {"phenomenon_id": "6", "phenomenon_max_color_id": 2, "timelaps_items": []}
            ]
        }]));
        assert!(build(&period).is_empty());
    }
}
