#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Per-day risk tables.
//!
//! For every forecast period the vigilance payload is flattened into
//! [`PhenomenonRecord`]s ([`builder`]), inner-joined to the region
//! assignments on region code ([`join`]), and one-hot encoded into a
//! [`DayTable`] ([`encode`]). [`day_series`] drives the three stages for
//! each day in J order.
//!
//! [`PhenomenonRecord`]: vigilance_map_forecast_models::PhenomenonRecord

pub mod builder;
pub mod day_series;
pub mod encode;
pub mod join;

use serde::Serialize;
use thiserror::Error;
use vigilance_map_forecast_models::{PHENOMENON_COUNT, Phenomenon, SeverityColor};
use vigilance_map_geography_models::SamplePoint;

pub use builder::build;
pub use day_series::{build_day, build_days, parse_document};
pub use encode::encode;
pub use join::{JoinedRow, join};

/// Errors from reading a forecast document.
#[derive(Debug, Error)]
pub enum ForecastError {
    /// The document does not match the vigilance payload shape.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// One point on one forecast day.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayRow {
    pub point: SamplePoint,
    pub region_id: String,
    pub region_name: String,
    /// Indicator per phenomenon, indexed by [`Phenomenon::index`].
    pub phenomena: [bool; PHENOMENON_COUNT],
    /// Highest color among the point's phenomena that day.
    pub severity_color: SeverityColor,
    /// Color code shifted down by one: `-1` (unrated) to `3` (red).
    pub risk_level: i8,
}

impl DayRow {
    /// `1` if the phenomenon is active for this row, else `0`.
    #[must_use]
    pub const fn indicator(&self, phenomenon: Phenomenon) -> u8 {
        if self.phenomena[phenomenon.index()] {
            1
        } else {
            0
        }
    }

    /// Active phenomena in id order.
    pub fn active_phenomena(&self) -> impl Iterator<Item = Phenomenon> + '_ {
        Phenomenon::all()
            .iter()
            .copied()
            .filter(|p| self.phenomena[p.index()])
    }
}

/// All rows for one forecast day.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayTable {
    /// Day offset: 0 for today (J0), 1 for tomorrow (J1), ...
    pub day: usize,
    pub rows: Vec<DayRow>,
}

impl DayTable {
    /// `"J0"`, `"J1"`, ...
    #[must_use]
    pub fn label(&self) -> String {
        format!("J{}", self.day)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of distinct points present on this day.
    #[must_use]
    pub fn point_count(&self) -> usize {
        let mut ids: Vec<usize> = self.rows.iter().map(|r| r.point.id).collect();
        ids.sort_unstable();
        ids.dedup();
        ids.len()
    }

    /// Rows belonging to one point.
    pub fn rows_for_point(&self, point_id: usize) -> impl Iterator<Item = &DayRow> {
        self.rows.iter().filter(move |r| r.point.id == point_id)
    }
}
