#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Sample point and region assignment types.
//!
//! Points are generated without an identifier and only receive one once
//! they have been resolved to a region, so that downstream joins work on
//! a dense `0..n` index.

use serde::{Deserialize, Serialize};

/// A sample point before region resolution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedPoint {
    /// Latitude (WGS84).
    pub latitude: f64,
    /// Longitude (WGS84).
    pub longitude: f64,
}

impl GeneratedPoint {
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// A sample point that resolved to a region and was given a sequential id.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SamplePoint {
    /// Sequential id, assigned in retention order starting at 0.
    pub id: usize,
    /// Latitude (WGS84).
    pub latitude: f64,
    /// Longitude (WGS84).
    pub longitude: f64,
}

/// One retained point together with the region that contains it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionAssignment {
    /// The resolved point.
    pub point: SamplePoint,
    /// Region code from the boundary source (e.g. "84").
    pub region_id: String,
    /// Human-readable region name (e.g. "Auvergne-Rhône-Alpes").
    pub region_name: String,
}

impl RegionAssignment {
    #[must_use]
    pub const fn point_id(&self) -> usize {
        self.point.id
    }
}

/// Inclusive latitude/longitude bounds used for point sampling.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

impl BoundingBox {
    /// Mainland France, including Corsica.
    pub const MAINLAND_FRANCE: Self = Self {
        min_lat: 41.333,
        max_lat: 51.124,
        min_lon: -5.5,
        max_lon: 9.662,
    };

    /// Whether `point` falls inside these bounds (edges included).
    #[must_use]
    pub fn contains(&self, point: &GeneratedPoint) -> bool {
        (self.min_lat..=self.max_lat).contains(&point.latitude)
            && (self.min_lon..=self.max_lon).contains(&point.longitude)
    }
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::MAINLAND_FRANCE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mainland_france_contains_paris() {
        let paris = GeneratedPoint::new(48.8566, 2.3522);
        assert!(BoundingBox::MAINLAND_FRANCE.contains(&paris));
    }

    #[test]
    fn mainland_france_excludes_london() {
        let london = GeneratedPoint::new(51.5072, -0.1276);
        assert!(!BoundingBox::MAINLAND_FRANCE.contains(&london));
    }

    #[test]
    fn assignment_serializes_camel_case() {
        let assignment = RegionAssignment {
            point: SamplePoint {
                id: 3,
                latitude: 45.0,
                longitude: 4.0,
            },
            region_id: "84".to_string(),
            region_name: "Auvergne-Rhône-Alpes".to_string(),
        };
        let json = serde_json::to_value(&assignment).unwrap();
        assert_eq!(json["regionId"], "84");
        assert_eq!(json["point"]["id"], 3);
        assert_eq!(assignment.point_id(), 3);
    }
}
