//! Region boundaries parsed from a `GeoJSON` `FeatureCollection`.
//!
//! Geometry is read from the declared `type` when present. Sources that
//! omit the type get the first-branch fallback in [`unpack_ring`], which
//! only recovers the first ring of the first part: islands and holes of a
//! multi-part region are lost on that path.

use std::collections::BTreeSet;

use geo::{BoundingRect, Contains, Coord, LineString, MultiPolygon, Point, Polygon, Rect};
use serde_json::Value;

use crate::{GeometryError, SpatialError};

/// Parsed geometry of a region.
#[derive(Debug, Clone, PartialEq)]
pub enum RegionShape {
    /// A typed `Polygon`, holes included.
    Polygon(Polygon<f64>),
    /// A typed `MultiPolygon`, every part included.
    MultiPolygon(MultiPolygon<f64>),
    /// Exterior ring recovered from an untyped coordinate array.
    Unpacked(Polygon<f64>),
    /// Geometry that could not be used; skipped during resolution.
    Invalid {
        /// Why the geometry was rejected.
        reason: GeometryError,
    },
}

impl RegionShape {
    /// Parses a feature's `geometry` member, never failing: unusable
    /// geometry becomes [`RegionShape::Invalid`].
    #[must_use]
    pub fn from_geometry(geometry: Option<&Value>) -> Self {
        parse_geometry(geometry).unwrap_or_else(|reason| Self::Invalid { reason })
    }

    /// Strict containment: points on the boundary are outside.
    #[must_use]
    pub fn contains(&self, point: &Point<f64>) -> bool {
        match self {
            Self::Polygon(polygon) | Self::Unpacked(polygon) => polygon.contains(point),
            Self::MultiPolygon(multi) => multi.contains(point),
            Self::Invalid { .. } => false,
        }
    }

    #[must_use]
    pub fn bounding_rect(&self) -> Option<Rect<f64>> {
        match self {
            Self::Polygon(polygon) | Self::Unpacked(polygon) => polygon.bounding_rect(),
            Self::MultiPolygon(multi) => multi.bounding_rect(),
            Self::Invalid { .. } => None,
        }
    }

    #[must_use]
    pub const fn invalid_reason(&self) -> Option<&GeometryError> {
        match self {
            Self::Invalid { reason } => Some(reason),
            _ => None,
        }
    }

    #[must_use]
    pub const fn is_valid(&self) -> bool {
        !matches!(self, Self::Invalid { .. })
    }
}

/// A labeled administrative region.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionPolygon {
    /// Region code (e.g. "84").
    pub region_id: String,
    /// Region name (e.g. "Auvergne-Rhône-Alpes").
    pub region_name: String,
    pub shape: RegionShape,
}

impl RegionPolygon {
    /// Builds a single-ring region from `(lon, lat)` vertices.
    #[must_use]
    pub fn from_ring(
        region_id: impl Into<String>,
        region_name: impl Into<String>,
        ring: &[(f64, f64)],
    ) -> Self {
        let coords = ring.iter().map(|&(x, y)| Coord { x, y }).collect();
        let shape = polygon_from_ring(coords)
            .map_or_else(|reason| RegionShape::Invalid { reason }, RegionShape::Polygon);

        Self {
            region_id: region_id.into(),
            region_name: region_name.into(),
            shape,
        }
    }
}

/// Parses every feature of a boundary `FeatureCollection`.
///
/// Region id and name are read from the `id_key` and `name_key`
/// properties; numeric codes are accepted and stringified. Features with
/// unusable geometry or no id are kept as [`RegionShape::Invalid`] so that
/// source order is preserved.
///
/// # Errors
///
/// Returns [`SpatialError::MissingFeatures`] if the document has no
/// `features` array.
pub fn parse_regions(
    document: &Value,
    id_key: &str,
    name_key: &str,
) -> Result<Vec<RegionPolygon>, SpatialError> {
    let features = document
        .get("features")
        .and_then(Value::as_array)
        .ok_or(SpatialError::MissingFeatures)?;

    let regions: Vec<RegionPolygon> = features
        .iter()
        .enumerate()
        .map(|(i, feature)| {
            let properties = feature.get("properties");
            let region_id = properties
                .and_then(|p| p.get(id_key))
                .and_then(property_text);
            let region_name = properties
                .and_then(|p| p.get(name_key))
                .and_then(property_text)
                .unwrap_or_default();

            let shape = if region_id.is_some() {
                RegionShape::from_geometry(feature.get("geometry"))
            } else {
                RegionShape::Invalid {
                    reason: GeometryError::Parse {
                        message: format!("feature has no '{id_key}' property"),
                    },
                }
            };
            let region_id = region_id.unwrap_or_else(|| format!("#{i}"));

            if let Some(reason) = shape.invalid_reason() {
                log::warn!("Skipping region {region_id} ({region_name}): {reason}");
            }

            RegionPolygon {
                region_id,
                region_name,
                shape,
            }
        })
        .collect();

    log::info!(
        "Parsed {} regions ({} with usable geometry)",
        regions.len(),
        regions.iter().filter(|r| r.shape.is_valid()).count()
    );

    Ok(regions)
}

/// Unwraps an arbitrarily nested coordinate array down to a flat ring.
///
/// Descends into the first element for as long as that element is itself
/// an array of arrays, then reads the level reached as `(x, y)` pairs.
/// Only the first branch of a multi-part geometry is ever visited.
///
/// # Errors
///
/// Returns [`GeometryError`] if a level is empty or the innermost level
/// does not hold numeric pairs.
pub fn unpack_ring(coordinates: &Value) -> Result<Vec<Coord<f64>>, GeometryError> {
    let mut level = coordinates.as_array().ok_or_else(|| GeometryError::Parse {
        message: "coordinates must be an array".to_string(),
    })?;

    loop {
        let first = level.first().ok_or(GeometryError::EmptyCoordinates)?;
        match first.as_array() {
            Some(inner) if inner.is_empty() => return Err(GeometryError::EmptyCoordinates),
            Some(inner) if matches!(inner.first(), Some(Value::Array(_))) => level = inner,
            _ => break,
        }
    }

    level.iter().map(parse_position).collect()
}

fn parse_geometry(geometry: Option<&Value>) -> Result<RegionShape, GeometryError> {
    let geometry = geometry
        .filter(|g| !g.is_null())
        .ok_or(GeometryError::MissingGeometry)?;
    let coordinates = geometry
        .get("coordinates")
        .ok_or(GeometryError::EmptyCoordinates)?;

    match geometry.get("type").and_then(Value::as_str) {
        Some(kind) => parse_typed(geometry, coordinates, kind),
        None => Ok(RegionShape::Unpacked(polygon_from_ring(unpack_ring(
            coordinates,
        )?)?)),
    }
}

fn parse_typed(
    geometry: &Value,
    coordinates: &Value,
    kind: &str,
) -> Result<RegionShape, GeometryError> {
    if kind != "Polygon" && kind != "MultiPolygon" {
        return Err(GeometryError::UnsupportedType(kind.to_string()));
    }
    check_positions(coordinates)?;

    let geometry: geojson::Geometry =
        serde_json::from_value(geometry.clone()).map_err(|e| GeometryError::Parse {
            message: e.to_string(),
        })?;
    let geometry = geo::Geometry::<f64>::try_from(geometry).map_err(|e| GeometryError::Parse {
        message: e.to_string(),
    })?;

    match geometry {
        geo::Geometry::Polygon(polygon) => {
            check_exterior(&polygon)?;
            Ok(RegionShape::Polygon(polygon))
        }
        geo::Geometry::MultiPolygon(multi) => {
            if multi.0.is_empty() {
                return Err(GeometryError::EmptyCoordinates);
            }
            for polygon in &multi {
                check_exterior(polygon)?;
            }
            Ok(RegionShape::MultiPolygon(multi))
        }
        _ => Err(GeometryError::UnsupportedType(kind.to_string())),
    }
}

/// Walks a coordinate array and rejects empty levels, mixed levels and
/// positions with fewer than two numbers.
fn check_positions(value: &Value) -> Result<(), GeometryError> {
    let items = value.as_array().ok_or_else(|| GeometryError::Parse {
        message: "coordinates must be an array".to_string(),
    })?;
    let first = items.first().ok_or(GeometryError::EmptyCoordinates)?;

    if first.is_number() {
        parse_position(value).map(|_| ())
    } else {
        items.iter().try_for_each(|item| {
            if item.is_array() {
                check_positions(item)
            } else {
                Err(GeometryError::Parse {
                    message: "mixed coordinate nesting".to_string(),
                })
            }
        })
    }
}

fn parse_position(value: &Value) -> Result<Coord<f64>, GeometryError> {
    let pair = value.as_array().map(|items| {
        (
            items.first().and_then(Value::as_f64),
            items.get(1).and_then(Value::as_f64),
        )
    });

    match pair {
        Some((Some(x), Some(y))) => Ok(Coord { x, y }),
        _ => Err(GeometryError::Parse {
            message: format!("expected [x, y] position, got {value}"),
        }),
    }
}

fn polygon_from_ring(ring: Vec<Coord<f64>>) -> Result<Polygon<f64>, GeometryError> {
    let polygon = Polygon::new(LineString::from(ring), vec![]);
    check_exterior(&polygon)?;
    Ok(polygon)
}

fn check_exterior(polygon: &Polygon<f64>) -> Result<(), GeometryError> {
    let mut seen = BTreeSet::new();
    for coord in polygon.exterior() {
        seen.insert((coord.x.to_bits(), coord.y.to_bits()));
        if seen.len() >= 3 {
            return Ok(());
        }
    }
    Err(GeometryError::TooFewVertices { count: seen.len() })
}

fn property_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
