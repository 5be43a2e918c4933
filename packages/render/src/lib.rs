#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Map output for per-day vigilance tables.
//!
//! Each [`DayTable`] becomes a `GeoJSON` `FeatureCollection` of points
//! (`map_J{n}.geojson`) and a self-contained Leaflet page embedding it
//! (`map_J{n}.html`). Colors and labels come from fixed lookup tables;
//! unrated points are drawn gray and labeled "unknown".

use std::path::{Path, PathBuf};

use geojson::{Feature, FeatureCollection, Geometry, JsonObject};
use serde_json::json;
use thiserror::Error;
use vigilance_map_forecast::{DayRow, DayTable};
use vigilance_map_forecast_models::{Phenomenon, SeverityColor};

const MAP_TEMPLATE: &str = include_str!("../templates/map.html");

/// Errors from writing map files.
#[derive(Debug, Error)]
pub enum RenderError {
    /// I/O error (file write).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Files written for one forecast day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedDay {
    pub day: usize,
    pub geojson_path: PathBuf,
    pub html_path: PathBuf,
}

/// Marker fill color for a severity color.
#[must_use]
pub const fn marker_color(color: SeverityColor) -> &'static str {
    match color {
        SeverityColor::Green => "green",
        SeverityColor::Yellow => "yellow",
        SeverityColor::Orange => "orange",
        SeverityColor::Red => "red",
        SeverityColor::Unrated => "gray",
    }
}

/// Popup label for a risk level, read against the 0-3 green..red scale.
#[must_use]
pub const fn risk_label(risk_level: i8) -> &'static str {
    match risk_level {
        0 => "green",
        1 => "yellow",
        2 => "orange",
        3 => "red",
        _ => "unknown",
    }
}

fn popup(row: &DayRow) -> String {
    let lines: String = Phenomenon::all()
        .iter()
        .map(|phenomenon| {
            let label = if row.phenomena[phenomenon.index()] {
                phenomenon.label()
            } else {
                "None"
            };
            format!("<br>Phenomenon {}: {label}", phenomenon.id())
        })
        .collect();

    format!("Risk Level: {}{lines}", risk_label(row.risk_level))
}

fn feature(row: &DayRow) -> Feature {
    let mut properties = JsonObject::new();
    properties.insert("id".to_string(), json!(row.point.id));
    properties.insert("regionId".to_string(), json!(row.region_id));
    properties.insert("regionName".to_string(), json!(row.region_name));
    for phenomenon in Phenomenon::all() {
        properties.insert(
            format!("phenomenon_{}", phenomenon.id()),
            json!(row.indicator(*phenomenon)),
        );
    }
    properties.insert("riskLevel".to_string(), json!(row.risk_level));
    properties.insert(
        "markerColor".to_string(),
        json!(marker_color(row.severity_color)),
    );
    properties.insert("popup".to_string(), json!(popup(row)));

    Feature {
        bbox: None,
        geometry: Some(Geometry::new(geojson::Value::Point(vec![
            row.point.longitude,
            row.point.latitude,
        ]))),
        id: None,
        properties: Some(properties),
        foreign_members: None,
    }
}

/// Builds the `FeatureCollection` for one day, one feature per row.
#[must_use]
pub fn feature_collection(table: &DayTable) -> FeatureCollection {
    FeatureCollection {
        bbox: None,
        features: table.rows.iter().map(feature).collect(),
        foreign_members: None,
    }
}

/// Renders the Leaflet page for one day.
///
/// # Errors
///
/// Returns [`RenderError::Json`] if the collection cannot be serialized.
pub fn html_page(table: &DayTable) -> Result<String, RenderError> {
    // `</` inside an inline script would close the tag early.
    let data = serde_json::to_string(&feature_collection(table))?.replace("</", "<\\/");
    let title = format!("Vigilance {}", table.label());

    Ok(MAP_TEMPLATE
        .replace("__TITLE__", &title)
        .replace("__GEOJSON__", &data))
}

/// Writes `map_J{n}.geojson` and `map_J{n}.html` into `out_dir`.
///
/// # Errors
///
/// Returns [`RenderError`] if the directory or files cannot be written.
pub fn render_day(table: &DayTable, out_dir: &Path) -> Result<RenderedDay, RenderError> {
    std::fs::create_dir_all(out_dir)?;

    let stem = format!("map_{}", table.label());
    let geojson_path = out_dir.join(format!("{stem}.geojson"));
    let html_path = out_dir.join(format!("{stem}.html"));

    std::fs::write(
        &geojson_path,
        serde_json::to_string(&feature_collection(table))?,
    )?;
    std::fs::write(&html_path, html_page(table)?)?;

    log::info!(
        "{}: wrote {} markers to {}",
        table.label(),
        table.rows.len(),
        html_path.display()
    );

    Ok(RenderedDay {
        day: table.day,
        geojson_path,
        html_path,
    })
}

/// Renders every day in order.
///
/// # Errors
///
/// Returns the first [`RenderError`] encountered.
pub fn render_all(tables: &[DayTable], out_dir: &Path) -> Result<Vec<RenderedDay>, RenderError> {
    tables
        .iter()
        .map(|table| render_day(table, out_dir))
        .collect()
}
