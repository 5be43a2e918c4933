//! End-to-end run: sample points, resolve regions, build day tables.
//!
//! Loading is async (remote documents); everything after that is a
//! synchronous transform in [`assemble`], which is what the tests drive.

use std::sync::Arc;

use thiserror::Error;
use vigilance_map_cli_utils::{MultiProgress, PointsProgress};
use vigilance_map_forecast::{DayTable, ForecastError, build_days, parse_document};
use vigilance_map_geography_models::GeneratedPoint;
use vigilance_map_source::{DataLocation, SourceError, build_client, load_json};
use vigilance_map_spatial::progress::ProgressCallback;
use vigilance_map_spatial::{AssignmentOutcome, SpatialError, assign, parse_regions, sampling};

use crate::config::PipelineConfig;

/// Anything that stops a pipeline run.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("source error: {0}")]
    Source(#[from] SourceError),

    #[error("region error: {0}")]
    Spatial(#[from] SpatialError),

    #[error("forecast error: {0}")]
    Forecast(#[from] ForecastError),
}

/// Everything the pipeline produces.
#[derive(Debug)]
pub struct PipelineOutput {
    pub assignment: AssignmentOutcome,
    /// One table per forecast day, J0 first.
    pub days: Vec<DayTable>,
}

/// Loads both documents, then runs [`assemble`].
///
/// # Errors
///
/// Returns [`PipelineError`] if either document cannot be loaded or
/// parsed, or if the boundary document has no regions.
pub async fn run(
    config: &PipelineConfig,
    multi: &MultiProgress,
) -> Result<PipelineOutput, PipelineError> {
    let client = build_client()?;

    let points = sampling::generate(&config.sampling);
    log::info!(
        "Generated {} sample points (seed {})",
        points.len(),
        config.sampling.seed
    );

    let regions = load_json(&client, &DataLocation::parse(&config.sources.regions)).await?;
    let forecast = load_json(&client, &DataLocation::parse(&config.sources.forecast)).await?;

    let progress = PointsProgress::attach(multi, "Resolving regions");
    assemble(config, &points, &regions, forecast, &progress)
}

/// Parses the documents and builds the per-day tables.
///
/// # Errors
///
/// Returns [`PipelineError`] if a document has the wrong shape or the
/// region set is empty.
pub fn assemble(
    config: &PipelineConfig,
    points: &[GeneratedPoint],
    regions: &serde_json::Value,
    forecast: serde_json::Value,
    progress: &Arc<dyn ProgressCallback>,
) -> Result<PipelineOutput, PipelineError> {
    let regions = parse_regions(
        regions,
        &config.sources.region_id_property,
        &config.sources.region_name_property,
    )?;
    let assignment = assign(points, &regions, progress)?;

    let document = parse_document(forecast)?;
    let days = build_days(&assignment.assignments, &document.product);

    Ok(PipelineOutput { assignment, days })
}
