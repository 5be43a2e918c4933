//! Resolves every sample point once and keeps only the matched ones.

use std::sync::Arc;

use vigilance_map_geography_models::{GeneratedPoint, RegionAssignment, SamplePoint};

use crate::SpatialError;
use crate::progress::ProgressCallback;
use crate::region::RegionPolygon;
use crate::resolve::RegionIndex;

/// Result of a region assignment run.
#[derive(Debug, Clone, PartialEq)]
pub struct AssignmentOutcome {
    /// Matched points, ids `0..n` in retention order.
    pub assignments: Vec<RegionAssignment>,
    /// Points that fell outside every region.
    pub unmatched: usize,
}

impl AssignmentOutcome {
    #[must_use]
    pub const fn matched(&self) -> usize {
        self.assignments.len()
    }
}

/// Assigns each point to the first region containing it.
///
/// Unmatched points are dropped. Retained points are renumbered
/// sequentially in the order they were retained, so ids are dense even
/// when most points miss.
///
/// # Errors
///
/// Returns [`SpatialError::EmptyPolygonSet`] if `polygons` is empty.
pub fn assign(
    points: &[GeneratedPoint],
    polygons: &[RegionPolygon],
    progress: &Arc<dyn ProgressCallback>,
) -> Result<AssignmentOutcome, SpatialError> {
    if polygons.is_empty() {
        return Err(SpatialError::EmptyPolygonSet);
    }

    let index = RegionIndex::build(polygons);
    if index.is_empty() {
        log::error!(
            "None of the {} regions has usable geometry; every point will be unmatched",
            polygons.len()
        );
    }

    progress.set_total(points.len() as u64);
    progress.set_message("Resolving regions".to_string());

    let mut assignments = Vec::with_capacity(points.len());
    let mut unmatched = 0;

    for point in points {
        if let Some(region) = index.resolve(point) {
            assignments.push(RegionAssignment {
                point: SamplePoint {
                    id: assignments.len(),
                    latitude: point.latitude,
                    longitude: point.longitude,
                },
                region_id: region.region_id.clone(),
                region_name: region.region_name.clone(),
            });
        } else {
            unmatched += 1;
        }
        progress.inc(1);
    }

    log::info!(
        "Assigned {} of {} points to a region ({unmatched} unmatched)",
        assignments.len(),
        points.len()
    );
    progress.finish(format!("{} points assigned", assignments.len()));

    Ok(AssignmentOutcome {
        assignments,
        unmatched,
    })
}
