//! Point-to-region resolution.
//!
//! [`resolve`] is the reference linear scan. [`RegionIndex`] answers the
//! same question through an R-tree and is what assignment uses; both pick
//! the earliest region in source order when polygons overlap.

use geo::Point;
use rstar::{AABB, RTree, RTreeObject};
use vigilance_map_geography_models::GeneratedPoint;

use crate::region::RegionPolygon;

/// Returns the first region, in input order, whose shape contains `point`.
///
/// Regions with invalid geometry are skipped.
#[must_use]
pub fn resolve<'a>(
    point: &GeneratedPoint,
    polygons: &'a [RegionPolygon],
) -> Option<&'a RegionPolygon> {
    let query = Point::new(point.longitude, point.latitude);

    polygons.iter().find(|region| {
        if let Some(reason) = region.shape.invalid_reason() {
            log::debug!("Skipping region {}: {reason}", region.region_id);
            return false;
        }
        region.shape.contains(&query)
    })
}

/// Bounding box of one region, tagged with its position in the source.
struct IndexEntry {
    order: usize,
    envelope: AABB<[f64; 2]>,
}

impl RTreeObject for IndexEntry {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        self.envelope
    }
}

/// R-tree over region bounding boxes.
///
/// Borrows the region slice; the tree only stores envelopes and source
/// positions.
pub struct RegionIndex<'a> {
    regions: &'a [RegionPolygon],
    tree: RTree<IndexEntry>,
}

impl<'a> RegionIndex<'a> {
    /// Indexes every region with usable geometry.
    #[must_use]
    pub fn build(regions: &'a [RegionPolygon]) -> Self {
        let entries: Vec<IndexEntry> = regions
            .iter()
            .enumerate()
            .filter_map(|(order, region)| {
                let rect = region.shape.bounding_rect()?;
                Some(IndexEntry {
                    order,
                    envelope: AABB::from_corners(
                        [rect.min().x, rect.min().y],
                        [rect.max().x, rect.max().y],
                    ),
                })
            })
            .collect();

        let skipped = regions.len() - entries.len();
        if skipped > 0 {
            log::warn!("{skipped} of {} regions have no usable geometry", regions.len());
        }

        Self {
            regions,
            tree: RTree::bulk_load(entries),
        }
    }

    /// Number of indexed (valid) regions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tree.size()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }

    /// Same answer as [`resolve`]: among candidates whose polygon contains
    /// the point, the lowest source position wins.
    #[must_use]
    pub fn resolve(&self, point: &GeneratedPoint) -> Option<&'a RegionPolygon> {
        let query = Point::new(point.longitude, point.latitude);
        let envelope = AABB::from_point([point.longitude, point.latitude]);
        let regions = self.regions;

        self.tree
            .locate_in_envelope_intersecting(&envelope)
            .filter(|entry| regions[entry.order].shape.contains(&query))
            .map(|entry| entry.order)
            .min()
            .map(|order| &regions[order])
    }
}
