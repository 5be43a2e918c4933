#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Region resolution for sample points.
//!
//! Parses administrative boundaries from `GeoJSON`, resolves points to the
//! first region (in source order) whose polygon contains them, and assigns
//! sequential ids to the points that matched. Also hosts the seeded
//! sample point generator and the [`progress::ProgressCallback`] seam used
//! to report per-point progress.

pub mod assign;
pub mod progress;
pub mod region;
pub mod resolve;
pub mod sampling;

use thiserror::Error;

pub use assign::{AssignmentOutcome, assign};
pub use region::{RegionPolygon, RegionShape, parse_regions, unpack_ring};
pub use resolve::{RegionIndex, resolve};

/// Why a single region geometry could not be used.
///
/// These never abort a run: the affected region is kept as
/// [`RegionShape::Invalid`] and skipped during resolution.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeometryError {
    /// Feature has no `geometry` member, or it is `null`.
    #[error("feature has no geometry")]
    MissingGeometry,

    /// The coordinate array (or one of its rings) is empty.
    #[error("geometry has no coordinates")]
    EmptyCoordinates,

    /// A ring has fewer than three distinct vertices.
    #[error("ring has {count} distinct vertices, need at least 3")]
    TooFewVertices {
        /// Number of distinct vertices found.
        count: usize,
    },

    /// Geometry is neither a `Polygon` nor a `MultiPolygon`.
    #[error("unsupported geometry type: {0}")]
    UnsupportedType(String),

    /// Coordinates could not be read.
    #[error("geometry parse error: {message}")]
    Parse {
        /// Description of what went wrong.
        message: String,
    },
}

/// Errors that stop region resolution as a whole.
#[derive(Debug, Error)]
pub enum SpatialError {
    /// No regions were supplied, so no point can be classified.
    #[error("region polygon set is empty")]
    EmptyPolygonSet,

    /// The boundary document has no `features` array.
    #[error("boundary document has no features array")]
    MissingFeatures,
}
