//! Seeded uniform sample points.
//!
//! All latitudes are drawn first, then all longitudes, from a single
//! `StdRng` seeded with [`SamplingConfig::seed`]. Changing that order
//! changes every generated point.

use rand::rngs::StdRng;
use rand::{Rng as _, SeedableRng as _};
use serde::{Deserialize, Serialize};
use vigilance_map_geography_models::{BoundingBox, GeneratedPoint};

/// Sampling parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplingConfig {
    pub seed: u64,
    /// Number of points to draw.
    pub count: usize,
    pub bounds: BoundingBox,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            count: 1000,
            bounds: BoundingBox::MAINLAND_FRANCE,
        }
    }
}

/// Draws `config.count` points uniformly inside `config.bounds`.
#[must_use]
pub fn generate(config: &SamplingConfig) -> Vec<GeneratedPoint> {
    let mut rng = StdRng::seed_from_u64(config.seed);
    let bounds = &config.bounds;

    let lats: Vec<f64> = (0..config.count)
        .map(|_| draw(&mut rng, bounds.min_lat, bounds.max_lat))
        .collect();
    let lons: Vec<f64> = (0..config.count)
        .map(|_| draw(&mut rng, bounds.min_lon, bounds.max_lon))
        .collect();

    log::debug!(
        "Generated {} sample points with seed {}",
        config.count,
        config.seed
    );

    lats.into_iter()
        .zip(lons)
        .map(|(latitude, longitude)| GeneratedPoint::new(latitude, longitude))
        .collect()
}

fn draw(rng: &mut StdRng, min: f64, max: f64) -> f64 {
    if min < max {
        rng.random_range(min..max)
    } else {
        min
    }
}
