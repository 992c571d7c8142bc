//! Synthetic obstacle fields for demos and tests.

use crate::models::ObstacleRecord;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Parameters for a random field of ground-standing box obstacles.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldConfig {
    pub count: usize,
    /// Centers are drawn from [-extent_m, extent_m] on both axes.
    pub extent_m: f64,
    pub min_half_size_m: f64,
    pub max_half_size_m: f64,
    pub min_height_m: f64,
    pub max_height_m: f64,
    pub seed: u64,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            count: 200,
            extent_m: 400.0,
            min_half_size_m: 2.0,
            max_half_size_m: 10.0,
            min_height_m: 2.0,
            max_height_m: 120.0,
            seed: 42,
        }
    }
}

/// Generate a reproducible obstacle field. Equal configs give equal fields.
pub fn random_obstacle_field(config: &FieldConfig) -> Vec<ObstacleRecord> {
    let mut rng = StdRng::seed_from_u64(config.seed);
    let extent = config.extent_m.abs().max(1.0);
    let half_lo = config.min_half_size_m.max(0.5);
    let half_hi = config.max_half_size_m.max(half_lo);
    let height_lo = config.min_height_m.max(0.5);
    let height_hi = config.max_height_m.max(height_lo);

    (0..config.count)
        .map(|_| {
            let north = rng.random_range(-extent..=extent);
            let east = rng.random_range(-extent..=extent);
            let half_north = rng.random_range(half_lo..=half_hi);
            let half_east = rng.random_range(half_lo..=half_hi);
            let height = rng.random_range(height_lo..=height_hi);
            // Boxes stand on the ground: center altitude equals half height.
            let half_altitude = height / 2.0;
            ObstacleRecord::new(north, east, half_altitude, half_north, half_east, half_altitude)
        })
        .collect()
}

/// Three 4x4 blocks at (10,10), (10,30), (30,20), 15 m tall.
pub fn three_block_scenario() -> Vec<ObstacleRecord> {
    vec![
        ObstacleRecord::new(10.0, 10.0, 10.0, 2.0, 2.0, 5.0),
        ObstacleRecord::new(10.0, 30.0, 10.0, 2.0, 2.0, 5.0),
        ObstacleRecord::new(30.0, 20.0, 10.0, 2.0, 2.0, 5.0),
    ]
}

/// Three equal obstacles on one straight line.
pub fn collinear_scenario() -> Vec<ObstacleRecord> {
    vec![
        ObstacleRecord::new(10.0, 10.0, 10.0, 2.0, 2.0, 5.0),
        ObstacleRecord::new(20.0, 20.0, 10.0, 2.0, 2.0, 5.0),
        ObstacleRecord::new(30.0, 30.0, 10.0, 2.0, 2.0, 5.0),
    ]
}
