//! Grid-local coordinate frame derived from obstacle extents.

use crate::error::{PlannerError, Result};
use crate::models::{ObstacleRecord, Point2D};
use serde::{Deserialize, Serialize};

/// Origin offset and size of the occupancy grid.
///
/// Grid index (0, 0) sits at world (north_min, east_min). Sizes are in whole cells.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoordinateFrame {
    pub north_min: f64,
    pub east_min: f64,
    pub north_size: usize,
    pub east_size: usize,
}

impl CoordinateFrame {
    /// Derive the frame from the padded bounding box of every obstacle.
    ///
    /// All obstacles contribute, regardless of altitude, so the grid size is
    /// independent of the drone altitude.
    pub fn from_obstacles(obstacles: &[ObstacleRecord]) -> Result<Self> {
        if obstacles.is_empty() {
            return Err(PlannerError::EmptyInput);
        }

        let mut north_lo = f64::INFINITY;
        let mut north_hi = f64::NEG_INFINITY;
        let mut east_lo = f64::INFINITY;
        let mut east_hi = f64::NEG_INFINITY;
        for obstacle in obstacles {
            north_lo = north_lo.min(obstacle.north - obstacle.half_north);
            north_hi = north_hi.max(obstacle.north + obstacle.half_north);
            east_lo = east_lo.min(obstacle.east - obstacle.half_east);
            east_hi = east_hi.max(obstacle.east + obstacle.half_east);
        }

        let north_min = north_lo.floor();
        let north_max = north_hi.ceil();
        let east_min = east_lo.floor();
        let east_max = east_hi.ceil();

        // Float-to-int casts saturate, so a NaN span yields 0 rather than panicking.
        let north_size = (north_max - north_min).ceil().max(0.0) as usize;
        let east_size = (east_max - east_min).ceil().max(0.0) as usize;

        Ok(Self {
            north_min,
            east_min,
            north_size,
            east_size,
        })
    }

    /// Number of cells in the frame.
    pub fn cell_count(&self) -> usize {
        self.north_size.saturating_mul(self.east_size)
    }

    /// Shift a world position into the grid-local frame.
    #[inline]
    pub fn to_local(&self, world: Point2D) -> Point2D {
        Point2D::new(world.north - self.north_min, world.east - self.east_min)
    }

    /// Shift a grid-local position back into world coordinates.
    #[inline]
    pub fn to_world(&self, local: Point2D) -> Point2D {
        Point2D::new(local.north + self.north_min, local.east + self.east_min)
    }

    /// Obstacle center in the grid-local frame.
    #[inline]
    pub fn local_center(&self, obstacle: &ObstacleRecord) -> Point2D {
        self.to_local(Point2D::new(obstacle.north, obstacle.east))
    }
}
