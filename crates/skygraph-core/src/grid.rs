//! Binary occupancy grid at a fixed flight altitude.

use crate::error::{PlannerError, Result};
use crate::frame::CoordinateFrame;
use crate::models::{GridCell, ObstacleRecord, Point2D};
use serde::{Deserialize, Serialize};

/// Largest grid [`GridBuilder::build`] will allocate, one byte per cell.
pub const MAX_GRID_CELLS: usize = 1 << 30;

/// Row-major occupied/free grid, `north_size` rows by `east_size` columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OccupancyGrid {
    frame: CoordinateFrame,
    cells: Vec<bool>,
}

impl OccupancyGrid {
    fn empty(frame: CoordinateFrame) -> Self {
        Self {
            frame,
            cells: vec![false; frame.cell_count()],
        }
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.frame.north_size
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.frame.east_size
    }

    /// Frame the grid was built from; add its offsets to get world coordinates.
    pub fn frame(&self) -> &CoordinateFrame {
        &self.frame
    }

    /// True when the cell lies inside the grid.
    #[inline]
    pub fn contains(&self, cell: GridCell) -> bool {
        cell.row >= 0
            && cell.col >= 0
            && (cell.row as u64) < self.rows() as u64
            && (cell.col as u64) < self.cols() as u64
    }

    /// Occupancy of an in-bounds cell. Out-of-bounds cells report `None`.
    #[inline]
    pub fn get(&self, cell: GridCell) -> Option<bool> {
        if !self.contains(cell) {
            return None;
        }
        let idx = cell.row as usize * self.cols() + cell.col as usize;
        self.cells.get(idx).copied()
    }

    /// Occupancy of an in-bounds cell; out-of-bounds counts as free.
    #[inline]
    pub fn is_occupied(&self, cell: GridCell) -> bool {
        self.get(cell).unwrap_or(false)
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|occupied| **occupied).count()
    }

    /// Iterate rows from north index 0 upward.
    pub fn row_slices(&self) -> impl Iterator<Item = &[bool]> {
        // chunks() panics on zero, and a zero-width grid has no cells anyway.
        self.cells.chunks(self.cols().max(1))
    }

    fn fill_rect(&mut self, rows: std::ops::Range<usize>, cols: std::ops::Range<usize>) {
        let width = self.cols();
        for row in rows {
            let base = row * width;
            for col in cols.clone() {
                self.cells[base + col] = true;
            }
        }
    }
}

/// Result of rasterizing obstacles: the grid plus the Voronoi sites.
#[derive(Debug, Clone)]
pub struct GridBuild {
    pub grid: OccupancyGrid,
    /// Shifted centers of the obstacles that block the drone altitude, in input order.
    pub centers: Vec<Point2D>,
}

/// Rasterizes obstacles that reach above the drone altitude.
#[derive(Debug, Clone, Copy)]
pub struct GridBuilder {
    frame: CoordinateFrame,
}

impl GridBuilder {
    pub fn new(frame: CoordinateFrame) -> Self {
        Self { frame }
    }

    /// Validate, allocate and fill the grid, collecting Voronoi sites on the way.
    ///
    /// Occupancy and site selection share [`ObstacleRecord::blocks_altitude`].
    pub fn build(&self, obstacles: &[ObstacleRecord], drone_altitude: f64) -> Result<GridBuild> {
        if !drone_altitude.is_finite() {
            return Err(PlannerError::InvalidAltitude(drone_altitude));
        }
        for (index, obstacle) in obstacles.iter().enumerate() {
            obstacle
                .validate()
                .map_err(|reason| PlannerError::MalformedObstacle { index, reason })?;
        }
        let (rows, cols) = (self.frame.north_size, self.frame.east_size);
        if rows.checked_mul(cols).map_or(true, |cells| cells > MAX_GRID_CELLS) {
            return Err(PlannerError::GridTooLarge {
                rows,
                cols,
                max_cells: MAX_GRID_CELLS,
            });
        }

        let mut grid = OccupancyGrid::empty(self.frame);
        let mut centers = Vec::new();
        let mut skipped = 0usize;

        for obstacle in obstacles {
            if !obstacle.blocks_altitude(drone_altitude) {
                skipped += 1;
                continue;
            }
            let rows = self.span(
                obstacle.north - obstacle.half_north - self.frame.north_min,
                obstacle.north + obstacle.half_north - self.frame.north_min,
                grid.rows(),
            );
            let cols = self.span(
                obstacle.east - obstacle.half_east - self.frame.east_min,
                obstacle.east + obstacle.half_east - self.frame.east_min,
                grid.cols(),
            );
            grid.fill_rect(rows, cols);
            centers.push(self.frame.local_center(obstacle));
        }

        tracing::debug!(
            rows = grid.rows(),
            cols = grid.cols(),
            blocking = centers.len(),
            skipped,
            "occupancy grid built"
        );

        Ok(GridBuild { grid, centers })
    }

    /// Half-open cell range for a shifted interval, truncated toward zero and
    /// clamped to the grid. Reversed bounds produce an empty range.
    fn span(&self, lo: f64, hi: f64, limit: usize) -> std::ops::Range<usize> {
        let start = (lo as i64).clamp(0, limit as i64) as usize;
        let end = (hi as i64).clamp(0, limit as i64) as usize;
        start..end.max(start)
    }
}
