//! Core data models for obstacle grids and proximity graphs.

use serde::{Deserialize, Serialize};

/// Axis-aligned box obstacle as read from a colliders file.
///
/// Positions are world-frame meters; the half-extents are measured from the
/// center along each axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObstacleRecord {
    pub north: f64,
    pub east: f64,
    pub altitude: f64,
    pub half_north: f64,
    pub half_east: f64,
    pub half_altitude: f64,
}

impl ObstacleRecord {
    pub fn new(
        north: f64,
        east: f64,
        altitude: f64,
        half_north: f64,
        half_east: f64,
        half_altitude: f64,
    ) -> Self {
        Self {
            north,
            east,
            altitude,
            half_north,
            half_east,
            half_altitude,
        }
    }

    /// Build a record from one row of six values in colliders column order.
    pub fn from_row(row: [f64; 6]) -> Self {
        let [north, east, altitude, half_north, half_east, half_altitude] = row;
        Self::new(north, east, altitude, half_north, half_east, half_altitude)
    }

    /// Highest point of the obstacle.
    #[inline]
    pub fn top(&self) -> f64 {
        self.altitude + self.half_altitude
    }

    /// True when the obstacle reaches above a drone flying at `drone_altitude`.
    ///
    /// This single predicate gates both occupancy and Voronoi site selection.
    #[inline]
    pub fn blocks_altitude(&self, drone_altitude: f64) -> bool {
        self.top() > drone_altitude
    }

    /// Check that every value is finite and every half-extent is positive.
    pub fn validate(&self) -> Result<(), String> {
        let fields = [
            ("north", self.north),
            ("east", self.east),
            ("altitude", self.altitude),
            ("half_north", self.half_north),
            ("half_east", self.half_east),
            ("half_altitude", self.half_altitude),
        ];
        for (name, value) in fields {
            if !value.is_finite() {
                return Err(format!("{name} is not finite ({value})"));
            }
        }
        let extents = [
            ("half_north", self.half_north),
            ("half_east", self.half_east),
            ("half_altitude", self.half_altitude),
        ];
        for (name, value) in extents {
            if value <= 0.0 {
                return Err(format!("{name} must be positive, got {value}"));
            }
        }
        Ok(())
    }
}

/// A (north, east) position, in the grid-local shifted frame unless stated otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point2D {
    pub north: f64,
    pub east: f64,
}

impl Point2D {
    pub const fn new(north: f64, east: f64) -> Self {
        Self { north, east }
    }

    /// Truncate toward zero onto the integer cell lattice.
    #[inline]
    pub fn truncate(&self) -> GridCell {
        GridCell::new(self.north as i64, self.east as i64)
    }
}

/// Integer grid index. Signed because rasterized lines may leave the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridCell {
    pub row: i64,
    pub col: i64,
}

impl GridCell {
    pub const fn new(row: i64, col: i64) -> Self {
        Self { row, col }
    }
}

/// One end of a Voronoi ridge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RidgeVertex {
    /// Index into [`crate::proximity::ProximityGraph::vertices`].
    Finite(usize),
    /// The ridge runs off to infinity on this side.
    Infinite,
}

/// A Voronoi ridge before collision filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CandidateEdge {
    pub start: RidgeVertex,
    pub end: RidgeVertex,
}

impl CandidateEdge {
    pub const fn finite(start: usize, end: usize) -> Self {
        Self {
            start: RidgeVertex::Finite(start),
            end: RidgeVertex::Finite(end),
        }
    }

    /// Both vertex indices, or `None` when either end is unbounded.
    pub fn finite_endpoints(&self) -> Option<(usize, usize)> {
        match (self.start, self.end) {
            (RidgeVertex::Finite(a), RidgeVertex::Finite(b)) => Some((a, b)),
            _ => None,
        }
    }
}

/// A ridge that survived collision filtering, with its endpoints materialized.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AcceptedEdge {
    pub start: Point2D,
    pub end: Point2D,
}

impl AcceptedEdge {
    pub fn new(start: Point2D, end: Point2D) -> Self {
        Self { start, end }
    }

    pub fn length(&self) -> f64 {
        let dn = self.end.north - self.start.north;
        let de = self.end.east - self.start.east;
        (dn * dn + de * de).sqrt()
    }
}
