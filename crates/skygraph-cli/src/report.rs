//! JSON summary of a graph build.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use skygraph_core::{AcceptedEdge, FilterStats, GridGraph, HomePosition};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridSummary {
    pub rows: usize,
    pub cols: usize,
    pub north_min: f64,
    pub east_min: f64,
    pub occupied_cells: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphReport {
    pub generated_at: DateTime<Utc>,
    pub input: String,
    pub drone_altitude: f64,
    pub home: Option<HomePosition>,
    pub grid: GridSummary,
    pub stats: FilterStats,
    /// Edges in the grid-local frame; add `grid.north_min`/`grid.east_min` for world.
    pub edges: Vec<AcceptedEdge>,
}

impl GraphReport {
    pub fn new(
        input: impl Into<String>,
        drone_altitude: f64,
        home: Option<HomePosition>,
        graph: &GridGraph,
    ) -> Self {
        let frame = graph.frame();
        Self {
            generated_at: Utc::now(),
            input: input.into(),
            drone_altitude,
            home,
            grid: GridSummary {
                rows: graph.grid.rows(),
                cols: graph.grid.cols(),
                north_min: frame.north_min,
                east_min: frame.east_min,
                occupied_cells: graph.grid.occupied_count(),
            },
            stats: graph.stats,
            edges: graph.edges.clone(),
        }
    }
}
