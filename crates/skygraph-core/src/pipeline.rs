//! End-to-end grid and graph construction for one flight altitude.

use crate::collision::{CollisionFilter, FilterStats};
use crate::error::Result;
use crate::frame::CoordinateFrame;
use crate::grid::{GridBuild, GridBuilder, OccupancyGrid};
use crate::models::{AcceptedEdge, ObstacleRecord, Point2D};
use crate::proximity::{ProximityGraphSource, SpadeVoronoi};
use serde::{Deserialize, Serialize};

/// Tunables for a planning run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlannerConfig {
    /// Flight altitude; obstacles whose top is above it are blocking.
    pub drone_altitude: f64,
    /// Filter ridges on the rayon pool.
    #[serde(default)]
    pub parallel_filter: bool,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            drone_altitude: 5.0,
            parallel_filter: false,
        }
    }
}

/// Output of one run: the grid and the collision-free edges in its frame.
#[derive(Debug, Clone)]
pub struct GridGraph {
    pub grid: OccupancyGrid,
    pub edges: Vec<AcceptedEdge>,
    /// Voronoi sites (shifted centers of blocking obstacles).
    pub sites: Vec<Point2D>,
    pub stats: FilterStats,
}

impl GridGraph {
    pub fn frame(&self) -> &CoordinateFrame {
        self.grid.frame()
    }

    /// Accepted edges translated back into world coordinates.
    pub fn world_edges(&self) -> Vec<AcceptedEdge> {
        let frame = self.grid.frame();
        self.edges
            .iter()
            .map(|edge| AcceptedEdge::new(frame.to_world(edge.start), frame.to_world(edge.end)))
            .collect()
    }
}

/// CoordinateFrame → GridBuilder → ProximityGraphSource → CollisionFilter.
pub struct Pipeline<S> {
    source: S,
    config: PlannerConfig,
}

impl Pipeline<SpadeVoronoi> {
    /// Pipeline using the default Voronoi source.
    pub fn with_config(config: PlannerConfig) -> Self {
        Self::new(SpadeVoronoi::new(), config)
    }
}

impl<S: ProximityGraphSource> Pipeline<S> {
    pub fn new(source: S, config: PlannerConfig) -> Self {
        Self { source, config }
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Run the whole pipeline. Any failure aborts the run with no partial output.
    pub fn run(&self, obstacles: &[ObstacleRecord]) -> Result<GridGraph> {
        let span = tracing::info_span!(
            "grid_graph",
            obstacles = obstacles.len(),
            altitude = self.config.drone_altitude
        );
        let _enter = span.enter();

        let frame = CoordinateFrame::from_obstacles(obstacles)?;
        tracing::debug!(
            north_min = frame.north_min,
            east_min = frame.east_min,
            north_size = frame.north_size,
            east_size = frame.east_size,
            "coordinate frame derived"
        );

        let GridBuild { grid, centers } =
            GridBuilder::new(frame).build(obstacles, self.config.drone_altitude)?;

        let graph = self.source.diagram(&centers).map_err(|err| {
            tracing::warn!("proximity graph failed: {}", err);
            err
        })?;
        tracing::debug!(
            sites = centers.len(),
            vertices = graph.vertices.len(),
            ridges = graph.ridges.len(),
            finite_ridges = graph.finite_ridge_count(),
            "proximity graph ready"
        );

        let outcome = CollisionFilter::new()
            .parallel(self.config.parallel_filter)
            .filter(&grid, &graph);

        tracing::info!(
            occupied = grid.occupied_count(),
            candidates = outcome.stats.candidates,
            accepted = outcome.stats.accepted,
            "collision-free graph built"
        );

        Ok(GridGraph {
            grid,
            edges: outcome.edges,
            sites: centers,
            stats: outcome.stats,
        })
    }
}

/// Build the occupancy grid and collision-free Voronoi edges for one altitude.
pub fn create_grid_and_edges(
    obstacles: &[ObstacleRecord],
    drone_altitude: f64,
) -> Result<(OccupancyGrid, Vec<AcceptedEdge>)> {
    let config = PlannerConfig {
        drone_altitude,
        ..PlannerConfig::default()
    };
    let GridGraph { grid, edges, .. } = Pipeline::with_config(config).run(obstacles)?;
    Ok((grid, edges))
}
