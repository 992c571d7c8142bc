//! Collision filtering of Voronoi ridges against the occupancy grid.

use crate::grid::OccupancyGrid;
use crate::models::{AcceptedEdge, GridCell, Point2D};
use crate::proximity::ProximityGraph;
use crate::raster::BresenhamLine;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Outcome of rasterizing one segment against the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "verdict", content = "cell")]
pub enum EdgeVerdict {
    Clear,
    /// First cell that fell outside the grid.
    OutOfBounds(GridCell),
    /// First cell that hit an obstacle.
    Occupied(GridCell),
}

impl EdgeVerdict {
    pub fn is_clear(&self) -> bool {
        matches!(self, EdgeVerdict::Clear)
    }
}

/// Walk the rasterized segment and report the first disqualifying cell.
///
/// Both endpoints lie on the path, so an endpoint outside the grid rejects the
/// segment without walking it. Otherwise bounds are tested before occupancy at
/// every cell and the walk stops at the first failure.
pub fn check_segment(grid: &OccupancyGrid, start: Point2D, end: Point2D) -> EdgeVerdict {
    let (first, last) = (start.truncate(), end.truncate());
    for cell in [first, last] {
        if !grid.contains(cell) {
            return EdgeVerdict::OutOfBounds(cell);
        }
    }
    for cell in BresenhamLine::new(first, last) {
        match grid.get(cell) {
            None => return EdgeVerdict::OutOfBounds(cell),
            Some(true) => return EdgeVerdict::Occupied(cell),
            Some(false) => {}
        }
    }
    EdgeVerdict::Clear
}

/// Per-run counters for the filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterStats {
    pub candidates: usize,
    /// Ridges with an end at infinity, dropped before rasterization.
    pub unbounded: usize,
    pub out_of_bounds: usize,
    pub occupied: usize,
    pub accepted: usize,
}

/// Accepted edges in ridge order, plus counters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterOutcome {
    pub edges: Vec<AcceptedEdge>,
    pub stats: FilterStats,
}

/// Keeps the ridges whose rasterized path stays inside free cells.
#[derive(Debug, Clone, Copy, Default)]
pub struct CollisionFilter {
    parallel: bool,
}

impl CollisionFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Evaluate ridges on the rayon pool. Output order and content are unchanged.
    pub fn parallel(mut self, enabled: bool) -> Self {
        self.parallel = enabled;
        self
    }

    pub fn filter(&self, grid: &OccupancyGrid, graph: &ProximityGraph) -> FilterOutcome {
        let mut stats = FilterStats {
            candidates: graph.ridges.len(),
            ..FilterStats::default()
        };

        let segments: Vec<(Point2D, Point2D)> = graph
            .ridges
            .iter()
            .filter_map(|ridge| {
                let endpoints = graph.endpoints(ridge);
                if endpoints.is_none() {
                    stats.unbounded += 1;
                }
                endpoints
            })
            .collect();

        let verdicts: Vec<EdgeVerdict> = if self.parallel {
            segments
                .par_iter()
                .map(|(start, end)| check_segment(grid, *start, *end))
                .collect()
        } else {
            segments
                .iter()
                .map(|(start, end)| check_segment(grid, *start, *end))
                .collect()
        };

        let mut edges = Vec::new();
        for ((start, end), verdict) in segments.iter().zip(verdicts) {
            match verdict {
                EdgeVerdict::Clear => edges.push(AcceptedEdge::new(*start, *end)),
                EdgeVerdict::OutOfBounds(_) => stats.out_of_bounds += 1,
                EdgeVerdict::Occupied(_) => stats.occupied += 1,
            }
        }
        stats.accepted = edges.len();

        tracing::debug!(
            candidates = stats.candidates,
            unbounded = stats.unbounded,
            out_of_bounds = stats.out_of_bounds,
            occupied = stats.occupied,
            accepted = stats.accepted,
            parallel = self.parallel,
            "ridges filtered"
        );

        FilterOutcome { edges, stats }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::CoordinateFrame;
    use crate::grid::GridBuilder;
    use crate::models::{CandidateEdge, ObstacleRecord, RidgeVertex};

    /// 20x20 grid with a 4x4 block at rows/cols 8..12, plus a low corner marker
    /// that only sizes the frame.
    fn grid_with_block() -> OccupancyGrid {
        let obstacles = vec![
            ObstacleRecord::new(10.0, 10.0, 10.0, 2.0, 2.0, 5.0),
            ObstacleRecord::new(1.0, 1.0, 0.0, 1.0, 1.0, 1.0),
            ObstacleRecord::new(19.0, 19.0, 0.0, 1.0, 1.0, 1.0),
        ];
        let frame = CoordinateFrame::from_obstacles(&obstacles).unwrap();
        GridBuilder::new(frame).build(&obstacles, 5.0).unwrap().grid
    }

    #[test]
    fn clear_segment_is_accepted() {
        let grid = grid_with_block();
        let verdict = check_segment(&grid, Point2D::new(1.5, 1.5), Point2D::new(1.5, 18.2));
        assert_eq!(verdict, EdgeVerdict::Clear);
    }

    #[test]
    fn segment_through_block_reports_first_hit() {
        let grid = grid_with_block();
        let verdict = check_segment(&grid, Point2D::new(10.0, 0.0), Point2D::new(10.0, 19.0));
        assert_eq!(verdict, EdgeVerdict::Occupied(GridCell::new(10, 8)));
    }

    #[test]
    fn bounds_are_checked_before_occupancy() {
        let grid = grid_with_block();
        let verdict = check_segment(&grid, Point2D::new(-1.5, 3.0), Point2D::new(5.0, 3.0));
        assert_eq!(verdict, EdgeVerdict::OutOfBounds(GridCell::new(-1, 3)));
        let verdict = check_segment(&grid, Point2D::new(3.0, 3.0), Point2D::new(3.0, 20.0));
        assert_eq!(verdict, EdgeVerdict::OutOfBounds(GridCell::new(3, 20)));
    }

    #[test]
    fn far_endpoint_is_rejected_without_walking() {
        let grid = grid_with_block();
        let verdict = check_segment(&grid, Point2D::new(12.0, 12.0), Point2D::new(12.0, -1e19));
        assert_eq!(verdict, EdgeVerdict::OutOfBounds(GridCell::new(12, i64::MIN)));
        let verdict = check_segment(&grid, Point2D::new(1e19, 3.0), Point2D::new(2.0, 3.0));
        assert_eq!(verdict, EdgeVerdict::OutOfBounds(GridCell::new(i64::MAX, 3)));
    }

    #[test]
    fn far_vertex_ridge_is_counted_out_of_bounds() {
        let grid = grid_with_block();
        let graph = ProximityGraph {
            vertices: vec![
                Point2D::new(2.0, 2.0),
                Point2D::new(6.0, -1.7592186044416e19),
                Point2D::new(2.0, 17.0),
            ],
            ridges: vec![CandidateEdge::finite(0, 1), CandidateEdge::finite(0, 2)],
        };
        let outcome = CollisionFilter::new().parallel(true).filter(&grid, &graph);
        assert_eq!(outcome.stats.out_of_bounds, 1);
        assert_eq!(
            outcome.edges,
            vec![AcceptedEdge::new(Point2D::new(2.0, 2.0), Point2D::new(2.0, 17.0))]
        );
    }

    #[test]
    fn small_negative_coordinates_truncate_into_the_grid() {
        let grid = grid_with_block();
        let verdict = check_segment(&grid, Point2D::new(-0.4, 2.0), Point2D::new(4.0, 2.0));
        assert_eq!(verdict, EdgeVerdict::Clear);
    }

    fn sample_graph() -> ProximityGraph {
        ProximityGraph {
            vertices: vec![
                Point2D::new(2.0, 2.0),
                Point2D::new(2.0, 17.0),
                Point2D::new(17.0, 17.0),
                Point2D::new(25.0, 3.0),
            ],
            ridges: vec![
                CandidateEdge::finite(0, 1),
                CandidateEdge {
                    start: RidgeVertex::Infinite,
                    end: RidgeVertex::Finite(1),
                },
                CandidateEdge::finite(0, 2),
                CandidateEdge::finite(1, 2),
                CandidateEdge::finite(3, 0),
            ],
        }
    }

    #[test]
    fn filter_keeps_order_and_counts_rejections() {
        let grid = grid_with_block();
        let outcome = CollisionFilter::new().filter(&grid, &sample_graph());
        assert_eq!(
            outcome.edges,
            vec![
                AcceptedEdge::new(Point2D::new(2.0, 2.0), Point2D::new(2.0, 17.0)),
                AcceptedEdge::new(Point2D::new(2.0, 17.0), Point2D::new(17.0, 17.0)),
            ]
        );
        assert_eq!(
            outcome.stats,
            FilterStats {
                candidates: 5,
                unbounded: 1,
                out_of_bounds: 1,
                occupied: 1,
                accepted: 2,
            }
        );
    }

    #[test]
    fn parallel_filter_matches_sequential() {
        let grid = grid_with_block();
        let graph = sample_graph();
        let sequential = CollisionFilter::new().filter(&grid, &graph);
        let parallel = CollisionFilter::new().parallel(true).filter(&grid, &graph);
        assert_eq!(sequential, parallel);
    }

    #[test]
    fn accepted_edges_keep_untruncated_endpoints() {
        let grid = grid_with_block();
        let graph = ProximityGraph {
            vertices: vec![Point2D::new(1.25, 1.75), Point2D::new(3.9, 6.6)],
            ridges: vec![CandidateEdge::finite(0, 1)],
        };
        let outcome = CollisionFilter::new().filter(&grid, &graph);
        assert_eq!(
            outcome.edges,
            vec![AcceptedEdge::new(
                Point2D::new(1.25, 1.75),
                Point2D::new(3.9, 6.6)
            )]
        );
    }
}
