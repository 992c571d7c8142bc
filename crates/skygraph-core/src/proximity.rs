//! Voronoi proximity graphs over obstacle centers.
//!
//! The diagram itself is an injected capability: anything implementing
//! [`ProximityGraphSource`] can feed the collision filter. [`SpadeVoronoi`] is
//! the default, derived from a Delaunay triangulation:
//!
//! - every inner triangle contributes one Voronoi vertex (its circumcenter)
//! - every triangulation edge is dual to one ridge joining the circumcenters
//!   of the two faces it separates
//! - a side that borders the outer face runs to infinity

use crate::error::{PlannerError, Result};
use crate::models::{CandidateEdge, Point2D, RidgeVertex};
use serde::{Deserialize, Serialize};
use spade::{DelaunayTriangulation, Point2, Triangulation};
use std::collections::HashMap;

/// Vertices and ridges of one Voronoi diagram.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProximityGraph {
    pub vertices: Vec<Point2D>,
    pub ridges: Vec<CandidateEdge>,
}

impl ProximityGraph {
    /// Resolve a ridge to its two endpoints. `None` for unbounded ridges or
    /// indices that do not belong to this diagram.
    pub fn endpoints(&self, ridge: &CandidateEdge) -> Option<(Point2D, Point2D)> {
        let (a, b) = ridge.finite_endpoints()?;
        Some((*self.vertices.get(a)?, *self.vertices.get(b)?))
    }

    pub fn finite_ridge_count(&self) -> usize {
        self.ridges
            .iter()
            .filter(|ridge| ridge.finite_endpoints().is_some())
            .count()
    }
}

/// Computes a Voronoi diagram over a set of 2D sites.
pub trait ProximityGraphSource: Send + Sync {
    /// Build the diagram. Fewer than three distinct or all-collinear sites must
    /// fail with [`PlannerError::DegenerateInput`].
    fn diagram(&self, sites: &[Point2D]) -> Result<ProximityGraph>;
}

impl<T: ProximityGraphSource + ?Sized> ProximityGraphSource for &T {
    fn diagram(&self, sites: &[Point2D]) -> Result<ProximityGraph> {
        (**self).diagram(sites)
    }
}

/// Voronoi diagram backed by `spade`'s Delaunay triangulation.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpadeVoronoi;

impl SpadeVoronoi {
    pub fn new() -> Self {
        Self
    }
}

fn degenerate(sites: usize, reason: impl Into<String>) -> PlannerError {
    PlannerError::DegenerateInput {
        sites,
        reason: reason.into(),
    }
}

impl ProximityGraphSource for SpadeVoronoi {
    fn diagram(&self, sites: &[Point2D]) -> Result<ProximityGraph> {
        if sites.len() < 3 {
            return Err(degenerate(sites.len(), "need at least three sites"));
        }

        let mut triangulation: DelaunayTriangulation<Point2<f64>> = DelaunayTriangulation::new();
        for site in sites {
            triangulation
                .insert(Point2::new(site.north, site.east))
                .map_err(|err| {
                    degenerate(
                        sites.len(),
                        format!(
                            "site ({}, {}) rejected by triangulation: {:?}",
                            site.north, site.east, err
                        ),
                    )
                })?;
        }

        if triangulation.num_vertices() < 3 {
            return Err(degenerate(
                sites.len(),
                format!(
                    "only {} distinct site(s)",
                    triangulation.num_vertices()
                ),
            ));
        }
        if triangulation.num_inner_faces() == 0 {
            return Err(degenerate(sites.len(), "all sites are collinear"));
        }

        let mut vertices = Vec::with_capacity(triangulation.num_inner_faces());
        let mut vertex_of_face = HashMap::with_capacity(triangulation.num_inner_faces());
        for face in triangulation.inner_faces() {
            let center = face.circumcenter();
            vertex_of_face.insert(face.fix().index(), vertices.len());
            vertices.push(Point2D::new(center.x, center.y));
        }

        let resolve = |face: Option<usize>| -> RidgeVertex {
            face.and_then(|index| vertex_of_face.get(&index).copied())
                .map(RidgeVertex::Finite)
                .unwrap_or(RidgeVertex::Infinite)
        };

        let mut ridges = Vec::with_capacity(triangulation.num_undirected_edges());
        for edge in triangulation.undirected_edges() {
            let directed = edge.as_directed();
            let left = directed.face().as_inner().map(|face| face.fix().index());
            let right = directed.rev().face().as_inner().map(|face| face.fix().index());
            ridges.push(CandidateEdge {
                start: resolve(left),
                end: resolve(right),
            });
        }

        tracing::debug!(
            sites = triangulation.num_vertices(),
            vertices = vertices.len(),
            ridges = ridges.len(),
            "voronoi diagram computed"
        );

        Ok(ProximityGraph { vertices, ridges })
    }
}
