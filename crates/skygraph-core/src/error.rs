//! Error types for grid and graph construction.

use thiserror::Error;

/// Terminal failures of a planning run. None of these produce partial output.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlannerError {
    /// No obstacles were supplied, so no coordinate frame exists.
    #[error("empty input: at least one obstacle is required to derive a grid frame")]
    EmptyInput,

    /// An obstacle record has a non-finite value or a non-positive half-extent.
    #[error("malformed obstacle at index {index}: {reason}")]
    MalformedObstacle { index: usize, reason: String },

    /// The surviving obstacle centers cannot form a 2D Voronoi diagram.
    #[error("degenerate input: {sites} site(s) cannot form a proximity graph ({reason})")]
    DegenerateInput { sites: usize, reason: String },

    /// The obstacles span more cells than a grid may hold.
    #[error("grid of {rows} x {cols} cells exceeds the limit of {max_cells} cells")]
    GridTooLarge {
        rows: usize,
        cols: usize,
        max_cells: usize,
    },

    /// The drone altitude is NaN or infinite.
    #[error("invalid drone altitude: {0}")]
    InvalidAltitude(f64),
}

pub type Result<T> = std::result::Result<T, PlannerError>;
