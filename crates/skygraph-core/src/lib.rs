pub mod collision;
pub mod error;
pub mod frame;
pub mod grid;
pub mod ingest;
pub mod models;
pub mod pipeline;
pub mod proximity;
pub mod raster;
pub mod render;
pub mod scenario;

pub use collision::{check_segment, CollisionFilter, EdgeVerdict, FilterOutcome, FilterStats};
pub use error::{PlannerError, Result};
pub use frame::CoordinateFrame;
pub use grid::{GridBuild, GridBuilder, OccupancyGrid, MAX_GRID_CELLS};
pub use ingest::{
    load_colliders, parse_colliders, write_colliders, ColliderFile, HomePosition, IngestError,
    DEFAULT_SKIP_ROWS,
};
pub use models::{AcceptedEdge, CandidateEdge, GridCell, ObstacleRecord, Point2D, RidgeVertex};
pub use pipeline::{create_grid_and_edges, GridGraph, Pipeline, PlannerConfig};
pub use proximity::{ProximityGraph, ProximityGraphSource, SpadeVoronoi};
pub use raster::{cells_along_segment, BresenhamLine};
pub use render::{render_svg, SvgStyle};
pub use scenario::{collinear_scenario, random_obstacle_field, three_block_scenario, FieldConfig};
