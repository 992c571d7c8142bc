//! skygraph CLI - command line tools around the grid/graph builder.
//!
//! Binaries:
//! - build_graph: colliders file to occupancy grid and collision-free edges
//! - generate_colliders: seeded synthetic colliders file

pub mod config;
pub mod logging;
pub mod report;

pub use config::Config;
pub use logging::init_tracing;
pub use report::{GraphReport, GridSummary};
