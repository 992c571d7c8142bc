//! Build the collision-free Voronoi graph for a colliders file.

use anyhow::Context;
use clap::Parser;
use skygraph_cli::{init_tracing, Config, GraphReport};
use skygraph_core::{load_colliders, render_svg, Pipeline, PlannerConfig, SvgStyle};
use std::fs;
use std::path::PathBuf;

/// Rasterize obstacles at one altitude and keep the Voronoi edges that avoid them
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Colliders file
    #[arg(long, default_value = "colliders.csv")]
    input: PathBuf,

    /// Drone altitude in meters [env: SKYGRAPH_ALTITUDE, default 5]
    #[arg(long, allow_negative_numbers = true)]
    altitude: Option<f64>,

    /// Header rows before the first obstacle [env: SKYGRAPH_SKIP_ROWS, default 2]
    #[arg(long)]
    skip_rows: Option<usize>,

    /// Filter edges on all cores
    #[arg(long)]
    parallel: bool,

    /// Write an SVG of the grid and edges
    #[arg(long)]
    svg: Option<PathBuf>,

    /// Pixels per grid cell in the SVG
    #[arg(long, default_value_t = 1.0)]
    cell_px: f64,

    /// Write a JSON report
    #[arg(long)]
    json: Option<PathBuf>,

    /// Emit logs as JSON
    #[arg(long)]
    log_json: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let config = Config::from_env();
    init_tracing(args.log_json || config.log_json)?;

    let planner = PlannerConfig {
        drone_altitude: args.altitude.unwrap_or(config.drone_altitude),
        parallel_filter: args.parallel || config.parallel_filter,
    };
    let skip_rows = args.skip_rows.unwrap_or(config.skip_rows);

    let colliders = load_colliders(&args.input, skip_rows)
        .with_context(|| format!("loading {}", args.input.display()))?;
    if let Some(home) = colliders.home {
        tracing::info!(lat = home.lat, lon = home.lon, "home position");
    }

    let pipeline = Pipeline::with_config(planner);
    let graph = pipeline
        .run(&colliders.obstacles)
        .context("building grid and edges")?;

    println!("Found {:5} edges", graph.edges.len());

    if let Some(path) = &args.svg {
        let style = SvgStyle {
            cell_px: args.cell_px,
            ..SvgStyle::default()
        };
        let svg = render_svg(&graph.grid, &graph.edges, &graph.sites, &style);
        fs::write(path, svg).with_context(|| format!("writing {}", path.display()))?;
        tracing::info!(path = %path.display(), "svg written");
    }

    if let Some(path) = &args.json {
        let report = GraphReport::new(
            args.input.display().to_string(),
            pipeline.config().drone_altitude,
            colliders.home,
            &graph,
        );
        let body = serde_json::to_string_pretty(&report)?;
        fs::write(path, body).with_context(|| format!("writing {}", path.display()))?;
        tracing::info!(path = %path.display(), "report written");
    }

    Ok(())
}
