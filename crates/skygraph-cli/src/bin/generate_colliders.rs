//! Write a synthetic colliders file.

use anyhow::Context;
use clap::Parser;
use skygraph_cli::{init_tracing, Config};
use skygraph_core::{random_obstacle_field, write_colliders, FieldConfig, HomePosition};
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

/// Generate a reproducible field of box obstacles
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Output colliders file
    #[arg(long, default_value = "colliders.csv")]
    output: PathBuf,

    /// Number of obstacles
    #[arg(long, default_value_t = 200)]
    count: usize,

    /// RNG seed
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Obstacle centers fall within +/- extent meters of the origin
    #[arg(long, default_value_t = 400.0)]
    extent: f64,

    /// Largest obstacle height in meters
    #[arg(long, default_value_t = 120.0)]
    max_height: f64,

    /// Home latitude written to the header
    #[arg(long, default_value_t = 37.792480, allow_negative_numbers = true)]
    lat: f64,

    /// Home longitude written to the header
    #[arg(long, default_value_t = -122.397450, allow_negative_numbers = true)]
    lon: f64,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(Config::from_env().log_json)?;

    let field = FieldConfig {
        count: args.count,
        extent_m: args.extent,
        max_height_m: args.max_height,
        seed: args.seed,
        ..FieldConfig::default()
    };
    let obstacles = random_obstacle_field(&field);

    let file = File::create(&args.output)
        .with_context(|| format!("creating {}", args.output.display()))?;
    let home = HomePosition {
        lat: args.lat,
        lon: args.lon,
    };
    write_colliders(BufWriter::new(file), Some(home), &obstacles)
        .with_context(|| format!("writing {}", args.output.display()))?;

    tracing::info!(
        path = %args.output.display(),
        count = obstacles.len(),
        seed = args.seed,
        "colliders written"
    );
    println!("Wrote {} obstacles to {}", obstacles.len(), args.output.display());
    Ok(())
}
