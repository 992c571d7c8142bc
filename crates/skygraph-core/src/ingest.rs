//! Colliders file reading and writing.
//!
//! The file is comma-delimited with a fixed number of header rows followed by
//! one obstacle per line:
//!
//! ```text
//! lat0 37.792480, lon0 -122.397450
//! posX,posY,posZ,halfSizeX,halfSizeY,halfSizeZ
//! -310.2389,-439.2315,85.5,5,5,85.5
//! ```
//!
//! The first header line optionally carries the geodetic home position of the
//! local frame.

use crate::models::ObstacleRecord;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;
use thiserror::Error;

/// Header rows in a standard colliders file.
pub const DEFAULT_SKIP_ROWS: usize = 2;

const COLUMN_HEADER: &str = "posX,posY,posZ,halfSizeX,halfSizeY,halfSizeZ";

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("failed to read colliders: {0}")]
    Io(#[from] std::io::Error),

    #[error("line {line}: expected 6 columns, found {found}")]
    Shape { line: usize, found: usize },

    #[error("line {line}, column {column}: '{value}' is not a number")]
    Parse {
        line: usize,
        column: usize,
        value: String,
    },

    #[error("line {line}: malformed home position ({reason})")]
    Home { line: usize, reason: String },
}

/// Geodetic origin of the local north/east frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HomePosition {
    pub lat: f64,
    pub lon: f64,
}

/// Parsed colliders file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColliderFile {
    pub home: Option<HomePosition>,
    pub obstacles: Vec<ObstacleRecord>,
}

/// Load a colliders file from disk.
pub fn load_colliders(path: impl AsRef<Path>, skip_rows: usize) -> Result<ColliderFile, IngestError> {
    let file = File::open(path.as_ref())?;
    let parsed = parse_colliders(BufReader::new(file), skip_rows)?;
    tracing::info!(
        path = %path.as_ref().display(),
        obstacles = parsed.obstacles.len(),
        "colliders loaded"
    );
    Ok(parsed)
}

/// Parse colliders from any buffered reader, skipping `skip_rows` header lines.
///
/// Blank lines after the header are ignored.
pub fn parse_colliders<R: BufRead>(reader: R, skip_rows: usize) -> Result<ColliderFile, IngestError> {
    let mut home = None;
    let mut obstacles = Vec::new();

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let line_no = idx + 1;
        if idx < skip_rows {
            if idx == 0 {
                home = parse_home(&line, line_no)?;
            }
            continue;
        }
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        obstacles.push(parse_row(trimmed, line_no)?);
    }

    Ok(ColliderFile { home, obstacles })
}

fn parse_row(line: &str, line_no: usize) -> Result<ObstacleRecord, IngestError> {
    let fields: Vec<&str> = line.split(',').map(str::trim).collect();
    if fields.len() != 6 {
        return Err(IngestError::Shape {
            line: line_no,
            found: fields.len(),
        });
    }
    let mut row = [0.0f64; 6];
    for (column, (slot, field)) in row.iter_mut().zip(&fields).enumerate() {
        *slot = field.parse().map_err(|_| IngestError::Parse {
            line: line_no,
            column: column + 1,
            value: field.to_string(),
        })?;
    }
    Ok(ObstacleRecord::from_row(row))
}

/// `lat0 <deg>, lon0 <deg>`; any other header text means no home position.
fn parse_home(line: &str, line_no: usize) -> Result<Option<HomePosition>, IngestError> {
    let trimmed = line.trim();
    if !trimmed.starts_with("lat0") {
        return Ok(None);
    }
    let mut lat = None;
    let mut lon = None;
    for part in trimmed.split(',') {
        let mut tokens = part.split_whitespace();
        let (Some(key), Some(value)) = (tokens.next(), tokens.next()) else {
            return Err(IngestError::Home {
                line: line_no,
                reason: format!("unexpected token '{}'", part.trim()),
            });
        };
        let value: f64 = value.parse().map_err(|_| IngestError::Home {
            line: line_no,
            reason: format!("'{value}' is not a number"),
        })?;
        match key {
            "lat0" => lat = Some(value),
            "lon0" => lon = Some(value),
            other => {
                return Err(IngestError::Home {
                    line: line_no,
                    reason: format!("unknown key '{other}'"),
                })
            }
        }
    }
    match (lat, lon) {
        (Some(lat), Some(lon)) => Ok(Some(HomePosition { lat, lon })),
        _ => Err(IngestError::Home {
            line: line_no,
            reason: "both lat0 and lon0 are required".to_string(),
        }),
    }
}

/// Write obstacles in the standard two-header-row layout.
pub fn write_colliders<W: Write>(
    mut writer: W,
    home: Option<HomePosition>,
    obstacles: &[ObstacleRecord],
) -> Result<(), IngestError> {
    match home {
        Some(home) => writeln!(writer, "lat0 {:.6}, lon0 {:.6}", home.lat, home.lon)?,
        None => writeln!(writer, "lat0 0.000000, lon0 0.000000")?,
    }
    writeln!(writer, "{COLUMN_HEADER}")?;
    for o in obstacles {
        writeln!(
            writer,
            "{},{},{},{},{},{}",
            o.north, o.east, o.altitude, o.half_north, o.half_east, o.half_altitude
        )?;
    }
    writer.flush()?;
    Ok(())
}
