//! SVG rendering of an occupancy grid with graph edges overlaid.
//!
//! North is drawn upward and east to the right, with grid index (0, 0) in the
//! lower-left corner.

use crate::grid::OccupancyGrid;
use crate::models::{AcceptedEdge, Point2D};
use serde::{Deserialize, Serialize};
use std::fmt::Write;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SvgStyle {
    /// Pixels per grid cell.
    pub cell_px: f64,
    pub background: String,
    pub obstacle_fill: String,
    pub edge_stroke: String,
    pub edge_width: f64,
    /// Radius of site markers in pixels; zero disables them.
    pub site_radius: f64,
    pub site_fill: String,
}

impl Default for SvgStyle {
    fn default() -> Self {
        Self {
            cell_px: 1.0,
            background: "#ffffff".to_string(),
            obstacle_fill: "#404040".to_string(),
            edge_stroke: "#1f4fd8".to_string(),
            edge_width: 1.0,
            site_radius: 0.0,
            site_fill: "#d81f1f".to_string(),
        }
    }
}

/// Render the grid, edges and optional sites as a standalone SVG document.
///
/// Occupied cells are merged into horizontal runs so large grids stay compact.
pub fn render_svg(
    grid: &OccupancyGrid,
    edges: &[AcceptedEdge],
    sites: &[Point2D],
    style: &SvgStyle,
) -> String {
    let px = style.cell_px.max(f64::MIN_POSITIVE);
    let width = grid.cols() as f64 * px;
    let height = grid.rows() as f64 * px;
    let rows = grid.rows() as f64;
    let to_xy = |p: Point2D| (p.east * px, (rows - p.north) * px);

    let mut svg = String::new();
    // Writing into a String cannot fail.
    let _ = writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}">"#
    );
    let _ = writeln!(
        svg,
        r#"<rect x="0" y="0" width="{width}" height="{height}" fill="{}"/>"#,
        style.background
    );

    let _ = writeln!(svg, r#"<g fill="{}">"#, style.obstacle_fill);
    for (row, cells) in grid.row_slices().enumerate() {
        let y = (rows - row as f64 - 1.0) * px;
        let mut col = 0;
        while col < cells.len() {
            if !cells[col] {
                col += 1;
                continue;
            }
            let start = col;
            while col < cells.len() && cells[col] {
                col += 1;
            }
            let _ = writeln!(
                svg,
                r#"<rect x="{}" y="{}" width="{}" height="{}"/>"#,
                start as f64 * px,
                y,
                (col - start) as f64 * px,
                px
            );
        }
    }
    let _ = writeln!(svg, "</g>");

    let _ = writeln!(
        svg,
        r#"<g stroke="{}" stroke-width="{}" fill="none">"#,
        style.edge_stroke, style.edge_width
    );
    for edge in edges {
        let (x1, y1) = to_xy(edge.start);
        let (x2, y2) = to_xy(edge.end);
        let _ = writeln!(
            svg,
            r#"<line x1="{x1:.3}" y1="{y1:.3}" x2="{x2:.3}" y2="{y2:.3}"/>"#
        );
    }
    let _ = writeln!(svg, "</g>");

    if style.site_radius > 0.0 {
        let _ = writeln!(svg, r#"<g fill="{}">"#, style.site_fill);
        for site in sites {
            let (cx, cy) = to_xy(*site);
            let _ = writeln!(
                svg,
                r#"<circle cx="{cx:.3}" cy="{cy:.3}" r="{}"/>"#,
                style.site_radius
            );
        }
        let _ = writeln!(svg, "</g>");
    }

    svg.push_str("</svg>\n");
    svg
}
