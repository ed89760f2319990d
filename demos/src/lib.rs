//! Terminal presentation for gridstar searches.
//!
//! Builds random obstacle grids, and draws a grid, the cells a search
//! expanded and the final path using crossterm colours. The search itself
//! knows nothing about any of this; it only reports to a
//! [`Recorder`](gridstar_paths::Recorder).

use std::io::{self, Write};
use std::thread;
use std::time::Duration;

use crossterm::{
    cursor, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
};
use gridstar_core::Coord;
use gridstar_paths::Grid;
use rand::Rng;

pub const DEFAULT_ROWS: i32 = 10;
pub const DEFAULT_COLS: i32 = 15;

// Colours
const COL_FLOOR: Color = Color::Rgb { r: 235, g: 235, b: 235 };
const COL_OBSTACLE: Color = Color::Rgb { r: 20, g: 20, b: 20 };
const COL_EXPANDED: Color = Color::Rgb { r: 60, g: 110, b: 220 };
const COL_PATH: Color = Color::Rgb { r: 240, g: 210, b: 40 };
const COL_START: Color = Color::Rgb { r: 40, g: 170, b: 60 };
const COL_END: Color = Color::Rgb { r: 210, g: 40, b: 40 };
const COL_LABEL: Color = Color::Rgb { r: 120, g: 120, b: 140 };

/// Parse a coordinate written as `row,col`.
pub fn parse_coord(s: &str) -> Result<Coord, String> {
    let (row, col) = s
        .split_once(',')
        .ok_or_else(|| format!("expected ROW,COL, got \u{201c}{s}\u{201d}"))?;
    let row = row
        .trim()
        .parse()
        .map_err(|e| format!("bad row \u{201c}{row}\u{201d}: {e}"))?;
    let col = col
        .trim()
        .parse()
        .map_err(|e| format!("bad column \u{201c}{col}\u{201d}: {e}"))?;
    Ok(Coord::new(row, col))
}

/// Block each cell with probability `density`, leaving `keep` passable.
///
/// Returns the number of blocked cells.
pub fn scatter_obstacles(
    grid: &mut Grid,
    density: f64,
    keep: &[Coord],
    rng: &mut impl Rng,
) -> usize {
    let density = if density.is_nan() { 0.0 } else { density.clamp(0.0, 1.0) };
    let mut blocked = 0;
    for p in grid.dims() {
        let flag = !keep.contains(&p) && rng.random_bool(density);
        // In-bounds by construction.
        if grid.set_obstacle(p, flag).is_ok() && flag {
            blocked += 1;
        }
    }
    log::debug!("scattered {blocked} obstacles over {} grid", grid.dims());
    blocked
}

/// What a frame shows besides the grid topology.
#[derive(Debug, Clone, Copy, Default)]
pub struct Overlay<'a> {
    pub start: Option<Coord>,
    pub end: Option<Coord>,
    pub expanded: &'a [Coord],
    pub path: &'a [Coord],
}

impl Overlay<'_> {
    fn color_at(&self, grid: &Grid, p: Coord) -> Color {
        if Some(p) == self.start {
            COL_START
        } else if Some(p) == self.end {
            COL_END
        } else if grid.is_obstacle(p).unwrap_or(true) {
            COL_OBSTACLE
        } else if self.path.contains(&p) {
            COL_PATH
        } else if self.expanded.contains(&p) {
            COL_EXPANDED
        } else {
            COL_FLOOR
        }
    }
}

/// Draw one frame: two terminal columns per cell, one line per row.
pub fn draw_frame(out: &mut impl Write, grid: &Grid, overlay: &Overlay<'_>) -> io::Result<()> {
    for row in 0..grid.rows() {
        for col in 0..grid.cols() {
            let p = Coord::new(row, col);
            queue!(out, SetBackgroundColor(overlay.color_at(grid, p)), Print("  "))?;
        }
        queue!(out, ResetColor, Print("\n"))?;
    }
    out.flush()
}

/// Replay a recorded search: expansions one by one, then the path.
///
/// Each frame is drawn over the previous one.
pub fn replay(
    out: &mut impl Write,
    grid: &Grid,
    start: Coord,
    end: Coord,
    expanded: &[Coord],
    path: &[Coord],
    delay: Duration,
) -> io::Result<()> {
    let rows = grid.rows().clamp(0, u16::MAX as i32) as u16;
    let searching = (0..=expanded.len()).map(|i| (&expanded[..i], &path[..0]));
    let tracing = (1..=path.len()).map(|i| (expanded, &path[..i]));

    for (n, (expanded, path)) in searching.chain(tracing).enumerate() {
        if n > 0 {
            queue!(out, cursor::MoveUp(rows))?;
        }
        let overlay = Overlay {
            start: Some(start),
            end: Some(end),
            expanded,
            path,
        };
        draw_frame(out, grid, &overlay)?;
        thread::sleep(delay);
    }
    Ok(())
}

/// Print a one-line colour legend.
pub fn draw_legend(out: &mut impl Write) -> io::Result<()> {
    for (color, label) in [
        (COL_START, "start"),
        (COL_END, "end"),
        (COL_OBSTACLE, "obstacle"),
        (COL_EXPANDED, "expanded"),
        (COL_PATH, "path"),
    ] {
        queue!(
            out,
            SetBackgroundColor(color),
            Print("  "),
            ResetColor,
            SetForegroundColor(COL_LABEL),
            Print(format!(" {label}  ")),
            ResetColor
        )?;
    }
    queue!(out, Print("\n"))?;
    out.flush()
}
