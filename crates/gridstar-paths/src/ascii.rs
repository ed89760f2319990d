//! Grids drawn as text.
//!
//! One character per cell, one line per row:
//!
//! | Char | Meaning |
//! |---|---|
//! | `.` | passable |
//! | `#` | obstacle |
//! | `S` | start (passable) |
//! | `E` | end (passable) |
//! | `*` | path cell, rendering only; parsed as passable |
//!
//! ```
//! use gridstar_paths::{AsciiMap, find_path};
//!
//! let mut map = AsciiMap::parse("\
//! S#.
//! .#E
//! ...").unwrap();
//! let (start, end) = (map.start.unwrap(), map.end.unwrap());
//! let path = find_path(&mut map.grid, start, end).unwrap();
//! assert_eq!(path.len(), 6);
//! ```

use std::str::FromStr;

use gridstar_core::Coord;

use crate::error::{Error, Result};
use crate::grid::Grid;
use crate::path::Path;

pub const PASSABLE: char = '.';
pub const OBSTACLE: char = '#';
pub const START: char = 'S';
pub const END: char = 'E';
pub const PATH: char = '*';

/// A grid parsed from text, with the endpoints it marks.
#[derive(Debug, Clone)]
pub struct AsciiMap {
    pub grid: Grid,
    pub start: Option<Coord>,
    pub end: Option<Coord>,
}

impl AsciiMap {
    /// Parse a map.
    ///
    /// Blank lines around the map are ignored; every remaining line must have
    /// the same width.
    pub fn parse(s: &str) -> Result<Self> {
        let lines: Vec<&str> = s
            .trim_matches(|c| c == '\n' || c == '\r')
            .lines()
            .collect();
        let rows = if lines.iter().all(|l| l.is_empty()) {
            0
        } else {
            lines.len()
        };
        let width = lines.first().map_or(0, |l| l.chars().count());
        let mut grid = Grid::new(rows as i32, width as i32)?;
        let mut start = None;
        let mut end = None;

        for (row, line) in lines.iter().enumerate() {
            let found = line.chars().count();
            if found != width {
                return Err(Error::InconsistentWidth {
                    line: row + 1,
                    expected: width,
                    found,
                });
            }
            for (col, ch) in line.chars().enumerate() {
                let at = Coord::new(row as i32, col as i32);
                match ch {
                    PASSABLE | PATH => {}
                    OBSTACLE => grid.set_obstacle(at, true)?,
                    START => place(&mut start, at, ch)?,
                    END => place(&mut end, at, ch)?,
                    _ => return Err(Error::InvalidChar { ch, at }),
                }
            }
        }

        Ok(Self { grid, start, end })
    }

    /// Render this map, overlaying `path` if given.
    pub fn render(&self, path: Option<&Path>) -> String {
        render(&self.grid, self.start, self.end, path)
    }
}

impl FromStr for AsciiMap {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

fn place(slot: &mut Option<Coord>, at: Coord, ch: char) -> Result<()> {
    if slot.is_some() {
        return Err(Error::DuplicateMarker { ch });
    }
    *slot = Some(at);
    Ok(())
}

/// Draw `grid` as text. Endpoint markers win over path marks.
pub fn render(
    grid: &Grid,
    start: Option<Coord>,
    end: Option<Coord>,
    path: Option<&Path>,
) -> String {
    let mut out = String::with_capacity(grid.len() + grid.rows() as usize);
    for cell in grid.cells() {
        let at = cell.coord();
        if at.col == 0 && at.row > 0 {
            out.push('\n');
        }
        let ch = if Some(at) == start {
            START
        } else if Some(at) == end {
            END
        } else if cell.is_obstacle() {
            OBSTACLE
        } else if path.is_some_and(|p| p.contains(at)) {
            PATH
        } else {
            PASSABLE
        };
        out.push(ch);
    }
    out
}
