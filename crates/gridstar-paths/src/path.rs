//! Shortest paths and their reconstruction from predecessor links.

use std::fmt;

use gridstar_core::Coord;

use crate::error::{Error, Result};
use crate::grid::Grid;
use crate::observer::SearchObserver;

/// An ordered run of cells from start to goal, both inclusive.
///
/// A path always holds at least one cell; a search whose start equals its
/// goal yields a single-cell path of cost 0.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "Vec<Coord>", into = "Vec<Coord>"))]
pub struct Path {
    coords: Vec<Coord>,
}

impl Path {
    /// The cells in travel order.
    #[inline]
    pub fn coords(&self) -> &[Coord] {
        &self.coords
    }

    /// Number of cells, endpoints included.
    #[inline]
    pub fn len(&self) -> usize {
        self.coords.len()
    }

    /// Always `false`.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    /// Number of steps, i.e. `len() - 1`.
    #[inline]
    pub fn cost(&self) -> usize {
        self.coords.len().saturating_sub(1)
    }

    /// First cell.
    #[inline]
    pub fn start(&self) -> Coord {
        self.coords[0]
    }

    /// Last cell.
    #[inline]
    pub fn end(&self) -> Coord {
        self.coords[self.coords.len() - 1]
    }

    /// Whether `c` lies on the path.
    pub fn contains(&self, c: Coord) -> bool {
        self.coords.contains(&c)
    }

    /// Whether every step moves to an orthogonally adjacent cell.
    pub fn is_contiguous(&self) -> bool {
        self.coords.windows(2).all(|w| w[0].is_adjacent(w[1]))
    }

    /// Iterate over the cells in travel order.
    pub fn iter(&self) -> std::slice::Iter<'_, Coord> {
        self.coords.iter()
    }

    /// Consume the path, returning its cells.
    pub fn into_coords(self) -> Vec<Coord> {
        self.coords
    }
}

impl TryFrom<Vec<Coord>> for Path {
    type Error = Error;

    /// Fails with [`Error::EmptyPath`] when `coords` is empty. Adjacency is
    /// not checked; see [`Path::is_contiguous`].
    fn try_from(coords: Vec<Coord>) -> Result<Self> {
        if coords.is_empty() {
            return Err(Error::EmptyPath);
        }
        Ok(Self { coords })
    }
}

impl From<Path> for Vec<Coord> {
    fn from(path: Path) -> Self {
        path.coords
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a Coord;
    type IntoIter = std::slice::Iter<'a, Coord>;
    fn into_iter(self) -> Self::IntoIter {
        self.coords.iter()
    }
}

impl IntoIterator for Path {
    type Item = Coord;
    type IntoIter = std::vec::IntoIter<Coord>;
    fn into_iter(self) -> Self::IntoIter {
        self.coords.into_iter()
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, c) in self.coords.iter().enumerate() {
            if i > 0 {
                f.write_str(" -> ")?;
            }
            write!(f, "{c}")?;
        }
        Ok(())
    }
}

/// Walk predecessor links back from `end` and return the forward path.
///
/// Read-only over the grid. The chain must terminate at a cell with `g = 0`
/// within `grid.len()` steps, otherwise the search state does not describe a
/// path to `end` and [`Error::NoPath`] is returned.
pub(crate) fn reconstruct<O: SearchObserver>(
    grid: &Grid,
    end: Coord,
    observer: &mut O,
) -> Result<Path> {
    let end_cell = grid.cell(end)?;
    if !end_cell.is_reached() {
        return Err(Error::NoPath);
    }

    let mut coords = Vec::with_capacity(end_cell.g() as usize + 1);
    let mut cur = Some(end);
    while let Some(c) = cur {
        if coords.len() >= grid.len() {
            return Err(Error::NoPath);
        }
        coords.push(c);
        cur = grid.cell(c)?.predecessor();
    }
    coords.reverse();

    let start_cell = grid.cell(coords[0])?;
    if start_cell.g() != 0 || coords.len() != end_cell.g() as usize + 1 {
        return Err(Error::NoPath);
    }

    for &c in &coords {
        observer.on_path(grid.cell(c)?);
    }
    Ok(Path { coords })
}
