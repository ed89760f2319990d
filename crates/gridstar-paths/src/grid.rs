//! The search grid: a fixed `rows × cols` matrix of [`Cell`]s.
//!
//! Each cell carries its static topology (the obstacle flag) next to the
//! run-scoped search state (`g`, `h`, predecessor). The search state belongs
//! to a single search run and is cleared by [`Grid::reset_search_state`].

use gridstar_core::{Coord, Dims};

use crate::error::{Error, Result};

/// Sentinel cost meaning "not reached yet" (`g = ∞`).
pub const INFINITE_COST: i32 = i32::MAX;

/// One grid position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub(crate) coord: Coord,
    pub(crate) obstacle: bool,
    pub(crate) g: i32,
    pub(crate) h: i32,
    pub(crate) parent: Option<Coord>,
}

impl Cell {
    fn new(coord: Coord) -> Self {
        Self {
            coord,
            obstacle: false,
            g: INFINITE_COST,
            h: 0,
            parent: None,
        }
    }

    /// Position of this cell.
    #[inline]
    pub fn coord(&self) -> Coord {
        self.coord
    }

    /// Whether the cell blocks movement.
    #[inline]
    pub fn is_obstacle(&self) -> bool {
        self.obstacle
    }

    /// Best known cost from the start, or [`INFINITE_COST`].
    #[inline]
    pub fn g(&self) -> i32 {
        self.g
    }

    /// Heuristic estimate to the goal recorded by the last relaxation.
    #[inline]
    pub fn h(&self) -> i32 {
        self.h
    }

    /// Estimated total cost `g + h`, saturating at [`INFINITE_COST`].
    #[inline]
    pub fn f(&self) -> i32 {
        self.g.saturating_add(self.h)
    }

    /// Whether the current search run has assigned this cell a finite cost.
    #[inline]
    pub fn is_reached(&self) -> bool {
        self.g != INFINITE_COST
    }

    /// Predecessor on the best known path from the start.
    #[inline]
    pub fn predecessor(&self) -> Option<Coord> {
        self.parent
    }

    fn clear_search_state(&mut self) {
        self.g = INFINITE_COST;
        self.h = 0;
        self.parent = None;
    }
}

/// A rectangular grid of cells with 4-directional adjacency.
///
/// Adjacency is not stored: [`neighbors_of`](Grid::neighbors_of) derives it
/// from coordinates and bounds on every call, so toggling obstacles between
/// runs can never leave a stale neighbour list behind.
#[derive(Debug, Clone)]
pub struct Grid {
    dims: Dims,
    cells: Vec<Cell>,
    // Bumped whenever topology or search state is replaced.
    epoch: u64,
}

impl Grid {
    /// Create a grid of `rows × cols` passable cells.
    pub fn new(rows: i32, cols: i32) -> Result<Self> {
        let dims = Dims::new(rows, cols);
        if dims.is_empty() {
            return Err(Error::InvalidDimensions { rows, cols });
        }
        let cells = dims.iter().map(Cell::new).collect();
        Ok(Self {
            dims,
            cells,
            epoch: 0,
        })
    }

    /// Create a grid and mark every coordinate in `obstacles` as blocked.
    pub fn with_obstacles(
        rows: i32,
        cols: i32,
        obstacles: impl IntoIterator<Item = Coord>,
    ) -> Result<Self> {
        let mut grid = Self::new(rows, cols)?;
        for c in obstacles {
            grid.set_obstacle(c, true)?;
        }
        Ok(grid)
    }

    /// Grid extent.
    #[inline]
    pub fn dims(&self) -> Dims {
        self.dims
    }

    /// Number of rows.
    #[inline]
    pub fn rows(&self) -> i32 {
        self.dims.rows
    }

    /// Number of columns.
    #[inline]
    pub fn cols(&self) -> i32 {
        self.dims.cols
    }

    /// Total number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always `false`: a grid has at least one cell.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Whether `c` is inside the grid.
    #[inline]
    pub fn contains(&self, c: Coord) -> bool {
        self.dims.contains(c)
    }

    /// The cell at `c`.
    pub fn cell(&self, c: Coord) -> Result<&Cell> {
        let i = self.index(c)?;
        Ok(&self.cells[i])
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    /// Whether the cell at `c` blocks movement.
    pub fn is_obstacle(&self, c: Coord) -> Result<bool> {
        Ok(self.cell(c)?.obstacle)
    }

    /// Mark the cell at `c` as blocked (`true`) or passable (`false`).
    ///
    /// Search state of other cells is left untouched.
    pub fn set_obstacle(&mut self, c: Coord, flag: bool) -> Result<()> {
        let i = self.index(c)?;
        let cell = &mut self.cells[i];
        if cell.obstacle != flag {
            cell.obstacle = flag;
            self.epoch += 1;
        }
        Ok(())
    }

    /// Flip the passability of the cell at `c` and return the new flag.
    pub fn toggle_obstacle(&mut self, c: Coord) -> Result<bool> {
        let flag = !self.is_obstacle(c)?;
        self.set_obstacle(c, flag)?;
        Ok(flag)
    }

    /// Make every cell passable.
    pub fn clear_obstacles(&mut self) {
        for cell in self.cells.iter_mut() {
            cell.obstacle = false;
        }
        self.epoch += 1;
    }

    /// Coordinates of all blocked cells, row-major.
    pub fn obstacles(&self) -> impl Iterator<Item = Coord> + '_ {
        self.cells.iter().filter(|c| c.obstacle).map(|c| c.coord)
    }

    /// Number of blocked cells.
    pub fn obstacle_count(&self) -> usize {
        self.cells.iter().filter(|c| c.obstacle).count()
    }

    /// In-bounds orthogonal neighbours of `c` in the order left, up, right,
    /// down. Obstacles are included; callers filter them.
    ///
    /// A `c` outside the grid has no neighbours.
    pub fn neighbors_of(&self, c: Coord) -> impl Iterator<Item = Coord> + use<> {
        let dims = self.dims;
        dims.contains(c)
            .then(|| c.neighbors_4())
            .into_iter()
            .flatten()
            .filter(move |&n| dims.contains(n))
    }

    /// Clear `g`, `h` and predecessor on every cell.
    ///
    /// Must run before each search; the engine does this itself.
    pub fn reset_search_state(&mut self) {
        for cell in self.cells.iter_mut() {
            cell.clear_search_state();
        }
        self.epoch += 1;
    }

    #[inline]
    pub(crate) fn epoch(&self) -> u64 {
        self.epoch
    }

    #[inline]
    pub(crate) fn index(&self, c: Coord) -> Result<usize> {
        self.dims.index(c).ok_or(Error::OutOfBounds {
            coord: c,
            dims: self.dims,
        })
    }

    #[inline]
    pub(crate) fn at(&self, i: usize) -> &Cell {
        &self.cells[i]
    }

    #[inline]
    pub(crate) fn at_mut(&mut self, i: usize) -> &mut Cell {
        &mut self.cells[i]
    }
}
