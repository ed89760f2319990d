//! Shortest-path search on 4-connected obstacle grids.
//!
//! This crate finds a shortest path between two cells of a [`Grid`] whose
//! cells are either passable or blocked, where every orthogonal step costs 1.
//! The search is A\* with the Manhattan heuristic:
//!
//! - [`Grid`] owns the cells and derives adjacency from coordinates.
//! - [`manhattan`] estimates the remaining cost.
//! - [`Frontier`] orders discovered cells by `g + h`, earliest push first on
//!   ties, so results are deterministic.
//! - [`SearchEngine`] runs the loop and reports
//!   [`Found`](SearchState::Found), [`Exhausted`](SearchState::Exhausted) or
//!   [`Aborted`](SearchState::Aborted).
//! - [`SearchEngine::reconstruct`] walks predecessor links into a [`Path`].
//!
//! A [`SearchObserver`] can watch expansions and the final path without being
//! able to change anything, which is how a presentation layer animates a run.
//!
//! ```
//! use gridstar_core::Coord;
//! use gridstar_paths::{Error, Grid, find_path};
//!
//! let mut grid = Grid::new(3, 3)?;
//! let path = find_path(&mut grid, Coord::new(0, 0), Coord::new(2, 2))?;
//! assert_eq!(path.len(), 5);
//!
//! for row in 0..3 {
//!     grid.set_obstacle(Coord::new(row, 1), true)?;
//! }
//! assert_eq!(
//!     find_path(&mut grid, Coord::new(0, 0), Coord::new(0, 2)),
//!     Err(Error::Unreachable)
//! );
//! # Ok::<(), Error>(())
//! ```

pub mod ascii;
mod config;
mod engine;
mod error;
mod frontier;
mod grid;
mod heuristic;
mod observer;
mod path;

pub use ascii::AsciiMap;
pub use config::SearchConfig;
pub use engine::{SearchEngine, SearchState, SearchStats, find_path};
pub use error::{Error, Result};
pub use frontier::{Frontier, FrontierEntry};
pub use grid::{Cell, Grid, INFINITE_COST};
pub use heuristic::manhattan;
pub use observer::{NoopObserver, Recorder, SearchObserver};
pub use path::Path;
