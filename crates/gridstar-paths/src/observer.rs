//! Read-only hooks into a running search.
//!
//! A presentation layer implements [`SearchObserver`] to animate expansion
//! and reconstruction. Hooks receive shared references, so they can look at
//! cells but never change them.

use gridstar_core::Coord;

use crate::grid::Cell;

/// Callbacks invoked by [`SearchEngine`](crate::SearchEngine).
pub trait SearchObserver {
    /// Called once for every cell the engine expands, in expansion order.
    /// The goal is never expanded and is not reported here.
    fn on_expand(&mut self, _cell: &Cell) {}

    /// Called once for every cell on the reconstructed path, start first.
    fn on_path(&mut self, _cell: &Cell) {}
}

/// Observer that ignores everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl SearchObserver for NoopObserver {}

/// Observer that records the coordinates it is shown.
#[derive(Debug, Default, Clone)]
pub struct Recorder {
    pub expanded: Vec<Coord>,
    pub path: Vec<Coord>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget everything recorded so far.
    pub fn clear(&mut self) {
        self.expanded.clear();
        self.path.clear();
    }
}

impl SearchObserver for Recorder {
    fn on_expand(&mut self, cell: &Cell) {
        self.expanded.push(cell.coord());
    }

    fn on_path(&mut self, cell: &Cell) {
        self.path.push(cell.coord());
    }
}
