//! The A* open list.
//!
//! A binary heap of `(key, seq, coord)` entries. Entries are never updated in
//! place: a cell whose cost improves is pushed again, and the older entry is
//! left behind to be discarded by the engine when it surfaces.

use std::collections::BinaryHeap;

use gridstar_core::Coord;

use crate::grid::Cell;

/// A snapshot of one push: the cell identity and its `g + h` at push time.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct FrontierEntry {
    key: i32,
    seq: u64,
    coord: Coord,
}

impl FrontierEntry {
    /// The `g + h` the cell had when it was pushed.
    #[inline]
    pub fn key(&self) -> i32 {
        self.key
    }

    /// The cell this entry refers to.
    #[inline]
    pub fn coord(&self) -> Coord {
        self.coord
    }
}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Reverse so BinaryHeap (max-heap) pops smallest key first, and among
        // equal keys the earliest push.
        other
            .key
            .cmp(&self.key)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// Min-priority queue of discovered, not yet finalised cells.
#[derive(Debug, Default)]
pub struct Frontier {
    heap: BinaryHeap<FrontierEntry>,
    seq: u64,
}

impl Frontier {
    /// Create an empty frontier.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `cell` keyed by its current `g + h`.
    ///
    /// Pushing a cell that is already queued adds a second entry.
    pub fn push(&mut self, cell: &Cell) {
        self.push_key(cell.coord(), cell.f());
    }

    pub(crate) fn push_key(&mut self, coord: Coord, key: i32) {
        self.heap.push(FrontierEntry {
            key,
            seq: self.seq,
            coord,
        });
        self.seq += 1;
    }

    /// Remove the entry with the smallest key; ties go to the earliest push.
    ///
    /// Returns `None` when the frontier is empty.
    pub fn pop_min(&mut self) -> Option<FrontierEntry> {
        self.heap.pop()
    }

    /// Whether no entries remain.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Number of queued entries, stale ones included.
    #[inline]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Drop every entry and restart the insertion sequence.
    pub fn clear(&mut self) {
        self.heap.clear();
        self.seq = 0;
    }
}
