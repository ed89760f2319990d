//! Error types for gridstar-paths.

use gridstar_core::{Coord, Dims};

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can go wrong building a grid, searching it, or reading
/// a path back out of it.
///
/// All variants are recoverable by the caller; none indicates corrupted
/// internal state.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Grid construction with a non-positive side
    #[error("invalid grid dimensions {rows}x{cols}: both sides must be positive")]
    InvalidDimensions { rows: i32, cols: i32 },

    /// Coordinate outside the grid
    #[error("coordinate {coord} is outside the {dims} grid")]
    OutOfBounds { coord: Coord, dims: Dims },

    /// Start or end is out of bounds or sits on an obstacle
    #[error("invalid endpoint {coord}: must be an in-bounds passable cell")]
    InvalidEndpoint { coord: Coord },

    /// The search exhausted the frontier without reaching the goal
    #[error("goal is unreachable from start")]
    Unreachable,

    /// Reconstruction requested without a successful search on the current grid state
    #[error("no path available: last search did not find the goal")]
    NoPath,

    /// A path was built from an empty list of cells
    #[error("a path needs at least one cell")]
    EmptyPath,

    /// The configured expansion budget ran out before the goal was reached
    #[error("search aborted after {limit} expansions")]
    IterationLimit { limit: usize },

    /// An ASCII map line differs in width from the first line
    #[error("map line {line} has width {found}, expected {expected}")]
    InconsistentWidth {
        line: usize,
        expected: usize,
        found: usize,
    },

    /// An ASCII map contains a character outside the map alphabet
    #[error("map contains invalid character \u{201c}{ch}\u{201d} at {at}")]
    InvalidChar { ch: char, at: Coord },

    /// An ASCII map places the start or end marker more than once
    #[error("map contains marker \u{201c}{ch}\u{201d} more than once")]
    DuplicateMarker { ch: char },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        let err = Error::InvalidDimensions { rows: 0, cols: 3 };
        assert_eq!(
            err.to_string(),
            "invalid grid dimensions 0x3: both sides must be positive"
        );

        let err = Error::OutOfBounds {
            coord: Coord::new(4, 1),
            dims: Dims::new(3, 3),
        };
        assert_eq!(err.to_string(), "coordinate (4, 1) is outside the 3x3 grid");

        assert_eq!(Error::Unreachable.to_string(), "goal is unreachable from start");
        assert_eq!(
            Error::IterationLimit { limit: 12 }.to_string(),
            "search aborted after 12 expansions"
        );
    }

    #[test]
    fn unreachable_and_no_path_are_distinct() {
        assert_ne!(Error::Unreachable, Error::NoPath);
        assert_eq!(Error::EmptyPath.to_string(), "a path needs at least one cell");
    }
}
