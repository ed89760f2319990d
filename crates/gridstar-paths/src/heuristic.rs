use gridstar_core::Coord;

/// Manhattan (L1) distance between two cells.
///
/// Every orthogonal step costs exactly 1, so this never overestimates the
/// remaining cost (admissible) and changes by at most 1 across an edge
/// (consistent).
#[inline]
pub fn manhattan(a: Coord, b: Coord) -> i32 {
    (a.row - b.row).abs() + (a.col - b.col).abs()
}
