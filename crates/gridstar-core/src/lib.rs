//! **gridstar-core**: geometry primitives for the *gridstar* path search.
//!
//! This crate provides the coordinate system shared by the rest of the
//! workspace: a [`Coord`] addressing one cell by row and column, and
//! [`Dims`] describing a fixed `rows × cols` rectangle with row-major
//! flat indexing.

pub mod geom;

pub use geom::{Coord, Dims, DimsIter};
