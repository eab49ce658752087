//! Label anchors for irregular map regions.
//!
//! A region is a set of grid cells. The engine fits the largest axis-aligned
//! rectangle and the largest square inside it and picks one of them as the
//! box a label is drawn into.

pub mod engine;
pub mod error;
pub mod grid;
pub mod histogram;
pub mod holes;
pub mod parse;
pub mod select;
pub mod square;

#[cfg(test)]
mod testing;

pub use engine::{compute_anchor, compute_anchors, solve, AnchorOptions, Shape};
pub use error::AnchorError;
pub use grid::{Coord, OccupancyGrid};
pub use histogram::{largest_in_histogram, largest_rectangle, Rect};
pub use holes::fill_holes;
pub use parse::parse_shapes;
pub use select::{Anchor, AnchorKind, CoverageCheck, Fallback, SelectionPolicy};
pub use square::{largest_square, Square};
