use rayon::prelude::*;

use crate::error::Result;
use crate::grid::{Coord, OccupancyGrid};
use crate::histogram::largest_rectangle;
use crate::holes::fill_holes;
use crate::select::{Anchor, SelectionPolicy};
use crate::square::largest_square;

/// Coordinates of one named entity (a state, a nation, a culture).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shape {
    pub name: String,
    pub coords: Vec<Coord>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AnchorOptions {
    /// Close enclosed background before solving.
    pub fill_holes: bool,
    /// Always answer with the largest square.
    pub prefer_square: bool,
    pub policy: SelectionPolicy,
}

/// Computes the label anchor for one shape.
///
/// An empty shape is a caller error and fails with
/// [`AnchorError::EmptyShape`](crate::AnchorError::EmptyShape); any other
/// input yields an anchor, a single cell in the worst case.
#[tracing::instrument(skip_all, fields(fill_holes = options.fill_holes, prefer_square = options.prefer_square))]
pub fn compute_anchor<'a, I>(coords: I, options: &AnchorOptions) -> Result<Anchor>
where
    I: IntoIterator<Item = &'a Coord>,
    I::IntoIter: Clone,
{
    let grid = OccupancyGrid::from_coords(coords)?;
    let grid = if options.fill_holes {
        fill_holes(&grid)
    } else {
        grid
    };
    solve(&grid, options)
}

/// Runs both solvers over an already built grid and joins their results.
pub fn solve(grid: &OccupancyGrid, options: &AnchorOptions) -> Result<Anchor> {
    let (rect, square) = if options.prefer_square {
        (None, largest_square(grid))
    } else {
        rayon::join(|| largest_rectangle(grid), || largest_square(grid))
    };

    let anchor = options
        .policy
        .choose(grid, rect, square, options.prefer_square)?;
    tracing::debug!(
        center = ?anchor.center,
        size = ?anchor.size,
        kind = %anchor.kind,
        "anchor placed"
    );
    Ok(anchor)
}

/// Computes anchors for many shapes in parallel, keeping the input order.
#[tracing::instrument(skip_all, fields(shapes = shapes.len()))]
pub fn compute_anchors<'s>(
    shapes: &'s [Shape],
    options: &AnchorOptions,
) -> Vec<(&'s str, Result<Anchor>)> {
    shapes
        .par_iter()
        .map(|shape| (shape.name.as_str(), compute_anchor(&shape.coords, options)))
        .collect()
}
