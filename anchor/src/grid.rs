use std::fmt;

use bitvec::prelude::*;
use glam::IVec2;
use itertools::Itertools;

use crate::error::{AnchorError, Result};

/// Absolute map coordinate.
pub type Coord = IVec2;

pub(crate) type Cells = BitVec<u64, Lsb0>;

/// Dense occupancy grid over a shape's bounding box.
///
/// Rows run along the x axis and columns along the y axis, so cell
/// `(row, col)` is the absolute coordinate `origin + (row, col)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OccupancyGrid {
    rows: usize,
    cols: usize,
    origin: Coord,
    cells: Cells,
}

impl OccupancyGrid {
    /// Builds the grid for a set of absolute coordinates.
    ///
    /// The iterator is walked twice (bounds, then cells), so any set or slice
    /// iterator works. Enumeration order has no effect on the result.
    pub fn from_coords<'a, I>(coords: I) -> Result<Self>
    where
        I: IntoIterator<Item = &'a Coord>,
        I::IntoIter: Clone,
    {
        let coords = coords.into_iter();

        let (min_x, max_x) = coords
            .clone()
            .map(|c| c.x)
            .minmax()
            .into_option()
            .ok_or(AnchorError::EmptyShape)?;
        let (min_y, max_y) = coords
            .clone()
            .map(|c| c.y)
            .minmax()
            .into_option()
            .ok_or(AnchorError::EmptyShape)?;

        // i64 so that spans across the full i32 range cannot overflow
        let rows = (i64::from(max_x) - i64::from(min_x) + 1) as u64;
        let cols = (i64::from(max_y) - i64::from(min_y) + 1) as u64;
        let area = rows
            .checked_mul(cols)
            .and_then(|area| usize::try_from(area).ok())
            .ok_or(AnchorError::GridTooLarge { rows, cols })?;
        let (rows, cols) = (rows as usize, cols as usize);

        let mut cells = bitvec![u64, Lsb0; 0; area];
        for c in coords {
            let row = (i64::from(c.x) - i64::from(min_x)) as usize;
            let col = (i64::from(c.y) - i64::from(min_y)) as usize;
            cells.set(row * cols + col, true);
        }

        tracing::trace!(rows, cols, "built occupancy grid");

        Ok(Self {
            rows,
            cols,
            origin: Coord::new(min_x, min_y),
            cells,
        })
    }

    /// Builds a grid from an ASCII picture: `#` is occupied, anything else is
    /// background. The origin is `(0, 0)`.
    ///
    /// Panics if the rows have different lengths.
    #[cfg(test)]
    pub(crate) fn from_rows(picture: &[&str]) -> Self {
        let rows = picture.len();
        let cols = picture.first().map(|r| r.len()).unwrap_or(0);
        assert!(
            picture.iter().all(|r| r.len() == cols),
            "ragged grid picture"
        );

        let cells = picture
            .iter()
            .flat_map(|r| r.bytes().map(|b| b == b'#'))
            .collect();

        Self {
            rows,
            cols,
            origin: Coord::ZERO,
            cells,
        }
    }

    pub(crate) fn with_cells(&self, cells: Cells) -> Self {
        debug_assert_eq!(cells.len(), self.cells.len());
        Self {
            rows: self.rows,
            cols: self.cols,
            origin: self.origin,
            cells,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn origin(&self) -> Coord {
        self.origin
    }

    pub fn area(&self) -> usize {
        self.rows * self.cols
    }

    pub(crate) fn cells(&self) -> &BitSlice<u64, Lsb0> {
        &self.cells
    }

    #[inline(always)]
    pub(crate) fn index(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }

    /// Returns whether `(row, col)` is occupied, or false if out of bounds.
    #[inline(always)]
    pub fn is_occupied(&self, row: usize, col: usize) -> bool {
        if row >= self.rows || col >= self.cols {
            return false;
        }
        self.cells[self.index(row, col)]
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.count_ones()
    }

    /// The in-bounds 4-neighbours of `(row, col)`.
    pub(crate) fn neighbours(&self, row: usize, col: usize) -> impl Iterator<Item = (usize, usize)> {
        let (rows, cols) = (self.rows, self.cols);
        [
            row.checked_sub(1).map(|r| (r, col)),
            (row + 1 < rows).then_some((row + 1, col)),
            col.checked_sub(1).map(|c| (row, c)),
            (col + 1 < cols).then_some((row, col + 1)),
        ]
        .into_iter()
        .flatten()
    }

    /// Maps a grid-local cell back to absolute map space.
    pub fn to_absolute(&self, row: usize, col: usize) -> Coord {
        offset(self.origin, row, col)
    }
}

/// `origin + (row, col)` for in-bounds cells of a grid whose span may exceed
/// `i32::MAX`. The true sum always lies within the bounding box, so it is exact
/// in two's complement even when `row` alone does not fit an `i32`.
fn offset(origin: Coord, row: usize, col: usize) -> Coord {
    Coord::new(
        origin.x.wrapping_add(row as u32 as i32),
        origin.y.wrapping_add(col as u32 as i32),
    )
}

impl fmt::Display for OccupancyGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.rows {
            for col in 0..self.cols {
                let c = if self.is_occupied(row, col) { '#' } else { '.' };
                write!(f, "{c}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
