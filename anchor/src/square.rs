use crate::grid::OccupancyGrid;
use crate::histogram::Rect;

/// Square located by its bottom-right corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Square {
    pub row: usize,
    pub col: usize,
    pub side: usize,
}

impl Square {
    pub fn top(&self) -> usize {
        self.row + 1 - self.side
    }

    pub fn left(&self) -> usize {
        self.col + 1 - self.side
    }

    pub fn as_rect(&self) -> Rect {
        Rect {
            top: self.top(),
            bottom: self.row,
            left: self.left(),
            right: self.col,
        }
    }
}

/// Largest all-occupied square in the grid.
///
/// `side[col]` is the side of the largest square whose bottom-right corner
/// is the current cell. Only the previous row of the table is kept around.
/// The first maximum in row-major order wins.
#[tracing::instrument(level = "debug", skip_all, fields(rows = grid.rows(), cols = grid.cols()))]
pub fn largest_square(grid: &OccupancyGrid) -> Option<Square> {
    let cols = grid.cols();
    let mut prev: Vec<usize> = vec![0; cols];
    let mut curr: Vec<usize> = vec![0; cols];
    let mut best: Option<Square> = None;

    for row in 0..grid.rows() {
        for col in 0..cols {
            curr[col] = if !grid.is_occupied(row, col) {
                0
            } else if row == 0 || col == 0 {
                1
            } else {
                1 + prev[col].min(curr[col - 1]).min(prev[col - 1])
            };

            if curr[col] > best.map_or(0, |s| s.side) {
                best = Some(Square {
                    row,
                    col,
                    side: curr[col],
                });
            }
        }

        std::mem::swap(&mut prev, &mut curr);
    }

    if let Some(square) = best {
        tracing::trace!(?square, "largest square");
    }
    best
}
