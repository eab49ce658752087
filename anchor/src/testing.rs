//! Reference checkers shared by the unit tests.

use crate::grid::OccupancyGrid;
use crate::histogram::Rect;

/// Deterministic grid with roughly 70% occupied cells.
pub(crate) fn random_grid(seed: u64, rows: usize, cols: usize) -> OccupancyGrid {
    let mut state = seed.wrapping_mul(0x9E37_79B9_7F4A_7C15) | 1;
    let mut next = move || {
        // xorshift64
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        state
    };

    let picture: Vec<String> = (0..rows)
        .map(|_| {
            (0..cols)
                .map(|_| if next() % 10 < 7 { '#' } else { '.' })
                .collect()
        })
        .collect();
    let picture: Vec<&str> = picture.iter().map(String::as_str).collect();
    OccupancyGrid::from_rows(&picture)
}

pub(crate) fn fully_covered(grid: &OccupancyGrid, rect: &Rect) -> bool {
    rect.cells().all(|(row, col)| grid.is_occupied(row, col))
}

pub(crate) fn brute_force_rectangle_area(grid: &OccupancyGrid) -> usize {
    let mut best = 0;
    for top in 0..grid.rows() {
        for bottom in top..grid.rows() {
            for left in 0..grid.cols() {
                for right in left..grid.cols() {
                    let rect = Rect {
                        top,
                        bottom,
                        left,
                        right,
                    };
                    if rect.area() > best && fully_covered(grid, &rect) {
                        best = rect.area();
                    }
                }
            }
        }
    }
    best
}

pub(crate) fn brute_force_square_side(grid: &OccupancyGrid) -> usize {
    let mut best = 0;
    for top in 0..grid.rows() {
        for left in 0..grid.cols() {
            let mut side = 1;
            while top + side <= grid.rows() && left + side <= grid.cols() {
                let rect = Rect {
                    top,
                    bottom: top + side - 1,
                    left,
                    right: left + side - 1,
                };
                if !fully_covered(grid, &rect) {
                    break;
                }
                best = best.max(side);
                side += 1;
            }
        }
    }
    best
}
