use bitvec::prelude::*;

use crate::grid::{Cells, OccupancyGrid};

/// Closes every background region that cannot reach the grid's outer edge.
///
/// Background cells reachable from the border (bays, the area around the
/// shape) stay background. The input is left untouched and the result is a
/// superset of it.
#[tracing::instrument(level = "debug", skip_all, fields(rows = grid.rows(), cols = grid.cols()))]
pub fn fill_holes(grid: &OccupancyGrid) -> OccupancyGrid {
    let exterior = flood_fill_exterior(grid);

    // everything that is neither shape nor exterior is a hole
    let filled: Cells = !exterior;

    let holes = filled.count_ones() - grid.occupied_count();
    tracing::debug!(holes, "filled interior holes");

    grid.with_cells(filled)
}

/// Marks every background cell 4-connected to a background cell on the edge.
fn flood_fill_exterior(grid: &OccupancyGrid) -> Cells {
    let (rows, cols) = (grid.rows(), grid.cols());
    let occupied = grid.cells();
    let mut visited = bitvec![u64, Lsb0; 0; rows * cols];
    if rows == 0 || cols == 0 {
        return visited;
    }

    let mut stack: Vec<(usize, usize)> = Vec::with_capacity(rows + cols);

    let mut seed = |row: usize, col: usize, visited: &mut BitSlice<u64, Lsb0>| {
        let idx = grid.index(row, col);
        if !occupied[idx] && !visited[idx] {
            visited.set(idx, true);
            stack.push((row, col));
        }
    };

    for col in 0..cols {
        seed(0, col, &mut visited);
        seed(rows - 1, col, &mut visited);
    }
    for row in 0..rows {
        seed(row, 0, &mut visited);
        seed(row, cols - 1, &mut visited);
    }

    while let Some((row, col)) = stack.pop() {
        for (nr, nc) in grid.neighbours(row, col) {
            let idx = grid.index(nr, nc);
            if !visited[idx] && !occupied[idx] {
                visited.set(idx, true);
                stack.push((nr, nc));
            }
        }
    }

    visited
}
