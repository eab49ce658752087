use itertools::iproduct;

use crate::grid::OccupancyGrid;

/// Axis-aligned rectangle in grid-local indices, bounds inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rect {
    pub top: usize,
    pub bottom: usize,
    pub left: usize,
    pub right: usize,
}

impl Rect {
    pub fn height(&self) -> usize {
        self.bottom - self.top + 1
    }

    pub fn width(&self) -> usize {
        self.right - self.left + 1
    }

    pub fn area(&self) -> usize {
        self.height() * self.width()
    }

    /// Floored midpoint as `(row, col)`.
    pub fn center(&self) -> (usize, usize) {
        ((self.top + self.bottom) / 2, (self.left + self.right) / 2)
    }

    pub fn corners(&self) -> [(usize, usize); 4] {
        [
            (self.top, self.left),
            (self.top, self.right),
            (self.bottom, self.left),
            (self.bottom, self.right),
        ]
    }

    /// Every covered cell in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> {
        iproduct!(self.top..=self.bottom, self.left..=self.right)
    }
}

/// Best rectangle under a single histogram.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub area: usize,
    pub left: usize,
    pub right: usize,
    pub height: usize,
}

/// Largest rectangle under a bar histogram, in amortized O(n).
///
/// The stack holds column indices with non-decreasing heights. A bar is
/// popped once a shorter bar shows up, and its rectangle extends from just
/// past the entry below it up to the column before the current one. A
/// zero-height sentinel past the end drains whatever is left.
///
/// The first maximum found wins. Returns `None` when every bar is zero.
pub fn largest_in_histogram(heights: &[usize]) -> Option<Span> {
    let n = heights.len();
    let mut stack: Vec<usize> = Vec::with_capacity(n);
    let mut best: Option<Span> = None;

    for i in 0..=n {
        let current = heights.get(i).copied().unwrap_or(0);

        while let Some(&top) = stack.last() {
            if heights[top] <= current {
                break;
            }
            stack.pop();

            let height = heights[top];
            let left = stack.last().map_or(0, |&below| below + 1);
            let area = height * (i - left);

            if area > best.map_or(0, |b| b.area) {
                best = Some(Span {
                    area,
                    left,
                    right: i - 1,
                    height,
                });
            }
        }

        if i < n {
            stack.push(i);
        }
    }

    best
}

/// Largest all-occupied rectangle in the grid.
///
/// `heights[col]` counts the run of occupied cells ending at the current
/// row, which turns every row into a histogram problem. O(rows * cols).
#[tracing::instrument(level = "debug", skip_all, fields(rows = grid.rows(), cols = grid.cols()))]
pub fn largest_rectangle(grid: &OccupancyGrid) -> Option<Rect> {
    let mut heights = vec![0usize; grid.cols()];
    let mut best: Option<Rect> = None;

    for row in 0..grid.rows() {
        for (col, height) in heights.iter_mut().enumerate() {
            *height = if grid.is_occupied(row, col) {
                *height + 1
            } else {
                0
            };
        }

        let Some(span) = largest_in_histogram(&heights) else {
            continue;
        };

        if span.area > best.map_or(0, |b| b.area()) {
            let width = span.right - span.left + 1;
            best = Some(Rect {
                top: row + 1 - span.area / width,
                bottom: row,
                left: span.left,
                right: span.right,
            });
        }
    }

    if let Some(rect) = best {
        tracing::trace!(?rect, area = rect.area(), "largest rectangle");
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::testing::{brute_force_rectangle_area, fully_covered, random_grid};
    use rstest::rstest;

    #[rstest]
    #[case(&[2, 1, 5, 6, 2, 3], Some((10, 2, 3, 5)))]
    #[case(&[2, 4], Some((4, 1, 1, 4)))]
    #[case(&[3, 3, 3], Some((9, 0, 2, 3)))]
    #[case(&[1, 2, 3, 4, 5], Some((9, 2, 4, 3)))]
    #[case(&[5, 4, 3, 2, 1], Some((9, 0, 2, 3)))]
    #[case(&[0, 0, 0], None)]
    #[case(&[], None)]
    fn histogram_cases(
        #[case] heights: &[usize],
        #[case] expected: Option<(usize, usize, usize, usize)>,
    ) {
        let found = largest_in_histogram(heights).map(|s| (s.area, s.left, s.right, s.height));
        assert_eq!(found, expected);
    }

    #[test]
    fn histogram_keeps_first_maximum() {
        // [2, 2, 0, 4] has two area-4 candidates; the left one is popped first
        let span = largest_in_histogram(&[2, 2, 0, 4]).unwrap();
        assert_eq!((span.left, span.right, span.height), (0, 1, 2));
    }

    #[test]
    fn block_inside_larger_box() {
        let grid = OccupancyGrid::from_rows(&["#####", "#####", "#####", ".....", "....."]);
        let rect = largest_rectangle(&grid).unwrap();

        assert_eq!(rect.area(), 15);
        assert_eq!(
            rect,
            Rect {
                top: 0,
                bottom: 2,
                left: 0,
                right: 4
            }
        );
    }

    #[test]
    fn routes_around_center_hole() {
        let grid = OccupancyGrid::from_rows(&["#####", "#####", "##.##", "#####", "#####"]);
        let rect = largest_rectangle(&grid).unwrap();

        assert_eq!(rect.area(), 10);
        assert!(fully_covered(&grid, &rect));
    }

    #[test]
    fn disconnected_blocks_do_not_merge() {
        let mut picture = vec!["..........".to_string(); 10];
        picture[0] = "##........".into();
        picture[1] = "##........".into();
        picture[8] = "........##".into();
        picture[9] = "........##".into();
        let rows: Vec<&str> = picture.iter().map(String::as_str).collect();
        let grid = OccupancyGrid::from_rows(&rows);

        let rect = largest_rectangle(&grid).unwrap();
        assert_eq!((rect.height(), rect.width()), (2, 2));
    }

    #[test]
    fn empty_grid_has_no_rectangle() {
        let grid = OccupancyGrid::from_rows(&["...", "..."]);
        assert_eq!(largest_rectangle(&grid), None);
    }

    #[test]
    fn matches_brute_force_on_random_grids() {
        for seed in 1..=60 {
            let grid = random_grid(seed, 1 + (seed as usize % 7), 1 + (seed as usize * 3 % 8));
            let expected = brute_force_rectangle_area(&grid);

            match largest_rectangle(&grid) {
                Some(rect) => {
                    assert_eq!(rect.area(), expected, "seed {seed}\n{grid}");
                    assert!(rect.bottom < grid.rows() && rect.right < grid.cols());
                    assert!(fully_covered(&grid, &rect), "seed {seed}\n{grid}");
                }
                None => assert_eq!(expected, 0, "seed {seed}\n{grid}"),
            }
        }
    }

    #[test]
    fn same_grid_same_rectangle() {
        let grid = random_grid(42, 12, 12);
        assert_eq!(largest_rectangle(&grid), largest_rectangle(&grid.clone()));
    }
}
