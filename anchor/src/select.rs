use std::fmt;
use std::iter;

use glam::UVec2;

use crate::error::{AnchorError, Result};
use crate::grid::{Coord, OccupancyGrid};
use crate::histogram::Rect;
use crate::square::Square;

/// Rectangles taller than this many times their width lose to the square.
pub const DEFAULT_MAX_ASPECT_RATIO: f64 = 1.2;

/// How thoroughly a candidate rectangle is re-checked against the grid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CoverageCheck {
    /// The four corners and the center cell.
    #[default]
    Sampled,
    /// Every covered cell.
    Exhaustive,
}

/// Why the square was picked over the rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fallback {
    PreferSquare,
    NoRectangle,
    TooTall { height: usize, width: usize },
    Uncovered { row: usize, col: usize },
}

impl fmt::Display for Fallback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PreferSquare => write!(f, "square requested"),
            Self::NoRectangle => write!(f, "no rectangle"),
            Self::TooTall { height, width } => write!(f, "too tall {height}x{width}"),
            Self::Uncovered { row, col } => write!(f, "cell ({row}, {col}) outside shape"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorKind {
    Rectangle,
    Square(Fallback),
}

impl fmt::Display for AnchorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rectangle => write!(f, "rectangle"),
            Self::Square(reason) => write!(f, "square ({reason})"),
        }
    }
}

/// Label anchor in absolute map space.
///
/// `size.x` is the extent along the x axis (the grid's height) and `size.y`
/// the extent along y (its width). Squares have equal components.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Anchor {
    pub center: Coord,
    pub size: UVec2,
    pub kind: AnchorKind,
}

impl Anchor {
    fn place(grid: &OccupancyGrid, rect: Rect, kind: AnchorKind) -> Self {
        let (row, col) = rect.center();
        Self {
            center: grid.to_absolute(row, col),
            size: UVec2::new(rect.height() as u32, rect.width() as u32),
            kind,
        }
    }
}

/// Chooses between the rectangle and square solutions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectionPolicy {
    pub max_aspect_ratio: f64,
    pub coverage: CoverageCheck,
}

impl Default for SelectionPolicy {
    fn default() -> Self {
        Self {
            max_aspect_ratio: DEFAULT_MAX_ASPECT_RATIO,
            coverage: CoverageCheck::default(),
        }
    }
}

impl SelectionPolicy {
    /// Accepts the rectangle, or says why it has to be rejected.
    ///
    /// The sampled check only looks at five cells and can miss a concave
    /// intrusion between them; `CoverageCheck::Exhaustive` cannot.
    pub fn evaluate(&self, grid: &OccupancyGrid, rect: Option<Rect>) -> Result<Rect, Fallback> {
        let rect = rect.ok_or(Fallback::NoRectangle)?;

        let (height, width) = (rect.height(), rect.width());
        if height as f64 > self.max_aspect_ratio * width as f64 {
            return Err(Fallback::TooTall { height, width });
        }

        let outside = match self.coverage {
            CoverageCheck::Sampled => rect
                .corners()
                .into_iter()
                .chain(iter::once(rect.center()))
                .find(|&(row, col)| !grid.is_occupied(row, col)),
            CoverageCheck::Exhaustive => rect.cells().find(|&(row, col)| !grid.is_occupied(row, col)),
        };

        match outside {
            Some((row, col)) => Err(Fallback::Uncovered { row, col }),
            None => Ok(rect),
        }
    }

    /// Picks the winning region and maps it to absolute coordinates.
    ///
    /// Fails only when the grid has no occupied cell at all, which cannot
    /// happen for a grid built from a non-empty shape.
    pub fn choose(
        &self,
        grid: &OccupancyGrid,
        rect: Option<Rect>,
        square: Option<Square>,
        prefer_square: bool,
    ) -> Result<Anchor> {
        let verdict = if prefer_square {
            Err(Fallback::PreferSquare)
        } else {
            self.evaluate(grid, rect)
        };

        match verdict {
            Ok(rect) => Ok(Anchor::place(grid, rect, AnchorKind::Rectangle)),
            Err(reason) => {
                tracing::debug!(%reason, "falling back to largest square");
                let square = square.ok_or(AnchorError::NoGeometry)?;
                Ok(Anchor::place(grid, square.as_rect(), AnchorKind::Square(reason)))
            }
        }
    }
}
