use miette::Diagnostic;
use thiserror::Error;

/// Errors surfaced by the engine. Degenerate geometry is never one of them:
/// the selection policy recovers from it by falling back to the square.
#[derive(Debug, Error, Diagnostic)]
pub enum AnchorError {
    #[error("shape has no coordinates")]
    #[diagnostic(
        code(anchor::empty_shape),
        help("callers must skip entities without geometry before computing an anchor")
    )]
    EmptyShape,

    #[error("bounding box {rows}x{cols} does not fit in memory")]
    #[diagnostic(code(anchor::grid_too_large))]
    GridTooLarge { rows: u64, cols: u64 },

    #[error("grid has no occupied cell")]
    #[diagnostic(code(anchor::no_geometry))]
    NoGeometry,

    #[error("failed to parse shapes: {0}")]
    #[diagnostic(code(anchor::parse))]
    Parse(String),
}

pub type Result<T, E = AnchorError> = std::result::Result<T, E>;
