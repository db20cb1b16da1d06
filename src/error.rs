use thiserror::Error;

/// Top-level error type for the tessellis Voronoi engine.
#[derive(Debug, Error)]
pub enum TessellisError {
    #[error(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    Topology(#[from] TopologyError),

    #[error(transparent)]
    Tessellation(#[from] TessellationError),
}

/// Errors raised while validating the sites and rectangle, before any sweep work.
#[derive(Debug, Error, PartialEq)]
pub enum InputError {
    #[error("rectangle bound is not finite")]
    NonFiniteRectangle,

    #[error("empty rectangle: {axis} range [{min}, {max}] has no extent")]
    EmptyRectangle {
        axis: &'static str,
        min: f64,
        max: f64,
    },

    #[error("site #{index} has a non-finite coordinate")]
    NonFiniteSite { index: usize },

    #[error("site #{index} at ({x}, {y}) lies outside the rectangle")]
    SiteOutsideRectangle { index: usize, x: f64, y: f64 },

    #[error("sites #{first} and #{second} coincide")]
    DuplicateSite { first: usize, second: usize },
}

/// Errors related to the arena-backed planar graph.
#[derive(Debug, Error)]
pub enum TopologyError {
    #[error("entity not found: {0}")]
    EntityNotFound(&'static str),
}

/// Internal invariant failures detected while finishing the diagram.
#[derive(Debug, Error)]
pub enum TessellationError {
    #[error("cell of site #{site} has a gap in its boundary")]
    OpenCellBoundary { site: usize },

    #[error("tessellation failed: {0}")]
    Failed(String),
}

/// Convenience type alias for results using [`TessellisError`].
pub type Result<T> = std::result::Result<T, TessellisError>;
