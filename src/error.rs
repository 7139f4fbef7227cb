use thiserror::Error;

/// Top-level error type for shape finalization.
#[derive(Debug, Error)]
pub enum ShapeError {
    #[error(transparent)]
    Parameter(#[from] ParameterError),

    #[error(transparent)]
    Polygon(#[from] PolygonError),
}

/// Errors related to the scalar parameters of a shape.
#[derive(Debug, Error)]
pub enum ParameterError {
    #[error("parameter {parameter} = {value} is out of range [{min}, {max}]")]
    OutOfRange {
        parameter: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("parameter {parameter} is not finite: {value}")]
    NotFinite { parameter: &'static str, value: f64 },
}

/// Errors related to polygon vertex loops.
#[derive(Debug, Error)]
pub enum PolygonError {
    #[error("polygon needs at least 3 vertices, found {count}")]
    TooFewVertices { count: usize },

    #[error("polygon edges intersect themselves at {count} location(s)")]
    SelfIntersecting { count: usize },

    #[error("vertex index {index} is out of range for a polygon with {len} vertices")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("triangulation failed: {0}")]
    Triangulation(String),
}

/// Convenience type alias for results using [`ShapeError`].
pub type Result<T> = std::result::Result<T, ShapeError>;
