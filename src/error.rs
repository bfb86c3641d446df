use thiserror::Error;

/// Errors reported by shape construction and transform bookkeeping.
///
/// Numerical outcomes (no overlap, EPA not converging, ...) are never errors,
/// they come back as `None` from the intersection functions.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    #[error("cannot make a polygon with less than 3 vertices (got {count})")]
    TooFewVertices { count: usize },
    #[error("polygon has {count} vertices but its storage holds at most {capacity}")]
    CapacityExceeded { count: usize, capacity: usize },
    #[error("circle radius must be strictly positive (got {0})")]
    NonPositiveRadius(f32),
    #[error("operation requires a circle")]
    NotACircle,
    #[error("operation requires a polygon")]
    NotAPolygon,
    #[error("transform handle does not refer to a live transform")]
    StaleTransform,
    #[error("parenting would create a cycle in the transform hierarchy")]
    TransformCycle,
}
