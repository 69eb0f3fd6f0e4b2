use thiserror::Error;

/// Invalid input handed to the kernel.
///
/// Geometry without a solution (parallel, skew, non-concurrent) is never an
/// error: those cases come back as `None` or an empty variant.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum KernelError {
    #[error("line direction has zero length")]
    ZeroDirection,

    #[error("plane normal has zero length")]
    ZeroNormal,

    #[error("non-finite coordinate in {what}")]
    NonFinite { what: &'static str },

    #[error("point is not on the plane (signed distance {distance:.6})")]
    PointNotOnPlane { distance: f64 },

    #[error("a line needs two distinct points")]
    CoincidentPoints,

    #[error("collinear points do not define a plane")]
    CollinearPoints,

    #[error("plane directions are parallel")]
    ParallelDirections,

    #[error("lines are skew or coincident and span no single plane")]
    NonCoplanarLines,

    #[error("unsupported entity combination: {description}")]
    UnsupportedCombination { description: String },
}
