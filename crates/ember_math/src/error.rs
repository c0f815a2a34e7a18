use thiserror::Error;

/// Geometric input that cannot produce a well-defined result.
///
/// These failures are local to the operation that detected them: a single
/// bad ray or primitive is rejected here instead of letting NaNs leak into
/// downstream buffers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InvalidGeometry {
    #[error("ray direction has zero length")]
    ZeroLengthDirection,

    #[error("triangle vertices are collinear")]
    DegenerateTriangle,

    #[error("camera basis is degenerate: {0}")]
    DegenerateCameraBasis(&'static str),
}
