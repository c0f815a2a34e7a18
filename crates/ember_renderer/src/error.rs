use ember_core::MeshError;
use ember_math::InvalidGeometry;
use thiserror::Error;

/// Errors surfaced by scene construction and the render scheduler.
///
/// Construction failures (bad geometry, an element that cannot enter the
/// BVH) are fatal at setup time and reported before any batch runs; there
/// is no degraded rendering mode.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RenderError {
    #[error(transparent)]
    InvalidGeometry(#[from] InvalidGeometry),

    #[error(transparent)]
    Mesh(#[from] MeshError),

    #[error("acceleration structure: {0}")]
    AccelerationStructure(String),

    #[error("scheduler misuse: {0}")]
    SchedulerMisuse(&'static str),
}
