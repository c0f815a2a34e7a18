// Re-export glam for convenience
pub use glam::*;

mod aabb;
mod error;
mod interval;
mod ray;
mod transform;

pub use aabb::Aabb;
pub use error::InvalidGeometry;
pub use interval::Interval;
pub use ray::Ray;
pub use transform::{trs_matrix, Mat4Ext};
