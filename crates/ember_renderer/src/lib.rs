//! Ember renderer - CPU path tracing.
//!
//! A Monte Carlo path tracer over a closed set of shapes: analytic unit
//! primitives placed in the world through affine transform wrappers,
//! triangle meshes with their own acceleration structure, and a scene-level
//! BVH. Frames are rendered by a fixed worker pool over disjoint row ranges
//! and averaged across frames while the camera holds still.

mod bvh;
mod camera;
mod cube;
mod cylinder;
mod error;
mod film;
mod hittable;
mod integrator;
mod material;
mod mesh;
mod plane;
mod renderer;
mod scene;
mod scheduler;
mod shape;
mod sphere;
mod transform;
mod triangle;

pub use bvh::Bvh;
pub use camera::Camera;
pub use cube::Cube;
pub use cylinder::Cylinder;
pub use error::RenderError;
pub use film::{AccumulationBuffer, ImageBuffer, color_to_rgba, linear_to_gamma};
pub use hittable::{HitRecord, Hittable};
pub use integrator::{sky_gradient, trace_ray, SELF_INTERSECTION_EPSILON};
pub use material::{Color, Material, SurfaceResponse};
pub use mesh::Mesh;
pub use plane::Plane;
pub use renderer::{RenderConfig, Renderer};
pub use scene::Scene;
pub use scheduler::{partition_rows, RenderTask, ThreadPool};
pub use shape::Shape;
pub use sphere::Sphere;
pub use transform::Transformed;
pub use triangle::Triangle;

/// Re-export common math types from ember_math
pub use ember_math::{Aabb, Interval, InvalidGeometry, Ray, Vec3};

use rand::{Rng, RngCore};

/// Uniform random f32 in [0, 1).
pub fn gen_f32(rng: &mut dyn RngCore) -> f32 {
    rng.gen()
}
