//! Hittable contract and HitRecord for ray-object intersection.

use crate::{Material, Ray};
use ember_math::{Aabb, Interval, Vec3};

/// Record of a ray-object intersection.
#[derive(Debug, Clone, Copy)]
pub struct HitRecord<'a> {
    /// World-space point of intersection
    pub point: Vec3,
    /// Surface normal at the intersection, oriented against the ray
    pub normal: Vec3,
    /// Parameter t where the intersection occurs
    pub t: f32,
    /// Whether the ray approached from the outward-normal side
    pub front_face: bool,
    /// Material at the intersection point
    pub material: &'a Material,
}

impl<'a> HitRecord<'a> {
    /// Build a record from a primitive's outward normal, resolving the
    /// stored normal against the ray direction. The primitive's authored
    /// winding never decides orientation; the incoming ray does.
    pub fn new(
        ray: &Ray,
        t: f32,
        point: Vec3,
        outward_normal: Vec3,
        material: &'a Material,
    ) -> Self {
        let front_face = ray.direction().dot(outward_normal) < 0.0;
        let normal = if front_face {
            outward_normal
        } else {
            -outward_normal
        };
        Self {
            point,
            normal,
            t,
            front_face,
            material,
        }
    }
}

/// Capability shared by every scene element that a ray can intersect.
pub trait Hittable: Send + Sync {
    /// Nearest intersection within `ray_t`, if any.
    ///
    /// Aggregates resolve nearest-hit among children by narrowing `ray_t.max`
    /// to the closest hit found so far as siblings are tested.
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'a>>;

    /// Bounding box of this element, if it has one.
    ///
    /// Elements placed under a BVH must return `Some`; a `None` at build
    /// time is a hard construction error.
    fn bounding_box(&self) -> Option<Aabb>;
}
