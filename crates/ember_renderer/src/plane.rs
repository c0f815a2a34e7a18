//! Finite plane primitive.

use crate::{
    hittable::{HitRecord, Hittable},
    Material, Ray,
};
use ember_math::{Aabb, Interval, Vec3};

/// Square in the local XZ plane: `y = 0`, `x, z` in `[-1, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    material: Material,
}

impl Plane {
    pub fn new(material: Material) -> Self {
        Self { material }
    }
}

impl Hittable for Plane {
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'a>> {
        let denominator = ray.direction().dot(Vec3::Y);

        // Parallel rays never cross the plane
        if denominator.abs() < 1e-6 {
            return None;
        }

        let t = -ray.origin().y / denominator;
        if !ray_t.contains(t) {
            return None;
        }

        let point = ray.at(t);
        if point.x < -1.0 || point.x > 1.0 || point.z < -1.0 || point.z > 1.0 {
            return None;
        }

        Some(HitRecord::new(ray, t, point, Vec3::Y, &self.material))
    }

    fn bounding_box(&self) -> Option<Aabb> {
        // Zero thickness in y; padded so the box survives BVH slab tests
        Some(Aabb::from_points(Vec3::new(-1.0, 0.0, -1.0), Vec3::new(1.0, 0.0, 1.0)).padded())
    }
}
