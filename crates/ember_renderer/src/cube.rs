//! Unit cube primitive.

use crate::{
    hittable::{HitRecord, Hittable},
    Material, Ray,
};
use ember_math::{Aabb, Interval, Vec3};

/// Axis-aligned cube spanning `[-1, 1]` on every axis in local space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cube {
    material: Material,
}

impl Cube {
    pub fn new(material: Material) -> Self {
        Self { material }
    }
}

impl Hittable for Cube {
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'a>> {
        let origin = ray.origin();
        let direction = ray.direction();

        let mut t_low = [f32::NEG_INFINITY; 3];
        let mut t_high = [f32::INFINITY; 3];

        for axis in 0..3 {
            if direction[axis].abs() > 1e-8 {
                let inv_d = 1.0 / direction[axis];
                let mut lo = (-1.0 - origin[axis]) * inv_d;
                let mut hi = (1.0 - origin[axis]) * inv_d;
                if lo > hi {
                    std::mem::swap(&mut lo, &mut hi);
                }
                t_low[axis] = lo;
                t_high[axis] = hi;
            } else if origin[axis] < -1.0 || origin[axis] > 1.0 {
                // Parallel to this axis and outside its slab
                return None;
            }
        }

        let t_near = t_low[0].max(t_low[1]).max(t_low[2]);
        let t_far = t_high[0].min(t_high[1]).min(t_high[2]);

        if t_near > t_far {
            return None;
        }
        if t_near > ray_t.max || t_far < ray_t.min {
            return None;
        }

        // Entry point unless the ray starts inside the cube
        let t = if t_near < ray_t.min { t_far } else { t_near };
        if t > ray_t.max {
            return None;
        }

        // Which axis bound produced t decides the face normal
        const EPSILON: f32 = 1e-6;
        let mut outward_normal = Vec3::ZERO;
        for axis in 0..3 {
            if (t - t_low[axis]).abs() < EPSILON {
                outward_normal[axis] = -1.0;
                break;
            }
            if (t - t_high[axis]).abs() < EPSILON {
                outward_normal[axis] = 1.0;
                break;
            }
        }

        Some(HitRecord::new(ray, t, ray.at(t), outward_normal, &self.material))
    }

    fn bounding_box(&self) -> Option<Aabb> {
        Some(Aabb::from_points(Vec3::splat(-1.0), Vec3::splat(1.0)))
    }
}
