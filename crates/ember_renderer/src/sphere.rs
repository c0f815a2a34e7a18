//! Unit sphere primitive.

use crate::{
    hittable::{HitRecord, Hittable},
    Material, Ray,
};
use ember_math::{Aabb, Interval, Vec3};

/// Unit sphere centered at the local-space origin. World placement and
/// sizing go through [`crate::Transformed`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    material: Material,
}

impl Sphere {
    pub fn new(material: Material) -> Self {
        Self { material }
    }
}

impl Hittable for Sphere {
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'a>> {
        // Quadratic for |origin + t*dir|^2 = 1, with the center at origin
        let oc = ray.origin();
        let a = ray.direction().length_squared();
        let half_b = oc.dot(ray.direction());
        let c = oc.length_squared() - 1.0;

        let discriminant = half_b * half_b - a * c;
        if discriminant < 0.0 {
            return None;
        }
        let sqrtd = discriminant.sqrt();

        // Nearest root in range, else the farther one
        let mut root = (-half_b - sqrtd) / a;
        if !ray_t.contains(root) {
            root = (-half_b + sqrtd) / a;
            if !ray_t.contains(root) {
                return None;
            }
        }

        let point = ray.at(root);
        // Radius 1: the hit point is its own unit normal
        Some(HitRecord::new(ray, root, point, point, &self.material))
    }

    fn bounding_box(&self) -> Option<Aabb> {
        Some(Aabb::from_points(Vec3::splat(-1.0), Vec3::splat(1.0)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sphere() -> Sphere {
        Sphere::new(Material::Lambertian {
            albedo: Vec3::splat(0.5),
        })
    }

    #[test]
    fn test_hit_from_outside() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, 3.0), -Vec3::Z).unwrap();
        let shape = sphere();
        let rec = shape.hit(&ray, Interval::new(0.001, f32::INFINITY)).unwrap();

        assert!((rec.t - 2.0).abs() < 1e-5);
        assert!(rec.front_face);
        assert!((rec.normal.length() - 1.0).abs() < 1e-5);
        assert!(rec.normal.dot(ray.direction()) <= 0.0);
    }

    #[test]
    fn test_hit_from_inside_picks_far_root() {
        let ray = Ray::new(Vec3::ZERO, Vec3::X).unwrap();
        let shape = sphere();
        let rec = shape.hit(&ray, Interval::new(0.001, f32::INFINITY)).unwrap();

        assert!((rec.t - 1.0).abs() < 1e-5);
        assert!(!rec.front_face);
        // Oriented normal points back toward the ray origin
        assert!((rec.normal - -Vec3::X).length() < 1e-5);
    }

    #[test]
    fn test_miss() {
        let ray = Ray::new(Vec3::new(0.0, 3.0, 3.0), Vec3::Y).unwrap();
        assert!(sphere().hit(&ray, Interval::new(0.001, f32::INFINITY)).is_none());
    }

    #[test]
    fn test_range_narrowing_rejects_far_hit() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, 3.0), -Vec3::Z).unwrap();
        assert!(sphere().hit(&ray, Interval::new(0.001, 1.5)).is_none());
    }
}
