//! Unit cylinder primitive.

use crate::{
    hittable::{HitRecord, Hittable},
    Material, Ray,
};
use ember_math::{Aabb, Interval, Vec3};

/// Capped cylinder of radius 1 spanning `y` in `[-1, 1]` in local space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cylinder {
    material: Material,
}

impl Cylinder {
    pub fn new(material: Material) -> Self {
        Self { material }
    }
}

impl Hittable for Cylinder {
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'a>> {
        let origin = ray.origin();
        let direction = ray.direction();

        let mut closest_t = ray_t.max;
        let mut hit: Option<HitRecord<'a>> = None;

        // Lateral surface: quadratic in x,z
        let a = direction.x * direction.x + direction.z * direction.z;
        if a > 1e-8 {
            let b = 2.0 * (origin.x * direction.x + origin.z * direction.z);
            let c = origin.x * origin.x + origin.z * origin.z - 1.0;
            let discriminant = b * b - 4.0 * a * c;

            if discriminant >= 0.0 {
                let sqrtd = discriminant.sqrt();
                // Nearer root first; the first valid candidate is the hit
                for t in [(-b - sqrtd) / (2.0 * a), (-b + sqrtd) / (2.0 * a)] {
                    if t < ray_t.min || t > ray_t.max {
                        continue;
                    }
                    let point = ray.at(t);
                    if point.y < -1.0 || point.y > 1.0 {
                        continue;
                    }
                    let outward_normal = Vec3::new(point.x, 0.0, point.z).normalize();
                    hit = Some(HitRecord::new(ray, t, point, outward_normal, &self.material));
                    closest_t = t;
                    break;
                }
            }
        }

        // Top cap: narrows the accepted range for the test below it
        if direction.y.abs() > 1e-8 {
            let t = (1.0 - origin.y) / direction.y;
            if t >= ray_t.min && t <= closest_t {
                let point = ray.at(t);
                if point.x * point.x + point.z * point.z <= 1.0 {
                    hit = Some(HitRecord::new(ray, t, point, Vec3::Y, &self.material));
                    closest_t = t;
                }
            }
        }

        // Bottom cap: compares against the narrowed bound but leaves it as is
        if direction.y.abs() > 1e-8 {
            let t = (-1.0 - origin.y) / direction.y;
            if t >= ray_t.min && t < closest_t {
                let point = ray.at(t);
                if point.x * point.x + point.z * point.z <= 1.0 {
                    hit = Some(HitRecord::new(ray, t, point, -Vec3::Y, &self.material));
                }
            }
        }

        hit
    }

    fn bounding_box(&self) -> Option<Aabb> {
        Some(Aabb::from_points(Vec3::splat(-1.0), Vec3::splat(1.0)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cylinder() -> Cylinder {
        Cylinder::new(Material::Lambertian {
            albedo: Vec3::splat(0.5),
        })
    }

    #[test]
    fn test_lateral_hit() {
        let ray = Ray::new(Vec3::new(5.0, 0.0, 0.0), -Vec3::X).unwrap();
        let shape = cylinder();
        let rec = shape.hit(&ray, Interval::new(0.001, f32::INFINITY)).unwrap();

        assert!((rec.t - 4.0).abs() < 1e-4);
        assert!((rec.normal - Vec3::X).length() < 1e-5);
        assert!(rec.front_face);
    }

    #[test]
    fn test_top_cap_hit() {
        let ray = Ray::new(Vec3::new(0.3, 5.0, 0.2), -Vec3::Y).unwrap();
        let shape = cylinder();
        let rec = shape.hit(&ray, Interval::new(0.001, f32::INFINITY)).unwrap();

        assert!((rec.t - 4.0).abs() < 1e-4);
        assert_eq!(rec.normal, Vec3::Y);
    }

    #[test]
    fn test_bottom_cap_hit() {
        let ray = Ray::new(Vec3::new(0.0, -5.0, 0.0), Vec3::Y).unwrap();
        let shape = cylinder();
        let rec = shape.hit(&ray, Interval::new(0.001, f32::INFINITY)).unwrap();

        assert!((rec.t - 4.0).abs() < 1e-4);
        assert!(rec.front_face);
        assert_eq!(rec.normal, -Vec3::Y);
    }

    #[test]
    fn test_cap_does_not_shadow_nearer_lateral_hit() {
        // Slanted ray that crosses the wall before reaching the top cap plane
        let ray = Ray::new(Vec3::new(3.0, 0.5, 0.0), Vec3::new(-1.0, 0.05, 0.0)).unwrap();
        let shape = cylinder();
        let rec = shape.hit(&ray, Interval::new(0.001, f32::INFINITY)).unwrap();

        // Wall hit near x = 1
        assert!((rec.point.x - 1.0).abs() < 1e-3);
        assert!(rec.normal.y.abs() < 1e-3);
    }

    #[test]
    fn test_miss_beside_cylinder() {
        let ray = Ray::new(Vec3::new(5.0, 2.5, 0.0), -Vec3::X).unwrap();
        assert!(cylinder().hit(&ray, Interval::new(0.001, f32::INFINITY)).is_none());
    }
}
