//! Triangle primitive.
//!
//! Uses the Möller-Trumbore algorithm for ray-triangle intersection.

use crate::{
    hittable::{HitRecord, Hittable},
    Material, Ray,
};
use ember_math::{Aabb, Interval, InvalidGeometry, Vec3};

/// A triangle with precomputed edge vectors and face normal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    v0: Vec3,
    edge1: Vec3,
    edge2: Vec3,
    normal: Vec3,
    material: Material,
}

impl Triangle {
    /// Build a triangle from three vertices.
    ///
    /// Collinear vertices have no face normal and are rejected.
    pub fn new(v0: Vec3, v1: Vec3, v2: Vec3, material: Material) -> Result<Self, InvalidGeometry> {
        let edge1 = v1 - v0;
        let edge2 = v2 - v0;

        let cross = edge1.cross(edge2);
        if cross.length_squared() < 1e-12 {
            return Err(InvalidGeometry::DegenerateTriangle);
        }

        Ok(Self {
            v0,
            edge1,
            edge2,
            normal: cross.normalize(),
            material,
        })
    }

    pub fn vertices(&self) -> [Vec3; 3] {
        [self.v0, self.v0 + self.edge1, self.v0 + self.edge2]
    }
}

impl Hittable for Triangle {
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'a>> {
        let h = ray.direction().cross(self.edge2);
        let det = self.edge1.dot(h);

        // Ray is parallel to the triangle plane
        if det.abs() < 1e-8 {
            return None;
        }

        let inv_det = 1.0 / det;
        let s = ray.origin() - self.v0;
        let u = inv_det * s.dot(h);
        if !(0.0..=1.0).contains(&u) {
            return None;
        }

        let q = s.cross(self.edge1);
        let v = inv_det * ray.direction().dot(q);
        if v < 0.0 || u + v > 1.0 {
            return None;
        }

        let t = inv_det * self.edge2.dot(q);
        if !ray_t.contains(t) {
            return None;
        }

        Some(HitRecord::new(ray, t, ray.at(t), self.normal, &self.material))
    }

    fn bounding_box(&self) -> Option<Aabb> {
        let [v0, v1, v2] = self.vertices();
        let min = v0.min(v1).min(v2);
        let max = v0.max(v1).max(v2);
        Some(Aabb::from_points(min, max).padded())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> Triangle {
        Triangle::new(
            Vec3::new(-1.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 2.0, 0.0),
            Material::Lambertian {
                albedo: Vec3::splat(0.5),
            },
        )
        .unwrap()
    }

    #[test]
    fn test_hit_inside() {
        let ray = Ray::new(Vec3::new(0.0, 0.5, 3.0), -Vec3::Z).unwrap();
        let shape = triangle();
        let rec = shape.hit(&ray, Interval::new(0.001, f32::INFINITY)).unwrap();

        assert!((rec.t - 3.0).abs() < 1e-5);
        assert!(rec.front_face);
        assert!((rec.normal - Vec3::Z).length() < 1e-5);
    }

    #[test]
    fn test_barycentric_rejection() {
        // Inside the bounding box of the vertices but outside the triangle
        let ray = Ray::new(Vec3::new(0.9, 1.5, 3.0), -Vec3::Z).unwrap();
        assert!(triangle().hit(&ray, Interval::new(0.001, f32::INFINITY)).is_none());
    }

    #[test]
    fn test_parallel_ray_misses() {
        let ray = Ray::new(Vec3::new(-5.0, 0.5, 0.0), Vec3::X).unwrap();
        assert!(triangle().hit(&ray, Interval::new(0.001, f32::INFINITY)).is_none());
    }

    #[test]
    fn test_degenerate_triangle_is_rejected() {
        let result = Triangle::new(
            Vec3::ZERO,
            Vec3::X,
            Vec3::new(2.0, 0.0, 0.0),
            Material::Lambertian {
                albedo: Vec3::ONE,
            },
        );
        assert_eq!(result.unwrap_err(), InvalidGeometry::DegenerateTriangle);
    }

    #[test]
    fn test_bounding_box_is_padded() {
        let bbox = triangle().bounding_box().unwrap();
        assert!(bbox.z.size() > 0.0);
    }
}
