//! Affine transform wrapper around a shape.

use crate::{
    hittable::{HitRecord, Hittable},
    Ray, Shape,
};
use ember_math::{trs_matrix, Aabb, Interval, Mat4, Mat4Ext, Vec3};
use std::sync::OnceLock;

/// Matrices derived from the position/rotation/scale triple, plus the
/// world-space envelope of the child's box.
#[derive(Debug)]
struct Matrices {
    local_to_world: Mat4,
    world_to_local: Mat4,
    /// Inverse-transpose, for normals under non-uniform scale
    normal_to_world: Mat4,
    bounds: Option<Aabb>,
}

/// Places a child shape in the world with position, Euler XYZ rotation
/// (degrees) and scale.
///
/// The combined matrix `T * Rz * Rx * Ry * S`, its inverse, and the cached
/// world-space box live in a cell that setters clear and the next query
/// refills: the empty cell is the dirty state, the filled cell is clean.
#[derive(Debug)]
pub struct Transformed {
    child: Box<Shape>,
    position: Vec3,
    rotation: Vec3,
    scale: Vec3,
    cache: OnceLock<Matrices>,
}

impl Transformed {
    pub fn new(child: impl Into<Shape>) -> Self {
        Self {
            child: Box::new(child.into()),
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
            cache: OnceLock::new(),
        }
    }

    pub fn with_position(mut self, position: Vec3) -> Self {
        self.set_position(position);
        self
    }

    pub fn with_rotation(mut self, rotation_degrees: Vec3) -> Self {
        self.set_rotation(rotation_degrees);
        self
    }

    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.set_scale(scale);
        self
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
        self.cache = OnceLock::new();
    }

    pub fn set_rotation(&mut self, rotation_degrees: Vec3) {
        self.rotation = rotation_degrees;
        self.cache = OnceLock::new();
    }

    pub fn set_scale(&mut self, scale: Vec3) {
        self.scale = scale;
        self.cache = OnceLock::new();
    }

    pub fn set_transform(&mut self, position: Vec3, rotation_degrees: Vec3, scale: Vec3) {
        self.position = position;
        self.rotation = rotation_degrees;
        self.scale = scale;
        self.cache = OnceLock::new();
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn rotation(&self) -> Vec3 {
        self.rotation
    }

    pub fn scale(&self) -> Vec3 {
        self.scale
    }

    fn matrices(&self) -> &Matrices {
        self.cache.get_or_init(|| {
            let local_to_world = trs_matrix(self.position, self.rotation, self.scale);
            let world_to_local = local_to_world.inverse();
            Matrices {
                local_to_world,
                world_to_local,
                normal_to_world: world_to_local.transpose(),
                bounds: self
                    .child
                    .bounding_box()
                    .map(|bbox| local_to_world.transform_aabb(&bbox)),
            }
        })
    }
}

impl Hittable for Transformed {
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'a>> {
        let matrices = self.matrices();

        let local_origin = matrices.world_to_local.transform_point3(ray.origin());
        let local_direction = matrices.world_to_local.transform_vector3(ray.direction());

        // Local units per world unit along this ray. The local ray is
        // re-normalized, so the t range scales by the same factor to stay
        // comparable, and local t values scale back by its inverse.
        let direction_scale = local_direction.length();
        let local_ray = Ray::new(local_origin, local_direction).ok()?;
        let local_t = Interval::new(ray_t.min * direction_scale, ray_t.max * direction_scale);

        let rec = self.child.hit(&local_ray, local_t)?;

        let point = matrices.local_to_world.transform_point3(rec.point);
        let normal = matrices
            .normal_to_world
            .transform_vector3(rec.normal)
            .normalize();

        Some(HitRecord {
            point,
            normal,
            t: rec.t / direction_scale,
            front_face: rec.front_face,
            material: rec.material,
        })
    }

    fn bounding_box(&self) -> Option<Aabb> {
        self.matrices().bounds
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Material, Sphere};

    fn sphere() -> Sphere {
        Sphere::new(Material::Lambertian {
            albedo: Vec3::splat(0.5),
        })
    }

    #[test]
    fn test_identity_leaves_hit_unchanged() {
        let bare = sphere();
        let wrapped = Transformed::new(sphere());

        let ray = Ray::new(Vec3::new(0.2, -0.1, 4.0), Vec3::new(-0.05, 0.02, -1.0)).unwrap();
        let range = Interval::new(0.001, f32::INFINITY);

        let direct = bare.hit(&ray, range).unwrap();
        let through = wrapped.hit(&ray, range).unwrap();

        assert!((direct.t - through.t).abs() < 1e-4);
        assert!((direct.point - through.point).length() < 1e-4);
        assert!((direct.normal - through.normal).length() < 1e-4);
        assert_eq!(direct.front_face, through.front_face);
    }

    #[test]
    fn test_translated_sphere() {
        let wrapped = Transformed::new(sphere()).with_position(Vec3::new(0.0, 0.0, -5.0));
        let ray = Ray::new(Vec3::ZERO, -Vec3::Z).unwrap();
        let rec = wrapped.hit(&ray, Interval::new(0.001, f32::INFINITY)).unwrap();

        assert!((rec.t - 4.0).abs() < 1e-4);
        assert!((rec.point - Vec3::new(0.0, 0.0, -4.0)).length() < 1e-4);
        assert!((rec.normal - Vec3::Z).length() < 1e-4);
    }

    #[test]
    fn test_scaled_sphere_keeps_world_t() {
        // Radius 2 sphere: entry at z = 2, so t is measured in world units
        let wrapped = Transformed::new(sphere()).with_scale(Vec3::splat(2.0));
        let ray = Ray::new(Vec3::new(0.0, 0.0, 10.0), -Vec3::Z).unwrap();
        let rec = wrapped.hit(&ray, Interval::new(0.001, f32::INFINITY)).unwrap();

        assert!((rec.t - 8.0).abs() < 1e-3);
        assert!((rec.point.z - 2.0).abs() < 1e-3);
    }

    #[test]
    fn test_nonuniform_scale_normal_uses_inverse_transpose() {
        // Squash the sphere on y: at a point off-axis the normal must tilt
        // away from the plain hit-point direction
        let wrapped = Transformed::new(sphere()).with_scale(Vec3::new(1.0, 0.25, 1.0));
        let origin = Vec3::new(0.6, 0.12, 5.0);
        let ray = Ray::new(origin, -Vec3::Z).unwrap();
        let rec = wrapped.hit(&ray, Interval::new(0.001, f32::INFINITY)).unwrap();

        assert!((rec.normal.length() - 1.0).abs() < 1e-4);
        // Surface is ellipsoid x^2 + (y/0.25)^2 + z^2 = 1; its gradient at
        // the hit point is (2x, 2y/0.0625, 2z)
        let p = rec.point;
        let expected = Vec3::new(p.x, p.y / 0.0625, p.z).normalize();
        assert!((rec.normal - expected).length() < 1e-3);
    }

    #[test]
    fn test_rotation_moves_plane_hits() {
        let plane = crate::Plane::new(Material::Lambertian {
            albedo: Vec3::splat(0.5),
        });
        // Tip the plane to face +X
        let wrapped = Transformed::new(plane).with_rotation(Vec3::new(0.0, 0.0, -90.0));
        let ray = Ray::new(Vec3::new(3.0, 0.0, 0.0), -Vec3::X).unwrap();
        let rec = wrapped.hit(&ray, Interval::new(0.001, f32::INFINITY)).unwrap();

        assert!((rec.t - 3.0).abs() < 1e-4);
        assert!((rec.normal - Vec3::X).length() < 1e-4);
    }

    #[test]
    fn test_setter_invalidates_cached_bounds() {
        let mut wrapped = Transformed::new(sphere());
        let before = wrapped.bounding_box().unwrap();
        assert!((before.max_corner() - Vec3::ONE).length() < 1e-4);

        wrapped.set_scale(Vec3::splat(3.0));
        let after = wrapped.bounding_box().unwrap();
        assert!((after.max_corner() - Vec3::splat(3.0)).length() < 1e-4);
    }

    #[test]
    fn test_range_narrowing_survives_scaling() {
        let wrapped = Transformed::new(sphere()).with_scale(Vec3::splat(2.0));
        let ray = Ray::new(Vec3::new(0.0, 0.0, 10.0), -Vec3::Z).unwrap();

        // Entry hit is at t = 8; a world range ending before it must miss
        assert!(wrapped.hit(&ray, Interval::new(0.001, 7.0)).is_none());
        assert!(wrapped.hit(&ray, Interval::new(0.001, 9.0)).is_some());
    }
}
