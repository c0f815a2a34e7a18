// Transform utilities for Mat4
//
// glam::Mat4 already provides transform_point3(), transform_vector3() and
// inverse(); this adds what ray tracing needs on top of those.

use crate::Aabb;
use glam::{Mat4, Vec3};

/// Combined affine matrix for a translation / Euler XYZ rotation / scale
/// triple, composed as `T * Rz * Rx * Ry * S`. Angles are in degrees.
pub fn trs_matrix(translation: Vec3, rotation_degrees: Vec3, scale: Vec3) -> Mat4 {
    Mat4::from_translation(translation)
        * Mat4::from_rotation_z(rotation_degrees.z.to_radians())
        * Mat4::from_rotation_x(rotation_degrees.x.to_radians())
        * Mat4::from_rotation_y(rotation_degrees.y.to_radians())
        * Mat4::from_scale(scale)
}

/// Extension trait for Mat4 transform utilities.
pub trait Mat4Ext {
    /// Transform an axis-aligned box: the axis-aligned envelope of all
    /// eight transformed corners.
    fn transform_aabb(&self, aabb: &Aabb) -> Aabb;
}

impl Mat4Ext for Mat4 {
    fn transform_aabb(&self, aabb: &Aabb) -> Aabb {
        let min = aabb.min_corner();
        let max = aabb.max_corner();

        let corners = [
            Vec3::new(min.x, min.y, min.z),
            Vec3::new(max.x, min.y, min.z),
            Vec3::new(min.x, max.y, min.z),
            Vec3::new(max.x, max.y, min.z),
            Vec3::new(min.x, min.y, max.z),
            Vec3::new(max.x, min.y, max.z),
            Vec3::new(min.x, max.y, max.z),
            Vec3::new(max.x, max.y, max.z),
        ];

        let mut envelope_min = self.transform_point3(corners[0]);
        let mut envelope_max = envelope_min;
        for &corner in &corners[1..] {
            let transformed = self.transform_point3(corner);
            envelope_min = envelope_min.min(transformed);
            envelope_max = envelope_max.max(transformed);
        }

        Aabb::from_points(envelope_min, envelope_max)
    }
}
