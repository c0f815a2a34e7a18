//! Camera for ray generation.

use ember_math::{InvalidGeometry, Ray, Vec3};

/// Pinhole camera mapping normalized screen coordinates to world rays.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    position: Vec3,
    lower_left: Vec3,
    horizontal: Vec3,
    vertical: Vec3,
}

impl Camera {
    /// Build a camera from a viewpoint, look target, up reference, vertical
    /// field of view in degrees, and width/height aspect ratio.
    ///
    /// The basis is validated here so that [`Camera::get_ray`] can never be
    /// asked to build a ray from a degenerate frame.
    pub fn new(
        look_from: Vec3,
        look_at: Vec3,
        vup: Vec3,
        vfov_degrees: f32,
        aspect_ratio: f32,
    ) -> Result<Self, InvalidGeometry> {
        let theta = vfov_degrees.to_radians();
        let h = (theta / 2.0).tan();
        let viewport_height = 2.0 * h;
        let viewport_width = aspect_ratio * viewport_height;

        let forward = look_from - look_at;
        if forward.length_squared() < 1e-12 {
            return Err(InvalidGeometry::DegenerateCameraBasis(
                "look_from and look_at coincide",
            ));
        }
        let w = forward.normalize();

        let u_raw = vup.cross(w);
        if u_raw.length_squared() < 1e-12 {
            return Err(InvalidGeometry::DegenerateCameraBasis(
                "up vector is parallel to the view direction",
            ));
        }
        let u = u_raw.normalize();
        let v = w.cross(u);

        let horizontal = u * viewport_width;
        let vertical = v * viewport_height;
        let lower_left = look_from - horizontal / 2.0 - vertical / 2.0 - w;

        Ok(Self {
            position: look_from,
            lower_left,
            horizontal,
            vertical,
        })
    }

    /// Camera looking down -Z from the origin with a 90 degree field of view.
    pub fn facing_forward(aspect_ratio: f32) -> Self {
        // The fixed basis cannot be degenerate
        match Self::new(Vec3::ZERO, -Vec3::Z, Vec3::Y, 90.0, aspect_ratio) {
            Ok(camera) => camera,
            Err(_) => unreachable!("fixed camera basis is never degenerate"),
        }
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Ray through normalized screen coordinates `s, t` in `[0, 1]`,
    /// with `t = 0` at the bottom of the frame.
    pub fn get_ray(&self, s: f32, t: f32) -> Result<Ray, InvalidGeometry> {
        Ray::new(
            self.position,
            self.lower_left + self.horizontal * s + self.vertical * t - self.position,
        )
    }
}
