//! Recursive path-tracing integrator.

use crate::{hittable::Hittable, Color, Ray, Scene};
use ember_math::Interval;
use rand::RngCore;

/// Offset from a surface before the next segment starts, suppressing
/// self-intersection ("shadow acne") on the surface the ray just left.
pub const SELF_INTERSECTION_EPSILON: f32 = 1e-3;

/// Estimate the radiance arriving along `ray`.
///
/// `depth` is the remaining bounce budget: at zero the path is truncated to
/// black, a bias rather than a variance-reduction trick. A hit either
/// scatters (recurse, attenuated) or terminates the path with the
/// material's contributed radiance. A miss samples the sky gradient, the
/// implicit environment light.
pub fn trace_ray(ray: &Ray, scene: &Scene, depth: u32, rng: &mut dyn RngCore) -> Color {
    if depth == 0 {
        return Color::ZERO;
    }

    match scene.hit(ray, Interval::new(SELF_INTERSECTION_EPSILON, f32::INFINITY)) {
        Some(rec) => {
            let response = rec.material.scatter(ray, &rec, rng);
            match response.scattered {
                Some(scattered) => {
                    response.attenuation * trace_ray(&scattered, scene, depth - 1, rng)
                }
                None => response.attenuation,
            }
        }
        None => sky_gradient(ray),
    }
}

/// Background gradient: white at the horizon blending to blue overhead.
pub fn sky_gradient(ray: &Ray) -> Color {
    let a = 0.5 * (ray.direction().y + 1.0);
    Color::ONE * (1.0 - a) + Color::new(0.5, 0.7, 1.0) * a
}
