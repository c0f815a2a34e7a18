//! Surface scattering.

use crate::{gen_f32, HitRecord, Ray};
use ember_math::Vec3;
use rand::RngCore;

/// Color type alias (RGB values typically 0-1)
pub type Color = Vec3;

/// What a surface does to an incoming ray.
///
/// When `scattered` is `Some`, `attenuation` multiplies everything traced
/// beyond this bounce. When it is `None` the path terminates and
/// `attenuation` is the radiance this surface contributes directly: the
/// emitted light of an emissive surface, or zero for full absorption.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceResponse {
    pub attenuation: Color,
    pub scattered: Option<Ray>,
}

/// Closed set of surface materials.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Material {
    /// Diffuse surface scattering around the normal
    Lambertian { albedo: Color },
    /// Perfect mirror reflection
    Metal { albedo: Color },
    /// Glass-like surface refracting or reflecting by Snell/Schlick
    Dielectric { refraction_index: f32 },
    /// Light source; terminates paths and injects radiance
    Emissive { albedo: Color, intensity: f32 },
}

impl Material {
    /// Scatter an incoming ray at a hit point.
    pub fn scatter(
        &self,
        ray_in: &Ray,
        rec: &HitRecord,
        rng: &mut dyn RngCore,
    ) -> SurfaceResponse {
        match *self {
            Material::Lambertian { albedo } => {
                let mut direction = rec.normal + random_unit_vector(rng);
                // Degenerate when the random vector cancels the normal
                if direction.length_squared() < 1e-8 {
                    direction = rec.normal;
                }
                SurfaceResponse {
                    attenuation: albedo,
                    scattered: Ray::new(rec.point, direction).ok(),
                }
            }
            Material::Metal { albedo } => {
                let reflected = reflect(ray_in.direction(), rec.normal);
                if reflected.dot(rec.normal) > 0.0 {
                    SurfaceResponse {
                        attenuation: albedo,
                        scattered: Ray::new(rec.point, reflected).ok(),
                    }
                } else {
                    // Reflected into the surface: absorbed
                    SurfaceResponse {
                        attenuation: Color::ZERO,
                        scattered: None,
                    }
                }
            }
            Material::Dielectric { refraction_index } => {
                let refraction_ratio = if rec.front_face {
                    1.0 / refraction_index
                } else {
                    refraction_index
                };

                let unit_direction = ray_in.direction();
                let cos_theta = (-unit_direction).dot(rec.normal).min(1.0);
                let sin_theta = (1.0 - cos_theta * cos_theta).sqrt();

                let cannot_refract = refraction_ratio * sin_theta > 1.0;
                let direction = if cannot_refract
                    || reflectance(cos_theta, refraction_ratio) > gen_f32(rng)
                {
                    reflect(unit_direction, rec.normal)
                } else {
                    refract(unit_direction, rec.normal, refraction_ratio)
                };

                SurfaceResponse {
                    // Glass does not tint the light it carries
                    attenuation: Color::ONE,
                    scattered: Ray::new(rec.point, direction).ok(),
                }
            }
            Material::Emissive { albedo, intensity } => SurfaceResponse {
                attenuation: albedo * (1.0 + intensity) * 2.0,
                scattered: None,
            },
        }
    }
}

/// Reflect `v` about the unit normal `n`.
#[inline]
pub(crate) fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}

/// Refract the unit vector `uv` through a surface with normal `n`.
#[inline]
fn refract(uv: Vec3, n: Vec3, etai_over_etat: f32) -> Vec3 {
    let cos_theta = (-uv).dot(n).min(1.0);
    let r_out_perp = etai_over_etat * (uv + cos_theta * n);
    let r_out_parallel = -(1.0 - r_out_perp.length_squared()).abs().sqrt() * n;
    r_out_perp + r_out_parallel
}

/// Schlick's approximation for reflectance.
fn reflectance(cosine: f32, refraction_ratio: f32) -> f32 {
    let r0 = ((1.0 - refraction_ratio) / (1.0 + refraction_ratio)).powi(2);
    r0 + (1.0 - r0) * (1.0 - cosine).powi(5)
}

/// Random unit vector on the unit sphere, by rejection sampling.
pub(crate) fn random_unit_vector(rng: &mut dyn RngCore) -> Vec3 {
    loop {
        let v = Vec3::new(
            gen_f32(rng) * 2.0 - 1.0,
            gen_f32(rng) * 2.0 - 1.0,
            gen_f32(rng) * 2.0 - 1.0,
        );
        let len_sq = v.length_squared();
        if len_sq > 1e-6 && len_sq <= 1.0 {
            return v / len_sq.sqrt();
        }
    }
}
