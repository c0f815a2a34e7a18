use crate::{InvalidGeometry, Vec3};

/// Smallest squared direction length accepted by [`Ray::new`].
const MIN_DIRECTION_LENGTH_SQUARED: f32 = 1e-12;

/// A ray in 3D space with an origin and a unit-length direction.
///
/// The direction is normalized at construction, so `t` values measure
/// world-space distance along the ray.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    origin: Vec3,
    direction: Vec3,
}

impl Ray {
    /// Create a ray, normalizing `direction`.
    ///
    /// A zero-length direction has no defined ray and is rejected instead of
    /// producing NaN components.
    pub fn new(origin: Vec3, direction: Vec3) -> Result<Self, InvalidGeometry> {
        let length_squared = direction.length_squared();
        if length_squared < MIN_DIRECTION_LENGTH_SQUARED {
            return Err(InvalidGeometry::ZeroLengthDirection);
        }
        Ok(Self {
            origin,
            direction: direction / length_squared.sqrt(),
        })
    }

    #[inline]
    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    /// Unit-length direction vector.
    #[inline]
    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    /// Point along the ray at parameter `t`: `origin + t * direction`.
    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}
