use crate::{Interval, Ray, Vec3};

/// Axis-aligned bounding box, stored as one interval per axis.
///
/// Construction keeps whatever extents it is given: zero-thickness boxes are
/// legal. Callers that need non-zero volume on every axis (flat planes,
/// triangles used as BVH leaves) call [`Aabb::padded`].
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Aabb {
    pub x: Interval,
    pub y: Interval,
    pub z: Interval,
}

impl Aabb {
    pub fn new(x: Interval, y: Interval, z: Interval) -> Self {
        Self { x, y, z }
    }

    /// Box spanning two corner points, in any order.
    pub fn from_points(a: Vec3, b: Vec3) -> Self {
        Self {
            x: Interval::new(a.x.min(b.x), a.x.max(b.x)),
            y: Interval::new(a.y.min(b.y), a.y.max(b.y)),
            z: Interval::new(a.z.min(b.z), a.z.max(b.z)),
        }
    }

    /// The smallest box containing both inputs.
    pub fn surrounding(box0: &Aabb, box1: &Aabb) -> Self {
        Self {
            x: Interval::surrounding(&box0.x, &box1.x),
            y: Interval::surrounding(&box0.y, &box1.y),
            z: Interval::surrounding(&box0.z, &box1.z),
        }
    }

    /// Interval for axis `n` (0=X, 1=Y, 2=Z).
    pub fn axis_interval(&self, n: usize) -> Interval {
        match n {
            0 => self.x,
            1 => self.y,
            _ => self.z,
        }
    }

    pub fn min_corner(&self) -> Vec3 {
        Vec3::new(self.x.min, self.y.min, self.z.min)
    }

    pub fn max_corner(&self) -> Vec3 {
        Vec3::new(self.x.max, self.y.max, self.z.max)
    }

    /// Copy with every near-degenerate axis expanded by a small epsilon.
    pub fn padded(self) -> Self {
        const DELTA: f32 = 1e-4;
        let pad = |interval: Interval| {
            if interval.size() < DELTA {
                interval.expand(DELTA)
            } else {
                interval
            }
        };
        Self {
            x: pad(self.x),
            y: pad(self.y),
            z: pad(self.z),
        }
    }

    /// Slab test: does `r` cross this box within `ray_t`?
    pub fn hit(&self, r: &Ray, mut ray_t: Interval) -> bool {
        let origin = r.origin();
        let direction = r.direction();

        for axis in 0..3 {
            let interval = self.axis_interval(axis);
            let inv_d = 1.0 / direction[axis];
            let mut t0 = (interval.min - origin[axis]) * inv_d;
            let mut t1 = (interval.max - origin[axis]) * inv_d;
            if inv_d < 0.0 {
                std::mem::swap(&mut t0, &mut t1);
            }
            ray_t.min = t0.max(ray_t.min);
            ray_t.max = t1.min(ray_t.max);
            if ray_t.max <= ray_t.min {
                return false;
            }
        }
        true
    }

    pub const EMPTY: Aabb = Aabb {
        x: Interval::EMPTY,
        y: Interval::EMPTY,
        z: Interval::EMPTY,
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_points_orders_corners() {
        let aabb = Aabb::from_points(Vec3::new(5.0, -1.0, 2.0), Vec3::new(-5.0, 1.0, 0.0));
        assert_eq!(aabb.min_corner(), Vec3::new(-5.0, -1.0, 0.0));
        assert_eq!(aabb.max_corner(), Vec3::new(5.0, 1.0, 2.0));
    }

    #[test]
    fn test_surrounding() {
        let a = Aabb::from_points(Vec3::ZERO, Vec3::splat(5.0));
        let b = Aabb::from_points(Vec3::splat(3.0), Vec3::splat(10.0));
        let merged = Aabb::surrounding(&a, &b);
        assert_eq!(merged.min_corner(), Vec3::ZERO);
        assert_eq!(merged.max_corner(), Vec3::splat(10.0));
    }

    #[test]
    fn test_hit() {
        let aabb = Aabb::from_points(Vec3::splat(-1.0), Vec3::splat(1.0));

        let toward = Ray::new(Vec3::new(0.0, 0.0, -5.0), Vec3::Z).unwrap();
        assert!(aabb.hit(&toward, Interval::new(0.0, 100.0)));

        let away = Ray::new(Vec3::new(0.0, 0.0, -5.0), -Vec3::Z).unwrap();
        assert!(!aabb.hit(&away, Interval::new(0.0, 100.0)));

        let offset = Ray::new(Vec3::new(10.0, 0.0, -5.0), Vec3::Z).unwrap();
        assert!(!aabb.hit(&offset, Interval::new(0.0, 100.0)));
    }

    #[test]
    fn test_degenerate_box_is_kept_until_padded() {
        let flat = Aabb::from_points(Vec3::new(-1.0, 0.0, -1.0), Vec3::new(1.0, 0.0, 1.0));
        assert_eq!(flat.y.size(), 0.0);

        let padded = flat.padded();
        assert!(padded.y.size() > 0.0);
        assert_eq!(padded.x, flat.x);
    }
}
