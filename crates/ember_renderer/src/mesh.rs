//! Triangle mesh element.

use crate::{
    bvh::linear_hit,
    hittable::{HitRecord, Hittable},
    Bvh, Material, Ray, RenderError, Triangle,
};
use ember_core::MeshData;
use ember_math::{Aabb, Interval};
use rand::RngCore;

/// Triangle count at which a mesh gets its own scoped BVH. Below this a
/// linear scan over the triangles is cheaper than the tree it would build.
const BVH_TRIANGLE_THRESHOLD: usize = 32;

/// A mesh: flat triangle list plus an optional scoped acceleration tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    triangles: Vec<Triangle>,
    bvh: Option<Bvh>,
    bounds: Option<Aabb>,
}

impl Mesh {
    /// Build a mesh from validated flat mesh data, with one material over
    /// all triangles.
    ///
    /// Degenerate triangles fail construction; the rng drives the axis
    /// choices of the scoped BVH when one is built.
    pub fn new(
        data: &MeshData,
        material: Material,
        rng: &mut dyn RngCore,
    ) -> Result<Self, RenderError> {
        let mut triangles = Vec::with_capacity(data.triangle_count());
        for (index, [v0, v1, v2]) in data.triangles().enumerate() {
            let triangle = Triangle::new(v0, v1, v2, material).map_err(|err| {
                log::error!("mesh triangle {index} rejected: {err}");
                err
            })?;
            triangles.push(triangle);
        }

        let bounds = triangles
            .iter()
            .filter_map(|t| t.bounding_box())
            .reduce(|a, b| Aabb::surrounding(&a, &b));

        let bvh = if triangles.len() >= BVH_TRIANGLE_THRESHOLD {
            let tree = Bvh::build(&triangles, rng)?;
            log::info!(
                "mesh BVH: {} triangles, {} nodes",
                triangles.len(),
                tree.node_count()
            );
            Some(tree)
        } else {
            None
        };

        Ok(Self {
            triangles,
            bvh,
            bounds,
        })
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    pub fn has_bvh(&self) -> bool {
        self.bvh.is_some()
    }
}

impl Hittable for Mesh {
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'a>> {
        match &self.bvh {
            Some(bvh) => bvh.hit(&self.triangles, ray, ray_t),
            None => linear_hit(&self.triangles, ray, ray_t),
        }
    }

    fn bounding_box(&self) -> Option<Aabb> {
        self.bounds
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Vec3;
    use ember_math::InvalidGeometry;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn material() -> Material {
        Material::Lambertian {
            albedo: Vec3::splat(0.5),
        }
    }

    /// Flat grid of quads in the XZ plane at y = 0.
    fn grid(cells: u32) -> MeshData {
        let mut positions = Vec::new();
        let mut indices = Vec::new();
        for row in 0..=cells {
            for col in 0..=cells {
                positions.push(Vec3::new(col as f32, 0.0, row as f32));
            }
        }
        let stride = cells + 1;
        for row in 0..cells {
            for col in 0..cells {
                let a = row * stride + col;
                let b = a + 1;
                let c = a + stride;
                let d = c + 1;
                indices.extend_from_slice(&[a, b, c, b, d, c]);
            }
        }
        MeshData::new(positions, indices).unwrap()
    }

    #[test]
    fn test_small_mesh_stays_linear() {
        let mut rng = StdRng::seed_from_u64(5);
        let mesh = Mesh::new(&grid(2), material(), &mut rng).unwrap();
        assert_eq!(mesh.triangle_count(), 8);
        assert!(!mesh.has_bvh());
    }

    #[test]
    fn test_large_mesh_builds_bvh() {
        let mut rng = StdRng::seed_from_u64(5);
        let mesh = Mesh::new(&grid(6), material(), &mut rng).unwrap();
        assert_eq!(mesh.triangle_count(), 72);
        assert!(mesh.has_bvh());
    }

    #[test]
    fn test_bvh_and_linear_agree() {
        let mut rng = StdRng::seed_from_u64(5);
        let mesh = Mesh::new(&grid(6), material(), &mut rng).unwrap();

        for col in 0..12 {
            for row in 0..12 {
                let origin = Vec3::new(col as f32 * 0.5 + 0.25, 5.0, row as f32 * 0.5 + 0.25);
                let ray = Ray::new(origin, -Vec3::Y).unwrap();
                let range = Interval::new(0.001, f32::INFINITY);

                let from_tree = mesh.hit(&ray, range);
                let from_scan = linear_hit(&mesh.triangles, &ray, range);
                match (from_tree, from_scan) {
                    (None, None) => {}
                    (Some(a), Some(b)) => assert!((a.t - b.t).abs() < 1e-4),
                    _ => panic!("tree and scan disagree"),
                }
            }
        }
    }

    #[test]
    fn test_degenerate_triangle_fails_construction() {
        let data = MeshData::new(
            vec![Vec3::ZERO, Vec3::X, Vec3::new(2.0, 0.0, 0.0)],
            vec![0, 1, 2],
        )
        .unwrap();
        let mut rng = StdRng::seed_from_u64(5);
        let result = Mesh::new(&data, material(), &mut rng);
        assert_eq!(
            result.unwrap_err(),
            RenderError::InvalidGeometry(InvalidGeometry::DegenerateTriangle)
        );
    }

    #[test]
    fn test_empty_mesh_has_no_bounds() {
        let data = MeshData::new(vec![], vec![]).unwrap();
        let mut rng = StdRng::seed_from_u64(5);
        let mesh = Mesh::new(&data, material(), &mut rng).unwrap();
        assert!(mesh.bounding_box().is_none());
        let ray = Ray::new(Vec3::ZERO, Vec3::X).unwrap();
        assert!(mesh.hit(&ray, Interval::new(0.001, f32::INFINITY)).is_none());
    }
}
