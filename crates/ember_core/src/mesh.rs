//! Flat triangle-mesh data.
//!
//! A [`MeshData`] is positions plus a triangle index list, validated at
//! construction so that everything downstream can index without checks.

use ember_math::{Aabb, Vec3};
use thiserror::Error;

/// Malformed mesh input. These are construction-time failures: a mesh that
/// does not validate is rejected before any render starts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MeshError {
    #[error("triangle index list length {0} is not a multiple of 3")]
    RaggedIndexList(usize),

    #[error("vertex index {index} out of bounds for {vertex_count} vertices")]
    IndexOutOfBounds { index: u32, vertex_count: usize },
}

/// A triangle mesh as a flat vertex/index list.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshData {
    positions: Vec<Vec3>,
    indices: Vec<u32>,
}

impl MeshData {
    /// Validate and take ownership of a vertex/index pair.
    pub fn new(positions: Vec<Vec3>, indices: Vec<u32>) -> Result<Self, MeshError> {
        if indices.len() % 3 != 0 {
            return Err(MeshError::RaggedIndexList(indices.len()));
        }
        for &index in &indices {
            if index as usize >= positions.len() {
                return Err(MeshError::IndexOutOfBounds {
                    index,
                    vertex_count: positions.len(),
                });
            }
        }
        log::debug!(
            "mesh data: {} vertices, {} triangles",
            positions.len(),
            indices.len() / 3
        );
        Ok(Self { positions, indices })
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Iterate the mesh as vertex triples.
    pub fn triangles(&self) -> impl Iterator<Item = [Vec3; 3]> + '_ {
        self.indices.chunks_exact(3).map(|chunk| {
            [
                self.positions[chunk[0] as usize],
                self.positions[chunk[1] as usize],
                self.positions[chunk[2] as usize],
            ]
        })
    }

    /// Bounding box of all vertices; `None` for an empty mesh.
    pub fn bounds(&self) -> Option<Aabb> {
        let first = *self.positions.first()?;
        let mut min = first;
        let mut max = first;
        for &p in &self.positions[1..] {
            min = min.min(p);
            max = max.max(p);
        }
        Some(Aabb::from_points(min, max))
    }
}
