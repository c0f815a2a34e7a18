//! Scene aggregate.

use crate::{
    bvh::linear_hit,
    hittable::{HitRecord, Hittable},
    Bvh, Ray, RenderError, Shape,
};
use ember_math::{Aabb, Interval};
use rand::RngCore;

/// The scene: an arena of shapes plus an optional BVH over their indices.
///
/// Geometry always outlives the tree built over it; adding or clearing
/// shapes drops the tree, and queries fall back to a linear scan until
/// [`Scene::build_bvh`] runs again.
#[derive(Debug, Default)]
pub struct Scene {
    shapes: Vec<Shape>,
    bvh: Option<Bvh>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a shape to the scene. Any built hierarchy is invalidated.
    pub fn add(&mut self, shape: impl Into<Shape>) {
        self.shapes.push(shape.into());
        self.bvh = None;
    }

    /// Remove every shape.
    pub fn clear(&mut self) {
        self.shapes.clear();
        self.bvh = None;
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    pub fn has_bvh(&self) -> bool {
        self.bvh.is_some()
    }

    /// Build the acceleration structure over the current shape list.
    ///
    /// Must be called after scene population; a scene that cannot be
    /// validated here is not rendered.
    pub fn build_bvh(&mut self, rng: &mut dyn RngCore) -> Result<(), RenderError> {
        let bvh = Bvh::build(&self.shapes, rng)?;
        log::info!(
            "scene BVH: {} shapes, {} nodes",
            self.shapes.len(),
            bvh.node_count()
        );
        self.bvh = Some(bvh);
        Ok(())
    }
}

impl Hittable for Scene {
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'a>> {
        match &self.bvh {
            Some(bvh) => bvh.hit(&self.shapes, ray, ray_t),
            None => linear_hit(&self.shapes, ray, ray_t),
        }
    }

    fn bounding_box(&self) -> Option<Aabb> {
        let mut bounds: Option<Aabb> = None;
        for shape in &self.shapes {
            let bbox = shape.bounding_box()?;
            bounds = Some(match bounds {
                Some(current) => Aabb::surrounding(&current, &bbox),
                None => bbox,
            });
        }
        bounds
    }
}
