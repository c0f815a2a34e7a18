//! Bounding volume hierarchy.
//!
//! The tree does not own any geometry: it is built over a slice of elements
//! and stores indices into that slice, so the same elements stay addressable
//! in their owning arena (the scene's shape list, a mesh's triangle list)
//! while the hierarchy accelerates queries over them.

use crate::{
    hittable::{HitRecord, Hittable},
    RenderError,
};
use ember_math::{Aabb, Interval, Ray};
use rand::{Rng, RngCore};

/// A node child: either an element of the indexed slice or another node.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Child {
    Element(u32),
    Node(u32),
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Node {
    bbox: Aabb,
    left: Child,
    right: Child,
}

/// Binary tree of axis-aligned boxes over an element arena.
///
/// Immutable once built; a changed element list requires a full rebuild.
#[derive(Debug, Clone, PartialEq)]
pub struct Bvh {
    nodes: Vec<Node>,
    root: u32,
}

impl Bvh {
    /// Build a hierarchy over `elements`.
    ///
    /// Every element must produce a bounding box; one that cannot is a hard
    /// construction failure rather than a silently mis-bounded tree.
    pub fn build<T: Hittable>(elements: &[T], rng: &mut dyn RngCore) -> Result<Self, RenderError> {
        if elements.is_empty() {
            return Err(RenderError::AccelerationStructure(
                "cannot build over an empty element list".to_string(),
            ));
        }

        let mut boxes = Vec::with_capacity(elements.len());
        for (index, element) in elements.iter().enumerate() {
            let bbox = element.bounding_box().ok_or_else(|| {
                RenderError::AccelerationStructure(format!(
                    "element {index} cannot produce a bounding box"
                ))
            })?;
            boxes.push(bbox);
        }

        let mut order: Vec<u32> = (0..elements.len() as u32).collect();
        let mut nodes = Vec::with_capacity(2 * elements.len());
        let root = Self::split(&mut nodes, &boxes, &mut order, rng);

        Ok(Self { nodes, root })
    }

    /// Recursively partition `order`, returning the built node's index.
    fn split(
        nodes: &mut Vec<Node>,
        boxes: &[Aabb],
        order: &mut [u32],
        rng: &mut dyn RngCore,
    ) -> u32 {
        let axis: usize = rng.gen_range(0..3);
        let box_min = |index: u32| boxes[index as usize].axis_interval(axis).min;

        let node = match order {
            [single] => {
                // A one-element range is both children of its node
                let element = *single;
                Node {
                    bbox: boxes[element as usize],
                    left: Child::Element(element),
                    right: Child::Element(element),
                }
            }
            [first, second] => {
                let (near, far) = if box_min(*first) <= box_min(*second) {
                    (*first, *second)
                } else {
                    (*second, *first)
                };
                Node {
                    bbox: Aabb::surrounding(&boxes[near as usize], &boxes[far as usize]),
                    left: Child::Element(near),
                    right: Child::Element(far),
                }
            }
            _ => {
                order.sort_unstable_by(|&a, &b| {
                    box_min(a)
                        .partial_cmp(&box_min(b))
                        .unwrap_or(std::cmp::Ordering::Equal)
                });
                let mid = order.len() / 2;
                let (left_order, right_order) = order.split_at_mut(mid);

                let left = Self::split(nodes, boxes, left_order, rng);
                let right = Self::split(nodes, boxes, right_order, rng);
                Node {
                    bbox: Aabb::surrounding(
                        &nodes[left as usize].bbox,
                        &nodes[right as usize].bbox,
                    ),
                    left: Child::Node(left),
                    right: Child::Node(right),
                }
            }
        };

        nodes.push(node);
        nodes.len() as u32 - 1
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Bounding box of the whole tree.
    pub fn bounds(&self) -> Aabb {
        self.nodes[self.root as usize].bbox
    }

    /// Nearest hit in the tree, querying back into the element arena the
    /// hierarchy was built over.
    pub fn hit<'a, T: Hittable>(
        &self,
        elements: &'a [T],
        ray: &Ray,
        ray_t: Interval,
    ) -> Option<HitRecord<'a>> {
        self.hit_node(self.root, elements, ray, ray_t)
    }

    fn hit_node<'a, T: Hittable>(
        &self,
        index: u32,
        elements: &'a [T],
        ray: &Ray,
        ray_t: Interval,
    ) -> Option<HitRecord<'a>> {
        let node = &self.nodes[index as usize];
        if !node.bbox.hit(ray, ray_t) {
            return None;
        }

        let left_hit = self.hit_child(node.left, elements, ray, ray_t);

        // Narrow the right child's range to the left hit, so a farther
        // candidate can never replace a nearer one
        let right_max = left_hit.as_ref().map_or(ray_t.max, |hit| hit.t);
        let right_hit = self.hit_child(node.right, elements, ray, Interval::new(ray_t.min, right_max));

        right_hit.or(left_hit)
    }

    fn hit_child<'a, T: Hittable>(
        &self,
        child: Child,
        elements: &'a [T],
        ray: &Ray,
        ray_t: Interval,
    ) -> Option<HitRecord<'a>> {
        match child {
            Child::Element(element) => elements[element as usize].hit(ray, ray_t),
            Child::Node(node) => self.hit_node(node, elements, ray, ray_t),
        }
    }
}

/// Nearest hit by plain linear scan, narrowing the range per element.
pub(crate) fn linear_hit<'a, T: Hittable>(
    elements: &'a [T],
    ray: &Ray,
    ray_t: Interval,
) -> Option<HitRecord<'a>> {
    let mut closest_so_far = ray_t.max;
    let mut hit = None;

    for element in elements {
        if let Some(rec) = element.hit(ray, Interval::new(ray_t.min, closest_so_far)) {
            closest_so_far = rec.t;
            hit = Some(rec);
        }
    }

    hit
}
