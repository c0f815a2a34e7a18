//! Closed set of scene elements.

use crate::{
    hittable::{HitRecord, Hittable},
    Cube, Cylinder, Mesh, Plane, Ray, Sphere, Transformed, Triangle,
};
use ember_math::{Aabb, Interval};

/// Everything a scene can hold, as a tagged variant per element kind.
///
/// Intersection dispatch is an exhaustive match instead of a virtual call,
/// so the hot loop stays monomorphic per variant.
#[derive(Debug)]
pub enum Shape {
    Sphere(Sphere),
    Plane(Plane),
    Cube(Cube),
    Cylinder(Cylinder),
    Triangle(Triangle),
    Mesh(Mesh),
    Transformed(Transformed),
}

impl Hittable for Shape {
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'a>> {
        match self {
            Shape::Sphere(sphere) => sphere.hit(ray, ray_t),
            Shape::Plane(plane) => plane.hit(ray, ray_t),
            Shape::Cube(cube) => cube.hit(ray, ray_t),
            Shape::Cylinder(cylinder) => cylinder.hit(ray, ray_t),
            Shape::Triangle(triangle) => triangle.hit(ray, ray_t),
            Shape::Mesh(mesh) => mesh.hit(ray, ray_t),
            Shape::Transformed(transformed) => transformed.hit(ray, ray_t),
        }
    }

    fn bounding_box(&self) -> Option<Aabb> {
        match self {
            Shape::Sphere(sphere) => sphere.bounding_box(),
            Shape::Plane(plane) => plane.bounding_box(),
            Shape::Cube(cube) => cube.bounding_box(),
            Shape::Cylinder(cylinder) => cylinder.bounding_box(),
            Shape::Triangle(triangle) => triangle.bounding_box(),
            Shape::Mesh(mesh) => mesh.bounding_box(),
            Shape::Transformed(transformed) => transformed.bounding_box(),
        }
    }
}

impl From<Sphere> for Shape {
    fn from(value: Sphere) -> Self {
        Shape::Sphere(value)
    }
}

impl From<Plane> for Shape {
    fn from(value: Plane) -> Self {
        Shape::Plane(value)
    }
}

impl From<Cube> for Shape {
    fn from(value: Cube) -> Self {
        Shape::Cube(value)
    }
}

impl From<Cylinder> for Shape {
    fn from(value: Cylinder) -> Self {
        Shape::Cylinder(value)
    }
}

impl From<Triangle> for Shape {
    fn from(value: Triangle) -> Self {
        Shape::Triangle(value)
    }
}

impl From<Mesh> for Shape {
    fn from(value: Mesh) -> Self {
        Shape::Mesh(value)
    }
}

impl From<Transformed> for Shape {
    fn from(value: Transformed) -> Self {
        Shape::Transformed(value)
    }
}
