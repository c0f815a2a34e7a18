//! Ember core - renderer-agnostic scene data.
//!
//! This crate is the boundary where externally produced geometry enters the
//! renderer: mesh file parsing (OBJ, USD, ...) lives outside, and hands over
//! flat vertex/triangle lists that are validated here once, up front.

pub mod mesh;

pub use mesh::{MeshData, MeshError};
