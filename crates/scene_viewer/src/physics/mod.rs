//! Physics module
//!
//! Geometric primitives used for picking and proximity grouping. There is
//! no collision response here; only predicates and bounding volumes.

pub mod collision;

pub use collision::{BoundingSphere, Ray, ritter_bounding_sphere};
