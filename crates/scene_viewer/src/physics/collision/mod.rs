//! Collision primitives and bounding volume estimation

pub mod primitives;
pub mod ritter;

pub use primitives::{BoundingSphere, Ray};
pub use ritter::ritter_bounding_sphere;
