//! Scene management
//!
//! The spatial core of the viewer:
//!
//! ```text
//! FrustumCuller ──marks visibility──┐
//!                                   ▼
//!                              SceneGraph ──draws──▶ DrawTarget
//!                                   ▲
//! Picker ───tests bounds────────────┘
//! ```
//!
//! - [`SceneGraph`] owns the nodes, re-parents overlapping ones and drives
//!   bounding sphere refresh and drawing each frame
//! - [`FrustumCuller`] approximates the view volume with four planes
//! - [`Picker`] turns a click into rays and finds the first node hit

mod scene_node;
mod scene_graph;
mod frustum;
mod picker;

#[cfg(test)]
mod tests;

pub use scene_node::{NodeId, SceneNode};
pub use scene_graph::{SceneError, SceneGraph, SceneGraphBuilder, ROOT_NAME};
pub use frustum::{FrustumCuller, FrustumSide};
pub use picker::Picker;
