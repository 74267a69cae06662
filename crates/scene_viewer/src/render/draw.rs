//! Draw dispatch
//!
//! The scene core never talks to a graphics API. It hands each visible mesh
//! and the highlighted bounding sphere to a [`DrawTarget`], which a windowed
//! front end implements on top of its renderer.

use crate::assets::Mesh;
use crate::physics::BoundingSphere;

/// Receiver for per-frame draw calls
pub trait DrawTarget {
    /// Draw one visible node's mesh
    fn draw_mesh(&mut self, name: &str, mesh: &dyn Mesh);

    /// Draw a wireframe bounding sphere overlay
    fn draw_bounding_sphere(&mut self, sphere: &BoundingSphere);
}

/// One recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    /// A mesh draw, identified by node name
    Mesh {
        /// Node name
        name: String,
        /// Mesh bounds at draw time
        bounds: BoundingSphere,
    },
    /// A bounding sphere overlay
    BoundingSphere(BoundingSphere),
}

/// Draw target that records every call
///
/// Used headless: tests inspect the calls and the demo logs them.
#[derive(Debug, Default, Clone)]
pub struct RecordingDrawTarget {
    calls: Vec<DrawCall>,
}

impl RecordingDrawTarget {
    /// Create an empty recorder
    pub fn new() -> Self {
        Self::default()
    }

    /// Calls recorded since the last clear
    pub fn calls(&self) -> &[DrawCall] {
        &self.calls
    }

    /// Names of the meshes drawn, in draw order
    pub fn mesh_names(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                DrawCall::Mesh { name, .. } => Some(name.as_str()),
                DrawCall::BoundingSphere(_) => None,
            })
            .collect()
    }

    /// Bounding sphere overlays drawn
    pub fn overlays(&self) -> Vec<BoundingSphere> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                DrawCall::BoundingSphere(sphere) => Some(*sphere),
                DrawCall::Mesh { .. } => None,
            })
            .collect()
    }

    /// Forget all recorded calls
    pub fn clear(&mut self) {
        self.calls.clear();
    }
}

impl DrawTarget for RecordingDrawTarget {
    fn draw_mesh(&mut self, name: &str, mesh: &dyn Mesh) {
        self.calls.push(DrawCall::Mesh {
            name: name.to_string(),
            bounds: mesh.bounds(),
        });
    }

    fn draw_bounding_sphere(&mut self, sphere: &BoundingSphere) {
        self.calls.push(DrawCall::BoundingSphere(*sphere));
    }
}
