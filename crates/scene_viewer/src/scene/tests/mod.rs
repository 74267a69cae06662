//! Scenario tests for the scene core
//!
//! Nodes here use [`FixedSphere`], a mesh whose bounds are set directly, so
//! the scenarios can state exact centers and radii.

mod frame_flow;

use crate::assets::Mesh;
use crate::foundation::math::Vec3;

/// Mesh stand-in with an exact bounding sphere
pub(super) struct FixedSphere {
    center: Vec3,
    radius: f32,
}

impl FixedSphere {
    pub(super) fn new(center: Vec3, radius: f32) -> Self {
        Self { center, radius }
    }
}

impl Mesh for FixedSphere {
    fn center(&self) -> Vec3 {
        self.center
    }

    fn radius(&self) -> f32 {
        self.radius
    }

    fn translate(&mut self, offset: &Vec3) {
        self.center += offset;
    }

    fn scale(&mut self, factor: f32) {
        self.radius *= factor;
    }

    fn refresh_bounds(&mut self) {}

    fn vertex_count(&self) -> usize {
        0
    }
}
