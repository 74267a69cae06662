//! Virtual trackball
//!
//! Maps window points onto a unit sphere centered in the viewport and turns a
//! drag between two points into a rotation. Points outside the sphere's
//! silhouette land on a hyperbolic sheet so dragging past the edge still
//! rotates smoothly.

use super::camera::{Camera, Viewport};
use crate::foundation::math::{utils, Quat, Unit, Vec3};

/// Drag state for Control + left-button trackball rotation
#[derive(Debug, Default, Clone)]
pub struct Trackball {
    anchor: Option<Vec3>,
}

impl Trackball {
    /// Create an idle trackball
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a drag is in progress
    pub fn is_dragging(&self) -> bool {
        self.anchor.is_some()
    }

    /// Start a drag at window point `(x, y)`
    pub fn begin(&mut self, viewport: &Viewport, x: f32, y: f32) {
        self.anchor = Some(project_to_sphere(viewport, x, y));
    }

    /// Continue the drag to `(x, y)` and return the world-space rotation
    ///
    /// The anchor moves to the new point, so successive calls yield
    /// incremental rotations. Returns `None` when no drag is active or the
    /// pointer has not moved far enough to define an axis.
    pub fn drag(&mut self, viewport: &Viewport, camera: &Camera, x: f32, y: f32) -> Option<Quat> {
        let from = self.anchor?;
        let to = project_to_sphere(viewport, x, y);
        self.anchor = Some(to);

        let axis = utils::try_normalize(&from.cross(&to))?;
        let angle = from.normalize().dot(&to.normalize()).clamp(-1.0, 1.0).acos();

        let world_axis = camera.eye_to_world(&axis)?;
        Some(Quat::from_axis_angle(
            &Unit::new_normalize(world_axis),
            angle,
        ))
    }

    /// End the drag
    pub fn end(&mut self) {
        self.anchor = None;
    }
}

/// Project window point `(x, y)` onto the trackball surface in eye space
///
/// Window y grows downward; the result has +Y up and +Z toward the viewer.
pub fn project_to_sphere(viewport: &Viewport, x: f32, y: f32) -> Vec3 {
    let half_width = (viewport.width * 0.5).max(1.0);
    let half_height = (viewport.height * 0.5).max(1.0);
    let px = (x - viewport.x - half_width) / half_width;
    let py = (half_height - (y - viewport.y)) / half_height;

    let d2 = px * px + py * py;
    let z = if d2 <= 0.5 {
        (1.0 - d2).sqrt()
    } else {
        0.5 / d2.sqrt()
    };
    Vec3::new(px, py, z)
}
