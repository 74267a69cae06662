//! Four-plane frustum culling
//!
//! An approximation of the view frustum by its left, right, top and bottom
//! half-spaces, all passing through the eye. Only node centers are tested and
//! the near and far planes are ignored, so a sphere whose center is just
//! outside a side plane is culled even if part of it would be on screen.

use super::scene_graph::SceneGraph;
use crate::assets::Mesh;
use crate::foundation::math::{Quat, Vec3};

/// Side of the frustum a plane bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrustumSide {
    /// Left plane
    Left = 0,
    /// Right plane
    Right = 1,
    /// Top plane
    Top = 2,
    /// Bottom plane
    Bottom = 3,
}

impl FrustumSide {
    /// All sides in storage order
    pub const ALL: [FrustumSide; 4] = [Self::Left, Self::Right, Self::Top, Self::Bottom];
}

/// Outward normals for a camera looking down -Z with +Y up
fn initial_normals() -> [Vec3; 4] {
    [
        Vec3::new(-1.0, 0.0, 0.5).normalize(),
        Vec3::new(1.0, 0.0, 0.5).normalize(),
        Vec3::new(0.0, 1.0, 0.5).normalize(),
        Vec3::new(0.0, -1.0, 0.5).normalize(),
    ]
}

/// Frustum culler holding four outward plane normals in world space
#[derive(Debug, Clone)]
pub struct FrustumCuller {
    normals: [Vec3; 4],
}

impl Default for FrustumCuller {
    fn default() -> Self {
        Self::new()
    }
}

impl FrustumCuller {
    /// Create a culler matching the camera's start orientation
    pub fn new() -> Self {
        Self {
            normals: initial_normals(),
        }
    }

    /// Restore the start normals
    pub fn reset(&mut self) {
        self.normals = initial_normals();
    }

    /// Outward normal of one side
    pub fn normal(&self, side: FrustumSide) -> Vec3 {
        self.normals[side as usize]
    }

    /// Apply the camera's rotation to every normal
    pub fn rotate(&mut self, rotation: &Quat) {
        for normal in &mut self.normals {
            *normal = (rotation * *normal).normalize();
        }
    }

    /// Whether `point` is inside all four half-spaces as seen from `eye`
    ///
    /// A point exactly on a plane counts as inside.
    pub fn is_visible(&self, eye: &Vec3, point: &Vec3) -> bool {
        let to_point = point - eye;
        self.normals.iter().all(|normal| normal.dot(&to_point) <= 0.0)
    }

    /// Mark every mesh node visible or culled by its mesh center
    ///
    /// Returns the number of visible nodes.
    pub fn cull(&self, graph: &mut SceneGraph, eye: &Vec3) -> usize {
        let ids: Vec<_> = graph.mesh_ids().collect();
        let mut visible_count = 0;
        for id in ids {
            let center = match graph.node(id).and_then(|node| node.mesh()) {
                Some(mesh) => mesh.center(),
                None => continue,
            };
            let visible = self.is_visible(eye, &center);
            if graph.set_visible(id, visible).is_ok() && visible {
                visible_count += 1;
            }
        }
        log::trace!("Frustum cull: {} visible", visible_count);
        visible_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::TriangleMesh;
    use crate::foundation::math::utils;
    use approx::assert_relative_eq;

    fn eye() -> Vec3 {
        Vec3::new(0.0, 0.0, 5.0)
    }

    #[test]
    fn test_point_ahead_is_visible() {
        let culler = FrustumCuller::new();
        assert!(culler.is_visible(&eye(), &Vec3::zeros()));
        assert!(culler.is_visible(&eye(), &Vec3::new(1.0, -1.0, 0.0)));
    }

    #[test]
    fn test_point_outside_one_plane_is_culled() {
        let culler = FrustumCuller::new();
        assert!(!culler.is_visible(&eye(), &Vec3::new(-10.0, 0.0, 0.0)));
        assert!(!culler.is_visible(&eye(), &Vec3::new(10.0, 0.0, 0.0)));
        assert!(!culler.is_visible(&eye(), &Vec3::new(0.0, 10.0, 0.0)));
        assert!(!culler.is_visible(&eye(), &Vec3::new(0.0, -20.0, 2.0)));
        // Behind the eye
        assert!(!culler.is_visible(&eye(), &Vec3::new(0.0, 0.0, 10.0)));
    }

    #[test]
    fn test_point_on_plane_is_visible() {
        let culler = FrustumCuller::new();
        // The eye lies on all four planes
        assert!(culler.is_visible(&eye(), &eye()));
    }

    #[test]
    fn test_normals_are_unit_and_ordered() {
        let culler = FrustumCuller::new();
        for side in FrustumSide::ALL {
            assert_relative_eq!(culler.normal(side).magnitude(), 1.0, epsilon = 1e-6);
        }
        assert!(culler.normal(FrustumSide::Top).y > 0.0);
        assert!(culler.normal(FrustumSide::Left).x < 0.0);
    }

    #[test]
    fn test_rotation_follows_camera() {
        let mut culler = FrustumCuller::new();
        // Camera turned a quarter turn to look down -X
        let rotation = Quat::from_axis_angle(&Vec3::y_axis(), utils::deg_to_rad(90.0));
        culler.rotate(&rotation);

        let origin = Vec3::zeros();
        assert!(culler.is_visible(&origin, &Vec3::new(-5.0, 0.0, 0.0)));
        assert!(!culler.is_visible(&origin, &Vec3::new(0.0, 0.0, -5.0)));

        culler.reset();
        assert!(culler.is_visible(&origin, &Vec3::new(0.0, 0.0, -5.0)));
    }

    #[test]
    fn test_cull_marks_nodes() {
        let mut far_left = TriangleMesh::cube(0.5);
        far_left.translate(&Vec3::new(-10.0, 0.0, 0.0));

        let mut builder = SceneGraph::builder();
        let ahead = builder.add("ahead", TriangleMesh::cube(0.5));
        let left = builder.add("left", far_left);
        let mut graph = builder.build().unwrap();

        let culler = FrustumCuller::new();
        assert_eq!(culler.cull(&mut graph, &eye()), 1);
        assert!(graph.node(ahead).unwrap().is_visible());
        assert!(!graph.node(left).unwrap().is_visible());
    }
}
