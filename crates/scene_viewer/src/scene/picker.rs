//! Mouse picking against node bounding spheres
//!
//! A click is turned into two rays and a node counts as picked when either
//! one meets its bounding sphere:
//!
//! - **Unprojection ray**: the window point is unprojected at depth 0 and 1
//!   through `inverse(projection * view)`; the ray starts at the eye and
//!   points from the near point to the far point.
//! - **Eye-space ray**: the window point is scaled into the view volume with
//!   `tan(fov / 2)` and the aspect ratio, then carried into world space by
//!   the inverse view matrix.
//!
//! Nodes are tested in index order and the first hit wins; there is no
//! nearest-hit resolution between overlapping spheres.

use super::scene_graph::SceneGraph;
use super::scene_node::NodeId;
use crate::foundation::math::{Mat4, Vec3, Vec4};
use crate::physics::{BoundingSphere, Ray};
use crate::render::{FrameContext, Viewport};

/// Ray picking against bounding spheres
pub struct Picker;

impl Picker {
    /// Map window coordinates back to world space
    ///
    /// `window.z` is the depth in `[0, 1]`. Window y is measured from the
    /// bottom of the viewport. Returns `None` when `projection * view` is
    /// singular or the homogeneous coordinate comes out as zero.
    pub fn unproject(window: &Vec3, view: &Mat4, projection: &Mat4, viewport: &Viewport) -> Option<Vec3> {
        if viewport.width <= 0.0 || viewport.height <= 0.0 {
            log::debug!("Unproject skipped: empty viewport");
            return None;
        }

        let Some(inverse) = (projection * view).try_inverse() else {
            log::debug!("Unproject failed: view-projection matrix is singular");
            return None;
        };

        let ndc = Vec4::new(
            (window.x - viewport.x) / viewport.width * 2.0 - 1.0,
            (window.y - viewport.y) / viewport.height * 2.0 - 1.0,
            window.z * 2.0 - 1.0,
            1.0,
        );
        let world = inverse * ndc;
        if world.w.abs() <= f32::EPSILON {
            log::debug!("Unproject failed: homogeneous divide by zero");
            return None;
        }
        Some(world.xyz() / world.w)
    }

    /// Ray from the eye through window point `(x, y)` by double unprojection
    ///
    /// `y` is measured from the top of the window.
    pub fn unprojection_ray(ctx: &FrameContext, x: f32, y: f32) -> Option<Ray> {
        let flipped_y = ctx.viewport.height - y - 1.0;
        let near = Self::unproject(&Vec3::new(x, flipped_y, 0.0), &ctx.view, &ctx.projection, &ctx.viewport)?;
        let far = Self::unproject(&Vec3::new(x, flipped_y, 1.0), &ctx.view, &ctx.projection, &ctx.viewport)?;
        Some(Ray::new(ctx.eye, far - near))
    }

    /// Ray through window point `(x, y)` built in eye space
    ///
    /// `y` is measured from the top of the window.
    pub fn eye_space_ray(ctx: &FrameContext, x: f32, y: f32) -> Option<Ray> {
        let Some(view_inverse) = ctx.view.try_inverse() else {
            log::debug!("Eye-space ray failed: view matrix is singular");
            return None;
        };

        let half_width = ctx.viewport.width * 0.5;
        let half_height = ctx.viewport.height * 0.5;
        if half_width <= 0.0 || half_height <= 0.0 {
            return None;
        }

        let norm_x = (x - half_width) / half_width;
        let norm_y = ((ctx.viewport.height - y) - half_height) / half_height;
        let near_height = (ctx.fov * 0.5).tan();

        let direction = Vec4::new(
            near_height * ctx.viewport.aspect() * norm_x,
            near_height * norm_y,
            -1.0,
            0.0,
        );
        let origin = Vec4::new(0.0, 0.0, 0.0, 1.0);

        let origin = view_inverse * origin;
        let direction = view_inverse * direction;
        Some(Ray::new(origin.xyz(), direction.xyz()))
    }

    /// Whether a click at `(x, y)` picks `sphere`
    pub fn pick(ctx: &FrameContext, x: f32, y: f32, sphere: &BoundingSphere) -> bool {
        let unprojected = Self::unprojection_ray(ctx, x, y).is_some_and(|ray| sphere.intersects(&ray));
        let eye_space = Self::eye_space_ray(ctx, x, y).is_some_and(|ray| sphere.intersects(&ray));
        unprojected || eye_space
    }

    /// First mesh node, in index order, picked by a click at `(x, y)`
    pub fn pick_first(graph: &SceneGraph, ctx: &FrameContext, x: f32, y: f32) -> Option<NodeId> {
        graph.mesh_ids().find(|&id| {
            graph
                .node(id)
                .is_some_and(|node| Self::pick(ctx, x, y, node.bounds()))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::{Mesh, TriangleMesh};
    use crate::config::CameraSettings;
    use crate::render::Camera;
    use approx::assert_relative_eq;

    const EPSILON: f32 = 1e-3;

    fn context() -> FrameContext {
        let camera = Camera::new(&CameraSettings::default(), 1.0);
        camera.frame_context(Viewport::new(500, 500))
    }

    #[test]
    fn test_unproject_inverts_projection() {
        let ctx = context();
        let point = Vec3::new(0.5, -0.25, -1.0);

        let clip = ctx.projection * ctx.view * Vec4::new(point.x, point.y, point.z, 1.0);
        let ndc = clip.xyz() / clip.w;
        let window = Vec3::new(
            (ndc.x + 1.0) * 0.5 * ctx.viewport.width,
            (ndc.y + 1.0) * 0.5 * ctx.viewport.height,
            (ndc.z + 1.0) * 0.5,
        );

        let back = Picker::unproject(&window, &ctx.view, &ctx.projection, &ctx.viewport).unwrap();
        assert_relative_eq!(back, point, epsilon = EPSILON);
    }

    #[test]
    fn test_unproject_singular_matrix_is_none() {
        let ctx = context();
        let result = Picker::unproject(&Vec3::new(1.0, 1.0, 0.5), &Mat4::zeros(), &ctx.projection, &ctx.viewport);
        assert!(result.is_none());
    }

    #[test]
    fn test_center_click_rays_point_down_gaze() {
        let ctx = context();
        let ray = Picker::unprojection_ray(&ctx, 250.0, 250.0).unwrap();
        assert_relative_eq!(ray.origin, ctx.eye);
        let direction = ray.direction.normalize();
        assert!(direction.z < -0.99);

        let ray = Picker::eye_space_ray(&ctx, 250.0, 250.0).unwrap();
        assert_relative_eq!(ray.origin, Vec3::new(0.0, 0.0, 5.0), epsilon = EPSILON);
        assert_relative_eq!(ray.direction, Vec3::new(0.0, 0.0, -1.0), epsilon = EPSILON);
    }

    #[test]
    fn test_rays_agree_off_center() {
        let ctx = context();
        let a = Picker::unprojection_ray(&ctx, 400.0, 100.0).unwrap().direction.normalize();
        let b = Picker::eye_space_ray(&ctx, 400.0, 100.0).unwrap().direction.normalize();
        // Click toward the upper right
        assert!(a.x > 0.0 && a.y > 0.0);
        assert_relative_eq!(a, b, epsilon = 0.01);
    }

    #[test]
    fn test_pick_sphere_ahead_and_aside() {
        let ctx = context();
        let ahead = BoundingSphere::new(Vec3::zeros(), 1.0);
        let aside = BoundingSphere::new(Vec3::new(10.0, 0.0, 0.0), 1.0);
        assert!(Picker::pick(&ctx, 250.0, 250.0, &ahead));
        assert!(!Picker::pick(&ctx, 250.0, 250.0, &aside));
    }

    #[test]
    fn test_empty_viewport_gives_no_rays() {
        let camera = Camera::new(&CameraSettings::default(), 1.0);
        let ctx = camera.frame_context(Viewport::new(0, 0));
        assert!(Picker::unprojection_ray(&ctx, 0.0, 0.0).is_none());
        assert!(Picker::eye_space_ray(&ctx, 0.0, 0.0).is_none());
        assert!(!Picker::pick(&ctx, 0.0, 0.0, &BoundingSphere::new(Vec3::zeros(), 100.0)));
    }

    #[test]
    fn test_pick_first_uses_index_order() {
        let mut behind = TriangleMesh::uv_sphere(1.0, 12, 6);
        behind.translate(&Vec3::new(0.0, 0.0, -3.0));

        let mut builder = SceneGraph::builder();
        let far = builder.add("far", behind);
        let near = builder.add("near", TriangleMesh::uv_sphere(1.0, 12, 6));
        let graph = builder.build().unwrap();

        let ctx = context();
        // Both are on the line of sight; the lower index wins even though it is farther
        assert_eq!(Picker::pick_first(&graph, &ctx, 250.0, 250.0), Some(far));
        assert_ne!(Picker::pick_first(&graph, &ctx, 250.0, 250.0), Some(near));
        assert_eq!(Picker::pick_first(&graph, &ctx, 5.0, 5.0), None);
    }
}
