//! One frame of cull, update and pick run by hand

use super::FixedSphere;
use crate::config::CameraSettings;
use crate::foundation::math::Vec3;
use crate::physics::Ray;
use crate::render::{Camera, RecordingDrawTarget, Viewport};
use crate::scene::{FrustumCuller, NodeId, Picker, SceneGraph};

fn scene() -> SceneGraph {
    let mut builder = SceneGraph::builder();
    builder.add("center", FixedSphere::new(Vec3::zeros(), 1.0));
    builder.add("aside", FixedSphere::new(Vec3::new(10.0, 0.0, 0.0), 1.0));
    builder.add("below", FixedSphere::new(Vec3::new(0.0, -20.0, 2.0), 1.0));
    builder.build().unwrap()
}

#[test]
fn test_pick_ray_hits_center_and_misses_aside() {
    let graph = scene();
    let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::new(0.0, 0.0, -1.0));

    let center = graph.node_by_name("center").unwrap();
    let aside = graph.node_by_name("aside").unwrap();
    assert!(graph.node(center).unwrap().bounds().intersects(&ray));
    assert!(!graph.node(aside).unwrap().bounds().intersects(&ray));
}

#[test]
fn test_cull_update_pick() {
    let mut graph = scene();
    let camera = Camera::new(&CameraSettings::default(), 1.0);
    let ctx = camera.frame_context(Viewport::new(500, 500));

    let culler = FrustumCuller::new();
    assert_eq!(culler.cull(&mut graph, &ctx.eye), 1);

    let mut target = RecordingDrawTarget::new();
    let (moves, drawn) = graph.update(&mut target);
    assert_eq!(moves, 0);
    assert_eq!(drawn, 1);
    assert_eq!(target.mesh_names(), vec!["center"]);

    let picked = Picker::pick_first(&graph, &ctx, 250.0, 250.0);
    assert_eq!(picked, graph.node_by_name("center"));

    // The right edge of the window is still far from the culled sphere
    let aside = graph.node_by_name("aside").unwrap();
    assert!(!graph.node(aside).unwrap().is_visible());
    assert_eq!(Picker::pick_first(&graph, &ctx, 499.0, 250.0), None);
}

#[test]
fn test_update_regroups_then_draws_every_visible_member() {
    let mut builder = SceneGraph::builder();
    builder.add("first", FixedSphere::new(Vec3::zeros(), 2.0));
    builder.add("second", FixedSphere::new(Vec3::new(3.0, 0.0, 0.0), 2.0));
    let mut graph = builder.build().unwrap();

    let mut target = RecordingDrawTarget::new();
    let (moves, drawn) = graph.update(&mut target);
    assert_eq!(moves, 1);
    assert_eq!(drawn, 2);
    assert_eq!(graph.parent(NodeId(2)), Some(NodeId(1)));
    assert_eq!(graph.outline(), "World\n  first\n    second\n");
}
