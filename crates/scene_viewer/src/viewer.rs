//! # Viewer
//!
//! Owns the scene, camera and frustum and runs one frame per input snapshot.
//!
//! ## Frame order
//! 1. keyboard: quit, edit the selected node, reset, rotation step, pan, orbit
//! 2. Control + left drag: trackball
//! 3. frustum cull from the eye
//! 4. scene update: re-parent, refresh bounds, draw visible nodes
//! 5. left click: pick and highlight
//! 6. bounding sphere overlay for the highlighted node
//!
//! Movement keys (A/S, arrows, J/L/I/K) act on every frame they are held.
//! The remaining keys and the pick click act once per press.

use crate::assets::{load_mesh, AssetError, Mesh, TriangleMesh};
use crate::config::{MeshSource, SceneObject, ViewerConfig};
use crate::error::ViewerError;
use crate::foundation::math::Vec3;
use crate::input::{InputState, KeyCode, MouseButtons};
use crate::render::{Camera, DrawTarget, PanDirection, Trackball, Viewport};
use crate::scene::{FrustumCuller, NodeId, Picker, SceneGraph};
use std::collections::HashSet;

/// What happened during one [`Viewer::frame`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrameReport {
    /// Q was pressed; nothing else ran
    pub quit: bool,
    /// Re-parent moves made by the scene update
    pub moves: usize,
    /// Meshes handed to the draw target
    pub drawn: usize,
    /// Nodes that passed the frustum test
    pub visible: usize,
    /// Node hit by this frame's click, if any
    pub picked: Option<NodeId>,
    /// Node highlighted after this frame
    pub highlighted: Option<NodeId>,
}

/// Interactive scene viewer, driven one frame at a time
pub struct Viewer {
    config: ViewerConfig,
    graph: SceneGraph,
    camera: Camera,
    culler: FrustumCuller,
    trackball: Trackball,
    viewport: Viewport,
    highlighted: Option<NodeId>,
    show_overlay: bool,
    held_keys: HashSet<KeyCode>,
    left_was_down: bool,
}

impl Viewer {
    /// Validate `config`, load every mesh and build the scene
    pub fn new(config: ViewerConfig) -> Result<Self, ViewerError> {
        config.validate()?;

        let mut builder = SceneGraph::builder().world_radius(config.scene.world_radius);
        for object in &config.scene.objects {
            let mesh = build_mesh(object)?;
            log::debug!(
                "Loaded {} with {} vertices, radius {:.3}",
                object.name,
                mesh.vertex_count(),
                mesh.radius()
            );
            builder.add(object.name.clone(), mesh);
        }
        let graph = builder.build()?;

        let viewport = Viewport::new(config.window.width, config.window.height);
        let camera = Camera::new(&config.camera, viewport.aspect());
        log::info!(
            "Viewer '{}' ready: {}x{}, {} objects",
            config.window.title,
            config.window.width,
            config.window.height,
            graph.len() - 1
        );

        Ok(Self {
            config,
            graph,
            camera,
            culler: FrustumCuller::new(),
            trackball: Trackball::new(),
            viewport,
            highlighted: None,
            show_overlay: true,
            held_keys: HashSet::new(),
            left_was_down: false,
        })
    }

    /// Configuration the viewer was built from
    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    /// Scene hierarchy
    pub fn graph(&self) -> &SceneGraph {
        &self.graph
    }

    /// Camera
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Frustum culler
    pub fn culler(&self) -> &FrustumCuller {
        &self.culler
    }

    /// Currently highlighted node
    pub fn highlighted(&self) -> Option<NodeId> {
        self.highlighted
    }

    /// Whether the highlighted node's bounding sphere is drawn
    pub fn show_overlay(&self) -> bool {
        self.show_overlay
    }

    /// Window viewport
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Track a window resize
    pub fn resize(&mut self, width: u32, height: u32) {
        self.viewport = Viewport::new(width, height);
        self.camera.aspect = self.viewport.aspect();
        log::debug!("Viewport resized to {}x{}", width, height);
    }

    /// Run one frame against `input`, drawing into `target`
    pub fn frame(&mut self, input: &InputState, target: &mut dyn DrawTarget) -> FrameReport {
        let pressed: HashSet<KeyCode> = input
            .keys()
            .filter(|key| !self.held_keys.contains(key))
            .collect();
        self.held_keys = input.keys().collect();

        let mut report = FrameReport::default();
        if pressed.contains(&KeyCode::Q) {
            log::info!("Quit requested");
            report.quit = true;
            report.highlighted = self.highlighted;
            return report;
        }

        self.handle_keys(input, &pressed);
        self.handle_trackball(input);

        report.visible = self.culler.cull(&mut self.graph, &self.camera.eye);
        let (moves, drawn) = self.graph.update(target);
        report.moves = moves;
        report.drawn = drawn;

        let left_down = input.mouse.buttons.contains(MouseButtons::LEFT);
        let clicked = left_down && !self.left_was_down;
        self.left_was_down = left_down;
        if clicked && input.mouse.left_only() && !input.ctrl_down() {
            report.picked = self.pick(input.mouse.screen_x, input.mouse.screen_y);
        }

        if self.show_overlay {
            if let Some(node) = self.highlighted.and_then(|id| self.graph.node(id)) {
                target.draw_bounding_sphere(node.bounds());
            }
        }

        report.highlighted = self.highlighted;
        report
    }

    fn handle_keys(&mut self, input: &InputState, pressed: &HashSet<KeyCode>) {
        let step = self.config.scene.translate_step;
        if input.is_key_down(KeyCode::A) {
            self.translate_selected(step);
        }
        if input.is_key_down(KeyCode::S) {
            self.translate_selected(-step);
        }

        if pressed.contains(&KeyCode::R) {
            self.camera.reset();
            self.culler.reset();
        }
        if pressed.contains(&KeyCode::Equal) {
            self.camera.adjust_rotation_step(1.0);
        }
        if pressed.contains(&KeyCode::Minus) {
            self.camera.adjust_rotation_step(-1.0);
        }

        for (key, direction) in [
            (KeyCode::Left, PanDirection::Left),
            (KeyCode::Right, PanDirection::Right),
            (KeyCode::Up, PanDirection::Up),
            (KeyCode::Down, PanDirection::Down),
        ] {
            if input.is_key_down(key) {
                self.camera.pan(direction);
            }
        }

        for (key, yaw, pitch) in [
            (KeyCode::J, -1.0, 0.0),
            (KeyCode::L, 1.0, 0.0),
            (KeyCode::I, 0.0, -1.0),
            (KeyCode::K, 0.0, 1.0),
        ] {
            if input.is_key_down(key) {
                let rotation = self.camera.orbit(yaw, pitch);
                self.culler.rotate(&rotation);
            }
        }

        if pressed.contains(&KeyCode::B) {
            log::info!("Center: {:?} Eye: {:?}", self.camera.center, self.camera.eye);
        }
        if pressed.contains(&KeyCode::H) {
            self.show_overlay = !self.show_overlay;
            log::info!("Bounding sphere overlay {}", if self.show_overlay { "on" } else { "off" });
        }
    }

    fn handle_trackball(&mut self, input: &InputState) {
        let dragging = input.ctrl_down() && input.mouse.buttons.contains(MouseButtons::LEFT);
        if !dragging {
            self.trackball.end();
            return;
        }

        let (x, y) = (input.mouse.screen_x, input.mouse.screen_y);
        if !self.trackball.is_dragging() {
            self.trackball.begin(&self.viewport, x, y);
            return;
        }
        if let Some(rotation) = self.trackball.drag(&self.viewport, &self.camera, x, y) {
            self.camera.rotate_gaze(&rotation);
            self.culler.rotate(&rotation);
        }
    }

    fn translate_selected(&mut self, dy: f32) {
        let Some(id) = self.highlighted.or_else(|| self.graph.mesh_ids().next()) else {
            return;
        };
        if let Err(err) = self.graph.translate(id, &Vec3::new(0.0, dy, 0.0)) {
            log::warn!("Translate of {} failed: {}", id, err);
        }
    }

    fn pick(&mut self, x: f32, y: f32) -> Option<NodeId> {
        let ctx = self.camera.frame_context(self.viewport);
        let picked = Picker::pick_first(&self.graph, &ctx, x, y);
        match picked.and_then(|id| self.graph.node(id)) {
            Some(node) => log::info!("Intersect with {}", node.name()),
            None => log::debug!("Click at ({}, {}) hit nothing", x, y),
        }
        self.highlighted = picked;
        picked
    }
}

fn build_mesh(object: &SceneObject) -> Result<TriangleMesh, AssetError> {
    let mut mesh = match &object.mesh {
        MeshSource::File { path } => load_mesh(path)?,
        MeshSource::Cube { half_extent } => TriangleMesh::cube(*half_extent),
        MeshSource::UvSphere { radius, segments, rings } => {
            TriangleMesh::uv_sphere(*radius, *segments, *rings)
        }
    };
    let [x, y, z] = object.translation;
    mesh.scale(object.scale);
    mesh.translate(&Vec3::new(x, y, z));
    mesh.refresh_bounds();
    Ok(mesh)
}
