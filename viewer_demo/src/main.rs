//! Headless viewer demo
//!
//! Builds the viewer from a config file (TOML or RON, given as the first
//! argument) or from the built-in five-object scene, then replays a short
//! input script and prints the resulting hierarchy.
//!
//! ```text
//! cargo run -p viewer_demo -- viewer.toml
//! RUST_LOG=debug cargo run -p viewer_demo
//! ```

use scene_viewer::assets::Mesh;
use scene_viewer::config::{Config, ViewerConfig};
use scene_viewer::foundation::logging;
use scene_viewer::input::{InputState, KeyCode, MouseButtons};
use scene_viewer::physics::BoundingSphere;
use scene_viewer::render::DrawTarget;
use scene_viewer::{Viewer, ViewerError};

/// Draw target that logs what a renderer would draw
#[derive(Default)]
struct LogDrawTarget {
    meshes: usize,
    overlays: usize,
}

impl DrawTarget for LogDrawTarget {
    fn draw_mesh(&mut self, name: &str, mesh: &dyn Mesh) {
        self.meshes += 1;
        log::debug!("draw {} at {:?} r={:.3}", name, mesh.center(), mesh.radius());
    }

    fn draw_bounding_sphere(&mut self, sphere: &BoundingSphere) {
        self.overlays += 1;
        log::debug!("overlay at {:?} r={:.3}", sphere.center, sphere.radius);
    }
}

fn load_config() -> Result<ViewerConfig, ViewerError> {
    match std::env::args().nth(1) {
        Some(path) => Ok(ViewerConfig::load_from_file(path)?),
        None => Ok(ViewerConfig::default()),
    }
}

/// Canned interaction: look around, pick, nudge the pick, orbit, reset
fn script(width: f32, height: f32) -> Vec<InputState> {
    let (cx, cy) = (width * 0.5, height * 0.5);
    let urn = (cx + width * 0.107, cy - height * 0.215);
    vec![
        InputState::new(),
        InputState::new().with_key(KeyCode::B),
        InputState::new().with_mouse(urn.0, urn.1, MouseButtons::LEFT),
        InputState::new(),
        InputState::new().with_key(KeyCode::A),
        InputState::new().with_key(KeyCode::A),
        InputState::new().with_key(KeyCode::L),
        InputState::new().with_key(KeyCode::L),
        InputState::new()
            .with_key(KeyCode::LeftControl)
            .with_mouse(cx, cy, MouseButtons::LEFT),
        InputState::new()
            .with_key(KeyCode::LeftControl)
            .with_mouse(cx + 40.0, cy, MouseButtons::LEFT),
        InputState::new().with_key(KeyCode::Right),
        InputState::new().with_key(KeyCode::H),
        InputState::new().with_key(KeyCode::R),
        InputState::new().with_key(KeyCode::Q),
    ]
}

fn main() -> Result<(), ViewerError> {
    let config = load_config()?;
    logging::init_with_level(&config.log_level);
    log::info!("Starting headless viewer demo");

    let mut viewer = Viewer::new(config)?;
    let viewport = viewer.viewport();
    let mut target = LogDrawTarget::default();

    for (frame, input) in script(viewport.width, viewport.height).iter().enumerate() {
        let report = viewer.frame(input, &mut target);
        log::info!(
            "frame {}: visible {} drawn {} moves {} highlighted {:?}",
            frame,
            report.visible,
            report.drawn,
            report.moves,
            report.highlighted
        );
        if report.quit {
            break;
        }
    }

    log::info!(
        "Demo finished: {} mesh draws, {} overlays",
        target.meshes,
        target.overlays
    );
    println!("{}", viewer.graph().outline());
    Ok(())
}
