//! # Scene Viewer
//!
//! Scene-management core of a small interactive 3D viewer.
//!
//! ## Features
//!
//! - **Bounding Spheres**: Ritter's estimate over mesh vertices
//! - **Dynamic Hierarchy**: overlapping objects are grouped under the larger one
//! - **Frustum Culling**: four-plane visibility test from the eye
//! - **Picking**: click rays tested against bounding spheres
//! - **Headless**: drawing goes through the [`render::DrawTarget`] trait
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use scene_viewer::prelude::*;
//!
//! fn main() -> Result<(), ViewerError> {
//!     logging::init();
//!     let mut viewer = Viewer::new(ViewerConfig::default())?;
//!     let mut target = RecordingDrawTarget::new();
//!
//!     let click = InputState::new().with_mouse(250.0, 250.0, MouseButtons::LEFT);
//!     let report = viewer.frame(&click, &mut target);
//!     println!("{:?}\n{}", report, viewer.graph().outline());
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod foundation;
pub mod physics;
pub mod assets;
pub mod scene;
pub mod render;
pub mod input;
pub mod config;

mod error;
mod viewer;

pub use error::ViewerError;
pub use viewer::{FrameReport, Viewer};

/// Common imports for viewer users
pub mod prelude {
    pub use crate::{
        FrameReport, Viewer, ViewerError,
        foundation::{
            logging,
            math::{Vec3, Mat4, Quat},
        },
        physics::{BoundingSphere, Ray},
        assets::{Mesh, TriangleMesh, load_mesh, AssetError},
        scene::{SceneGraph, SceneNode, NodeId, FrustumCuller, Picker, SceneError},
        render::{Camera, DrawTarget, RecordingDrawTarget, Viewport},
        input::{InputState, KeyCode, MouseButtons},
        config::{Config, ConfigError, ViewerConfig},
    };
}
