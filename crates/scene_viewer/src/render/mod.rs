//! # Rendering Support
//!
//! Camera math and the draw dispatch seam. Actual rasterization belongs to
//! whatever implements [`DrawTarget`]; this module only decides what gets
//! drawn and from where.
//!
//! - **Camera**: look-at camera with pan, orbit and gaze rotation
//! - **Trackball**: mouse drag to rotation mapping
//! - **Draw**: the draw target trait and a recording implementation

pub mod camera;
pub mod trackball;
pub mod draw;

pub use camera::{Camera, FrameContext, PanDirection, Viewport};
pub use trackball::Trackball;
pub use draw::{DrawCall, DrawTarget, RecordingDrawTarget};
