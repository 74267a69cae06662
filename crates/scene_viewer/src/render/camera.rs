//! # Viewer Camera
//!
//! Look-at camera driven by the viewer's keyboard and trackball controls.
//!
//! ## Conventions
//! Right-handed, Y-up world space. The view matrix looks down -Z and the
//! projection maps depth to OpenGL NDC `[-1, 1]`, which is what the picker's
//! unprojection expects.
//!
//! The camera itself knows nothing about the frustum culler. Every operation
//! that changes orientation returns the rotation it applied so the caller can
//! co-rotate the frustum normals with it.

use crate::config::CameraSettings;
use crate::foundation::math::{utils, Mat4, Mat4Ext, Quat, Unit, Vec3};

/// Window-space viewport rectangle in pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Left edge
    pub x: f32,
    /// Bottom edge
    pub y: f32,
    /// Width in pixels
    pub width: f32,
    /// Height in pixels
    pub height: f32,
}

impl Viewport {
    /// Viewport covering a `width` x `height` window from the origin
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width: width as f32,
            height: height as f32,
        }
    }

    /// Width over height, or 1.0 for a degenerate viewport
    pub fn aspect(&self) -> f32 {
        if self.height > 0.0 {
            self.width / self.height
        } else {
            1.0
        }
    }
}

/// Direction of a discrete pan step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanDirection {
    /// Toward the camera's left
    Left,
    /// Toward the camera's right
    Right,
    /// Along the up vector
    Up,
    /// Against the up vector
    Down,
}

/// Camera state handed to every per-frame operation
///
/// Built once per frame after input has been applied; nothing downstream
/// mutates the camera.
#[derive(Debug, Clone, Copy)]
pub struct FrameContext {
    /// Eye position in world space
    pub eye: Vec3,
    /// Look-at point in world space
    pub center: Vec3,
    /// Up vector
    pub up: Vec3,
    /// World-to-eye transform
    pub view: Mat4,
    /// Eye-to-clip transform
    pub projection: Mat4,
    /// Window viewport
    pub viewport: Viewport,
    /// Vertical field of view in radians
    pub fov: f32,
}

/// Look-at perspective camera
#[derive(Debug, Clone)]
pub struct Camera {
    /// Eye position in world space
    pub eye: Vec3,
    /// Look-at point in world space
    pub center: Vec3,
    /// Up vector (kept orthogonal to the gaze)
    pub up: Vec3,
    /// Vertical field of view in radians
    pub fov: f32,
    /// Width over height
    pub aspect: f32,
    /// Near clipping distance
    pub near: f32,
    /// Far clipping distance
    pub far: f32,
    rotation_step: f32,
    pan_divisor: f32,
    home: CameraSettings,
}

impl Camera {
    /// Create the camera described by `settings`
    ///
    /// The eye sits `eye_distance` along +Z looking at the origin with +Y up.
    pub fn new(settings: &CameraSettings, aspect: f32) -> Self {
        Self {
            eye: Vec3::new(0.0, 0.0, settings.eye_distance),
            center: Vec3::zeros(),
            up: Vec3::y(),
            fov: utils::deg_to_rad(settings.fov_degrees),
            aspect,
            near: settings.near,
            far: settings.far,
            rotation_step: settings.rotation_step_degrees,
            pan_divisor: settings.pan_divisor,
            home: settings.clone(),
        }
    }

    /// Restore eye, center, up vector and rotation step to their start values
    pub fn reset(&mut self) {
        self.eye = Vec3::new(0.0, 0.0, self.home.eye_distance);
        self.center = Vec3::zeros();
        self.up = Vec3::y();
        self.rotation_step = self.home.rotation_step_degrees;
        log::info!("Eye position, up vector and rotation step reset");
    }

    /// Current orbit step in degrees
    pub fn rotation_step(&self) -> f32 {
        self.rotation_step
    }

    /// Change the orbit step by `delta` degrees
    pub fn adjust_rotation_step(&mut self, delta: f32) {
        self.rotation_step += delta;
        log::info!("Rotation step set to {}", self.rotation_step);
    }

    /// Vector from eye to center
    pub fn gaze(&self) -> Vec3 {
        self.center - self.eye
    }

    /// Unit vector to the camera's right, if the gaze and up are not parallel
    pub fn right(&self) -> Option<Vec3> {
        utils::try_normalize(&self.gaze().cross(&self.up))
    }

    /// World-to-eye transform
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at(&self.eye, &self.center, &self.up)
    }

    /// Eye-to-clip transform
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective(self.fov, self.aspect, self.near, self.far)
    }

    /// Move eye and center together by one pan step
    pub fn pan(&mut self, direction: PanDirection) {
        let step = match direction {
            PanDirection::Left | PanDirection::Right => match self.right() {
                Some(right) => right,
                None => {
                    log::warn!("Pan skipped: gaze is parallel to the up vector");
                    return;
                }
            },
            PanDirection::Up | PanDirection::Down => self.up,
        } / self.pan_divisor;

        let offset = match direction {
            PanDirection::Left | PanDirection::Down => -step,
            PanDirection::Right | PanDirection::Up => step,
        };
        self.eye += offset;
        self.center += offset;
        log::trace!("Camera panned {:?} to eye {:?}", direction, self.eye);
    }

    /// Orbit the eye around the center
    ///
    /// `yaw_steps` turns about the up vector and `pitch_steps` about the right
    /// vector, each in units of the rotation step. Returns the rotation that
    /// was applied to the camera's orientation.
    pub fn orbit(&mut self, yaw_steps: f32, pitch_steps: f32) -> Quat {
        let step = utils::deg_to_rad(self.rotation_step);
        let yaw = Quat::from_axis_angle(&Unit::new_normalize(self.up), yaw_steps * step);
        let pitch = match self.right() {
            Some(right) => Quat::from_axis_angle(&Unit::new_unchecked(right), pitch_steps * step),
            None => Quat::identity(),
        };
        let rotation = pitch * yaw;

        let offset = rotation * (self.eye - self.center);
        self.eye = self.center + offset;
        self.up = rotation * self.up;
        self.orthonormalize_up();
        log::trace!("Camera orbited to eye {:?}", self.eye);
        rotation
    }

    /// Turn the gaze about the eye by `rotation`, keeping the eye-center distance
    pub fn rotate_gaze(&mut self, rotation: &Quat) {
        let gaze = rotation * self.gaze();
        self.center = self.eye + gaze;
        self.up = rotation * self.up;
        self.orthonormalize_up();
        log::trace!("Camera center is {:?}", self.center);
    }

    /// Map a direction from eye space to world space using the current basis
    pub fn eye_to_world(&self, v: &Vec3) -> Option<Vec3> {
        let forward = utils::try_normalize(&self.gaze())?;
        let right = self.right()?;
        let up = right.cross(&forward);
        Some(right * v.x + up * v.y - forward * v.z)
    }

    /// Snapshot the camera for one frame
    pub fn frame_context(&self, viewport: Viewport) -> FrameContext {
        FrameContext {
            eye: self.eye,
            center: self.center,
            up: self.up,
            view: self.view_matrix(),
            projection: self.projection_matrix(),
            viewport,
            fov: self.fov,
        }
    }

    fn orthonormalize_up(&mut self) {
        if let Some(right) = self.right() {
            if let Some(up) = utils::try_normalize(&right.cross(&self.gaze())) {
                self.up = up;
            }
        }
    }
}
