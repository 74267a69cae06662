//! Math utilities and types
//!
//! Provides the fundamental math types used by the scene core. Everything is
//! `f32` and follows the right-handed, Y-up, OpenGL clip-space conventions
//! (NDC depth in `[-1, 1]`) that the viewer's projection and unprojection
//! code assume.

pub use nalgebra::{
    Vector3, Vector4,
    Matrix4,
    UnitQuaternion,
    Unit,
};

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4D vector type
pub type Vec4 = Vector4<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// 3D point type
pub type Point3 = nalgebra::Point3<f32>;

/// Quaternion type for rotations
pub type Quat = UnitQuaternion<f32>;

/// Math constants
pub mod constants {
    /// Pi constant
    pub const PI: f32 = std::f32::consts::PI;

    /// Degrees to radians conversion factor
    pub const DEG_TO_RAD: f32 = PI / 180.0;
}

/// Math utility functions
pub mod utils {
    use super::{constants, Vec3};

    /// Convert degrees to radians
    pub fn deg_to_rad(degrees: f32) -> f32 {
        degrees * constants::DEG_TO_RAD
    }

    /// Normalize `v`, or return `None` when it is too short to have a direction
    pub fn try_normalize(v: &Vec3) -> Option<Vec3> {
        v.try_normalize(f32::EPSILON)
    }
}

/// Extension trait for Mat4 with the camera matrices the viewer needs
pub trait Mat4Ext {
    /// Create an OpenGL-style perspective projection matrix
    ///
    /// `fov_y` is the vertical field of view in radians. Depth maps to
    /// NDC `[-1, 1]`, matching what `unproject` expects.
    fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Mat4;

    /// Create a right-handed look-at view matrix
    fn look_at(eye: &Vec3, target: &Vec3, up: &Vec3) -> Mat4;
}

impl Mat4Ext for Mat4 {
    fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Mat4 {
        Mat4::new_perspective(aspect, fov_y, near, far)
    }

    fn look_at(eye: &Vec3, target: &Vec3, up: &Vec3) -> Mat4 {
        Mat4::look_at_rh(&Point3::from(*eye), &Point3::from(*target), up)
    }
}
