//! # Viewer Configuration
//!
//! Window, camera and scene settings for the viewer. Every section has
//! defaults, so a config file only needs the values it changes:
//!
//! ```toml
//! log_level = "debug"
//!
//! [camera]
//! fov_degrees = 60.0
//!
//! [[scene.objects]]
//! name = "Bunny"
//! mesh = { kind = "file", path = "models/bunny.ply" }
//! translation = [0.0, 1.0, 0.0]
//! ```

use super::{Config, ConfigError};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::PathBuf;

/// Window title and size
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowSettings {
    /// Window title
    pub title: String,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            title: "Camera Control".to_string(),
            width: 500,
            height: 500,
        }
    }
}

/// Camera placement, projection and control steps
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSettings {
    /// Distance of the eye from the origin along +Z
    pub eye_distance: f32,
    /// Vertical field of view in degrees
    pub fov_degrees: f32,
    /// Near clipping distance
    pub near: f32,
    /// Far clipping distance
    pub far: f32,
    /// Orbit step in degrees
    pub rotation_step_degrees: f32,
    /// Pan step is the unit right/up vector divided by this
    pub pan_divisor: f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            eye_distance: 5.0,
            fov_degrees: 50.0,
            near: 1.0,
            far: 25.0,
            rotation_step_degrees: 5.0,
            pan_divisor: 5.0,
        }
    }
}

/// Where a scene object's mesh comes from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MeshSource {
    /// ASCII PLY or OBJ file
    File {
        /// Path to the mesh file
        path: PathBuf,
    },
    /// Built-in cube
    Cube {
        /// Half the edge length
        half_extent: f32,
    },
    /// Built-in latitude/longitude sphere
    UvSphere {
        /// Sphere radius
        radius: f32,
        /// Segments around the equator
        segments: u32,
        /// Rings from pole to pole
        rings: u32,
    },
}

/// One object placed in the scene at startup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneObject {
    /// Unique node name
    pub name: String,
    /// World translation applied after loading
    #[serde(default)]
    pub translation: [f32; 3],
    /// Uniform scale applied after loading
    #[serde(default = "unit_scale")]
    pub scale: f32,
    /// Mesh source
    pub mesh: MeshSource,
}

fn unit_scale() -> f32 {
    1.0
}

impl SceneObject {
    fn new(name: &str, mesh: MeshSource, translation: [f32; 3]) -> Self {
        Self {
            name: name.to_string(),
            translation,
            scale: 1.0,
            mesh,
        }
    }
}

/// World bounds, object list and edit step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneSettings {
    /// Radius of the root's world sphere
    pub world_radius: f32,
    /// Distance moved per A/S key press
    pub translate_step: f32,
    /// Objects in node order
    pub objects: Vec<SceneObject>,
}

impl Default for SceneSettings {
    fn default() -> Self {
        let sphere = |radius| MeshSource::UvSphere { radius, segments: 24, rings: 12 };
        Self {
            world_radius: 10.0,
            translate_step: 0.1,
            objects: vec![
                SceneObject::new("Trico", MeshSource::Cube { half_extent: 0.5 }, [-2.0, 0.0, 0.0]),
                SceneObject::new("Spider", sphere(0.6), [2.0, 0.0, 2.0]),
                SceneObject::new("Shark", MeshSource::Cube { half_extent: 0.75 }, [2.0, 4.0, 2.0]),
                SceneObject::new("Urn", sphere(0.4), [0.5, 1.0, 0.0]),
                SceneObject::new("Test", sphere(0.5), [-2.0, -20.0, 2.0]),
            ],
        }
    }
}

/// Complete viewer configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Default log filter, overridden by `RUST_LOG`
    pub log_level: String,
    /// Window settings
    pub window: WindowSettings,
    /// Camera settings
    pub camera: CameraSettings,
    /// Scene contents
    pub scene: SceneSettings,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            window: WindowSettings::default(),
            camera: CameraSettings::default(),
            scene: SceneSettings::default(),
        }
    }
}

impl ViewerConfig {
    /// Check the values describe a usable viewer
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: String| Err(ConfigError::Invalid(msg));

        if self.window.width == 0 || self.window.height == 0 {
            return invalid("Window size must be non-zero".to_string());
        }

        let camera = &self.camera;
        if !(camera.fov_degrees > 0.0 && camera.fov_degrees < 180.0) {
            return invalid(format!("Field of view {} out of range", camera.fov_degrees));
        }
        if !(camera.near > 0.0 && camera.far > camera.near) {
            return invalid(format!("Clip planes {}..{} are not increasing", camera.near, camera.far));
        }
        if !(camera.eye_distance > 0.0 && camera.pan_divisor > 0.0) {
            return invalid("Eye distance and pan divisor must be positive".to_string());
        }

        if !(self.scene.world_radius > 0.0) {
            return invalid("World radius must be positive".to_string());
        }
        if self.scene.objects.is_empty() {
            return invalid("Scene has no objects".to_string());
        }

        let mut names = HashSet::new();
        for object in &self.scene.objects {
            if object.name.is_empty() {
                return invalid("Object name cannot be empty".to_string());
            }
            if !names.insert(object.name.as_str()) {
                return invalid(format!("Duplicate object name: {}", object.name));
            }
            if !(object.scale > 0.0) {
                return invalid(format!("Object {} has non-positive scale", object.name));
            }
            let size_ok = match &object.mesh {
                MeshSource::File { .. } => true,
                MeshSource::Cube { half_extent } => *half_extent > 0.0,
                MeshSource::UvSphere { radius, .. } => *radius > 0.0,
            };
            if !size_ok {
                return invalid(format!("Object {} has non-positive size", object.name));
            }
        }
        Ok(())
    }
}

impl Config for ViewerConfig {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = ViewerConfig::default();
        config.validate().unwrap();
        assert_eq!(config.scene.objects.len(), 5);
        assert_eq!(config.window.title, "Camera Control");
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let text = r#"
log_level = "debug"

[camera]
fov_degrees = 60.0

[[scene.objects]]
name = "Bunny"
mesh = { kind = "file", path = "models/bunny.ply" }
translation = [0.0, 1.0, 0.0]
"#;
        let config: ViewerConfig = toml::from_str(text).unwrap();
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.camera.fov_degrees, 60.0);
        assert_eq!(config.camera.near, 1.0);
        assert_eq!(config.scene.objects.len(), 1);
        assert_eq!(config.scene.objects[0].scale, 1.0);
        assert_eq!(
            config.scene.objects[0].mesh,
            MeshSource::File { path: PathBuf::from("models/bunny.ply") }
        );
    }

    #[test]
    fn test_round_trip_through_files() {
        let dir = std::env::temp_dir().join(format!("scene_viewer_config_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let config = ViewerConfig::default();

        for name in ["viewer.toml", "viewer.ron"] {
            let path = dir.join(name);
            config.save_to_file(&path).unwrap();
            let loaded = ViewerConfig::load_from_file(&path).unwrap();
            assert_eq!(loaded, config);
        }

        let err = config.save_to_file(dir.join("viewer.json")).unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedFormat(_)));

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let mut config = ViewerConfig::default();
        config.scene.objects.clear();
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = ViewerConfig::default();
        config.scene.objects[1].name = "Trico".to_string();
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = ViewerConfig::default();
        config.window.width = 0;
        assert!(config.validate().is_err());

        let mut config = ViewerConfig::default();
        config.camera.far = 0.5;
        assert!(config.validate().is_err());

        let mut config = ViewerConfig::default();
        config.scene.objects[0].mesh = MeshSource::Cube { half_extent: 0.0 };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_nan() {
        let mut config = ViewerConfig::default();
        config.scene.world_radius = f32::NAN;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = ViewerConfig::default();
        config.scene.objects[0].scale = f32::NAN;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = ViewerConfig::default();
        config.scene.objects[3].mesh = MeshSource::UvSphere { radius: f32::NAN, segments: 8, rings: 4 };
        assert!(config.validate().is_err());

        let mut config = ViewerConfig::default();
        config.camera.pan_divisor = f32::NAN;
        assert!(config.validate().is_err());
    }
}
