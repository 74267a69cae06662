use crate::assets::AssetError;
use crate::config::ConfigError;
use crate::scene::SceneError;
use thiserror::Error;

/// Viewer-level errors
#[derive(Error, Debug)]
pub enum ViewerError {
    /// Mesh loading failed
    #[error("Asset error: {0}")]
    Asset(#[from] AssetError),

    /// Configuration could not be read or is invalid
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Scene construction or edit failed
    #[error("Scene error: {0}")]
    Scene(#[from] SceneError),
}
