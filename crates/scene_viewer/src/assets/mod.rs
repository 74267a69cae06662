//! Mesh assets
//!
//! The [`Mesh`] trait is the only surface the scene core sees. [`TriangleMesh`]
//! implements it for built-in shapes and for meshes read from ASCII PLY or
//! OBJ files.

pub mod mesh;
pub mod mesh_loader;

pub use mesh::{Mesh, TriangleMesh};
pub use mesh_loader::{load_mesh, parse_obj, parse_ply, AssetError};
