//! Scene nodes and their handles

use crate::assets::Mesh;
use crate::physics::BoundingSphere;
use std::fmt;

/// Handle to a node in a [`SceneGraph`](super::SceneGraph)
///
/// Handles are dense indices into the graph's arena. Index 0 is always the
/// root; a lower index means the node was added earlier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// The root node
    pub const ROOT: NodeId = NodeId(0);

    /// Arena index of this node
    pub fn index(self) -> usize {
        self.0
    }

    /// Whether this is the root node
    pub fn is_root(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A named mesh with a bounding volume and a place in the hierarchy
///
/// Links are only changed through the owning graph, which keeps the
/// parent/child relation a tree.
pub struct SceneNode {
    name: String,
    mesh: Option<Box<dyn Mesh>>,
    bounds: BoundingSphere,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    visible: bool,
}

impl SceneNode {
    pub(crate) fn root(name: impl Into<String>, bounds: BoundingSphere) -> Self {
        Self {
            name: name.into(),
            mesh: None,
            bounds,
            parent: None,
            children: Vec::new(),
            visible: true,
        }
    }

    pub(crate) fn with_mesh(name: impl Into<String>, mesh: Box<dyn Mesh>) -> Self {
        let bounds = mesh.bounds();
        Self {
            name: name.into(),
            mesh: Some(mesh),
            bounds,
            parent: Some(NodeId::ROOT),
            children: Vec::new(),
            visible: true,
        }
    }

    /// Node name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The node's mesh; `None` only for the root
    pub fn mesh(&self) -> Option<&dyn Mesh> {
        self.mesh.as_deref()
    }

    pub(crate) fn mesh_mut(&mut self) -> Option<&mut (dyn Mesh + 'static)> {
        self.mesh.as_deref_mut()
    }

    /// Bounding volume as of the last refresh
    pub fn bounds(&self) -> &BoundingSphere {
        &self.bounds
    }

    /// Copy the mesh's current center and radius into the node's bounds
    pub(crate) fn sync_bounds(&mut self) {
        if let Some(mesh) = &self.mesh {
            self.bounds.update(mesh.center(), mesh.radius());
        }
    }

    /// Parent node; `None` only for the root
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Children in attachment order
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Whether the last cull left this node visible
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Set the visibility flag consumed by the draw pass
    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }
}

impl fmt::Debug for SceneNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SceneNode")
            .field("name", &self.name)
            .field("has_mesh", &self.mesh.is_some())
            .field("bounds", &self.bounds)
            .field("parent", &self.parent)
            .field("children", &self.children)
            .field("visible", &self.visible)
            .finish()
    }
}
