//! # Scene Graph
//!
//! Fixed arena of [`SceneNode`]s rooted at `World`, with proximity-driven
//! re-parenting.
//!
//! ## Lifecycle
//! Nodes are added through [`SceneGraphBuilder`] and the finished graph has a
//! fixed node count. Afterwards only bounding volumes, parent links and
//! visibility flags change.
//!
//! ## Re-parenting
//! Each frame every unordered pair of mesh nodes `(x, y)` with `x < y` is
//! checked for overlap (center distance at most the sum of the radii). For an
//! overlapping pair the larger sphere is the parent candidate `big` and the
//! other is `small`; equal radii make the lower index `big`. Then:
//!
//! 1. if `small` hangs directly off the root, it moves under `big`;
//! 2. else if `small`'s parent is strictly larger than `big`, `big` moves
//!    under that parent;
//! 3. else if `small`'s parent is not `big`, that parent moves under `big`.
//!
//! Every move goes through [`SceneGraph::set_parent`], which detaches before
//! attaching and refuses moves that would create a cycle. When move 2 or 3
//! would take a node away from a parent that ranks higher than the proposed
//! one (rank is radius, then lower index), the proposed parent is pulled
//! under that higher-ranked parent instead. Parent ranks only rise, so
//! repeating the scan until nothing changes always terminates, and once it
//! settles every overlapping pair shares a subtree below the root.
//! Groupings are never dissolved when objects drift apart.

use super::scene_node::{NodeId, SceneNode};
use crate::assets::Mesh;
use crate::foundation::math::Vec3;
use crate::physics::BoundingSphere;
use crate::render::DrawTarget;
use std::cmp::Ordering;
use std::collections::HashSet;
use thiserror::Error;

/// Name given to the root node
pub const ROOT_NAME: &str = "World";

/// Scene graph errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SceneError {
    /// The move would make a node its own ancestor
    #[error("Attaching {node} under {parent} would create a cycle")]
    Cycle {
        /// Node being moved
        node: NodeId,
        /// Requested parent
        parent: NodeId,
    },

    /// The root has no parent and cannot be given one
    #[error("The root node cannot be re-parented")]
    RootImmovable,

    /// The handle does not belong to this graph
    #[error("Unknown node {0}")]
    UnknownNode(NodeId),

    /// Two nodes were given the same name
    #[error("Duplicate node name: {0}")]
    DuplicateName(String),
}

/// Builder that collects nodes and finalizes them into a [`SceneGraph`]
pub struct SceneGraphBuilder {
    nodes: Vec<SceneNode>,
}

impl Default for SceneGraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneGraphBuilder {
    /// Start a graph whose root has a world sphere of radius 10
    pub fn new() -> Self {
        Self {
            nodes: vec![SceneNode::root(
                ROOT_NAME,
                BoundingSphere::new(Vec3::zeros(), 10.0),
            )],
        }
    }

    /// Set the world bounding sphere radius carried by the root
    #[must_use]
    pub fn world_radius(mut self, radius: f32) -> Self {
        let children = std::mem::take(&mut self.nodes[0].children);
        self.nodes[0] = SceneNode::root(ROOT_NAME, BoundingSphere::new(Vec3::zeros(), radius));
        self.nodes[0].children = children;
        self
    }

    /// Add a mesh node as a direct child of the root
    pub fn add(&mut self, name: impl Into<String>, mesh: impl Mesh + 'static) -> NodeId {
        self.add_boxed(name, Box::new(mesh))
    }

    /// Add an already boxed mesh node as a direct child of the root
    pub fn add_boxed(&mut self, name: impl Into<String>, mesh: Box<dyn Mesh>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(SceneNode::with_mesh(name, mesh));
        self.nodes[0].children.push(id);
        id
    }

    /// Finalize the graph
    pub fn build(self) -> Result<SceneGraph, SceneError> {
        let mut names = HashSet::new();
        for node in &self.nodes {
            if !names.insert(node.name()) {
                return Err(SceneError::DuplicateName(node.name().to_string()));
            }
        }

        log::info!("Scene graph built with {} mesh nodes", self.nodes.len() - 1);
        Ok(SceneGraph {
            nodes: self.nodes.into_boxed_slice(),
        })
    }
}

/// Fixed-size scene hierarchy
#[derive(Debug)]
pub struct SceneGraph {
    nodes: Box<[SceneNode]>,
}

impl SceneGraph {
    /// Start building a graph
    pub fn builder() -> SceneGraphBuilder {
        SceneGraphBuilder::new()
    }

    /// Number of nodes including the root
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false; the root is always present
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The root node
    pub fn root(&self) -> &SceneNode {
        &self.nodes[0]
    }

    /// Look up a node
    pub fn node(&self, id: NodeId) -> Option<&SceneNode> {
        self.nodes.get(id.0)
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut SceneNode, SceneError> {
        self.nodes.get_mut(id.0).ok_or(SceneError::UnknownNode(id))
    }

    fn check(&self, id: NodeId) -> Result<(), SceneError> {
        if id.0 < self.nodes.len() {
            Ok(())
        } else {
            Err(SceneError::UnknownNode(id))
        }
    }

    /// Find a node by name
    pub fn node_by_name(&self, name: &str) -> Option<NodeId> {
        self.nodes.iter().position(|n| n.name() == name).map(NodeId)
    }

    /// Iterate all nodes in index order, root first
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &SceneNode)> {
        self.nodes.iter().enumerate().map(|(i, n)| (NodeId(i), n))
    }

    /// Handles of every mesh node in index order
    pub fn mesh_ids(&self) -> impl Iterator<Item = NodeId> {
        (1..self.nodes.len()).map(NodeId)
    }

    /// Parent of `id`
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).and_then(SceneNode::parent)
    }

    /// Children of `id` in attachment order
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        match self.node(id) {
            Some(node) => node.children(),
            None => &[],
        }
    }

    /// Ancestors of `id`, nearest first, ending at the root
    pub fn ancestors(&self, id: NodeId) -> Vec<NodeId> {
        let mut chain = Vec::new();
        let mut current = self.parent(id);
        while let Some(parent) = current {
            // A tree never has a chain longer than the node count
            if chain.len() >= self.nodes.len() {
                log::error!("Ancestor walk from {} exceeded node count", id);
                break;
            }
            chain.push(parent);
            current = self.parent(parent);
        }
        chain
    }

    /// Whether `ancestor` lies on the parent chain of `node`
    pub fn is_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        self.ancestors(node).contains(&ancestor)
    }

    /// All descendants of `id` in depth-first pre-order, excluding `id`
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(id).iter().rev().copied().collect();
        while let Some(next) = stack.pop() {
            if out.len() >= self.nodes.len() {
                log::error!("Descendant walk from {} exceeded node count", id);
                break;
            }
            out.push(next);
            stack.extend(self.children(next).iter().rev());
        }
        out
    }

    /// Set the visibility flag of `id`
    pub fn set_visible(&mut self, id: NodeId, visible: bool) -> Result<(), SceneError> {
        self.node_mut(id)?.set_visible(visible);
        Ok(())
    }

    /// Move `node` under `new_parent`
    ///
    /// Detaches from the old parent's child list and appends to the new
    /// one in a single step. Returns `Ok(false)` when `new_parent` already is
    /// the parent.
    pub fn set_parent(&mut self, node: NodeId, new_parent: NodeId) -> Result<bool, SceneError> {
        self.check(node)?;
        self.check(new_parent)?;
        if node.is_root() {
            return Err(SceneError::RootImmovable);
        }
        if node == new_parent || self.is_ancestor(node, new_parent) {
            return Err(SceneError::Cycle { node, parent: new_parent });
        }

        let old_parent = self.nodes[node.0].parent;
        if old_parent == Some(new_parent) {
            return Ok(false);
        }

        if let Some(old) = old_parent {
            self.nodes[old.0].children.retain(|&child| child != node);
        }
        self.nodes[new_parent.0].children.push(node);
        self.nodes[node.0].parent = Some(new_parent);

        log::debug!(
            "Re-parented {} under {}",
            self.nodes[node.0].name(),
            self.nodes[new_parent.0].name()
        );
        Ok(true)
    }

    /// Whether `a` ranks above `b` as a parent: larger radius, then lower index
    fn outranks(&self, a: NodeId, b: NodeId) -> bool {
        if a.is_root() {
            return false;
        }
        if b.is_root() {
            return true;
        }
        let ra = self.nodes[a.0].bounds().radius;
        let rb = self.nodes[b.0].bounds().radius;
        match ra.partial_cmp(&rb) {
            Some(Ordering::Greater) => true,
            Some(Ordering::Equal) => a < b,
            _ => false,
        }
    }

    /// Move `node` under `new_parent`, deferring to a higher-ranked parent
    ///
    /// When `node` already hangs under a parent that outranks `new_parent`,
    /// `node` stays put and `new_parent` is pulled under that parent instead,
    /// so both end up in the same subtree. Every link this makes raises the
    /// rank of the moved node's parent.
    fn promote(&mut self, mut node: NodeId, mut new_parent: NodeId) -> Result<bool, SceneError> {
        // Each redirect targets a strictly higher rank
        for _ in 0..=self.nodes.len() {
            let current = match self.nodes[node.0].parent {
                Some(current) if current != new_parent && !self.outranks(new_parent, current) => current,
                _ => return self.set_parent(node, new_parent),
            };
            if self.is_ancestor(current, new_parent) {
                return Ok(false);
            }
            log::trace!(
                "{} keeps parent {}; pulling {} under it",
                self.nodes[node.0].name(),
                self.nodes[current.0].name(),
                self.nodes[new_parent.0].name()
            );
            node = new_parent;
            new_parent = current;
        }
        Ok(false)
    }

    /// Run one pairwise overlap scan and return the number of links changed
    ///
    /// A node is never handed to a parent that ranks below its current one,
    /// so parent ranks only rise and repeated scans settle.
    pub fn reparent_pass(&mut self) -> usize {
        let mut moves = 0;
        let count = self.nodes.len();

        for x in 1..count {
            for y in (x + 1)..count {
                let (x, y) = (NodeId(x), NodeId(y));
                if !self.nodes[x.0].bounds().overlaps(self.nodes[y.0].bounds()) {
                    continue;
                }

                // Equal radii keep the lower index as the parent candidate
                let (big, small) = if self.outranks(y, x) { (y, x) } else { (x, y) };

                let outcome = match self.nodes[small.0].parent {
                    None => continue,
                    Some(parent) if parent.is_root() => self.set_parent(small, big),
                    Some(parent) => {
                        let parent_radius = self.nodes[parent.0].bounds().radius;
                        let big_radius = self.nodes[big.0].bounds().radius;
                        if parent_radius > big_radius {
                            self.promote(big, parent)
                        } else if parent != big {
                            self.promote(parent, big)
                        } else {
                            Ok(false)
                        }
                    }
                };

                match outcome {
                    Ok(true) => moves += 1,
                    Ok(false) => {}
                    Err(err) => log::debug!("Skipped re-parent: {}", err),
                }
            }
        }
        moves
    }

    /// Re-parent overlapping nodes until a scan changes nothing
    ///
    /// Returns the total number of links changed.
    pub fn reparent(&mut self) -> usize {
        let limit = self.nodes.len() * self.nodes.len() + 1;
        let mut total = 0;
        for _ in 0..limit {
            let moves = self.reparent_pass();
            total += moves;
            if moves == 0 {
                return total;
            }
        }
        log::warn!("Re-parenting did not settle after {} scans ({} moves)", limit, total);
        total
    }

    /// Translate the mesh of `id` and of every descendant by `offset`
    pub fn translate(&mut self, id: NodeId, offset: &Vec3) -> Result<(), SceneError> {
        self.check(id)?;
        let mut targets = self.descendants(id);
        targets.push(id);
        for target in targets {
            if let Some(mesh) = self.nodes[target.0].mesh_mut() {
                mesh.translate(offset);
            }
        }
        Ok(())
    }

    /// Recompute every mesh's bounding sphere from its vertices
    pub fn refresh_bounds(&mut self) {
        for node in self.nodes.iter_mut().skip(1) {
            if let Some(mesh) = node.mesh_mut() {
                mesh.refresh_bounds();
            }
        }
    }

    /// Copy every mesh's center and radius into its node's bounds
    pub fn sync_bounds(&mut self) {
        for node in self.nodes.iter_mut().skip(1) {
            node.sync_bounds();
        }
    }

    /// Hand every visible mesh node to `target`, returning how many were drawn
    pub fn draw(&self, target: &mut dyn DrawTarget) -> usize {
        let mut drawn = 0;
        for node in self.nodes.iter().skip(1) {
            if !node.is_visible() {
                continue;
            }
            if let Some(mesh) = node.mesh() {
                target.draw_mesh(node.name(), mesh);
                drawn += 1;
            }
        }
        drawn
    }

    /// Per-frame update: re-parent, refresh bounds, draw, then sync bounds
    ///
    /// Returns `(moves, drawn)`.
    pub fn update(&mut self, target: &mut dyn DrawTarget) -> (usize, usize) {
        let moves = self.reparent();
        self.refresh_bounds();
        let drawn = self.draw(target);
        self.sync_bounds();
        log::trace!("Scene update: {} moves, {} drawn", moves, drawn);
        (moves, drawn)
    }

    /// Render the hierarchy as an indented outline
    pub fn outline(&self) -> String {
        fn walk(graph: &SceneGraph, id: NodeId, depth: usize, out: &mut String) {
            if let Some(node) = graph.node(id) {
                out.push_str(&"  ".repeat(depth));
                out.push_str(node.name());
                out.push('\n');
                for &child in node.children() {
                    walk(graph, child, depth + 1, out);
                }
            }
        }

        let mut out = String::new();
        walk(self, NodeId::ROOT, 0, &mut out);
        out
    }
}
