//! # Scene Graph
//!
//! Arena of named scene nodes with shared meshes and materials.
//!
//! ## Lookup
//!
//! Nodes are addressed by [`NodeId`]. A name index is maintained as nodes
//! are added; when two nodes share a name the first one added wins. Material
//! groups map a group name (`"wall"`, `"roof"`, ...) to the materials a
//! colour picker edits.
//!
//! ## Rendering
//!
//! A node renders when it and all of its ancestors are visible.
//! [`SceneGraph::drawables`] walks the hierarchy and returns one
//! [`Drawable`] per rendered node with a mesh.

use crate::error::SceneError;
use glam::{DMat4, DVec3};
use std::collections::HashMap;
use std::sync::Arc;
use yurt_csg::{Color, Material, Transform};
use yurt_mesh::Mesh;

// =============================================================================
// HANDLES
// =============================================================================

/// Index of a node in its [`SceneGraph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

/// Index of a material in its [`SceneGraph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MaterialId(usize);

// =============================================================================
// SCENE NODE
// =============================================================================

/// A node in the scene graph.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneNode {
    pub name: Option<String>,
    pub visible: bool,
    pub transform: Transform,
    pub mesh: Option<Arc<Mesh>>,
    /// Material per mesh material slot.
    pub materials: Vec<MaterialId>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl SceneNode {
    /// Visible node without geometry.
    pub fn new() -> Self {
        Self {
            name: None,
            visible: true,
            transform: Transform::IDENTITY,
            mesh: None,
            materials: Vec::new(),
            parent: None,
            children: Vec::new(),
        }
    }

    /// Node drawing `mesh` with a single material.
    pub fn with_mesh(mesh: Arc<Mesh>, material: MaterialId) -> Self {
        Self {
            mesh: Some(mesh),
            materials: vec![material],
            ..Self::new()
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}

impl Default for SceneNode {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// DRAWABLE
// =============================================================================

/// A rendered node resolved to world space.
#[derive(Debug, Clone, PartialEq)]
pub struct Drawable {
    pub node: NodeId,
    pub name: Option<String>,
    pub world: DMat4,
    pub mesh: Arc<Mesh>,
    /// Material per mesh material slot.
    pub materials: Vec<Material>,
}

// =============================================================================
// SCENE GRAPH
// =============================================================================

/// Arena-backed scene graph.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SceneGraph {
    nodes: Vec<SceneNode>,
    roots: Vec<NodeId>,
    materials: Vec<Material>,
    names: HashMap<String, NodeId>,
    groups: HashMap<String, Vec<MaterialId>>,
}

impl SceneGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a material.
    pub fn add_material(&mut self, material: Material) -> MaterialId {
        self.materials.push(material);
        MaterialId(self.materials.len() - 1)
    }

    /// Adds `material` to the colour group `group`.
    pub fn add_to_group(&mut self, group: impl Into<String>, material: MaterialId) {
        let members = self.groups.entry(group.into()).or_default();
        if !members.contains(&material) {
            members.push(material);
        }
    }

    /// Adds a node under `parent`, or as a root.
    pub fn add_node(&mut self, mut node: SceneNode, parent: Option<NodeId>) -> NodeId {
        let id = NodeId(self.nodes.len());
        node.parent = parent.filter(|p| p.0 < self.nodes.len());
        node.children.clear();

        if let Some(name) = &node.name {
            self.names.entry(name.clone()).or_insert(id);
        }
        match node.parent {
            Some(parent) => self.nodes[parent.0].children.push(id),
            None => self.roots.push(id),
        }

        self.nodes.push(node);
        id
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    pub fn node(&self, id: NodeId) -> Option<&SceneNode> {
        self.nodes.get(id.0)
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut SceneNode> {
        self.nodes.get_mut(id.0)
    }

    /// Looks a node up by name.
    pub fn find(&self, name: &str) -> Option<NodeId> {
        self.names.get(name).copied()
    }

    /// Looks a node up by name, failing with
    /// [`SceneError::UnresolvedNamedNode`].
    pub fn resolve(&self, name: &str) -> Result<NodeId, SceneError> {
        self.find(name).ok_or_else(|| SceneError::unresolved(name))
    }

    pub fn set_visible(&mut self, name: &str, visible: bool) -> Result<(), SceneError> {
        let id = self.resolve(name)?;
        self.nodes[id.0].visible = visible;
        Ok(())
    }

    pub fn set_position(&mut self, name: &str, position: DVec3) -> Result<(), SceneError> {
        let id = self.resolve(name)?;
        self.nodes[id.0].transform.position = position;
        Ok(())
    }

    pub fn material(&self, id: MaterialId) -> Option<&Material> {
        self.materials.get(id.0)
    }

    pub fn material_mut(&mut self, id: MaterialId) -> Option<&mut Material> {
        self.materials.get_mut(id.0)
    }

    /// Materials in a colour group; empty if the group is unknown.
    pub fn group(&self, group: &str) -> &[MaterialId] {
        self.groups.get(group).map(Vec::as_slice).unwrap_or_default()
    }

    /// Recolours every material in `group`.
    pub fn set_group_color(&mut self, group: &str, color: Color) -> Result<(), SceneError> {
        let members = self
            .groups
            .get(group)
            .ok_or_else(|| SceneError::unresolved(group))?;

        for id in members {
            if let Some(material) = self.materials.get_mut(id.0) {
                material.color = color;
            }
        }
        Ok(())
    }

    /// True if the node and all of its ancestors are visible.
    pub fn is_rendered(&self, id: NodeId) -> bool {
        let mut current = Some(id);
        while let Some(node) = current.and_then(|id| self.nodes.get(id.0)) {
            if !node.visible {
                return false;
            }
            current = node.parent;
        }
        current.is_none()
    }

    /// Local-to-world matrix of a node.
    pub fn world_matrix(&self, id: NodeId) -> DMat4 {
        let mut matrix = DMat4::IDENTITY;
        let mut current = self.nodes.get(id.0);
        while let Some(node) = current {
            matrix = node.transform.matrix() * matrix;
            current = node.parent.and_then(|p| self.nodes.get(p.0));
        }
        matrix
    }

    /// Rendered nodes with geometry, in depth-first order.
    pub fn drawables(&self) -> Vec<Drawable> {
        let mut drawables = Vec::new();
        let mut stack: Vec<(NodeId, DMat4)> = self
            .roots
            .iter()
            .rev()
            .map(|&id| (id, DMat4::IDENTITY))
            .collect();

        while let Some((id, parent_world)) = stack.pop() {
            let node = &self.nodes[id.0];
            if !node.visible {
                continue;
            }
            let world = parent_world * node.transform.matrix();

            if let Some(mesh) = &node.mesh {
                drawables.push(Drawable {
                    node: id,
                    name: node.name.clone(),
                    world,
                    mesh: Arc::clone(mesh),
                    materials: node
                        .materials
                        .iter()
                        .filter_map(|&m| self.material(m).cloned())
                        .collect(),
                });
            }

            stack.extend(node.children.iter().rev().map(|&child| (child, world)));
        }

        drawables
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_mesh() -> Arc<Mesh> {
        Arc::new(yurt_mesh::primitives::create_box(DVec3::ONE).unwrap())
    }

    fn graph() -> SceneGraph {
        let mut graph = SceneGraph::new();
        let wood = graph.add_material(Material::from_hex(0x663300));
        graph.add_to_group("door", wood);

        let door = graph.add_node(
            SceneNode::new()
                .named("door")
                .with_transform(Transform::from_position(0.0, 1.0, 0.0)),
            None,
        );
        graph.add_node(
            SceneNode::with_mesh(unit_mesh(), wood)
                .named("frame")
                .with_transform(Transform::from_position(0.0, 0.0, 4.95)),
            Some(door),
        );
        graph
    }

    #[test]
    fn test_find_by_name() {
        let graph = graph();
        assert!(graph.find("frame").is_some());
        assert_eq!(graph.resolve("roof"), Err(SceneError::unresolved("roof")));
    }

    #[test]
    fn test_first_name_wins() {
        let mut graph = SceneGraph::new();
        let first = graph.add_node(SceneNode::new().named("pole"), None);
        graph.add_node(SceneNode::new().named("pole"), None);
        assert_eq!(graph.find("pole"), Some(first));
    }

    #[test]
    fn test_world_matrix_composes_parents() {
        let graph = graph();
        let frame = graph.find("frame").unwrap();
        let origin = graph.world_matrix(frame).transform_point3(DVec3::ZERO);
        assert!((origin - DVec3::new(0.0, 1.0, 4.95)).length() < 1e-12);
    }

    #[test]
    fn test_hidden_parent_hides_children() {
        let mut graph = graph();
        assert_eq!(graph.drawables().len(), 1);

        graph.set_visible("door", false).unwrap();
        assert!(!graph.is_rendered(graph.find("frame").unwrap()));
        assert!(graph.drawables().is_empty());
    }

    #[test]
    fn test_group_color_reaches_drawables() {
        let mut graph = graph();
        graph.set_group_color("door", Color::WHITE).unwrap();
        assert_eq!(graph.drawables()[0].materials[0].color, Color::WHITE);
        assert!(graph.set_group_color("roof", Color::WHITE).is_err());
    }
}
