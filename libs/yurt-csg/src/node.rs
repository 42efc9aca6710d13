//! # Composition Nodes
//!
//! Tagged tree of boolean operations over shared shapes.
//!
//! ## Structure
//!
//! ```text
//! Base (floor)
//! ├── Addition (walls)        shape: outer cylinder
//! │   └── Subtraction         shape: inner cylinder
//! └── Subtraction (door)
//!     ├── Base                shape: box
//!     └── Addition            shape: cylinder
//! ```

use crate::material::Material;
use crate::shape::Shape;
use crate::transform::Transform;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Boolean role of a node relative to its parent's running volume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operation {
    /// Starting volume; must resolve to geometry.
    Base,
    /// Union into the running volume.
    Addition,
    /// Difference from the running volume.
    Subtraction,
    /// Plain container; unions like `Addition`.
    Group,
}

/// A node in the composition tree.
#[derive(Debug, Clone, PartialEq)]
pub struct CompositionNode {
    pub op: Operation,
    pub name: Option<String>,
    pub shape: Option<Arc<Shape>>,
    pub transform: Transform,
    pub material: Option<Material>,
    pub children: Vec<CompositionNode>,
}

impl CompositionNode {
    /// Empty node with the given operation.
    pub fn new(op: Operation) -> Self {
        Self {
            op,
            name: None,
            shape: None,
            transform: Transform::IDENTITY,
            material: None,
            children: Vec::new(),
        }
    }

    pub fn base(shape: Arc<Shape>) -> Self {
        Self::new(Operation::Base).with_shape(shape)
    }

    pub fn addition(shape: Arc<Shape>) -> Self {
        Self::new(Operation::Addition).with_shape(shape)
    }

    pub fn subtraction(shape: Arc<Shape>) -> Self {
        Self::new(Operation::Subtraction).with_shape(shape)
    }

    pub fn group() -> Self {
        Self::new(Operation::Group)
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_shape(mut self, shape: Arc<Shape>) -> Self {
        self.shape = Some(shape);
        self
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    pub fn with_material(mut self, material: Material) -> Self {
        self.material = Some(material);
        self
    }

    pub fn with_child(mut self, child: CompositionNode) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_children(mut self, children: impl IntoIterator<Item = CompositionNode>) -> Self {
        self.children.extend(children);
        self
    }

    /// Number of nodes in this subtree, including `self`.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(Self::node_count).sum::<usize>()
    }

    /// Depth-first search for the first node called `name`.
    pub fn find(&self, name: &str) -> Option<&CompositionNode> {
        if self.name.as_deref() == Some(name) {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(name))
    }

    /// Mutable variant of [`find`](Self::find).
    pub fn find_mut(&mut self, name: &str) -> Option<&mut CompositionNode> {
        if self.name.as_deref() == Some(name) {
            return Some(self);
        }
        self.children
            .iter_mut()
            .find_map(|child| child.find_mut(name))
    }

    /// Names of all named nodes in depth-first order.
    pub fn names(&self) -> Vec<&str> {
        let mut names = Vec::new();
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            names.extend(node.name.as_deref());
            stack.extend(node.children.iter().rev());
        }
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree() -> CompositionNode {
        let unit = Shape::cuboid(1.0, 1.0, 1.0).unwrap();
        CompositionNode::base(unit.clone()).named("floor").with_children([
            CompositionNode::addition(unit.clone())
                .named("walls")
                .with_child(CompositionNode::subtraction(unit.clone()).named("inner")),
            CompositionNode::subtraction(unit).named("door"),
        ])
    }

    #[test]
    fn test_node_count() {
        assert_eq!(tree().node_count(), 4);
    }

    #[test]
    fn test_find_nested() {
        let tree = tree();
        assert_eq!(tree.find("inner").map(|n| n.op), Some(Operation::Subtraction));
        assert!(tree.find("roof").is_none());
    }

    #[test]
    fn test_find_mut_edits_in_place() {
        let mut tree = tree();
        tree.find_mut("door").unwrap().transform = Transform::from_position(1.0, 0.0, 0.0);
        assert_eq!(tree.find("door").unwrap().transform.position.x, 1.0);
    }

    #[test]
    fn test_names_in_depth_first_order() {
        assert_eq!(tree().names(), vec!["floor", "walls", "inner", "door"]);
    }
}
