//! # Yurt CSG
//!
//! Declarative constructive solid geometry for procedural yurt models.
//!
//! ## Architecture
//!
//! ```text
//! Shape (Arc) → CompositionNode tree → evaluate → Evaluated { mesh, materials }
//! ```
//!
//! Shapes are tessellated once and shared. A [`CompositionTree`] owns the
//! node tree, looks nodes up by name for interactive edits and recomputes the
//! whole tree when something changed.
//!
//! ## Usage
//!
//! ```rust
//! use yurt_csg::{CompositionNode, CompositionTree, Shape, Transform};
//!
//! let floor = Shape::cylinder(5.0, 5.0, 0.1, 32).unwrap();
//! let door = Shape::cuboid(1.0, 2.0, 1.0).unwrap();
//!
//! let mut tree = CompositionTree::new(
//!     CompositionNode::base(floor)
//!         .named("ger")
//!         .with_child(CompositionNode::subtraction(door).named("door")),
//! );
//! tree.set_transform("door", Transform::from_position(5.0, 0.0, 0.0)).unwrap();
//! let out = tree.update().unwrap();
//! assert!(!out.mesh.is_empty());
//! ```

pub mod error;
pub mod evaluate;
pub mod material;
pub mod node;
pub mod shape;
pub mod transform;
pub mod tree;

#[cfg(test)]
mod tests;

pub use error::CsgError;
pub use evaluate::{evaluate, Evaluated};
pub use material::{Color, Material, Texture, Wrap};
pub use node::{CompositionNode, Operation};
pub use shape::{Shape, ShapeKind};
pub use transform::Transform;
pub use tree::CompositionTree;
