//! # Composition Evaluation
//!
//! Recursive reducer from a [`CompositionNode`] tree to a single mesh.
//!
//! ## Semantics
//!
//! For every node:
//!
//! 1. The running volume starts as the node's own shape (if any).
//! 2. Children are folded left to right: `Subtraction` children are
//!    subtracted, every other child is unioned.
//! 3. The node's transform is applied to the folded volume.
//! 4. The node's material tags triangles that carry no material yet.
//!
//! The parent then applies this node's operation to its own running volume,
//! so `[Base A, Subtraction B, Addition C]` differs from
//! `[Base A, Addition C, Subtraction B]` whenever C overlaps B.

use crate::error::CsgError;
use crate::material::Material;
use crate::node::{CompositionNode, Operation};
use tracing::warn;
use yurt_mesh::{difference, union, Mesh};

// =============================================================================
// OUTPUT
// =============================================================================

/// Evaluated composition: one mesh plus its material table.
///
/// Triangle material slot `i` refers to `materials[i]`. Slot 0 is the default
/// surface material; further slots are distinct node materials in the order
/// they were first applied.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluated {
    pub mesh: Mesh,
    pub materials: Vec<Material>,
}

impl Evaluated {
    /// Contiguous triangle runs as `(first_triangle, triangle_count, material)`.
    pub fn groups(&self) -> Vec<(usize, usize, &Material)> {
        self.mesh
            .material_groups()
            .into_iter()
            .filter_map(|(start, count, slot)| {
                self.materials
                    .get(slot as usize)
                    .map(|material| (start, count, material))
            })
            .collect()
    }
}

/// Distinct materials keyed by first use.
struct MaterialTable {
    materials: Vec<Material>,
}

impl MaterialTable {
    fn new(default: &Material) -> Self {
        Self {
            materials: vec![default.clone()],
        }
    }

    fn slot_for(&mut self, material: &Material) -> u32 {
        match self.materials.iter().position(|m| m == material) {
            Some(slot) => slot as u32,
            None => {
                self.materials.push(material.clone());
                (self.materials.len() - 1) as u32
            }
        }
    }
}

// =============================================================================
// EVALUATION
// =============================================================================

/// Evaluates `root` into a single mesh with recomputed normals.
///
/// # Errors
///
/// [`CsgError::MissingBaseGeometry`] when a `Base` node has neither a shape
/// nor children.
///
/// # Example
///
/// ```rust
/// use yurt_csg::{evaluate, CompositionNode, Material, Shape, Transform};
///
/// let outer = Shape::cylinder(5.0, 5.0, 3.0, 32).unwrap();
/// let inner = Shape::cylinder(4.9, 4.9, 3.0, 32).unwrap();
/// let walls = CompositionNode::base(outer)
///     .with_child(CompositionNode::subtraction(inner));
///
/// let out = evaluate(&walls, &Material::default()).unwrap();
/// assert!(out.mesh.normals().is_some());
/// ```
pub fn evaluate(
    root: &CompositionNode,
    default_material: &Material,
) -> Result<Evaluated, CsgError> {
    let mut table = MaterialTable::new(default_material);
    let mut mesh = node_operand(root, &mut table)?;
    mesh.compute_normals();

    Ok(Evaluated {
        mesh,
        materials: table.materials,
    })
}

/// Resolves the volume a node contributes to its parent.
fn node_operand(node: &CompositionNode, table: &mut MaterialTable) -> Result<Mesh, CsgError> {
    let mut running: Option<Mesh> = node.shape.as_ref().map(|shape| shape.mesh().clone());

    for child in &node.children {
        let operand = node_operand(child, table)?;
        running = match (running, child.op) {
            (Some(current), Operation::Subtraction) => Some(difference(&current, &operand)),
            (Some(current), _) => Some(union(&current, &operand)),
            (None, Operation::Subtraction) => {
                warn!(
                    node = node.name.as_deref().unwrap_or_default(),
                    child = child.name.as_deref().unwrap_or_default(),
                    "Subtraction with nothing to subtract from; skipped"
                );
                None
            }
            (None, _) => Some(operand),
        };
    }

    let Some(mut mesh) = running else {
        if node.op == Operation::Base {
            return Err(CsgError::missing_base(node.name.as_deref()));
        }
        warn!(
            node = node.name.as_deref().unwrap_or_default(),
            op = ?node.op,
            "Node resolves to no geometry; treated as empty"
        );
        return Ok(Mesh::new());
    };

    if !node.transform.is_identity() {
        mesh.transform(&node.transform.matrix());
    }
    if let Some(material) = &node.material {
        mesh.tag_untagged(table.slot_for(material));
    }

    Ok(mesh)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::Shape;
    use crate::transform::Transform;
    use glam::DVec3;

    fn unit_box() -> CompositionNode {
        CompositionNode::base(Shape::cuboid(1.0, 1.0, 1.0).unwrap())
    }

    #[test]
    fn test_empty_base_fails() {
        let node = CompositionNode::new(Operation::Base).named("floor");
        assert_eq!(
            evaluate(&node, &Material::default()),
            Err(CsgError::missing_base(Some("floor")))
        );
    }

    #[test]
    fn test_nested_empty_base_fails() {
        let node = unit_box().with_child(CompositionNode::new(Operation::Base));
        assert!(matches!(
            evaluate(&node, &Material::default()),
            Err(CsgError::MissingBaseGeometry { .. })
        ));
    }

    #[test]
    fn test_empty_group_yields_empty_mesh() {
        let out = evaluate(&CompositionNode::group(), &Material::default()).unwrap();
        assert!(out.mesh.is_empty());
        assert_eq!(out.materials.len(), 1);
    }

    #[test]
    fn test_base_resolves_through_child_chain() {
        let node = CompositionNode::new(Operation::Base).with_child(unit_box());
        let out = evaluate(&node, &Material::default()).unwrap();
        assert_eq!(out.mesh.triangle_count(), 12);
    }

    #[test]
    fn test_transform_applies_after_fold() {
        let node = unit_box()
            .with_child(
                CompositionNode::addition(Shape::cuboid(1.0, 1.0, 1.0).unwrap())
                    .with_transform(Transform::from_position(1.0, 0.0, 0.0)),
            )
            .with_transform(Transform::from_position(0.0, 10.0, 0.0));

        let out = evaluate(&node, &Material::default()).unwrap();
        let (min, max) = out.mesh.bounding_box();
        assert!((min - DVec3::new(-0.5, 9.5, -0.5)).length() < 1e-9);
        assert!((max - DVec3::new(1.5, 10.5, 0.5)).length() < 1e-9);
    }

    #[test]
    fn test_material_slots_in_first_use_order() {
        let red = Material::from_hex(0xff0000);
        let blue = Material::from_hex(0x0000ff);
        let node = CompositionNode::group().with_children([
            unit_box().with_material(red.clone()),
            CompositionNode::addition(Shape::cuboid(1.0, 1.0, 1.0).unwrap())
                .with_transform(Transform::from_position(3.0, 0.0, 0.0))
                .with_material(blue.clone()),
            CompositionNode::addition(Shape::cuboid(1.0, 1.0, 1.0).unwrap())
                .with_transform(Transform::from_position(-3.0, 0.0, 0.0))
                .with_material(red.clone()),
        ]);

        let out = evaluate(&node, &Material::default()).unwrap();
        assert_eq!(out.materials, vec![Material::default(), red, blue]);
        assert!(out.groups().iter().all(|(_, _, m)| **m != Material::default()));
    }

    #[test]
    fn test_normals_always_present() {
        let out = evaluate(&unit_box(), &Material::default()).unwrap();
        assert_eq!(
            out.mesh.normals().map(<[_]>::len),
            Some(out.mesh.vertex_count())
        );
    }
}
