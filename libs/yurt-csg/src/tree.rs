//! # Composition Tree
//!
//! Owns a root [`CompositionNode`] and caches its evaluation.
//!
//! Any transform change marks the tree dirty; the next [`update`] recomputes
//! the whole tree. There is no incremental path: interactive scenes stay well
//! under [`MAX_INTERACTIVE_NODES`] nodes.
//!
//! [`update`]: CompositionTree::update

use crate::error::CsgError;
use crate::evaluate::{evaluate, Evaluated};
use crate::material::Material;
use crate::node::CompositionNode;
use crate::transform::Transform;
use config::constants::MAX_INTERACTIVE_NODES;
use tracing::{debug, info, warn};

/// Fallback name for an unnamed root.
const DEFAULT_TREE_NAME: &str = "composition";

/// A composition tree with a cached evaluation.
#[derive(Debug, Clone)]
pub struct CompositionTree {
    root: CompositionNode,
    default_material: Material,
    output: Option<Evaluated>,
    dirty: bool,
    revision: u64,
}

impl CompositionTree {
    pub fn new(root: CompositionNode) -> Self {
        let count = root.node_count();
        if count > MAX_INTERACTIVE_NODES {
            warn!(
                nodes = count,
                limit = MAX_INTERACTIVE_NODES,
                "Composition exceeds interactive size; recomputes may stall frames"
            );
        }

        Self {
            root,
            default_material: Material::default(),
            output: None,
            dirty: true,
            revision: 0,
        }
    }

    /// Sets the material for triangles no node material reaches.
    pub fn with_default_material(mut self, material: Material) -> Self {
        self.default_material = material;
        self.dirty = true;
        self
    }

    pub fn root(&self) -> &CompositionNode {
        &self.root
    }

    /// Root node name, or `"composition"` when unnamed.
    pub fn name(&self) -> &str {
        self.root.name.as_deref().unwrap_or(DEFAULT_TREE_NAME)
    }

    pub fn default_material(&self) -> &Material {
        &self.default_material
    }

    pub fn find(&self, name: &str) -> Option<&CompositionNode> {
        self.root.find(name)
    }

    /// Mutable access to a named node. Marks the tree dirty when found.
    pub fn find_mut(&mut self, name: &str) -> Option<&mut CompositionNode> {
        let node = self.root.find_mut(name)?;
        self.dirty = true;
        Some(node)
    }

    /// Replaces the transform of the node called `name`.
    ///
    /// # Errors
    ///
    /// [`CsgError::UnresolvedNamedNode`] if no node has that name.
    pub fn set_transform(&mut self, name: &str, transform: Transform) -> Result<(), CsgError> {
        let node = self
            .root
            .find_mut(name)
            .ok_or_else(|| CsgError::unresolved(name))?;

        if node.transform != transform {
            node.transform = transform;
            self.dirty = true;
            debug!(node = name, "Transform changed");
        }
        Ok(())
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty || self.output.is_none()
    }

    /// Number of completed evaluations.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Last evaluation, if any.
    pub fn output(&self) -> Option<&Evaluated> {
        self.output.as_ref()
    }

    /// Returns the evaluated mesh, recomputing the whole tree if dirty.
    pub fn update(&mut self) -> Result<&Evaluated, CsgError> {
        let output = match self.output.take() {
            Some(output) if !self.dirty => output,
            previous => match self.recompute() {
                Ok(output) => output,
                Err(err) => {
                    // Keep the last good evaluation
                    self.output = previous;
                    return Err(err);
                }
            },
        };
        Ok(self.output.insert(output))
    }

    fn recompute(&mut self) -> Result<Evaluated, CsgError> {
        let output = evaluate(&self.root, &self.default_material)?;
        self.dirty = false;
        self.revision += 1;

        info!(
            tree = self.name(),
            nodes = self.root.node_count(),
            triangles = output.mesh.triangle_count(),
            revision = self.revision,
            "Composition recomputed"
        );
        Ok(output)
    }
}
