//! # Composition Errors
//!
//! Error types for shape construction and composition tree evaluation.

use thiserror::Error;
use yurt_mesh::MeshError;

/// Label used in errors for nodes without a name.
const UNNAMED: &str = "<unnamed>";

/// Errors that can occur while building or evaluating a composition.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CsgError {
    /// A primitive could not be tessellated.
    #[error(transparent)]
    Geometry(#[from] MeshError),

    /// A Base node has neither a shape nor children.
    #[error("Base node '{node}' has no shape and no children")]
    MissingBaseGeometry { node: String },

    /// No node carries the requested name.
    #[error("No composition node named '{name}'")]
    UnresolvedNamedNode { name: String },

    /// A colour string is not `#rrggbb` or `#rgb`.
    #[error("Invalid colour: '{value}'")]
    InvalidColor { value: String },
}

impl CsgError {
    /// Creates a missing base geometry error for an optionally named node.
    pub fn missing_base(node: Option<&str>) -> Self {
        Self::MissingBaseGeometry {
            node: node.unwrap_or(UNNAMED).to_string(),
        }
    }

    /// Creates an unresolved named node error.
    pub fn unresolved(name: impl Into<String>) -> Self {
        Self::UnresolvedNamedNode { name: name.into() }
    }

    /// Creates an invalid colour error.
    pub fn invalid_color(value: impl Into<String>) -> Self {
        Self::InvalidColor {
            value: value.into(),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
