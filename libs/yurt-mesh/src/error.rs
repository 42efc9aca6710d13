//! # Mesh Errors
//!
//! Error types for mesh generation operations.

use thiserror::Error;

/// Errors that can occur during mesh generation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MeshError {
    /// A primitive was requested with non-positive dimensions, a non-finite
    /// value, or too few segments.
    #[error("Invalid geometry parameters: {message}")]
    InvalidGeometryParameters { message: String },
}

impl MeshError {
    /// Creates an invalid geometry parameters error.
    pub fn invalid_parameters(message: impl Into<String>) -> Self {
        Self::InvalidGeometryParameters {
            message: message.into(),
        }
    }
}

/// Rejects non-finite or non-positive dimensions.
pub(crate) fn require_positive(what: &str, value: f64) -> Result<(), MeshError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(MeshError::invalid_parameters(format!(
            "{what} must be positive and finite: {value}"
        )))
    }
}

/// Rejects segment counts below `min`.
pub(crate) fn require_segments(what: &str, value: u32, min: u32) -> Result<(), MeshError> {
    if value >= min {
        Ok(())
    } else {
        Err(MeshError::invalid_parameters(format!(
            "{what} must be at least {min}: {value}"
        )))
    }
}
