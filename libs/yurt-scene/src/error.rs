//! # Scene Errors
//!
//! Error types for scene assembly, asset loading and configuration.

use thiserror::Error;
use yurt_csg::CsgError;

/// Errors that can occur while assembling or driving a scene.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SceneError {
    /// Composition or colour error from the CSG layer.
    #[error(transparent)]
    Csg(#[from] CsgError),

    /// An asset could not be fetched or parsed.
    #[error("Asset load failed: {message}")]
    AssetLoadFailure { message: String },

    /// No scene node or material group carries the requested name.
    #[error("No scene node named '{name}'")]
    UnresolvedNamedNode { name: String },

    /// Viewer configuration is malformed or out of range.
    #[error("Invalid viewer configuration: {message}")]
    InvalidConfig { message: String },
}

impl SceneError {
    /// Creates an asset load failure.
    pub fn asset(message: impl Into<String>) -> Self {
        Self::AssetLoadFailure {
            message: message.into(),
        }
    }

    /// Creates an unresolved named node error.
    pub fn unresolved(name: impl Into<String>) -> Self {
        Self::UnresolvedNamedNode { name: name.into() }
    }

    /// Creates an invalid configuration error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }
}

impl From<gltf::Error> for SceneError {
    fn from(err: gltf::Error) -> Self {
        Self::asset(err.to_string())
    }
}

impl From<serde_json::Error> for SceneError {
    fn from(err: serde_json::Error) -> Self {
        Self::invalid_config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            SceneError::asset("truncated").to_string(),
            "Asset load failed: truncated"
        );
        assert!(SceneError::unresolved("lattice")
            .to_string()
            .contains("lattice"));
    }

    #[test]
    fn test_invalid_color_passes_through() {
        let err: SceneError = CsgError::invalid_color("#zzz").into();
        assert!(matches!(err, SceneError::Csg(CsgError::InvalidColor { .. })));
    }
}
