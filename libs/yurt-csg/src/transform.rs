//! # Transform
//!
//! Position / Euler rotation / scale triple attached to composition and
//! scene nodes.

use glam::{DMat4, DQuat, DVec3, EulerRot};
use serde::{Deserialize, Serialize};

/// Node transform.
///
/// Rotation is stored as XYZ Euler angles in radians. The matrix is composed
/// as `T * R * S`: scale first, then rotate, then translate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Transform {
    pub position: DVec3,
    pub rotation: DVec3,
    pub scale: DVec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    /// No translation, no rotation, unit scale.
    pub const IDENTITY: Transform = Transform {
        position: DVec3::ZERO,
        rotation: DVec3::ZERO,
        scale: DVec3::ONE,
    };

    /// Pure translation.
    pub fn from_position(x: f64, y: f64, z: f64) -> Self {
        Self::IDENTITY.with_position(DVec3::new(x, y, z))
    }

    pub fn with_position(mut self, position: DVec3) -> Self {
        self.position = position;
        self
    }

    pub fn with_rotation(mut self, rotation: DVec3) -> Self {
        self.rotation = rotation;
        self
    }

    /// Sets the rotation from a quaternion.
    pub fn with_quat(self, rotation: DQuat) -> Self {
        let (x, y, z) = rotation.to_euler(EulerRot::XYZ);
        self.with_rotation(DVec3::new(x, y, z))
    }

    pub fn with_scale(mut self, scale: DVec3) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_uniform_scale(self, scale: f64) -> Self {
        self.with_scale(DVec3::splat(scale))
    }

    /// Rotation as a quaternion.
    pub fn quat(&self) -> DQuat {
        DQuat::from_euler(EulerRot::XYZ, self.rotation.x, self.rotation.y, self.rotation.z)
    }

    /// Composed `T * R * S` matrix.
    pub fn matrix(&self) -> DMat4 {
        DMat4::from_scale_rotation_translation(self.scale, self.quat(), self.position)
    }

    /// Decomposes an affine matrix; shear is discarded.
    pub fn from_matrix(matrix: &DMat4) -> Self {
        let (scale, rotation, position) = matrix.to_scale_rotation_translation();
        Self {
            position,
            scale,
            ..Self::IDENTITY
        }
        .with_quat(rotation)
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }
}
