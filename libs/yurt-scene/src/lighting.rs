//! # Lighting
//!
//! Ambient and directional lights handed to the renderer with every frame.

use config::constants::{AMBIENT_INTENSITY, DIRECTIONAL_INTENSITY, DIRECTIONAL_POSITION};
use glam::DVec3;
use yurt_csg::Color;

/// Uniform light reaching every surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AmbientLight {
    pub color: Color,
    pub intensity: f64,
}

/// Parallel light shining from `position` toward the origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionalLight {
    pub color: Color,
    pub intensity: f64,
    pub position: DVec3,
}

impl DirectionalLight {
    /// Unit vector the light travels along.
    pub fn direction(&self) -> DVec3 {
        (-self.position).normalize_or_zero()
    }
}

/// Scene lights.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Lighting {
    pub ambient: Option<AmbientLight>,
    pub directional: Option<DirectionalLight>,
}

impl Lighting {
    /// White ambient light only.
    pub fn ambient(intensity: f64) -> Self {
        Self {
            ambient: Some(AmbientLight {
                color: Color::WHITE,
                intensity,
            }),
            directional: None,
        }
    }

    /// White ambient plus one white directional light.
    pub fn standard() -> Self {
        Self {
            directional: Some(DirectionalLight {
                color: Color::WHITE,
                intensity: DIRECTIONAL_INTENSITY,
                position: DVec3::from_array(DIRECTIONAL_POSITION),
            }),
            ..Self::ambient(AMBIENT_INTENSITY)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_rig() {
        let lighting = Lighting::standard();
        assert_eq!(lighting.ambient.map(|a| a.intensity), Some(0.5));
        let sun = lighting.directional.unwrap();
        assert_eq!(sun.intensity, 0.8);
        assert!(sun.direction().y < 0.0);
    }
}
