//! # Perspective Camera
//!
//! Right-handed, Y-up perspective camera looking at a target.

use crate::config::ViewerConfig;
use glam::{DMat4, DVec3};

/// Perspective camera.
#[derive(Debug, Clone, PartialEq)]
pub struct PerspectiveCamera {
    pub position: DVec3,
    pub target: DVec3,
    /// Vertical field of view in degrees.
    pub fov: f64,
    /// Width over height of the render surface.
    pub aspect: f64,
    pub near: f64,
    pub far: f64,
}

impl PerspectiveCamera {
    pub fn new(position: DVec3, target: DVec3, fov: f64, near: f64, far: f64) -> Self {
        Self {
            position,
            target,
            fov,
            aspect: 1.0,
            near,
            far,
        }
    }

    pub fn from_config(config: &ViewerConfig) -> Self {
        Self::new(
            config.camera_position,
            config.orbit_target,
            config.fov,
            config.near,
            config.far,
        )
    }

    /// Sets `aspect = width / height`. A zero dimension leaves it unchanged.
    pub fn set_viewport(&mut self, width: u32, height: u32) -> bool {
        if width == 0 || height == 0 {
            return false;
        }
        self.aspect = f64::from(width) / f64::from(height);
        true
    }

    /// World to camera.
    pub fn view_matrix(&self) -> DMat4 {
        DMat4::look_at_rh(self.position, self.target, DVec3::Y)
    }

    /// Camera to clip space (OpenGL depth range).
    pub fn projection_matrix(&self) -> DMat4 {
        DMat4::perspective_rh_gl(self.fov.to_radians(), self.aspect, self.near, self.far)
    }

    pub fn view_projection(&self) -> DMat4 {
        self.projection_matrix() * self.view_matrix()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aspect_is_exact_ratio() {
        let mut camera = PerspectiveCamera::from_config(&ViewerConfig::default());
        assert!(camera.set_viewport(1920, 1080));
        assert_eq!(camera.aspect, 1920.0 / 1080.0);
    }

    #[test]
    fn test_zero_dimensions_ignored() {
        let mut camera = PerspectiveCamera::from_config(&ViewerConfig::default());
        camera.set_viewport(800, 600);
        assert!(!camera.set_viewport(800, 0));
        assert!(!camera.set_viewport(0, 600));
        assert_eq!(camera.aspect, 800.0 / 600.0);
        assert!(camera.projection_matrix().is_finite());
    }

    #[test]
    fn test_target_projects_to_centre() {
        let camera = PerspectiveCamera::from_config(&ViewerConfig::default());
        let clip = camera.view_projection().project_point3(camera.target);
        assert!(clip.x.abs() < 1e-9 && clip.y.abs() < 1e-9);
    }
}
