//! # Orbit Controls
//!
//! Rotate / pan / zoom around a target with damping.
//!
//! ## Model
//!
//! The camera sits on a sphere around the target, described by
//! `(radius, azimuth, polar)`. Azimuth 0 looks from +Z and grows toward +X;
//! polar is measured from +Y.
//!
//! Input accumulates pending motion. Every [`update`](OrbitControls::update)
//! applies `damping_factor` of the pending rotation and pan, keeps the rest
//! for the next tick and drops it once it falls below
//! [`ORBIT_REST_EPSILON`]. Zoom is applied in full.

use crate::camera::PerspectiveCamera;
use config::constants::{
    MAX_ORBIT_DISTANCE, MAX_POLAR_ANGLE, MIN_ORBIT_DISTANCE, MIN_POLAR_ANGLE, ORBIT_REST_EPSILON,
};
use glam::DVec3;

/// Orbit camera controller.
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitControls {
    target: DVec3,
    radius: f64,
    azimuth: f64,
    polar: f64,
    damping_factor: f64,
    pending_azimuth: f64,
    pending_polar: f64,
    pending_pan: DVec3,
    pending_zoom: f64,
}

impl OrbitControls {
    /// Controls orbiting the camera's current target from its current position.
    pub fn new(camera: &PerspectiveCamera, damping_factor: f64) -> Self {
        let offset = camera.position - camera.target;
        let radius = offset.length();
        let polar = if radius > 0.0 {
            (offset.y / radius).clamp(-1.0, 1.0).acos()
        } else {
            std::f64::consts::FRAC_PI_2
        };

        Self {
            target: camera.target,
            radius: radius.clamp(MIN_ORBIT_DISTANCE, MAX_ORBIT_DISTANCE),
            azimuth: offset.x.atan2(offset.z),
            polar: polar.clamp(MIN_POLAR_ANGLE, MAX_POLAR_ANGLE),
            damping_factor,
            pending_azimuth: 0.0,
            pending_polar: 0.0,
            pending_pan: DVec3::ZERO,
            pending_zoom: 1.0,
        }
    }

    /// Queues a rotation in radians.
    pub fn rotate(&mut self, azimuth: f64, polar: f64) {
        self.pending_azimuth += azimuth;
        self.pending_polar += polar;
    }

    /// Queues a pan, in multiples of the orbit distance along the camera's
    /// right and up axes.
    pub fn pan(&mut self, dx: f64, dy: f64) {
        let forward = -self.offset().normalize_or_zero();
        let right = forward.cross(DVec3::Y).normalize_or_zero();
        let up = right.cross(forward).normalize_or_zero();
        self.pending_pan += (right * dx + up * dy) * self.radius;
    }

    /// Queues a zoom. Positive values move closer; `0.1` shortens the orbit
    /// distance by 10%.
    pub fn zoom(&mut self, delta: f64) {
        let factor = 1.0 - delta;
        if factor.is_finite() && factor > 0.0 {
            self.pending_zoom *= factor;
        }
    }

    /// Applies one tick of damped motion and moves the camera.
    ///
    /// Returns true if the camera moved.
    pub fn update(&mut self, camera: &mut PerspectiveCamera) -> bool {
        let f = self.damping_factor;

        self.azimuth += self.pending_azimuth * f;
        self.polar = (self.polar + self.pending_polar * f).clamp(MIN_POLAR_ANGLE, MAX_POLAR_ANGLE);
        self.target += self.pending_pan * f;
        self.radius = (self.radius * self.pending_zoom).clamp(MIN_ORBIT_DISTANCE, MAX_ORBIT_DISTANCE);

        self.pending_azimuth = settle(self.pending_azimuth * (1.0 - f));
        self.pending_polar = settle(self.pending_polar * (1.0 - f));
        self.pending_pan *= 1.0 - f;
        if self.pending_pan.length() < ORBIT_REST_EPSILON {
            self.pending_pan = DVec3::ZERO;
        }
        self.pending_zoom = 1.0;

        let position = self.target + self.offset();
        let moved = position.distance(camera.position) > ORBIT_REST_EPSILON
            || self.target.distance(camera.target) > ORBIT_REST_EPSILON;

        camera.position = position;
        camera.target = self.target;
        moved
    }

    /// True once no motion is pending.
    pub fn is_settled(&self) -> bool {
        self.pending_azimuth == 0.0
            && self.pending_polar == 0.0
            && self.pending_pan == DVec3::ZERO
            && self.pending_zoom == 1.0
    }

    pub fn target(&self) -> DVec3 {
        self.target
    }

    pub fn distance(&self) -> f64 {
        self.radius
    }

    pub fn azimuth(&self) -> f64 {
        self.azimuth
    }

    pub fn polar(&self) -> f64 {
        self.polar
    }

    /// Camera offset from the target.
    fn offset(&self) -> DVec3 {
        let (sin_polar, cos_polar) = self.polar.sin_cos();
        let (sin_azimuth, cos_azimuth) = self.azimuth.sin_cos();
        DVec3::new(
            sin_polar * sin_azimuth,
            cos_polar,
            sin_polar * cos_azimuth,
        ) * self.radius
    }
}

fn settle(value: f64) -> f64 {
    if value.abs() < ORBIT_REST_EPSILON {
        0.0
    } else {
        value
    }
}
