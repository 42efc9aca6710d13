//! # Viewer Configuration
//!
//! Runtime-tunable camera, background and damping settings.
//!
//! Defaults come from `config::constants`; any field may be overridden from
//! JSON. Colours are written as hex strings.
//!
//! ```rust
//! use yurt_scene::ViewerConfig;
//!
//! let config = ViewerConfig::from_json(r##"{ "fov": 35.0, "background": "#87ceeb" }"##).unwrap();
//! assert_eq!(config.fov, 35.0);
//! assert_eq!(config.near, 0.1);
//! ```

use crate::error::SceneError;
use config::constants::{
    DEFAULT_BACKGROUND, DEFAULT_CAMERA_POSITION, DEFAULT_DAMPING_FACTOR, DEFAULT_FAR,
    DEFAULT_FOV_DEGREES, DEFAULT_NEAR, DEFAULT_ORBIT_TARGET,
};
use glam::DVec3;
use serde::{Deserialize, Serialize};
use yurt_csg::Color;

/// Viewer settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub camera_position: DVec3,
    /// Vertical field of view in degrees.
    pub fov: f64,
    pub near: f64,
    pub far: f64,
    #[serde(with = "hex_color")]
    pub background: Color,
    /// Share of the pending orbit motion applied per tick.
    pub damping_factor: f64,
    pub orbit_target: DVec3,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            camera_position: DVec3::from_array(DEFAULT_CAMERA_POSITION),
            fov: DEFAULT_FOV_DEGREES,
            near: DEFAULT_NEAR,
            far: DEFAULT_FAR,
            background: Color::from_u32(DEFAULT_BACKGROUND),
            damping_factor: DEFAULT_DAMPING_FACTOR,
            orbit_target: DVec3::from_array(DEFAULT_ORBIT_TARGET),
        }
    }
}

impl ViewerConfig {
    /// Parses and validates a JSON configuration.
    ///
    /// # Errors
    ///
    /// [`SceneError::InvalidConfig`] for malformed JSON or out-of-range
    /// values.
    pub fn from_json(json: &str) -> Result<Self, SceneError> {
        let config: ViewerConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, SceneError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Checks value ranges.
    pub fn validate(&self) -> Result<(), SceneError> {
        if !(self.fov > 0.0 && self.fov < 180.0) {
            return Err(SceneError::invalid_config(format!(
                "fov must be within (0, 180) degrees: {}",
                self.fov
            )));
        }
        if !(self.near > 0.0 && self.far > self.near) {
            return Err(SceneError::invalid_config(format!(
                "clip planes must satisfy 0 < near < far: near={}, far={}",
                self.near, self.far
            )));
        }
        if !(self.damping_factor > 0.0 && self.damping_factor <= 1.0) {
            return Err(SceneError::invalid_config(format!(
                "damping factor must be within (0, 1]: {}",
                self.damping_factor
            )));
        }
        if !(self.camera_position - self.orbit_target).is_finite()
            || self.camera_position == self.orbit_target
        {
            return Err(SceneError::invalid_config(
                "camera position must differ from the orbit target",
            ));
        }
        Ok(())
    }
}

/// Serializes [`Color`] as `#rrggbb`.
mod hex_color {
    use serde::{de::Error, Deserialize, Deserializer, Serializer};
    use yurt_csg::Color;

    pub fn serialize<S: Serializer>(color: &Color, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&color.to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Color, D::Error> {
        let value = String::deserialize(deserializer)?;
        Color::from_hex(&value).map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(ViewerConfig::default().validate().is_ok());
    }

    #[test]
    fn test_json_round_trip_keeps_hex() {
        let config = ViewerConfig {
            background: Color::from_u32(0x87ceeb),
            ..ViewerConfig::default()
        };
        let json = config.to_json().unwrap();
        assert!(json.contains("#87ceeb"));
        assert_eq!(ViewerConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(
            ViewerConfig::from_json("{ fov: }"),
            Err(SceneError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn test_invalid_values() {
        for json in [
            r#"{ "fov": 0.0 }"#,
            r#"{ "near": 10.0, "far": 1.0 }"#,
            r#"{ "damping_factor": 1.5 }"#,
            r#"{ "background": "skyblue" }"#,
            r#"{ "camera_position": [0.0, 0.0, 0.0] }"#,
        ] {
            assert!(
                matches!(ViewerConfig::from_json(json), Err(SceneError::InvalidConfig { .. })),
                "{json}"
            );
        }
    }
}
