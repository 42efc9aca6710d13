//! # Materials
//!
//! Surface appearance shared by composition and scene nodes.
//!
//! Colours are RGB triples in `0..=1`, parsed from the hex strings a colour
//! input produces or from `0xRRGGBB` literals.

use crate::error::CsgError;
use config::constants::{DEFAULT_METALNESS, DEFAULT_ROUGHNESS, DEFAULT_SURFACE_COLOR};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// =============================================================================
// COLOR
// =============================================================================

/// RGB colour with components in `0..=1`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Colour from a `0xRRGGBB` integer; bits above 24 are ignored.
    pub fn from_u32(hex: u32) -> Self {
        let channel = |shift: u32| ((hex >> shift) & 0xff) as f32 / 255.0;
        Self::rgb(channel(16), channel(8), channel(0))
    }

    /// Parses `#rrggbb` or `#rgb`.
    ///
    /// # Errors
    ///
    /// [`CsgError::InvalidColor`] for anything else.
    pub fn from_hex(value: &str) -> Result<Self, CsgError> {
        let Some(digits) = value.trim().strip_prefix('#') else {
            return Err(CsgError::invalid_color(value));
        };
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(CsgError::invalid_color(value));
        }

        let hex = match digits.len() {
            6 => u32::from_str_radix(digits, 16).map_err(|_| CsgError::invalid_color(value))?,
            3 => digits
                .chars()
                .filter_map(|c| c.to_digit(16))
                .fold(0, |acc, d| (acc << 8) | (d * 0x11)),
            _ => return Err(CsgError::invalid_color(value)),
        };

        Ok(Self::from_u32(hex))
    }

    /// Packs the colour back into `0xRRGGBB`.
    pub fn to_u32(&self) -> u32 {
        let channel = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u32;
        (channel(self.r) << 16) | (channel(self.g) << 8) | channel(self.b)
    }

    pub fn to_array(&self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::from_u32(DEFAULT_SURFACE_COLOR)
    }
}

impl FromStr for Color {
    type Err = CsgError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:06x}", self.to_u32())
    }
}

// =============================================================================
// TEXTURE
// =============================================================================

/// Texture coordinate wrap mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Wrap {
    #[default]
    ClampToEdge,
    Repeat,
    MirroredRepeat,
}

/// Image texture reference. Pixel decoding is left to the renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Texture {
    /// Path or URL of the image.
    pub source: String,
    pub wrap_s: Wrap,
    pub wrap_t: Wrap,
    /// UV repeat counts.
    pub repeat: [f64; 2],
}

impl Texture {
    /// Texture tiled `u` by `v` times with repeat wrapping on both axes.
    pub fn repeating(source: impl Into<String>, u: f64, v: f64) -> Self {
        Self {
            source: source.into(),
            wrap_s: Wrap::Repeat,
            wrap_t: Wrap::Repeat,
            repeat: [u, v],
        }
    }
}

// =============================================================================
// MATERIAL
// =============================================================================

/// Physically based surface description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Material {
    pub color: Color,
    pub roughness: f64,
    pub metalness: f64,
    pub opacity: f64,
    pub transparent: bool,
    pub double_sided: bool,
    pub texture: Option<Texture>,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            color: Color::default(),
            roughness: DEFAULT_ROUGHNESS,
            metalness: DEFAULT_METALNESS,
            opacity: 1.0,
            transparent: false,
            double_sided: false,
            texture: None,
        }
    }
}

impl Material {
    pub fn new(color: Color) -> Self {
        Self {
            color,
            ..Self::default()
        }
    }

    /// Material with a `0xRRGGBB` colour.
    pub fn from_hex(hex: u32) -> Self {
        Self::new(Color::from_u32(hex))
    }

    pub fn with_roughness(mut self, roughness: f64) -> Self {
        self.roughness = roughness;
        self
    }

    pub fn with_metalness(mut self, metalness: f64) -> Self {
        self.metalness = metalness;
        self
    }

    /// Sets opacity; anything below 1 turns on blending.
    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity.clamp(0.0, 1.0);
        self.transparent = self.opacity < 1.0;
        self
    }

    pub fn double_sided(mut self) -> Self {
        self.double_sided = true;
        self
    }

    pub fn with_texture(mut self, texture: Texture) -> Self {
        self.texture = Some(texture);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_from_hex() {
        let color = Color::from_hex("#cc9933").unwrap();
        assert_eq!(color.to_u32(), 0xcc9933);
        assert_eq!(color.to_string(), "#cc9933");
    }

    #[test]
    fn test_color_short_hex() {
        assert_eq!(Color::from_hex("#fff").unwrap(), Color::WHITE);
        assert_eq!(Color::from_hex("#abc").unwrap().to_u32(), 0xaabbcc);
    }

    #[test]
    fn test_color_invalid_hex() {
        for value in [
            "", "#", "#12", "#12345", "#gggggg", "#+12345", "red", "#1234567", "abc", "cc9933",
            "##fff",
        ] {
            assert_eq!(
                Color::from_hex(value),
                Err(CsgError::invalid_color(value)),
                "{value}"
            );
        }
    }

    #[test]
    fn test_opacity_enables_transparency() {
        let roof = Material::from_hex(0xcc9933).with_opacity(0.8);
        assert!(roof.transparent);
        assert!(!Material::default().with_opacity(1.0).transparent);
    }

    #[test]
    fn test_texture_repeat() {
        let wood = Texture::repeating("/door-texture.jpeg", 2.0, 1.0);
        assert_eq!(wood.wrap_s, Wrap::Repeat);
        assert_eq!(wood.repeat, [2.0, 1.0]);
    }
}
