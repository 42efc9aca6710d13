//! # Configuration Constants
//!
//! Centralized constants for the yurt scene pipeline. Geometry tolerances,
//! tessellation defaults, camera and lighting defaults, and the fixed set of
//! named parts and colour pickers exposed by the control panel.
//!
//! ## Categories
//!
//! - **Precision**: Floating-point comparison tolerances
//! - **Resolution**: Default tessellation parameters
//! - **Camera**: Perspective camera and orbit control defaults
//! - **Lighting**: Ambient and directional light defaults
//! - **Controls**: Part names and colour pickers

// =============================================================================
// PRECISION CONSTANTS
// =============================================================================

/// Triangles with a doubled area below this are degenerate.
///
/// # Example
///
/// ```rust
/// use config::constants::{DEGENERATE_AREA_EPSILON, PLANE_EPSILON};
/// assert!(DEGENERATE_AREA_EPSILON < PLANE_EPSILON);
/// ```
pub const DEGENERATE_AREA_EPSILON: f64 = 1e-8;

/// Thickness of a BSP splitting plane.
///
/// Points closer to a plane than this are treated as lying on it. Matches
/// the tolerance used by csg.js, which the boolean operations follow.
pub const PLANE_EPSILON: f64 = 1e-5;

// =============================================================================
// RESOLUTION CONSTANTS
// =============================================================================

/// Default radial segment count for cylinders and cones.
///
/// three.js `CylinderGeometry` and `ConeGeometry` default to 32.
///
/// # Example
///
/// ```rust
/// use config::constants::{DEFAULT_RADIAL_SEGMENTS, MIN_RADIAL_SEGMENTS};
/// assert!(DEFAULT_RADIAL_SEGMENTS >= MIN_RADIAL_SEGMENTS);
/// ```
pub const DEFAULT_RADIAL_SEGMENTS: u32 = 32;

/// Minimum radial segment count; fewer cannot enclose a volume.
pub const MIN_RADIAL_SEGMENTS: u32 = 3;

/// Minimum vertical segment count for spheres (two poles, one ring).
pub const MIN_SPHERE_HEIGHT_SEGMENTS: u32 = 2;

// =============================================================================
// LIMIT CONSTANTS
// =============================================================================

/// Maximum number of nodes a composition tree is expected to hold.
///
/// Trees are re-evaluated in full on every interactive change; larger trees
/// still evaluate but a warning is logged.
pub const MAX_INTERACTIVE_NODES: usize = 15;

/// Maximum size of an asset file accepted by the loader (in bytes).
pub const MAX_ASSET_SIZE: usize = 64 * 1024 * 1024;

// =============================================================================
// MATERIAL CONSTANTS
// =============================================================================

/// Default surface colour (white), `0xRRGGBB`.
pub const DEFAULT_SURFACE_COLOR: u32 = 0xffffff;

/// Default surface roughness.
pub const DEFAULT_ROUGHNESS: f64 = 0.5;

/// Default surface metalness.
pub const DEFAULT_METALNESS: f64 = 0.1;

/// Sky blue background used by the CSG ger scene.
pub const SKY_BLUE: u32 = 0x87ceeb;

/// Default background colour (black, as an unconfigured WebGL canvas).
pub const DEFAULT_BACKGROUND: u32 = 0x000000;

// =============================================================================
// CAMERA CONSTANTS
// =============================================================================

/// Default vertical field of view, in degrees.
pub const DEFAULT_FOV_DEGREES: f64 = 75.0;

/// Default near clipping plane.
pub const DEFAULT_NEAR: f64 = 0.1;

/// Default far clipping plane.
pub const DEFAULT_FAR: f64 = 1000.0;

/// Default camera position.
pub const DEFAULT_CAMERA_POSITION: [f64; 3] = [0.0, 5.0, 15.0];

/// Default orbit target.
pub const DEFAULT_ORBIT_TARGET: [f64; 3] = [0.0, 0.0, 0.0];

/// Fraction of the pending orbit motion applied per frame.
///
/// three.js `OrbitControls.dampingFactor` default.
///
/// # Example
///
/// ```rust
/// use config::constants::DEFAULT_DAMPING_FACTOR;
/// assert!(DEFAULT_DAMPING_FACTOR > 0.0 && DEFAULT_DAMPING_FACTOR <= 1.0);
/// ```
pub const DEFAULT_DAMPING_FACTOR: f64 = 0.05;

/// Smallest polar angle the orbit camera may reach (radians).
pub const MIN_POLAR_ANGLE: f64 = 1e-4;

/// Largest polar angle the orbit camera may reach (radians).
pub const MAX_POLAR_ANGLE: f64 = std::f64::consts::PI - 1e-4;

/// Closest the orbit camera may get to its target.
pub const MIN_ORBIT_DISTANCE: f64 = 0.5;

/// Farthest the orbit camera may get from its target.
pub const MAX_ORBIT_DISTANCE: f64 = 500.0;

/// Pending orbit motion below this magnitude is dropped.
pub const ORBIT_REST_EPSILON: f64 = 1e-6;

// =============================================================================
// LIGHTING CONSTANTS
// =============================================================================

/// Ambient light intensity.
pub const AMBIENT_INTENSITY: f64 = 0.5;

/// Directional light intensity.
pub const DIRECTIONAL_INTENSITY: f64 = 0.8;

/// Directional light position.
pub const DIRECTIONAL_POSITION: [f64; 3] = [10.0, 20.0, 15.0];

// =============================================================================
// CONTROL PANEL CONSTANTS
// =============================================================================

/// Named sub-parts exposed as visibility toggles.
pub const PART_NAMES: [&str; 8] = [
    "floor", "walls", "lattice", "roof", "crown", "poles", "door", "windows",
];

/// Colour pickers: (input id, material group, default colour).
///
/// # Example
///
/// ```rust
/// use config::constants::COLOR_PICKERS;
///
/// let (id, group, _) = COLOR_PICKERS[0];
/// assert_eq!(id, "wallColor");
/// assert_eq!(group, "wall");
/// ```
pub const COLOR_PICKERS: [(&str, &str, u32); 4] = [
    ("wallColor", "wall", 0xffffff),
    ("roofColor", "roof", 0xcc9933),
    ("doorColor", "door", 0x663300),
    ("windowColor", "window", 0x99ccff),
];
