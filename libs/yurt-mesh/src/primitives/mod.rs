//! # Primitives
//!
//! Mesh generation for primitive shapes (cylinder, cone, box, sphere, plane).
//!
//! All primitives are centred on the origin, Y is up, and closed primitives
//! are wound counter-clockwise when seen from outside.

pub mod cuboid;
pub mod cylinder;
pub mod plane;
pub mod sphere;

pub use cuboid::create_box;
pub use cylinder::{create_cone, create_cylinder};
pub use plane::create_plane;
pub use sphere::create_sphere;
