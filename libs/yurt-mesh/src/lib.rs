//! # Yurt Mesh
//!
//! Triangle meshes, primitive tessellation and CSG booleans for the yurt
//! composition pipeline.
//!
//! ## Architecture
//!
//! ```text
//! primitives (Mesh) → ops::boolean (Mesh) → yurt-csg evaluator
//! ```
//!
//! ## Conventions
//!
//! - Y is up; every primitive is centred on the origin
//! - Angles around Y start on +Z and increase toward +X
//! - Counter-clockwise winding seen from outside
//!
//! ## Usage
//!
//! ```rust
//! use yurt_mesh::primitives::create_cylinder;
//! use yurt_mesh::{difference, Mesh};
//!
//! let outer = create_cylinder(5.0, 5.0, 3.0, 32, false).unwrap();
//! let inner = create_cylinder(4.9, 4.9, 3.0, 32, false).unwrap();
//! let walls: Mesh = difference(&outer, &inner);
//! assert!(!walls.is_empty());
//! ```

pub mod error;
pub mod mesh;
pub mod ops;
pub mod primitives;

pub use error::MeshError;
pub use mesh::Mesh;
pub use ops::boolean::{difference, intersection, union};
