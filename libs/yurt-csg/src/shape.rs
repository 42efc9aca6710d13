//! # Shapes
//!
//! Immutable primitive shapes shared by reference across composition nodes
//! and scene nodes.
//!
//! A [`Shape`] pairs its parameters with the mesh tessellated from them.
//! Shapes are created once through the factory functions and handed out as
//! `Arc<Shape>`; nothing mutates them afterwards.
//!
//! ## Example
//!
//! ```rust
//! use yurt_csg::Shape;
//!
//! let wall = Shape::cylinder(5.0, 5.0, 3.0, 32).unwrap();
//! let reused = wall.clone();
//! assert!(std::sync::Arc::ptr_eq(&wall, &reused));
//! ```

use crate::error::CsgError;
use glam::DVec3;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use yurt_mesh::primitives::{create_box, create_cone, create_cylinder, create_plane, create_sphere};
use yurt_mesh::{Mesh, MeshError};

// =============================================================================
// SHAPE KIND
// =============================================================================

/// Primitive kind with its dimensional parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ShapeKind {
    /// Frustum around the Y axis.
    Cylinder {
        radius_top: f64,
        radius_bottom: f64,
        height: f64,
        radial_segments: u32,
        /// Omit both caps.
        #[serde(default)]
        open_ended: bool,
    },
    /// Cone with its apex on +Y.
    Cone {
        radius: f64,
        height: f64,
        radial_segments: u32,
    },
    /// Axis-aligned box.
    #[serde(rename = "box")]
    Cuboid { width: f64, height: f64, depth: f64 },
    /// UV sphere with poles on the Y axis.
    Sphere {
        radius: f64,
        width_segments: u32,
        height_segments: u32,
    },
    /// Single-sided quad facing +Z.
    Plane { width: f64, height: f64 },
}

impl ShapeKind {
    /// Tessellates the primitive.
    pub fn tessellate(&self) -> Result<Mesh, MeshError> {
        match *self {
            ShapeKind::Cylinder {
                radius_top,
                radius_bottom,
                height,
                radial_segments,
                open_ended,
            } => create_cylinder(radius_top, radius_bottom, height, radial_segments, open_ended),
            ShapeKind::Cone {
                radius,
                height,
                radial_segments,
            } => create_cone(radius, height, radial_segments),
            ShapeKind::Cuboid {
                width,
                height,
                depth,
            } => create_box(DVec3::new(width, height, depth)),
            ShapeKind::Sphere {
                radius,
                width_segments,
                height_segments,
            } => create_sphere(radius, width_segments, height_segments),
            ShapeKind::Plane { width, height } => create_plane(width, height),
        }
    }

    /// Returns true if the tessellated mesh encloses a volume.
    pub fn is_solid(&self) -> bool {
        match self {
            ShapeKind::Cylinder { open_ended, .. } => !open_ended,
            ShapeKind::Plane { .. } => false,
            _ => true,
        }
    }
}

// =============================================================================
// SHAPE
// =============================================================================

/// An immutable primitive together with its tessellated mesh.
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    kind: ShapeKind,
    mesh: Arc<Mesh>,
}

impl Shape {
    /// Tessellates `kind` into a shared shape.
    ///
    /// # Errors
    ///
    /// [`CsgError::Geometry`] for non-positive or non-finite dimensions and
    /// too few segments.
    pub fn new(kind: ShapeKind) -> Result<Arc<Shape>, CsgError> {
        let mesh = kind.tessellate()?;
        Ok(Arc::new(Shape {
            kind,
            mesh: Arc::new(mesh),
        }))
    }

    /// Closed cylinder (or frustum) around the Y axis.
    pub fn cylinder(
        radius_top: f64,
        radius_bottom: f64,
        height: f64,
        radial_segments: u32,
    ) -> Result<Arc<Shape>, CsgError> {
        Self::new(ShapeKind::Cylinder {
            radius_top,
            radius_bottom,
            height,
            radial_segments,
            open_ended: false,
        })
    }

    /// Cylinder side wall without caps.
    pub fn open_cylinder(
        radius_top: f64,
        radius_bottom: f64,
        height: f64,
        radial_segments: u32,
    ) -> Result<Arc<Shape>, CsgError> {
        Self::new(ShapeKind::Cylinder {
            radius_top,
            radius_bottom,
            height,
            radial_segments,
            open_ended: true,
        })
    }

    /// Cone with its apex on +Y.
    pub fn cone(radius: f64, height: f64, radial_segments: u32) -> Result<Arc<Shape>, CsgError> {
        Self::new(ShapeKind::Cone {
            radius,
            height,
            radial_segments,
        })
    }

    /// Axis-aligned box.
    pub fn cuboid(width: f64, height: f64, depth: f64) -> Result<Arc<Shape>, CsgError> {
        Self::new(ShapeKind::Cuboid {
            width,
            height,
            depth,
        })
    }

    /// UV sphere.
    pub fn sphere(
        radius: f64,
        width_segments: u32,
        height_segments: u32,
    ) -> Result<Arc<Shape>, CsgError> {
        Self::new(ShapeKind::Sphere {
            radius,
            width_segments,
            height_segments,
        })
    }

    /// Flat quad facing +Z.
    pub fn plane(width: f64, height: f64) -> Result<Arc<Shape>, CsgError> {
        Self::new(ShapeKind::Plane { width, height })
    }

    /// Returns the primitive parameters.
    pub fn kind(&self) -> &ShapeKind {
        &self.kind
    }

    /// Returns the tessellated mesh.
    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    /// Returns a shared handle to the tessellated mesh.
    pub fn mesh_handle(&self) -> Arc<Mesh> {
        Arc::clone(&self.mesh)
    }
}
