//! # Yurt Models
//!
//! Ready-made scenes:
//!
//! - [`ger`]: a CSG-composed ger with a draggable door opening
//! - [`yurt3d`]: a yurt assembled from individual meshes with colour groups

pub mod ger;
pub mod yurt3d;

use std::sync::Arc;
use yurt_csg::Shape;
use yurt_mesh::Mesh;

/// Copy of a shape's mesh with vertex normals, for direct drawing.
fn shaded(shape: &Arc<Shape>) -> Arc<Mesh> {
    let mut mesh = shape.mesh().clone();
    mesh.compute_normals();
    Arc::new(mesh)
}
