//! # Plane Primitive
//!
//! A flat rectangle in the XY plane, facing +Z.

use crate::error::{require_positive, MeshError};
use crate::mesh::Mesh;
use glam::DVec3;

/// Creates a single-sided rectangle centred on the origin.
///
/// Planes do not enclose a volume; they are meant for decals such as
/// windows and are rendered double-sided by their material.
///
/// # Example
///
/// ```rust
/// use yurt_mesh::primitives::create_plane;
///
/// let window = create_plane(0.6, 0.6).unwrap();
/// assert_eq!(window.triangle_count(), 2);
/// ```
pub fn create_plane(width: f64, height: f64) -> Result<Mesh, MeshError> {
    require_positive("Plane width", width)?;
    require_positive("Plane height", height)?;

    let (hw, hh) = (width / 2.0, height / 2.0);
    let mut mesh = Mesh::with_capacity(4, 2);
    let a = mesh.add_vertex(DVec3::new(-hw, -hh, 0.0));
    let b = mesh.add_vertex(DVec3::new(hw, -hh, 0.0));
    let c = mesh.add_vertex(DVec3::new(hw, hh, 0.0));
    let d = mesh.add_vertex(DVec3::new(-hw, hh, 0.0));
    mesh.add_triangle(a, b, c);
    mesh.add_triangle(a, c, d);

    Ok(mesh)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plane_faces_positive_z() {
        let mesh = create_plane(2.0, 1.0).unwrap();
        for i in 0..mesh.triangle_count() {
            assert!((mesh.face_normal(i) - DVec3::Z).length() < 1e-12);
        }
    }

    #[test]
    fn test_plane_invalid() {
        assert!(create_plane(0.0, 1.0).is_err());
    }
}
