//! # Box Primitive
//!
//! Generates mesh for rectangular boxes.

use crate::error::{require_positive, MeshError};
use crate::mesh::Mesh;
use glam::DVec3;

/// Creates a box mesh centred on the origin.
///
/// # Arguments
///
/// * `size` - Dimensions along X (width), Y (height) and Z (depth)
///
/// # Returns
///
/// A mesh with 8 vertices and 12 triangles (2 per face).
///
/// # Example
///
/// ```rust
/// use yurt_mesh::primitives::create_box;
/// use glam::DVec3;
///
/// let mesh = create_box(DVec3::new(1.1, 2.2, 0.2)).unwrap();
/// assert_eq!(mesh.vertex_count(), 8);
/// assert_eq!(mesh.triangle_count(), 12);
/// ```
pub fn create_box(size: DVec3) -> Result<Mesh, MeshError> {
    require_positive("Box width", size.x)?;
    require_positive("Box height", size.y)?;
    require_positive("Box depth", size.z)?;

    let mut mesh = Mesh::with_capacity(8, 12);

    let max = size / 2.0;
    let min = -max;

    // Bottom layer (z = min.z)
    let v0 = mesh.add_vertex(DVec3::new(min.x, min.y, min.z));
    let v1 = mesh.add_vertex(DVec3::new(max.x, min.y, min.z));
    let v2 = mesh.add_vertex(DVec3::new(max.x, max.y, min.z));
    let v3 = mesh.add_vertex(DVec3::new(min.x, max.y, min.z));

    // Top layer (z = max.z)
    let v4 = mesh.add_vertex(DVec3::new(min.x, min.y, max.z));
    let v5 = mesh.add_vertex(DVec3::new(max.x, min.y, max.z));
    let v6 = mesh.add_vertex(DVec3::new(max.x, max.y, max.z));
    let v7 = mesh.add_vertex(DVec3::new(min.x, max.y, max.z));

    // Counter-clockwise winding seen from outside

    // z = min.z
    mesh.add_triangle(v0, v2, v1);
    mesh.add_triangle(v0, v3, v2);

    // z = max.z
    mesh.add_triangle(v4, v5, v6);
    mesh.add_triangle(v4, v6, v7);

    // y = min.y
    mesh.add_triangle(v0, v1, v5);
    mesh.add_triangle(v0, v5, v4);

    // y = max.y
    mesh.add_triangle(v2, v3, v7);
    mesh.add_triangle(v2, v7, v6);

    // x = min.x
    mesh.add_triangle(v3, v0, v4);
    mesh.add_triangle(v3, v4, v7);

    // x = max.x
    mesh.add_triangle(v1, v2, v6);
    mesh.add_triangle(v1, v6, v5);

    Ok(mesh)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_box_centered() {
        let mesh = create_box(DVec3::splat(10.0)).unwrap();
        let (min, max) = mesh.bounding_box();
        assert_eq!(min, DVec3::splat(-5.0));
        assert_eq!(max, DVec3::splat(5.0));
    }

    #[test]
    fn test_box_rectangular_volume() {
        let mesh = create_box(DVec3::new(1.0, 2.0, 3.0)).unwrap();
        assert_relative_eq!(mesh.signed_volume(), 6.0, epsilon = 1e-12);
    }

    #[test]
    fn test_box_closed() {
        let mesh = create_box(DVec3::ONE).unwrap();
        assert!(mesh.is_closed());
        assert!(mesh.validate());
    }

    #[test]
    fn test_box_invalid_size() {
        assert!(create_box(DVec3::new(0.0, 10.0, 10.0)).is_err());
        assert!(create_box(DVec3::new(-5.0, 10.0, 10.0)).is_err());
        assert!(create_box(DVec3::new(1.0, f64::INFINITY, 1.0)).is_err());
    }
}
