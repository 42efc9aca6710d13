//! # Sphere Primitive
//!
//! Generates mesh for sphere shapes using latitude/longitude tessellation.

use crate::error::{require_positive, require_segments, MeshError};
use crate::mesh::Mesh;
use config::constants::{MIN_RADIAL_SEGMENTS, MIN_SPHERE_HEIGHT_SEGMENTS};
use glam::DVec3;
use std::f64::consts::{PI, TAU};

/// Creates a UV sphere centred on the origin with poles on the Y axis.
///
/// # Arguments
///
/// * `radius` - The radius of the sphere
/// * `width_segments` - Segments around the equator
/// * `height_segments` - Segments from pole to pole
///
/// # Algorithm
///
/// - One vertex per pole
/// - `height_segments - 1` rings of `width_segments` vertices
/// - Triangle fans at the poles, quads between rings
///
/// # Example
///
/// ```rust
/// use yurt_mesh::primitives::create_sphere;
///
/// let mesh = create_sphere(0.05, 6, 6).unwrap();
/// assert_eq!(mesh.vertex_count(), 2 + 5 * 6);
/// assert!(mesh.is_closed());
/// ```
pub fn create_sphere(
    radius: f64,
    width_segments: u32,
    height_segments: u32,
) -> Result<Mesh, MeshError> {
    require_positive("Sphere radius", radius)?;
    require_segments("Sphere width segments", width_segments, MIN_RADIAL_SEGMENTS)?;
    require_segments(
        "Sphere height segments",
        height_segments,
        MIN_SPHERE_HEIGHT_SEGMENTS,
    )?;

    let width = width_segments as usize;
    let rings_count = height_segments as usize - 1;
    let mut mesh = Mesh::with_capacity(2 + rings_count * width, 2 * width * rings_count);

    let north = mesh.add_vertex(DVec3::new(0.0, radius, 0.0));

    let rings: Vec<Vec<u32>> = (1..height_segments)
        .map(|i| {
            // Polar angle measured from +Y
            let phi = PI * i as f64 / height_segments as f64;
            let ring_radius = radius * phi.sin();
            let y = radius * phi.cos();
            (0..width)
                .map(|j| {
                    let theta = TAU * j as f64 / width as f64;
                    mesh.add_vertex(DVec3::new(
                        ring_radius * theta.sin(),
                        y,
                        ring_radius * theta.cos(),
                    ))
                })
                .collect()
        })
        .collect();

    let south = mesh.add_vertex(DVec3::new(0.0, -radius, 0.0));

    // North cap
    let first = &rings[0];
    for j in 0..width {
        let next = (j + 1) % width;
        mesh.add_triangle(first[j], first[next], north);
    }

    // Bands between rings (upper ring above lower ring)
    for pair in rings.windows(2) {
        let (upper, lower) = (&pair[0], &pair[1]);
        for j in 0..width {
            let next = (j + 1) % width;
            mesh.add_triangle(lower[j], lower[next], upper[next]);
            mesh.add_triangle(lower[j], upper[next], upper[j]);
        }
    }

    // South cap
    let last = &rings[rings.len() - 1];
    for j in 0..width {
        let next = (j + 1) % width;
        mesh.add_triangle(south, last[next], last[j]);
    }

    Ok(mesh)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sphere_closed_outward() {
        let mesh = create_sphere(1.0, 16, 8).unwrap();
        assert!(mesh.is_closed());
        assert!(mesh.signed_volume() > 0.0);
        assert!(mesh.validate());
    }

    #[test]
    fn test_sphere_volume_approaches_analytic() {
        let mesh = create_sphere(2.0, 64, 32).unwrap();
        let analytic = 4.0 / 3.0 * PI * 8.0;
        assert!((mesh.signed_volume() - analytic).abs() / analytic < 0.02);
    }

    #[test]
    fn test_sphere_minimal_resolution() {
        let mesh = create_sphere(1.0, 3, 2).unwrap();
        assert_eq!(mesh.vertex_count(), 5);
        assert_eq!(mesh.triangle_count(), 6);
        assert!(mesh.is_closed());
    }

    #[test]
    fn test_sphere_invalid_parameters() {
        assert!(create_sphere(0.0, 8, 8).is_err());
        assert!(create_sphere(1.0, 2, 8).is_err());
        assert!(create_sphere(1.0, 8, 1).is_err());
    }
}
