//! # Cylinder Primitive
//!
//! Generates mesh for cylinder, frustum and cone shapes.

use crate::error::{require_positive, require_segments, MeshError};
use crate::mesh::Mesh;
use config::constants::MIN_RADIAL_SEGMENTS;
use glam::DVec3;
use std::f64::consts::TAU;

/// Creates a cylinder, frustum or cone mesh.
///
/// The shape is centred on the origin with its axis along Y, matching the
/// three.js `CylinderGeometry` convention.
///
/// # Arguments
///
/// * `radius_top` - Radius at y = +height/2 (0 for an apex)
/// * `radius_bottom` - Radius at y = -height/2 (0 for an apex)
/// * `height` - Height along the Y axis
/// * `radial_segments` - Number of segments around circumference
/// * `open_ended` - If true, no caps are generated
///
/// # Example
///
/// ```rust
/// use yurt_mesh::primitives::create_cylinder;
///
/// // Regular cylinder
/// let mesh = create_cylinder(5.0, 5.0, 3.0, 32, false).unwrap();
/// assert!(mesh.is_closed());
///
/// // Cone (radius_top = 0)
/// let cone = create_cylinder(0.0, 5.0, 3.0, 32, false).unwrap();
/// assert!(cone.is_closed());
/// ```
pub fn create_cylinder(
    radius_top: f64,
    radius_bottom: f64,
    height: f64,
    radial_segments: u32,
    open_ended: bool,
) -> Result<Mesh, MeshError> {
    require_positive("Cylinder height", height)?;
    require_segments("Cylinder radial segments", radial_segments, MIN_RADIAL_SEGMENTS)?;

    if !(radius_top.is_finite() && radius_bottom.is_finite())
        || radius_top < 0.0
        || radius_bottom < 0.0
    {
        return Err(MeshError::invalid_parameters(format!(
            "Cylinder radii must be non-negative: top={radius_top}, bottom={radius_bottom}"
        )));
    }

    if radius_top == 0.0 && radius_bottom == 0.0 {
        return Err(MeshError::invalid_parameters(
            "Cylinder must have at least one non-zero radius",
        ));
    }

    let segments = radial_segments as usize;
    let half = height / 2.0;
    let mut mesh = Mesh::with_capacity(segments * 2, segments * 4);

    let bottom = ring(&mut mesh, radius_bottom, -half, segments);
    let top = ring(&mut mesh, radius_top, half, segments);

    // Side faces
    for j in 0..segments {
        let next = (j + 1) % segments;
        match (bottom.len() > 1, top.len() > 1) {
            (true, true) => {
                mesh.add_triangle(bottom[j], bottom[next], top[next]);
                mesh.add_triangle(bottom[j], top[next], top[j]);
            }
            // Cone: triangles from bottom circle to top apex
            (true, false) => mesh.add_triangle(bottom[j], bottom[next], top[0]),
            // Inverted cone: triangles from bottom apex to top circle
            (false, true) => mesh.add_triangle(bottom[0], top[next], top[j]),
            // Both apexes: rejected above
            (false, false) => {}
        }
    }

    if !open_ended {
        // Bottom cap faces -Y
        if bottom.len() > 1 {
            for j in 1..segments - 1 {
                mesh.add_triangle(bottom[0], bottom[j + 1], bottom[j]);
            }
        }
        // Top cap faces +Y
        if top.len() > 1 {
            for j in 1..segments - 1 {
                mesh.add_triangle(top[0], top[j], top[j + 1]);
            }
        }
    }

    Ok(mesh)
}

/// Creates a cone mesh with its apex at y = +height/2.
///
/// # Example
///
/// ```rust
/// use yurt_mesh::primitives::create_cone;
///
/// let roof = create_cone(5.0, 3.1, 32).unwrap();
/// let (min, max) = roof.bounding_box();
/// assert!((max.y - 1.55).abs() < 1e-12);
/// assert!((min.y + 1.55).abs() < 1e-12);
/// ```
pub fn create_cone(radius: f64, height: f64, radial_segments: u32) -> Result<Mesh, MeshError> {
    require_positive("Cone radius", radius)?;
    create_cylinder(0.0, radius, height, radial_segments, false)
}

/// Adds a ring of vertices (or a single apex when `radius` is zero).
///
/// Angle 0 lies on +Z and angles increase towards +X, as in three.js.
fn ring(mesh: &mut Mesh, radius: f64, y: f64, segments: usize) -> Vec<u32> {
    if radius == 0.0 {
        return vec![mesh.add_vertex(DVec3::new(0.0, y, 0.0))];
    }

    (0..segments)
        .map(|j| {
            let theta = TAU * j as f64 / segments as f64;
            mesh.add_vertex(DVec3::new(radius * theta.sin(), y, radius * theta.cos()))
        })
        .collect()
}
