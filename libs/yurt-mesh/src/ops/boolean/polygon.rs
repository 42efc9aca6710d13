//! # Polygon for BSP Operations
//!
//! Convex polygon with plane, material slot and splitting support, plus the
//! conversions between meshes and polygon soups.

use super::plane::{Classification, Plane};
use crate::Mesh;
use glam::DVec3;

// =============================================================================
// POLYGON
// =============================================================================

/// A convex polygon with associated plane.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    /// Vertices in counter-clockwise order.
    vertices: Vec<DVec3>,
    /// Plane containing this polygon.
    plane: Plane,
    /// Material slot carried through splits.
    material: u32,
}

/// Output buckets of [`Polygon::split_into`].
#[derive(Debug, Default)]
pub struct Split {
    /// Coplanar polygons facing the same direction as the plane.
    pub coplanar_front: Vec<Polygon>,
    /// Coplanar polygons facing away from the plane.
    pub coplanar_back: Vec<Polygon>,
    /// Polygons (or pieces) in front of the plane.
    pub front: Vec<Polygon>,
    /// Polygons (or pieces) behind the plane.
    pub back: Vec<Polygon>,
}

impl Polygon {
    /// Create polygon from vertices.
    ///
    /// Returns `None` if the first three vertices are collinear.
    pub fn from_vertices(vertices: Vec<DVec3>, material: u32) -> Option<Self> {
        if vertices.len() < 3 {
            return None;
        }

        let plane = Plane::from_points(vertices[0], vertices[1], vertices[2])?;
        Some(Self {
            vertices,
            plane,
            material,
        })
    }

    /// Get polygon vertices.
    pub fn vertices(&self) -> &[DVec3] {
        &self.vertices
    }

    /// Get polygon plane.
    pub fn plane(&self) -> &Plane {
        &self.plane
    }

    /// Get polygon material slot.
    pub fn material(&self) -> u32 {
        self.material
    }

    /// Flip the polygon (reverse winding order and plane).
    pub fn flip(&mut self) {
        self.vertices.reverse();
        self.plane = self.plane.flip();
    }

    /// Classify this polygon relative to a plane.
    pub fn classify(&self, plane: &Plane) -> Classification {
        let mut front_count = 0;
        let mut back_count = 0;

        for v in &self.vertices {
            match plane.classify_point(*v) {
                Classification::Front => front_count += 1,
                Classification::Back => back_count += 1,
                _ => {}
            }
        }

        match (front_count > 0, back_count > 0) {
            (true, true) => Classification::Spanning,
            (true, false) => Classification::Front,
            (false, true) => Classification::Back,
            (false, false) => Classification::Coplanar,
        }
    }

    /// Split polygon by a plane into the buckets of `out`.
    ///
    /// Pieces of a spanning polygon keep the parent's plane and material.
    pub fn split_into(self, plane: &Plane, out: &mut Split) {
        match self.classify(plane) {
            Classification::Coplanar => {
                if self.plane.normal().dot(plane.normal()) > 0.0 {
                    out.coplanar_front.push(self);
                } else {
                    out.coplanar_back.push(self);
                }
            }
            Classification::Front => out.front.push(self),
            Classification::Back => out.back.push(self),
            Classification::Spanning => {
                let count = self.vertices.len();
                let mut front_verts = Vec::with_capacity(count + 1);
                let mut back_verts = Vec::with_capacity(count + 1);

                for i in 0..count {
                    let vi = self.vertices[i];
                    let vj = self.vertices[(i + 1) % count];
                    let ti = plane.classify_point(vi);
                    let tj = plane.classify_point(vj);

                    if ti != Classification::Back {
                        front_verts.push(vi);
                    }
                    if ti != Classification::Front {
                        back_verts.push(vi);
                    }

                    // Edge crosses the plane
                    if matches!(
                        (ti, tj),
                        (Classification::Front, Classification::Back)
                            | (Classification::Back, Classification::Front)
                    ) {
                        let t = -plane.signed_distance(vi) / plane.normal().dot(vj - vi);
                        let crossing = vi.lerp(vj, t);
                        front_verts.push(crossing);
                        back_verts.push(crossing);
                    }
                }

                if front_verts.len() >= 3 {
                    out.front.push(Polygon {
                        vertices: front_verts,
                        plane: self.plane,
                        material: self.material,
                    });
                }
                if back_verts.len() >= 3 {
                    out.back.push(Polygon {
                        vertices: back_verts,
                        plane: self.plane,
                        material: self.material,
                    });
                }
            }
        }
    }
}

// =============================================================================
// CONVERSION HELPERS
// =============================================================================

/// Convert mesh to list of polygons, one per non-degenerate triangle.
pub fn mesh_to_polygons(mesh: &Mesh) -> Vec<Polygon> {
    (0..mesh.triangle_count())
        .filter_map(|index| {
            let [a, b, c] = mesh.triangle_positions(index);
            Polygon::from_vertices(vec![a, b, c], mesh.triangle_material(index))
        })
        .collect()
}

/// Convert list of polygons back to mesh using fan triangulation.
///
/// Each polygon gets its own vertices so that recomputed normals stay flat
/// across the polygon.
pub fn polygons_to_mesh(polygons: &[Polygon]) -> Mesh {
    let vertex_count: usize = polygons.iter().map(|p| p.vertices.len()).sum();
    let triangle_count = vertex_count.saturating_sub(2 * polygons.len());
    let mut mesh = Mesh::with_capacity(vertex_count, triangle_count);

    for poly in polygons {
        if poly.vertices.len() < 3 {
            continue;
        }

        let base = mesh.vertex_count() as u32;
        for v in &poly.vertices {
            mesh.add_vertex(*v);
        }

        for i in 1..(poly.vertices.len() as u32 - 1) {
            mesh.add_triangle_with_material(base, base + i, base + i + 1, poly.material);
        }
    }

    mesh
}

// =============================================================================
// TESTS
// =============================================================================
