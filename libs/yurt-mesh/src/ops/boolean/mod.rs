//! # Boolean Operations (CSG)
//!
//! Constructive Solid Geometry operations using BSP trees.
//!
//! ## Algorithm
//!
//! Based on the csg.js algorithm by Evan Wallace:
//! - Union: A.clipTo(B); B.clipTo(A); B.invert(); B.clipTo(A); B.invert(); combine
//! - Difference: A.invert(); A.clipTo(B); B.clipTo(A); B.invert(); B.clipTo(A); B.invert(); combine; result.invert()
//! - Intersection: A.invert(); B.clipTo(A); B.invert(); A.clipTo(B); B.clipTo(A); combine; result.invert()
//!
//! Triangle material slots survive the operations: every output triangle
//! keeps the slot of the input face it was cut from.
//!
//! Results are polygon soups triangulated per polygon; call
//! [`Mesh::compute_normals`] before rendering.
//!
//! ## Example
//!
//! ```rust
//! use yurt_mesh::ops::boolean::difference;
//! use yurt_mesh::primitives::create_box;
//! use glam::DVec3;
//!
//! let a = create_box(DVec3::splat(4.0)).unwrap();
//! let b = create_box(DVec3::splat(2.0)).unwrap();
//! let hollow = difference(&a, &b);
//! assert!((hollow.signed_volume() - 56.0).abs() < 1e-6);
//! ```

mod bsp;
mod plane;
mod polygon;


use crate::Mesh;
use bsp::BspNode;
use polygon::{mesh_to_polygons, polygons_to_mesh, Polygon};

// =============================================================================
// PUBLIC API
// =============================================================================

/// Compute union of two meshes.
///
/// Returns a mesh enclosing every point inside either input.
pub fn union(a: &Mesh, b: &Mesh) -> Mesh {
    let polys_a = mesh_to_polygons(a);
    let polys_b = mesh_to_polygons(b);

    if polys_a.is_empty() {
        return b.clone();
    }
    if polys_b.is_empty() {
        return a.clone();
    }

    let mut bsp_a = BspNode::new(polys_a);
    let mut bsp_b = BspNode::new(polys_b);

    bsp_a.clip_to(&bsp_b);
    bsp_b.clip_to(&bsp_a);
    // Drop coplanar faces of B that A already covers
    bsp_b.invert();
    bsp_b.clip_to(&bsp_a);
    bsp_b.invert();

    let mut result = bsp_a.all_polygons();
    result.extend(bsp_b.all_polygons());

    polygons_to_mesh(&result)
}

/// Compute difference of two meshes (A - B).
///
/// An empty `b` leaves `a` unchanged; an empty `a` yields an empty mesh.
pub fn difference(a: &Mesh, b: &Mesh) -> Mesh {
    let polys_a = mesh_to_polygons(a);
    let polys_b = mesh_to_polygons(b);

    if polys_a.is_empty() {
        return Mesh::new();
    }
    if polys_b.is_empty() {
        return a.clone();
    }

    let mut bsp_a = BspNode::new(polys_a);
    let mut bsp_b = BspNode::new(polys_b);

    bsp_a.invert();
    bsp_a.clip_to(&bsp_b);
    bsp_b.clip_to(&bsp_a);
    bsp_b.invert();
    bsp_b.clip_to(&bsp_a);
    bsp_b.invert();

    let mut result = bsp_a.all_polygons();
    result.extend(bsp_b.all_polygons());
    flip_all(&mut result);

    polygons_to_mesh(&result)
}

/// Compute intersection of two meshes.
///
/// Returns the region inside both inputs; empty if either input is empty.
pub fn intersection(a: &Mesh, b: &Mesh) -> Mesh {
    let polys_a = mesh_to_polygons(a);
    let polys_b = mesh_to_polygons(b);

    if polys_a.is_empty() || polys_b.is_empty() {
        return Mesh::new();
    }

    let mut bsp_a = BspNode::new(polys_a);
    let mut bsp_b = BspNode::new(polys_b);

    bsp_a.invert();
    bsp_b.clip_to(&bsp_a);
    bsp_b.invert();
    bsp_a.clip_to(&bsp_b);
    bsp_b.clip_to(&bsp_a);

    let mut result = bsp_a.all_polygons();
    result.extend(bsp_b.all_polygons());
    flip_all(&mut result);

    polygons_to_mesh(&result)
}

fn flip_all(polygons: &mut [Polygon]) {
    for poly in polygons {
        poly.flip();
    }
}
