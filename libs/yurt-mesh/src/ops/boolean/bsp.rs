//! # BSP Tree
//!
//! Binary Space Partitioning tree for CSG boolean operations.
//!
//! ## Algorithm
//!
//! Each BSP node contains:
//! - A dividing plane
//! - Polygons coplanar with the plane
//! - Front subtree (polygons in front of plane)
//! - Back subtree (polygons behind plane)
//!
//! ## Stack Safety
//!
//! All operations use iterative algorithms with explicit stacks so that deep
//! trees do not overflow the limited WASM stack.

use super::plane::Plane;
use super::polygon::{Polygon, Split};

/// A node in the BSP tree.
///
/// The root of a tree built from no polygons has no plane; every other node
/// has one.
#[derive(Debug, Clone, Default)]
pub struct BspNode {
    /// Dividing plane, taken from the first polygon inserted here
    plane: Option<Plane>,
    /// Polygons coplanar with this node's plane
    polygons: Vec<Polygon>,
    /// Front subtree (polygons in front of plane)
    front: Option<Box<BspNode>>,
    /// Back subtree (polygons behind plane)
    back: Option<Box<BspNode>>,
}

impl BspNode {
    /// Creates a new BSP tree from polygons.
    pub fn new(polygons: Vec<Polygon>) -> Self {
        let mut root = Self::default();
        root.build(polygons);
        root
    }

    /// Inserts polygons into the tree, splitting them where needed.
    pub fn build(&mut self, polygons: Vec<Polygon>) {
        let mut stack: Vec<(&mut BspNode, Vec<Polygon>)> = vec![(self, polygons)];

        while let Some((node, polygons)) = stack.pop() {
            let Some(first) = polygons.first() else {
                continue;
            };
            let plane = *node.plane.get_or_insert(*first.plane());

            let mut split = Split::default();
            for poly in polygons {
                poly.split_into(&plane, &mut split);
            }

            let BspNode {
                polygons: own,
                front,
                back,
                ..
            } = node;
            own.extend(split.coplanar_front);
            own.extend(split.coplanar_back);

            if !split.front.is_empty() {
                let child = front.get_or_insert_with(Box::default);
                stack.push((&mut **child, split.front));
            }
            if !split.back.is_empty() {
                let child = back.get_or_insert_with(Box::default);
                stack.push((&mut **child, split.back));
            }
        }
    }

    /// Inverts this BSP tree (flips all polygons and swaps subtrees).
    ///
    /// Converts solid space to empty space and vice versa.
    pub fn invert(&mut self) {
        let mut stack: Vec<&mut BspNode> = vec![self];

        while let Some(node) = stack.pop() {
            let BspNode {
                plane,
                polygons,
                front,
                back,
            } = node;

            for poly in polygons.iter_mut() {
                poly.flip();
            }
            if let Some(plane) = plane {
                *plane = plane.flip();
            }
            std::mem::swap(front, back);

            if let Some(child) = front.as_deref_mut() {
                stack.push(child);
            }
            if let Some(child) = back.as_deref_mut() {
                stack.push(child);
            }
        }
    }

    /// Removes the parts of `polygons` that lie inside this tree's solid.
    pub fn clip_polygons(&self, polygons: Vec<Polygon>) -> Vec<Polygon> {
        let mut result = Vec::new();
        let mut stack: Vec<(&BspNode, Vec<Polygon>)> = vec![(self, polygons)];

        while let Some((node, polygons)) = stack.pop() {
            let Some(plane) = node.plane else {
                result.extend(polygons);
                continue;
            };

            let mut split = Split::default();
            for poly in polygons {
                poly.split_into(&plane, &mut split);
            }
            let Split {
                coplanar_front,
                coplanar_back,
                mut front,
                mut back,
            } = split;
            front.extend(coplanar_front);
            back.extend(coplanar_back);

            match node.front.as_deref() {
                Some(child) => stack.push((child, front)),
                None => result.extend(front),
            }
            // Behind a leaf is inside the solid
            if let Some(child) = node.back.as_deref() {
                stack.push((child, back));
            }
        }

        result
    }

    /// Removes all polygons in this tree that are inside `other`.
    pub fn clip_to(&mut self, other: &BspNode) {
        let mut stack: Vec<&mut BspNode> = vec![self];

        while let Some(node) = stack.pop() {
            let BspNode {
                polygons,
                front,
                back,
                ..
            } = node;

            *polygons = other.clip_polygons(std::mem::take(polygons));

            if let Some(child) = front.as_deref_mut() {
                stack.push(child);
            }
            if let Some(child) = back.as_deref_mut() {
                stack.push(child);
            }
        }
    }

    /// Collects every polygon in the tree.
    pub fn all_polygons(&self) -> Vec<Polygon> {
        let mut result = Vec::new();
        let mut stack: Vec<&BspNode> = vec![self];

        while let Some(node) = stack.pop() {
            result.extend(node.polygons.iter().cloned());
            if let Some(child) = node.back.as_deref() {
                stack.push(child);
            }
            if let Some(child) = node.front.as_deref() {
                stack.push(child);
            }
        }

        result
    }

    /// Counts the polygons in the tree.
    #[cfg(test)]
    pub fn polygon_count(&self) -> usize {
        let mut count = 0;
        let mut stack: Vec<&BspNode> = vec![self];
        while let Some(node) = stack.pop() {
            count += node.polygons.len();
            stack.extend(node.front.as_deref());
            stack.extend(node.back.as_deref());
        }
        count
    }
}

impl Drop for BspNode {
    fn drop(&mut self) {
        // Iterative drop to avoid stack overflow
        let mut stack = Vec::new();

        if let Some(front) = self.front.take() {
            stack.push(front);
        }
        if let Some(back) = self.back.take() {
            stack.push(back);
        }

        while let Some(mut node) = stack.pop() {
            if let Some(front) = node.front.take() {
                stack.push(front);
            }
            if let Some(back) = node.back.take() {
                stack.push(back);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec3;

    fn triangle_at(z: f64) -> Polygon {
        Polygon::from_vertices(
            vec![
                DVec3::new(0.0, 0.0, z),
                DVec3::new(1.0, 0.0, z),
                DVec3::new(0.5, 1.0, z),
            ],
            0,
        )
        .unwrap()
    }

    #[test]
    fn test_bsp_new_empty() {
        let bsp = BspNode::new(Vec::new());
        assert_eq!(bsp.polygon_count(), 0);
        assert!(bsp.plane.is_none());
    }

    #[test]
    fn test_bsp_new_multiple() {
        let bsp = BspNode::new(vec![triangle_at(0.0), triangle_at(1.0), triangle_at(-1.0)]);
        assert_eq!(bsp.polygon_count(), 3);
        assert_eq!(bsp.all_polygons().len(), 3);
    }

    #[test]
    fn test_bsp_build_extends_existing_tree() {
        let mut bsp = BspNode::new(vec![triangle_at(0.0)]);
        bsp.build(vec![triangle_at(2.0)]);
        assert_eq!(bsp.polygon_count(), 2);
    }

    #[test]
    fn test_bsp_invert_flips_polygons() {
        let mut bsp = BspNode::new(vec![triangle_at(0.0)]);
        bsp.invert();
        let polys = bsp.all_polygons();
        assert!((polys[0].plane().normal() + DVec3::Z).length() < 1e-12);
    }

    #[test]
    fn test_bsp_clip_polygons_front_survives() {
        // Single plane facing +Z: everything behind it counts as inside
        let bsp = BspNode::new(vec![triangle_at(0.0)]);
        let clipped = bsp.clip_polygons(vec![triangle_at(1.0)]);
        assert_eq!(clipped.len(), 1);
    }

    #[test]
    fn test_bsp_clip_polygons_back_removed() {
        let bsp = BspNode::new(vec![triangle_at(0.0)]);
        let clipped = bsp.clip_polygons(vec![triangle_at(-1.0)]);
        assert!(clipped.is_empty());
    }

    #[test]
    fn test_bsp_clip_with_empty_tree_keeps_all() {
        let bsp = BspNode::new(Vec::new());
        let clipped = bsp.clip_polygons(vec![triangle_at(-1.0), triangle_at(1.0)]);
        assert_eq!(clipped.len(), 2);
    }
}
