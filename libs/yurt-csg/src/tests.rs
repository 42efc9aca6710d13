//! # Composition Tests
//!
//! Tree-level behaviour: operation order, recompute, named edits and the
//! floor / walls / door scenario.

use super::*;
use approx::assert_relative_eq;
use glam::DVec3;
use std::f64::consts::FRAC_PI_2;

fn cube(size: f64) -> std::sync::Arc<Shape> {
    Shape::cuboid(size, size, size).unwrap()
}

fn at(x: f64, y: f64, z: f64) -> Transform {
    Transform::from_position(x, y, z)
}

// =============================================================================
// ORDER SENSITIVITY
// =============================================================================

#[test]
fn test_subtraction_then_addition_differs_from_reverse() {
    let a = CompositionNode::base(cube(4.0));
    let b = CompositionNode::subtraction(cube(2.0)).with_transform(at(1.0, 0.0, 0.0));
    let c = CompositionNode::addition(cube(0.8)).with_transform(at(1.2, 0.0, 0.0));

    let sub_then_add = CompositionNode::group().with_children([a.clone(), b.clone(), c.clone()]);
    let add_then_sub = CompositionNode::group().with_children([a, c, b]);

    let first = evaluate(&sub_then_add, &Material::default()).unwrap();
    let second = evaluate(&add_then_sub, &Material::default()).unwrap();

    let probe = DVec3::new(1.2, 0.1, 0.1);
    assert!(first.mesh.contains_point(probe));
    assert!(!second.mesh.contains_point(probe));
    assert_ne!(first.mesh, second.mesh);
}

#[test]
fn test_own_shape_is_running_volume_before_children() {
    // The node's own shape is unioned first, so its subtraction child cuts it
    let node = CompositionNode::addition(cube(2.0))
        .with_child(CompositionNode::subtraction(cube(1.0)));

    let out = evaluate(&node, &Material::default()).unwrap();
    assert_relative_eq!(out.mesh.signed_volume(), 7.0, epsilon = 1e-6);
}

// =============================================================================
// RECOMPUTE
// =============================================================================

#[test]
fn test_reevaluation_is_idempotent() {
    let mut tree = CompositionTree::new(
        CompositionNode::base(Shape::cylinder(1.0, 1.0, 2.0, 24).unwrap())
            .named("root")
            .with_child(CompositionNode::subtraction(cube(1.0)).named("cut").with_transform(
                Transform::from_position(0.8, 0.0, 0.0).with_rotation(DVec3::new(0.3, 0.2, 0.1)),
            )),
    );

    let first = tree.update().unwrap().clone();
    tree.find_mut("cut").unwrap();
    assert!(tree.is_dirty());
    let second = tree.update().unwrap().clone();

    assert_eq!(first, second);
    assert_eq!(tree.revision(), 2);
}

#[test]
fn test_update_reuses_clean_output() {
    let mut tree = CompositionTree::new(CompositionNode::base(cube(1.0)));
    tree.update().unwrap();
    tree.update().unwrap();
    assert_eq!(tree.revision(), 1);
    assert!(!tree.is_dirty());
}

#[test]
fn test_set_transform_triggers_recompute() {
    let mut tree = CompositionTree::new(
        CompositionNode::base(cube(2.0))
            .with_child(CompositionNode::subtraction(cube(1.0)).named("hole")),
    );
    let before = tree.update().unwrap().mesh.signed_volume();

    tree.set_transform("hole", at(10.0, 0.0, 0.0)).unwrap();
    assert!(tree.is_dirty());
    let after = tree.update().unwrap().mesh.signed_volume();

    assert_relative_eq!(before, 7.0, epsilon = 1e-6);
    assert_relative_eq!(after, 8.0, epsilon = 1e-6);
}

#[test]
fn test_set_transform_unknown_name() {
    let mut tree = CompositionTree::new(CompositionNode::base(cube(1.0)));
    assert_eq!(
        tree.set_transform("door", Transform::IDENTITY),
        Err(CsgError::unresolved("door"))
    );
}

#[test]
fn test_unchanged_transform_keeps_cache() {
    let mut tree =
        CompositionTree::new(CompositionNode::base(cube(1.0)).named("box"));
    tree.update().unwrap();
    tree.set_transform("box", Transform::IDENTITY).unwrap();
    assert!(!tree.is_dirty());
}

#[test]
fn test_tree_name_defaults() {
    assert_eq!(CompositionTree::new(CompositionNode::base(cube(1.0))).name(), "composition");
}

// =============================================================================
// EDGE CASES
// =============================================================================

#[test]
fn test_missing_base_geometry_from_tree() {
    let mut tree = CompositionTree::new(CompositionNode::new(Operation::Base).named("ger"));
    assert_eq!(tree.update().map(|_| ()), Err(CsgError::missing_base(Some("ger"))));
    assert!(tree.output().is_none());
}

#[test]
fn test_failed_update_keeps_last_output() {
    let mut tree = CompositionTree::new(
        CompositionNode::base(cube(2.0))
            .with_child(CompositionNode::base(cube(1.0)).named("core")),
    );
    let good = tree.update().unwrap().clone();

    let core = tree.find_mut("core").unwrap();
    core.shape = None;
    assert_eq!(tree.update().map(|_| ()), Err(CsgError::missing_base(Some("core"))));

    assert_eq!(tree.output(), Some(&good));
    assert!(tree.is_dirty());
    assert_eq!(tree.revision(), 1);
}

#[test]
fn test_non_intersecting_subtraction_is_invisible() {
    let node = CompositionNode::base(cube(1.0))
        .with_child(CompositionNode::subtraction(cube(1.0)).with_transform(at(5.0, 0.0, 0.0)));

    let out = evaluate(&node, &Material::default()).unwrap();
    assert_relative_eq!(out.mesh.signed_volume(), 1.0, epsilon = 1e-9);
}

// =============================================================================
// FLOOR / WALLS / DOOR SCENARIO
// =============================================================================

fn walled_floor() -> CompositionNode {
    let floor = CompositionNode::base(Shape::cylinder(5.0, 5.0, 0.1, 32).unwrap())
        .named("floor")
        .with_transform(at(0.0, -1.35, 0.0));

    let walls = CompositionNode::addition(Shape::cylinder(5.0, 5.0, 3.0, 32).unwrap())
        .named("walls")
        .with_transform(at(0.0, 0.2, 0.0))
        .with_child(CompositionNode::subtraction(
            Shape::cylinder(4.9, 4.9, 3.0, 32).unwrap(),
        ));

    let opening = CompositionNode::subtraction(Shape::cylinder(1.0, 1.0, 0.6, 32).unwrap())
        .named("door")
        .with_transform(
            at(-5.0, 0.2, 0.0)
                .with_rotation(DVec3::new(0.0, 0.0, FRAC_PI_2))
                .with_scale(DVec3::new(1.0, 1.0, 1.2)),
        )
        .with_material(Material::from_hex(0x663300));

    CompositionNode::group().named("ger").with_children([floor, walls, opening])
}

#[test]
fn test_floor_walls_and_door_opening() {
    let mut tree = CompositionTree::new(walled_floor());
    let out = tree.update().unwrap();
    let mesh = &out.mesh;

    // Hollow wall
    assert!(mesh.contains_point(DVec3::new(4.95, 0.2, 0.0)));
    assert!(mesh.contains_point(DVec3::new(0.0, 0.2, -4.95)));
    assert!(!mesh.contains_point(DVec3::new(0.0, 0.2, 0.0)));

    // Solid floor disc
    assert!(mesh.contains_point(DVec3::new(2.0, -1.35, 0.0)));

    // Opening only where the door volume meets the wall
    assert!(!mesh.contains_point(DVec3::new(-4.95, 0.2, 0.0)));
    assert!(mesh.contains_point(DVec3::new(-4.95, 1.5, 0.0)));
}

#[test]
fn test_door_material_lines_the_opening() {
    let out = evaluate(&walled_floor(), &Material::default()).unwrap();

    assert_eq!(out.materials.len(), 2);
    let door_triangles = (0..out.mesh.triangle_count())
        .filter(|&i| out.mesh.triangle_material(i) == 1)
        .count();
    assert!(door_triangles > 0);
}

#[test]
fn test_moving_door_away_closes_opening() {
    let mut tree = CompositionTree::new(walled_floor());
    tree.set_transform("door", at(0.0, 0.2, 0.0)).unwrap();
    let mesh = &tree.update().unwrap().mesh;

    assert!(mesh.contains_point(DVec3::new(-4.95, 0.2, 0.0)));
}
