mod common;

use common::TestHost;
use glam::DVec3;
use yurt_csg::Transform;
use yurt_scene::models::ger;
use yurt_scene::{RecordingSurface, SceneError};

/// A point inside the west wall where the door cuts through.
const DOORWAY: DVec3 = DVec3::new(-4.95, 0.0, 0.0);

/// A point inside the east wall, opposite the door.
const SOLID_WALL: DVec3 = DVec3::new(4.95, 0.0, 0.0);

#[test]
fn ger_evaluates_with_door_opening() {
    let viewer = ger::viewer().unwrap();
    let scene = viewer.scene().unwrap();
    let ger = scene.node(scene.find("ger").unwrap()).unwrap();
    let mesh = ger.mesh.as_ref().unwrap();

    assert!(!mesh.is_empty());
    assert!(mesh.normals().is_some());
    assert!(mesh.contains_point(SOLID_WALL));
    assert!(!mesh.contains_point(DOORWAY));
}

#[test]
fn ger_materials_include_wood() {
    let viewer = ger::viewer().unwrap();
    let scene = viewer.scene().unwrap();
    let ger = scene.node(scene.find("ger").unwrap()).unwrap();

    let textured: Vec<_> = ger
        .materials
        .iter()
        .filter_map(|&id| scene.material(id)?.texture.as_ref())
        .collect();
    assert_eq!(textured.len(), 1);
    assert_eq!(textured[0].source, ger::DOOR_TEXTURE);
    assert_eq!(textured[0].repeat, [2.0, 1.0]);
}

#[test]
fn dragging_door_moves_opening() {
    let mut viewer = ger::viewer().unwrap();
    let moved = ger::door_transform().with_position(DVec3::new(5.0, -0.25, 0.0));
    viewer.drag_node(ger::DOOR, moved).unwrap();

    let scene = viewer.scene().unwrap();
    let mesh = scene.node(scene.find("ger").unwrap()).unwrap().mesh.clone().unwrap();
    assert!(mesh.contains_point(DOORWAY));
    assert!(!mesh.contains_point(SOLID_WALL));
    assert_eq!(viewer.composition().unwrap().revision(), 2);
}

#[test]
fn dragging_unknown_node_fails() {
    let mut viewer = ger::viewer().unwrap();
    let err = viewer.drag_node("chimney", Transform::IDENTITY).unwrap_err();
    assert!(matches!(err, SceneError::Csg(_)));
}

#[test]
fn ger_frame_uses_ger_camera() {
    let mut viewer = ger::viewer().unwrap();
    let mut host = TestHost::default();
    let mut surface = RecordingSurface::new();
    viewer.mount(&mut host);
    viewer.resize(800, 600, &mut surface);

    assert!(viewer.tick(0.016, &mut surface));
    let frame = surface.last_frame.unwrap();
    assert!((frame.camera_position - DVec3::new(-45.0, 10.0, 15.0)).length() < 1e-9);
    assert_eq!(frame.background.to_u32(), 0x87ceeb);
    assert_eq!(frame.drawables.len(), 1);
    assert_eq!(viewer.camera().fov, 35.0);
}
