mod common;

use common::TestHost;
use glam::DVec3;
use yurt_scene::{models, HostEvent, RecordingSurface, Viewer};

fn mounted_yurt() -> (Viewer, TestHost, RecordingSurface) {
    let mut viewer = models::yurt3d::viewer().unwrap();
    let mut host = TestHost::default();
    viewer.mount(&mut host);
    (viewer, host, RecordingSurface::new())
}

#[test]
fn mount_subscribes_to_frames_and_resize() {
    let (mut viewer, mut host, _) = mounted_yurt();
    let events: Vec<_> = host.live.iter().map(|s| s.event).collect();
    assert_eq!(events, [HostEvent::AnimationFrame, HostEvent::Resize]);

    viewer.mount(&mut host);
    assert_eq!(host.live.len(), 2);

    viewer.unmount(&mut host);
    assert!(host.live.is_empty());
}

#[test]
fn resize_sets_exact_aspect() {
    let (mut viewer, _host, mut surface) = mounted_yurt();

    assert!(viewer.resize(1920, 1080, &mut surface));
    assert_eq!(viewer.camera().aspect, 1920.0 / 1080.0);
    assert_eq!(surface.viewport, Some((1920, 1080)));

    assert!(!viewer.resize(1920, 0, &mut surface));
    assert!(!viewer.resize(0, 1080, &mut surface));
    assert_eq!(viewer.camera().aspect, 1920.0 / 1080.0);
    assert_eq!(surface.viewport, Some((1920, 1080)));
}

#[test]
fn nothing_drawn_after_unmount() {
    let (mut viewer, mut host, mut surface) = mounted_yurt();
    assert!(viewer.tick(0.016, &mut surface));

    viewer.unmount(&mut host);
    assert!(!viewer.tick(0.016, &mut surface));
    assert!(!viewer.resize(640, 480, &mut surface));
    assert_eq!(surface.frames_drawn, 1);
    assert_eq!(surface.viewport, None);
}

#[test]
fn toggle_hides_only_that_part() {
    let (mut viewer, _host, mut surface) = mounted_yurt();
    viewer.tick(0.016, &mut surface);
    let before = surface.last_frame.clone().unwrap().drawables.len();

    viewer.panel_mut().toggle("poles");
    viewer.tick(0.016, &mut surface);
    let frame = surface.last_frame.clone().unwrap();
    assert_eq!(frame.drawables.len(), before - 60);

    let scene = viewer.scene().unwrap();
    for part in ["floor", "walls", "lattice", "roof", "crown", "door", "windows"] {
        assert!(scene.is_rendered(scene.find(part).unwrap()), "{part}");
    }
}

#[test]
fn unknown_toggle_changes_nothing() {
    let (mut viewer, _host, mut surface) = mounted_yurt();
    viewer.tick(0.016, &mut surface);
    let before = surface.last_frame.clone().unwrap();

    viewer.panel_mut().toggle("chimney");
    viewer.tick(0.016, &mut surface);
    let after = surface.last_frame.clone().unwrap();
    assert_eq!(before.drawables, after.drawables);
}

#[test]
fn colour_reaches_every_member_of_group() {
    let (mut viewer, _host, mut surface) = mounted_yurt();
    viewer.panel_mut().set_color("windowColor", "#ff0000").unwrap();
    viewer.tick(0.016, &mut surface);

    let scene = viewer.scene().unwrap();
    let members = scene.group("window");
    assert_eq!(members.len(), 2);
    for &id in members {
        assert_eq!(scene.material(id).unwrap().color.to_u32(), 0xff0000);
    }

    let frame = surface.last_frame.unwrap();
    let red = frame
        .drawables
        .iter()
        .filter(|d| d.materials[0].color.to_u32() == 0xff0000)
        .count();
    assert_eq!(red, 5);
}

#[test]
fn invalid_colour_is_rejected() {
    let (mut viewer, _host, _) = mounted_yurt();
    assert!(viewer.panel_mut().set_color("roofColor", "orange").is_err());
    assert_eq!(
        viewer.panel().colors().get("roofColor").map(|c| c.to_u32()),
        Some(0xcc9933)
    );
}

#[test]
fn orbit_damping_converges() {
    let (mut viewer, _host, mut surface) = mounted_yurt();
    let start = viewer.controls().azimuth();

    viewer.orbit(0.5, 0.0);
    let mut previous = start;
    for _ in 0..1000 {
        viewer.tick(0.016, &mut surface);
        let azimuth = viewer.controls().azimuth();
        assert!(azimuth >= previous);
        previous = azimuth;
    }

    assert!(viewer.controls().is_settled());
    assert!((viewer.controls().azimuth() - start - 0.5).abs() < 1e-4);
}

#[test]
fn pan_and_zoom_move_camera() {
    let (mut viewer, _host, mut surface) = mounted_yurt();
    let distance = viewer.controls().distance();

    viewer.zoom(0.2);
    viewer.pan(0.0, 0.1);
    for _ in 0..500 {
        viewer.tick(0.016, &mut surface);
    }

    assert!((viewer.controls().distance() - distance * 0.8).abs() < 1e-9);
    assert!(viewer.camera().target.y > 0.0);
    assert_eq!(viewer.camera().target, viewer.controls().target());
}

#[test]
fn frames_carry_scene_settings() {
    let (mut viewer, _host, mut surface) = mounted_yurt();
    viewer.tick(0.5, &mut surface);
    viewer.tick(0.25, &mut surface);

    let frame = surface.last_frame.unwrap();
    assert_eq!(frame.time, 0.75);
    assert_eq!(frame.background, viewer.config().background);
    assert!(frame.lighting.directional.is_some());
    assert!((frame.camera_position - DVec3::new(0.0, 5.0, 15.0)).length() < 1e-9);
    assert!(frame.triangle_count() > 0);
}
