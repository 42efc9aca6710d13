//! # Parts Yurt
//!
//! A yurt built from individual meshes, one named subtree per control panel
//! part, with the wall, roof, door and window materials exposed as colour
//! groups.

use super::shaded;
use crate::config::ViewerConfig;
use crate::error::SceneError;
use crate::graph::{SceneGraph, SceneNode};
use crate::lighting::Lighting;
use crate::viewer::Viewer;
use glam::{DQuat, DVec3};
use std::f64::consts::{FRAC_PI_4, PI, TAU};
use yurt_csg::{CsgError, Material, Shape, Texture, Transform};

/// Roof pole texture.
pub const POLE_TEXTURE: &str = "https://imgur.com/gallery/70s-style-wood-paneling-texture-olU7LPg";

const WALL_RADIUS: f64 = 4.9;
const LATTICE_COUNT: usize = 32;
const POLE_COUNT: usize = 60;
const WINDOW_COUNT: usize = 4;

/// Point every roof pole leans toward.
const POLE_APEX: DVec3 = DVec3::new(0.0, 6.0, 0.0);

/// Point on a horizontal circle, angle measured from +X toward +Z.
fn ring(angle: f64, radius: f64, y: f64) -> DVec3 {
    DVec3::new(angle.cos() * radius, y, angle.sin() * radius)
}

/// Builds the scene graph.
///
/// # Errors
///
/// Only if a primitive fails to tessellate.
pub fn scene() -> Result<SceneGraph, CsgError> {
    let mut graph = SceneGraph::new();
    add_walls(&mut graph)?;
    add_roof(&mut graph)?;
    add_door(&mut graph)?;
    add_windows(&mut graph)?;
    add_floor(&mut graph)?;
    Ok(graph)
}

fn add_walls(graph: &mut SceneGraph) -> Result<(), CsgError> {
    let wall = graph.add_material(Material::from_hex(0xffffff).double_sided());
    graph.add_to_group("wall", wall);
    graph.add_node(
        SceneNode::with_mesh(shaded(&Shape::open_cylinder(5.0, 4.8, 3.0, 32)?), wall)
            .named("walls")
            .with_transform(Transform::from_position(0.0, 1.5, 0.0)),
        None,
    );

    let knot = shaded(&Shape::sphere(0.05, 6, 6)?);
    let dark = graph.add_material(Material::from_hex(0x444444));
    let lattice = graph.add_node(SceneNode::new().named("lattice"), None);
    for i in 0..LATTICE_COUNT {
        let angle = i as f64 / LATTICE_COUNT as f64 * TAU;
        let position = ring(angle, WALL_RADIUS, 1.5);
        graph.add_node(
            SceneNode::with_mesh(knot.clone(), dark)
                .with_transform(Transform::IDENTITY.with_position(position)),
            Some(lattice),
        );
    }
    Ok(())
}

fn add_roof(graph: &mut SceneGraph) -> Result<(), CsgError> {
    let felt = graph.add_material(Material::from_hex(0xcc9933).with_opacity(0.8));
    graph.add_to_group("roof", felt);
    graph.add_node(
        SceneNode::with_mesh(shaded(&Shape::cone(5.0, 3.0, 32)?), felt)
            .named("roof")
            .with_transform(Transform::from_position(0.0, 4.5, 0.0)),
        None,
    );

    let steel = graph.add_material(Material::from_hex(0x666666));
    graph.add_node(
        SceneNode::with_mesh(shaded(&Shape::cylinder(0.5, 0.7, 0.3, 16)?), steel)
            .named("crown")
            .with_transform(Transform::from_position(0.0, 5.7, 0.0)),
        None,
    );

    let pole = shaded(&Shape::cylinder(0.05, 0.05, 5.66, 8)?);
    let wood = graph.add_material(
        Material::default()
            .with_roughness(0.8)
            .with_metalness(0.0)
            .with_texture(Texture::repeating(POLE_TEXTURE, 2.0, 2.0)),
    );
    let poles = graph.add_node(SceneNode::new().named("poles"), None);
    for i in 0..POLE_COUNT {
        let angle = i as f64 / POLE_COUNT as f64 * TAU;
        let position = ring(angle, 3.0, 4.17);
        let axis = (POLE_APEX - position).normalize();
        graph.add_node(
            SceneNode::with_mesh(pole.clone(), wood).with_transform(
                Transform::IDENTITY
                    .with_position(position)
                    .with_quat(DQuat::from_rotation_arc(DVec3::Y, axis)),
            ),
            Some(poles),
        );
    }
    Ok(())
}

fn add_door(graph: &mut SceneGraph) -> Result<(), CsgError> {
    let door = graph.add_node(SceneNode::new().named("door"), None);

    let frame = graph.add_material(Material::from_hex(0x663300));
    graph.add_to_group("door", frame);
    graph.add_node(
        SceneNode::with_mesh(shaded(&Shape::cuboid(1.1, 2.2, 0.2)?), frame)
            .named("doorFrame")
            .with_transform(Transform::from_position(0.0, 1.0, 4.95)),
        Some(door),
    );

    let glass = graph.add_material(Material::from_hex(0x99ccff).with_opacity(0.7));
    graph.add_to_group("window", glass);
    graph.add_node(
        SceneNode::with_mesh(shaded(&Shape::cuboid(0.8, 0.5, 0.01)?), glass)
            .named("doorWindow")
            .with_transform(Transform::from_position(0.0, 1.5, 5.06)),
        Some(door),
    );
    Ok(())
}

fn add_windows(graph: &mut SceneGraph) -> Result<(), CsgError> {
    let glass = graph.add_material(
        Material::from_hex(0x99ccff)
            .with_opacity(0.7)
            .double_sided(),
    );
    graph.add_to_group("window", glass);

    let pane = shaded(&Shape::plane(0.6, 0.6)?);
    let windows = graph.add_node(SceneNode::new().named("windows"), None);
    for i in 0..WINDOW_COUNT {
        let angle = i as f64 / WINDOW_COUNT as f64 * TAU + FRAC_PI_4;
        graph.add_node(
            SceneNode::with_mesh(pane.clone(), glass).with_transform(
                Transform::IDENTITY
                    .with_position(ring(angle, WALL_RADIUS, 1.5))
                    .with_rotation(DVec3::new(0.0, angle + PI, 0.0)),
            ),
            Some(windows),
        );
    }
    Ok(())
}

fn add_floor(graph: &mut SceneGraph) -> Result<(), CsgError> {
    let thickness = 0.2;
    let boards = graph.add_material(Material::from_hex(0x886644).double_sided());
    graph.add_node(
        SceneNode::with_mesh(shaded(&Shape::cylinder(4.8, 4.8, thickness, 32)?), boards)
            .named("floor")
            .with_transform(Transform::from_position(0.0, -thickness / 2.0, 0.0)),
        None,
    );
    Ok(())
}

/// Camera in front of the door, wide lens.
pub fn config() -> ViewerConfig {
    ViewerConfig::default()
}

/// Parts viewer showing the yurt.
pub fn viewer() -> Result<Viewer, SceneError> {
    Viewer::parts(scene()?, config(), Lighting::standard())
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::constants::PART_NAMES;

    #[test]
    fn test_every_part_is_named() {
        let graph = scene().unwrap();
        for part in PART_NAMES {
            assert!(graph.find(part).is_some(), "{part}");
        }
    }

    #[test]
    fn test_part_counts() {
        let graph = scene().unwrap();
        let count = |name: &str| graph.node(graph.find(name).unwrap()).unwrap().children().len();
        assert_eq!(count("lattice"), LATTICE_COUNT);
        assert_eq!(count("poles"), POLE_COUNT);
        assert_eq!(count("windows"), WINDOW_COUNT);
        assert_eq!(count("door"), 2);
    }

    #[test]
    fn test_poles_lean_toward_apex() {
        let graph = scene().unwrap();
        let poles = graph.node(graph.find("poles").unwrap()).unwrap();

        for &id in poles.children() {
            let world = graph.world_matrix(id);
            let base = world.transform_point3(DVec3::ZERO);
            let axis = world.transform_vector3(DVec3::Y).normalize();
            let to_apex = (POLE_APEX - base).normalize();
            assert!(axis.dot(to_apex) > 1.0 - 1e-9);
        }
    }

    #[test]
    fn test_window_group_covers_all_glass() {
        let graph = scene().unwrap();
        assert_eq!(graph.group("window").len(), 2);
        assert_eq!(graph.group("wall").len(), 1);
    }

    #[test]
    fn test_roof_is_translucent() {
        let graph = scene().unwrap();
        let roof = graph.node(graph.find("roof").unwrap()).unwrap();
        let material = graph.material(roof.materials[0]).unwrap();
        assert!(material.transparent);
        assert_eq!(material.opacity, 0.8);
    }
}
