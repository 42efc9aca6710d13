//! # CSG Ger
//!
//! A ger carved from primitives:
//!
//! ```text
//! ger (group)
//! ├── floor            base         flattened cylinder
//! ├── walls            addition     outerWall − innerWall
//! ├── pole1, pole2     addition     thin cylinders
//! ├── roof             addition     outer cone − inner cone
//! ├── toonoOpening     subtraction  crown hole
//! └── door             subtraction  box ∪ half-cylinder arch, wood
//! ```
//!
//! The door is the drag target; moving it moves the opening it cuts.

use crate::config::ViewerConfig;
use crate::error::SceneError;
use crate::lighting::Lighting;
use crate::viewer::Viewer;
use config::constants::{DEFAULT_RADIAL_SEGMENTS, SKY_BLUE};
use glam::DVec3;
use std::f64::consts::FRAC_PI_2;
use yurt_csg::{
    Color, CompositionNode, CompositionTree, CsgError, Material, Operation, Shape, Texture,
    Transform,
};

/// Name of the draggable door node.
pub const DOOR: &str = "door";

/// Door texture, tiled twice across.
pub const DOOR_TEXTURE: &str = "/door-texture.jpeg";

/// Initial door placement: rotated into the west wall.
pub fn door_transform() -> Transform {
    Transform::IDENTITY
        .with_position(DVec3::new(-5.0, -0.25, 0.0))
        .with_rotation(DVec3::new(0.0, FRAC_PI_2, 0.0))
        .with_scale(DVec3::new(1.2, 0.9, 1.2))
}

fn wood() -> Material {
    Material::new(Color::WHITE)
        .with_roughness(0.8)
        .with_metalness(0.05)
        .with_texture(Texture::repeating(DOOR_TEXTURE, 2.0, 1.0))
}

fn surface() -> Material {
    Material::default()
        .with_roughness(0.5)
        .with_metalness(0.1)
        .double_sided()
}

/// The ger composition tree.
///
/// # Errors
///
/// Only if a primitive fails to tessellate.
pub fn composition() -> Result<CompositionTree, CsgError> {
    let segments = DEFAULT_RADIAL_SEGMENTS;
    let unit_cylinder = Shape::cylinder(1.0, 1.0, 1.0, segments)?;
    let raised = Transform::from_position(0.0, 0.2, 0.0);
    let roof_height = Transform::from_position(0.0, 3.25, 0.0);

    let floor = CompositionNode::base(unit_cylinder.clone())
        .named("floor")
        .with_transform(
            Transform::from_position(0.0, -1.35, 0.0).with_scale(DVec3::new(5.0, 0.1, 5.0)),
        );

    let walls = CompositionNode::new(Operation::Addition)
        .named("walls")
        .with_children([
            CompositionNode::base(Shape::cylinder(5.0, 5.0, 3.0, segments)?)
                .named("outerWall")
                .with_transform(raised),
            CompositionNode::subtraction(Shape::cylinder(4.9, 4.9, 3.0, segments)?)
                .named("innerWall")
                .with_transform(raised),
        ]);

    let pole = |name: &str, z: f64| {
        CompositionNode::addition(unit_cylinder.clone())
            .named(name)
            .with_transform(
                Transform::from_position(0.0, 0.1, z).with_scale(DVec3::new(0.1, 3.0, 0.1)),
            )
    };

    let roof = CompositionNode::new(Operation::Addition)
        .named("roof")
        .with_children([
            CompositionNode::base(Shape::cone(5.0, 3.1, segments)?).with_transform(roof_height),
            CompositionNode::subtraction(Shape::cone(4.8, 3.1, segments)?)
                .with_transform(roof_height),
        ]);

    let toono = CompositionNode::subtraction(Shape::cylinder(1.0, 1.0, 0.6, segments)?)
        .named("toonoOpening")
        .with_transform(
            Transform::from_position(0.0, 4.0, 0.0).with_scale(DVec3::new(1.3, 3.2, 1.3)),
        );

    let door = CompositionNode::new(Operation::Subtraction)
        .named(DOOR)
        .with_transform(door_transform())
        .with_children([
            CompositionNode::base(Shape::cuboid(1.0, 1.0, 1.0)?)
                .with_transform(Transform::IDENTITY.with_scale(DVec3::new(1.0, 2.0, 1.0)))
                .with_material(wood()),
            CompositionNode::addition(Shape::cylinder(1.0, 1.0, 2.0, 20)?)
                .with_transform(
                    Transform::from_position(0.0, 1.0, 0.0)
                        .with_rotation(DVec3::new(FRAC_PI_2, 0.0, 0.0))
                        .with_uniform_scale(0.5),
                )
                .with_material(wood()),
        ]);

    let root = CompositionNode::group().named("ger").with_children([
        floor,
        walls,
        pole("pole1", -1.2),
        pole("pole2", 1.2),
        roof,
        toono,
        door,
    ]);

    Ok(CompositionTree::new(root).with_default_material(surface()))
}

/// Camera far to the west-south-west, narrow lens, sky background.
pub fn config() -> ViewerConfig {
    ViewerConfig {
        camera_position: DVec3::new(-45.0, 10.0, 15.0),
        fov: 35.0,
        background: Color::from_u32(SKY_BLUE),
        ..ViewerConfig::default()
    }
}

/// Procedural viewer showing the ger.
pub fn viewer() -> Result<Viewer, SceneError> {
    Viewer::procedural(composition()?, config(), Lighting::standard())
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::constants::MAX_INTERACTIVE_NODES;

    #[test]
    fn test_tree_is_interactive_size() {
        let tree = composition().unwrap();
        assert!(tree.root().node_count() <= MAX_INTERACTIVE_NODES);
        assert_eq!(tree.name(), "ger");
    }

    #[test]
    fn test_named_parts() {
        let tree = composition().unwrap();
        for name in ["floor", "walls", "pole1", "pole2", "roof", "toonoOpening", DOOR] {
            assert!(tree.find(name).is_some(), "{name}");
        }
    }

    #[test]
    fn test_config_is_valid() {
        assert!(config().validate().is_ok());
    }
}
