//! # glTF Asset Loading
//!
//! Builds a [`SceneGraph`] from `.gltf` JSON or `.glb` bytes.
//!
//! ## Scope
//!
//! - Default scene (or the first scene) and its node hierarchy
//! - Node names and decomposed TRS transforms
//! - Triangle primitives from embedded (`.glb` chunk or `data:` URI) buffers
//! - Base colour, roughness, metalness, opacity and base colour texture
//!   reference per material
//!
//! Buffers referenced by external URI are not fetched; their meshes load
//! without geometry. Material names become colour groups so pickers can
//! reach them.

use crate::error::SceneError;
use crate::graph::{MaterialId, NodeId, SceneGraph, SceneNode};
use base64::Engine;
use config::constants::MAX_ASSET_SIZE;
use glam::{DQuat, DVec3};
use std::sync::Arc;
use tracing::debug;
use yurt_csg::{Color, Material, Texture, Transform, Wrap};
use yurt_mesh::Mesh;

/// Parses a glTF asset into a scene graph.
///
/// # Errors
///
/// [`SceneError::AssetLoadFailure`] for oversized input, malformed glTF,
/// a missing scene or out-of-range indices.
pub fn load_gltf(bytes: &[u8]) -> Result<SceneGraph, SceneError> {
    if bytes.len() > MAX_ASSET_SIZE {
        return Err(SceneError::asset(format!(
            "asset is {} bytes, limit is {MAX_ASSET_SIZE}",
            bytes.len()
        )));
    }

    let gltf = gltf::Gltf::from_slice(bytes)?;
    let buffers = buffer_data(&gltf);
    let scene = gltf
        .default_scene()
        .or_else(|| gltf.scenes().next())
        .ok_or_else(|| SceneError::asset("asset contains no scene"))?;

    let mut graph = SceneGraph::new();
    let mut materials = MaterialCache::default();

    let mut stack: Vec<(gltf::Node, Option<NodeId>)> =
        scene.nodes().map(|node| (node, None)).collect();
    stack.reverse();

    while let Some((node, parent)) = stack.pop() {
        let mut scene_node = SceneNode::new().with_transform(node_transform(&node));
        scene_node.name = node.name().map(str::to_string);

        if let Some(mesh) = node.mesh() {
            let (geometry, slots) = read_mesh(&mesh, &buffers, &mut materials, &mut graph)?;
            if !geometry.is_empty() {
                scene_node.mesh = Some(Arc::new(geometry));
                scene_node.materials = slots;
            }
        }

        let id = graph.add_node(scene_node, parent);
        let first_child = stack.len();
        stack.extend(node.children().map(|child| (child, Some(id))));
        stack[first_child..].reverse();
    }

    debug!(
        nodes = graph.node_count(),
        materials = materials.ids.len(),
        "glTF asset loaded"
    );
    Ok(graph)
}

// =============================================================================
// BUFFERS
// =============================================================================

/// Resolves buffer bytes; `None` for external or truncated buffers.
fn buffer_data(gltf: &gltf::Gltf) -> Vec<Option<Vec<u8>>> {
    gltf.buffers()
        .map(|buffer| {
            let data = match buffer.source() {
                gltf::buffer::Source::Bin => gltf.blob.clone(),
                gltf::buffer::Source::Uri(uri) => decode_data_uri(uri),
            };
            match data {
                Some(bytes) if bytes.len() >= buffer.length() => Some(bytes),
                _ => {
                    debug!(buffer = buffer.index(), "Buffer unavailable; geometry skipped");
                    None
                }
            }
        })
        .collect()
}

fn decode_data_uri(uri: &str) -> Option<Vec<u8>> {
    let (_, payload) = uri.strip_prefix("data:")?.split_once(";base64,")?;
    base64::engine::general_purpose::STANDARD.decode(payload).ok()
}

// =============================================================================
// NODES
// =============================================================================

fn node_transform(node: &gltf::Node) -> Transform {
    let (translation, rotation, scale) = node.transform().decomposed();
    let [x, y, z, w] = rotation.map(f64::from);

    Transform::IDENTITY
        .with_position(DVec3::from_array(translation.map(f64::from)))
        .with_scale(DVec3::from_array(scale.map(f64::from)))
        .with_quat(DQuat::from_xyzw(x, y, z, w).normalize())
}

fn read_mesh(
    mesh: &gltf::Mesh,
    buffers: &[Option<Vec<u8>>],
    materials: &mut MaterialCache,
    graph: &mut SceneGraph,
) -> Result<(Mesh, Vec<MaterialId>), SceneError> {
    let mut out = Mesh::new();
    let mut slots: Vec<MaterialId> = Vec::new();

    for primitive in mesh.primitives() {
        if primitive.mode() != gltf::mesh::Mode::Triangles {
            debug!(mode = ?primitive.mode(), "Non-triangle primitive skipped");
            continue;
        }

        let reader = primitive.reader(|buffer| buffers.get(buffer.index())?.as_deref());
        let Some(positions) = reader.read_positions() else {
            continue;
        };

        let base = out.vertex_count() as u32;
        for [x, y, z] in positions {
            out.add_vertex(DVec3::new(f64::from(x), f64::from(y), f64::from(z)));
        }
        let count = out.vertex_count() as u32 - base;

        let indices: Vec<u32> = match reader.read_indices() {
            Some(indices) => indices.into_u32().collect(),
            None => (0..count).collect(),
        };
        if let Some(bad) = indices.iter().find(|&&i| i >= count) {
            return Err(SceneError::asset(format!(
                "mesh {:?} index {bad} exceeds {count} vertices",
                mesh.name().unwrap_or_default()
            )));
        }

        let id = materials.resolve(&primitive.material(), graph);
        let slot = match slots.iter().position(|&m| m == id) {
            Some(slot) => slot,
            None => {
                slots.push(id);
                slots.len() - 1
            }
        } as u32;

        for tri in indices.chunks_exact(3) {
            out.add_triangle_with_material(base + tri[0], base + tri[1], base + tri[2], slot);
        }
    }

    out.compute_normals();
    Ok((out, slots))
}

// =============================================================================
// MATERIALS
// =============================================================================

/// glTF material index → graph material; `None` is the glTF default.
#[derive(Default)]
struct MaterialCache {
    ids: Vec<(Option<usize>, MaterialId)>,
}

impl MaterialCache {
    fn resolve(&mut self, material: &gltf::Material, graph: &mut SceneGraph) -> MaterialId {
        let key = material.index();
        if let Some(&(_, id)) = self.ids.iter().find(|(k, _)| *k == key) {
            return id;
        }

        let id = graph.add_material(convert_material(material));
        if let Some(name) = material.name() {
            graph.add_to_group(name, id);
        }
        self.ids.push((key, id));
        id
    }
}

fn convert_material(material: &gltf::Material) -> Material {
    let pbr = material.pbr_metallic_roughness();
    let [r, g, b, a] = pbr.base_color_factor();

    let mut out = Material::new(Color::rgb(r, g, b))
        .with_roughness(f64::from(pbr.roughness_factor()))
        .with_metalness(f64::from(pbr.metallic_factor()));

    if material.alpha_mode() == gltf::material::AlphaMode::Blend {
        out = out.with_opacity(f64::from(a));
    }
    if material.double_sided() {
        out = out.double_sided();
    }

    if let Some(info) = pbr.base_color_texture() {
        let texture = info.texture();
        if let gltf::image::Source::Uri { uri, .. } = texture.source().source() {
            let sampler = texture.sampler();
            out = out.with_texture(Texture {
                source: uri.to_string(),
                wrap_s: convert_wrap(sampler.wrap_s()),
                wrap_t: convert_wrap(sampler.wrap_t()),
                repeat: [1.0, 1.0],
            });
        }
    }

    out
}

fn convert_wrap(mode: gltf::texture::WrappingMode) -> Wrap {
    match mode {
        gltf::texture::WrappingMode::ClampToEdge => Wrap::ClampToEdge,
        gltf::texture::WrappingMode::MirroredRepeat => Wrap::MirroredRepeat,
        gltf::texture::WrappingMode::Repeat => Wrap::Repeat,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WALLS: &str = include_str!("../tests/fixtures/walls.gltf");

    #[test]
    fn test_loads_named_hierarchy() {
        let graph = load_gltf(WALLS.as_bytes()).unwrap();

        let door = graph.find("door").unwrap();
        let frame = graph.find("frame").unwrap();
        assert_eq!(graph.node(frame).unwrap().parent(), Some(door));
        assert_eq!(graph.node_count(), 3);
    }

    #[test]
    fn test_keeps_document_order() {
        let graph = load_gltf(WALLS.as_bytes()).unwrap();

        let names: Vec<_> = graph
            .roots()
            .iter()
            .filter_map(|&id| graph.node(id)?.name.as_deref())
            .collect();
        assert_eq!(names, ["walls", "door"]);
        assert_eq!(graph.find("walls"), Some(graph.roots()[0]));
    }

    #[test]
    fn test_reads_geometry_and_material() {
        let graph = load_gltf(WALLS.as_bytes()).unwrap();
        let walls = graph.node(graph.find("walls").unwrap()).unwrap();

        let mesh = walls.mesh.as_ref().unwrap();
        assert_eq!(mesh.triangle_count(), 1);
        assert!(mesh.normals().is_some());

        let material = graph.material(walls.materials[0]).unwrap();
        assert_eq!(material.color.to_u32(), 0xffffff);
        assert_eq!(material.roughness, 0.5);
        assert_eq!(graph.group("wall"), walls.materials.as_slice());
    }

    #[test]
    fn test_reads_translation() {
        let graph = load_gltf(WALLS.as_bytes()).unwrap();
        let frame = graph.node(graph.find("frame").unwrap()).unwrap();
        assert_eq!(frame.transform.position, DVec3::new(0.0, 1.0, 4.95_f32 as f64));
    }

    #[test]
    fn test_garbage_is_load_failure() {
        assert!(matches!(
            load_gltf(b"not a gltf"),
            Err(SceneError::AssetLoadFailure { .. })
        ));
    }

    #[test]
    fn test_data_uri_decoding() {
        assert_eq!(
            decode_data_uri("data:application/octet-stream;base64,AQID"),
            Some(vec![1, 2, 3])
        );
        assert_eq!(decode_data_uri("walls.bin"), None);
    }
}
