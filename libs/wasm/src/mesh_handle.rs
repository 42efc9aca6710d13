//! # Mesh Handle
//!
//! WASM-friendly copy of one drawable that can be transferred to JavaScript.

use wasm_bindgen::prelude::*;
use yurt_scene::Drawable;

/// One drawable's buffers and materials.
///
/// # Example (JavaScript)
///
/// ```javascript
/// for (let i = 0; i < viewer.drawable_count(); i++) {
///   const handle = viewer.drawable(i);
///
///   const geometry = new THREE.BufferGeometry();
///   geometry.setAttribute('position', new THREE.BufferAttribute(handle.vertices(), 3));
///   geometry.setIndex(new THREE.BufferAttribute(handle.indices(), 1));
///
///   const groups = handle.groups();  // [start, count, slot, ...] in triangles
///   const colors = handle.colors();  // [r, g, b, opacity, ...] per slot
///   mesh.matrix.fromArray(handle.world());
/// }
/// ```
#[wasm_bindgen]
#[derive(Debug, Clone)]
pub struct MeshHandle {
    name: Option<String>,
    /// Column-major local-to-world matrix.
    world: Vec<f32>,
    /// Vertex positions as [x, y, z, x, y, z, ...]
    vertices: Vec<f32>,
    /// Triangle indices as [i0, i1, i2, i0, i1, i2, ...]
    indices: Vec<u32>,
    /// Optional vertex normals as [nx, ny, nz, ...]
    normals: Option<Vec<f32>>,
    /// Triangle runs as [start, count, slot, ...]
    groups: Vec<u32>,
    /// Material colours as [r, g, b, opacity, ...]
    colors: Vec<f32>,
    double_sided: Vec<bool>,
    textures: Vec<Option<String>>,
}

#[wasm_bindgen]
impl MeshHandle {
    #[wasm_bindgen(getter)]
    pub fn name(&self) -> Option<String> {
        self.name.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn vertex_count(&self) -> u32 {
        (self.vertices.len() / 3) as u32
    }

    #[wasm_bindgen(getter)]
    pub fn triangle_count(&self) -> u32 {
        (self.indices.len() / 3) as u32
    }

    /// Returns the local-to-world matrix as a Float32Array (column-major).
    pub fn world(&self) -> js_sys::Float32Array {
        js_sys::Float32Array::from(&self.world[..])
    }

    /// Returns the vertex positions as a Float32Array.
    pub fn vertices(&self) -> js_sys::Float32Array {
        js_sys::Float32Array::from(&self.vertices[..])
    }

    /// Returns the triangle indices as a Uint32Array.
    pub fn indices(&self) -> js_sys::Uint32Array {
        js_sys::Uint32Array::from(&self.indices[..])
    }

    /// Returns the vertex normals as a Float32Array, if available.
    pub fn normals(&self) -> Option<js_sys::Float32Array> {
        self.normals
            .as_ref()
            .map(|n| js_sys::Float32Array::from(&n[..]))
    }

    /// Returns the material groups as a Uint32Array of
    /// `[start, count, slot]` triples.
    pub fn groups(&self) -> js_sys::Uint32Array {
        js_sys::Uint32Array::from(&self.groups[..])
    }

    /// Returns the material colours as a Float32Array of
    /// `[r, g, b, opacity]` per slot.
    pub fn colors(&self) -> js_sys::Float32Array {
        js_sys::Float32Array::from(&self.colors[..])
    }

    pub fn is_double_sided(&self, slot: usize) -> bool {
        self.double_sided.get(slot).copied().unwrap_or(false)
    }

    /// Texture source of a material slot.
    pub fn texture(&self, slot: usize) -> Option<String> {
        self.textures.get(slot).cloned().flatten()
    }

    #[wasm_bindgen(getter)]
    pub fn material_count(&self) -> usize {
        self.double_sided.len()
    }
}

impl MeshHandle {
    /// Flattens a drawable into GPU-ready buffers.
    pub fn from_drawable(drawable: &Drawable) -> Self {
        let mesh = &drawable.mesh;

        let groups = mesh
            .material_groups()
            .into_iter()
            .flat_map(|(start, count, slot)| [start as u32, count as u32, slot])
            .collect();

        let colors = drawable
            .materials
            .iter()
            .flat_map(|m| {
                let [r, g, b] = m.color.to_array();
                [r, g, b, m.opacity as f32]
            })
            .collect();

        Self {
            name: drawable.name.clone(),
            world: drawable.world.to_cols_array().map(|v| v as f32).to_vec(),
            vertices: mesh.vertices_f32(),
            indices: mesh.indices_u32(),
            normals: mesh.normals_f32(),
            groups,
            colors,
            double_sided: drawable.materials.iter().map(|m| m.double_sided).collect(),
            textures: drawable
                .materials
                .iter()
                .map(|m| m.texture.as_ref().map(|t| t.source.clone()))
                .collect(),
        }
    }

    pub fn vertex_data(&self) -> &[f32] {
        &self.vertices
    }

    pub fn index_data(&self) -> &[u32] {
        &self.indices
    }

    pub fn color_data(&self) -> &[f32] {
        &self.colors
    }

    pub fn world_data(&self) -> &[f32] {
        &self.world
    }
}
